use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigDiagnostic {
  #[error("No entry points are declared")]
  EmptyEntries,

  #[error("Entry point `{name}` has no modules")]
  EmptyEntry { name: String },

  #[error("Filename template `{template}` of `{field}` needs one of {expected}")]
  MissingPlaceholder { field: String, template: String, expected: String },

  #[error("Cache group `{key}` has an empty name")]
  EmptyCacheGroupName { key: String },

  #[error("Cache groups `{first}` and `{second}` share priority {priority}")]
  AmbiguousPriority { first: String, second: String, priority: i32 },

  #[error("Plugin `{kind}` is declared more than once")]
  DuplicatePlugin { kind: String },

  #[error("Plugin `{before}` must be declared before `{after}`")]
  PluginOrder { before: String, after: String },

  #[error("Failed to load env file {}: {reason}", path.display())]
  EnvFile { path: PathBuf, reason: String },

  #[error("Invalid configuration in {}: {reason}", path.display())]
  InvalidConfigFile { path: PathBuf, reason: String },
}
