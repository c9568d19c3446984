#[cfg(test)]
use std::path::Path;

use itertools::Itertools;
use prodpack_common::{BundleConfig, FilenameTemplate, Placeholder, PluginKind};
use prodpack_error::{BuildError, BuildResult, ConfigDiagnostic};
use prodpack_utils::indexmap::FxIndexMap;

/// Pairs of plugins whose relative order is load bearing, earlier first.
const ORDERED_PLUGINS: &[(PluginKind, PluginKind)] =
  &[(PluginKind::ExtractStyles, PluginKind::CopyAssets)];

/// Checks the shape of `config` before it is handed to the bundler and
/// reports every violation at once.
pub fn check_config(config: &BundleConfig) -> BuildResult<()> {
  let mut errors = BuildError(vec![]);

  check_entries(config, &mut errors);

  check_filename(&mut errors, "output.filename", &config.output.filename);
  if let Some(extract_styles) = config.extract_styles() {
    check_filename(&mut errors, "plugins.extract-styles.filename", &extract_styles.filename);
  }

  check_cache_groups(config, &mut errors);
  check_plugins(config, &mut errors);

  tracing::debug!(problems = errors.len(), "checked bundle configuration");
  errors.into_result()
}

fn check_entries(config: &BundleConfig, errors: &mut BuildError) {
  if config.entry.is_empty() {
    errors.push(ConfigDiagnostic::EmptyEntries.into());
  }
  for (name, modules) in config.entry.iter() {
    if modules.is_empty() {
      errors.push(ConfigDiagnostic::EmptyEntry { name: name.to_string() }.into());
    }
  }
}

fn check_filename(errors: &mut BuildError, field: &str, template: &FilenameTemplate) {
  if template.has_placeholder(Placeholder::Name) || template.has_hash_placeholder() {
    return;
  }
  errors.push(
    ConfigDiagnostic::MissingPlaceholder {
      field: field.to_string(),
      template: template.to_string(),
      expected: [Placeholder::Name, Placeholder::ChunkHash, Placeholder::ContentHash, Placeholder::Hash]
        .map(Placeholder::as_str)
        .join(", "),
    }
    .into(),
  );
}

fn check_cache_groups(config: &BundleConfig, errors: &mut BuildError) {
  let mut by_priority: FxIndexMap<i32, &str> = FxIndexMap::default();
  for (key, group) in config.optimization.split_chunks.groups() {
    if group.name.as_deref().is_some_and(str::is_empty) {
      errors.push(ConfigDiagnostic::EmptyCacheGroupName { key: key.to_string() }.into());
    }
    if let Some(first) = by_priority.get(&group.priority) {
      errors.push(
        ConfigDiagnostic::AmbiguousPriority {
          first: (*first).to_string(),
          second: key.to_string(),
          priority: group.priority,
        }
        .into(),
      );
    } else {
      by_priority.insert(group.priority, key);
    }
  }
}

fn check_plugins(config: &BundleConfig, errors: &mut BuildError) {
  for kind in config.plugin_kinds().filter(|kind| kind.is_singleton()).duplicates() {
    errors.push(ConfigDiagnostic::DuplicatePlugin { kind: kind.to_string() }.into());
  }

  for &(before, after) in ORDERED_PLUGINS {
    let (Some((before_index, _)), Some((after_index, _))) =
      (config.plugin(before), config.plugin(after))
    else {
      continue;
    };
    if before_index > after_index {
      errors.push(
        ConfigDiagnostic::PluginOrder { before: before.to_string(), after: after.to_string() }.into(),
      );
    }
  }
}

#[cfg(test)]
fn diagnostics(config: &BundleConfig) -> Vec<ConfigDiagnostic> {
  let errors = check_config(config).unwrap_err();
  assert_eq!(errors.diagnostics().count(), errors.len());
  errors.diagnostics().cloned().collect()
}

#[test]
fn test_check_production_config() {
  let config = crate::production_config(Path::new("/project"));
  assert!(check_config(&config).is_ok());
}

#[test]
fn test_check_reports_every_problem() {
  use prodpack_common::{CacheGroup, CacheGroupEntry, CleanOutputOptions, PluginDirective};

  let mut config = crate::production_config(Path::new("/project"));
  config.entry = Default::default();
  config.output.filename = FilenameTemplate::new("bundle.js");
  config.optimization.split_chunks.cache_groups.insert(
    "styles".to_string(),
    CacheGroupEntry::Group(CacheGroup { priority: 20, ..CacheGroup::named("") }),
  );
  config.plugins.push(PluginDirective::CleanOutput(CleanOutputOptions::default()));

  assert_eq!(
    diagnostics(&config),
    [
      ConfigDiagnostic::EmptyEntries,
      ConfigDiagnostic::MissingPlaceholder {
        field: "output.filename".to_string(),
        template: "bundle.js".to_string(),
        expected: "[name], [chunkhash], [contenthash], [hash]".to_string(),
      },
      ConfigDiagnostic::EmptyCacheGroupName { key: "styles".to_string() },
      ConfigDiagnostic::AmbiguousPriority {
        first: "vendor".to_string(),
        second: "styles".to_string(),
        priority: 20,
      },
      ConfigDiagnostic::DuplicatePlugin { kind: "clean-output".to_string() },
    ]
  );
}

#[test]
fn test_check_style_extraction_precedes_asset_copy() {
  use prodpack_common::PluginDirective;

  let mut config = crate::production_config(Path::new("/project"));
  let extract_index = config
    .plugins
    .iter()
    .position(|plugin| matches!(plugin, PluginDirective::ExtractStyles(_)))
    .unwrap();
  let extract = config.plugins.remove(extract_index);
  config.plugins.push(extract);

  assert_eq!(
    diagnostics(&config),
    [ConfigDiagnostic::PluginOrder {
      before: "extract-styles".to_string(),
      after: "copy-assets".to_string()
    }]
  );
}

#[test]
fn test_check_missing_placeholder_message() {
  let mut config = crate::production_config(Path::new("/project"));
  config.output.filename = FilenameTemplate::new("bundle.js");
  let errors = check_config(&config).unwrap_err();
  assert_eq!(
    errors.to_string(),
    "Filename template `bundle.js` of `output.filename` needs one of [name], [chunkhash], [contenthash], [hash]"
  );
}
