use std::path::PathBuf;

use prodpack_utils::indexmap::FxIndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
  /// Suffixes tried, in order, for extensionless requests.
  pub extensions: Vec<String>,
  /// Directories searched, in order, for bare requests.
  pub modules: Vec<PathBuf>,
  pub alias: FxIndexMap<String, PathBuf>,
}

impl ResolveOptions {
  /// Rewrites `request` through the first alias that claims it.
  ///
  /// An alias claims the request when it equals it or is its first path
  /// segment. A key ending in `$` only claims an exact match.
  pub fn apply_alias(&self, request: &str) -> Option<PathBuf> {
    self.alias.iter().find_map(|(key, target)| {
      if let Some(exact) = key.strip_suffix('$') {
        return (request == exact).then(|| target.clone());
      }
      if request == key {
        return Some(target.clone());
      }
      request.strip_prefix(key.as_str())?.strip_prefix('/').map(|rest| target.join(rest))
    })
  }

  pub fn has_extension(&self, path: &str) -> bool {
    self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
  }

  /// `request` followed by `request` with each extension appended, the order
  /// a resolver probes the file system in.
  pub fn candidates(&self, request: &str) -> Vec<String> {
    let mut candidates = Vec::with_capacity(self.extensions.len() + 1);
    candidates.push(request.to_string());
    if !self.has_extension(request) {
      candidates.extend(self.extensions.iter().map(|ext| format!("{request}{ext}")));
    }
    candidates
  }
}

#[test]
fn test_apply_alias() {
  use sugar_path::SugarPath;

  let mut options = ResolveOptions::default();
  options.alias.insert("styles".to_string(), PathBuf::from("/project/styles"));
  options.alias.insert("config$".to_string(), PathBuf::from("/project/config/index.js"));

  let resolved = options.apply_alias("styles/base.scss").unwrap();
  assert_eq!(resolved.to_slash_lossy(), "/project/styles/base.scss");
  assert_eq!(options.apply_alias("styles").unwrap().to_slash_lossy(), "/project/styles");
  assert_eq!(options.apply_alias("config").unwrap().to_slash_lossy(), "/project/config/index.js");

  assert!(options.apply_alias("config/dev").is_none());
  assert!(options.apply_alias("stylesheets/a.css").is_none());
  assert!(options.apply_alias("./styles/a.css").is_none());
}

#[test]
fn test_candidates() {
  let options = ResolveOptions {
    extensions: vec![".js".to_string(), ".jsx".to_string()],
    ..Default::default()
  };
  assert_eq!(options.candidates("./app/index"), ["./app/index", "./app/index.js", "./app/index.jsx"]);
  assert_eq!(options.candidates("./app/index.jsx"), ["./app/index.jsx"]);
  assert!(!options.has_extension("./app/index.ts"));
}
