use std::path::Path;

use prodpack_common::BundleConfig;
use prodpack_error::{BuildResult, ConfigDiagnostic};

/// Decodes a JSON-serialized [`BundleConfig`].
pub fn load_config_file(path: &Path) -> BuildResult<BundleConfig> {
  let invalid = |reason: String| ConfigDiagnostic::InvalidConfigFile { path: path.to_path_buf(), reason };

  let source = std::fs::read_to_string(path).map_err(|error| invalid(error.to_string()))?;
  let config = serde_json::from_str(&source).map_err(|error| invalid(error.to_string()))?;
  tracing::debug!(path = %path.display(), "loaded bundle configuration");
  Ok(config)
}

#[test]
fn test_load_config_file() {
  let dir = tempfile::tempdir().unwrap();
  let config = crate::production_config(Path::new("/project"));
  let path = dir.path().join("bundle.json");
  std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

  assert_eq!(load_config_file(&path).unwrap(), config);
}

#[test]
fn test_load_config_file_rejects_invalid_documents() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("bundle.json");
  std::fs::write(&path, r#"{"mode":"staging"}"#).unwrap();

  let errors = load_config_file(&path).unwrap_err();
  assert!(matches!(
    errors.diagnostics().next(),
    Some(ConfigDiagnostic::InvalidConfigFile { reason, .. }) if reason.contains("staging")
  ));

  assert!(load_config_file(&dir.path().join("missing.json")).is_err());
}
