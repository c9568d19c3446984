use std::path::Path;

use prodpack_common::EnvFileOptions;
use prodpack_error::ConfigDiagnostic;
use prodpack_utils::indexmap::FxIndexMap;

/// Reads the dotenv file named by `options` relative to `root`.
///
/// With `systemvars` the process environment is layered on top, so a variable
/// set in the shell overrides the file.
///
/// Values go through `dotenvy`, which expands `$VAR` and `${VAR}` in unquoted
/// and double-quoted values. A value that must keep a literal `$` is written in
/// single quotes (`SECRET='pa$HOME'`).
pub fn load_env_file(
  options: &EnvFileOptions,
  root: &Path,
) -> Result<FxIndexMap<String, String>, ConfigDiagnostic> {
  let path = root.join(&options.path);
  let to_diagnostic =
    |error: dotenvy::Error| ConfigDiagnostic::EnvFile { path: path.clone(), reason: error.to_string() };

  let mut vars = FxIndexMap::default();
  for item in dotenvy::from_path_iter(&path).map_err(to_diagnostic)? {
    let (key, value) = item.map_err(to_diagnostic)?;
    vars.insert(key, value);
  }
  tracing::debug!(path = %path.display(), count = vars.len(), "loaded env file");

  if options.systemvars {
    let system = std::env::vars_os()
      .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
    vars.extend(system);
  }

  Ok(vars)
}

/// `process.env.KEY` replacements for every variable, values as JS string
/// literals.
pub fn env_definitions(vars: &FxIndexMap<String, String>) -> FxIndexMap<String, String> {
  vars
    .iter()
    .map(|(key, value)| {
      let literal = serde_json::Value::String(value.clone()).to_string();
      (format!("process.env.{key}"), literal)
    })
    .collect()
}

#[test]
fn test_load_env_file_in_order() {
  let root = tempfile::tempdir().unwrap();
  std::fs::create_dir_all(root.path().join("config/env")).unwrap();
  std::fs::write(
    root.path().join("config/env/prod.env"),
    "# production\nAPI_URL=https://api.example.com\nFEATURE_FLAGS=\"a,b\"\n",
  )
  .unwrap();

  let options = EnvFileOptions { path: "config/env/prod.env".to_string(), systemvars: false };
  let vars = load_env_file(&options, root.path()).unwrap();
  assert_eq!(vars.keys().collect::<Vec<_>>(), ["API_URL", "FEATURE_FLAGS"]);
  assert_eq!(vars["FEATURE_FLAGS"], "a,b");

  let definitions = env_definitions(&vars);
  assert_eq!(definitions["process.env.API_URL"], "\"https://api.example.com\"");
}

#[test]
fn test_load_env_file_dollar_values() {
  let root = tempfile::tempdir().unwrap();
  std::fs::write(
    root.path().join("prod.env"),
    "PRODPACK_TEST_USER=ada\nGREETING=hi-$PRODPACK_TEST_USER\nSECRET='pa$HOME'\n",
  )
  .unwrap();

  let options = EnvFileOptions { path: "prod.env".to_string(), systemvars: false };
  let vars = load_env_file(&options, root.path()).unwrap();
  assert_eq!(vars["SECRET"], "pa$HOME");
  assert_eq!(vars["GREETING"], "hi-ada");
  assert_eq!(env_definitions(&vars)["process.env.SECRET"], "\"pa$HOME\"");
}

#[test]
fn test_system_variables_override_the_file() {
  let root = tempfile::tempdir().unwrap();
  std::fs::write(root.path().join("prod.env"), "PRODPACK_TEST_OVERRIDE=file\nPRODPACK_TEST_ONLY_FILE=1\n")
    .unwrap();
  std::env::set_var("PRODPACK_TEST_OVERRIDE", "shell");

  let options = EnvFileOptions { path: "prod.env".to_string(), systemvars: true };
  let vars = load_env_file(&options, root.path()).unwrap();
  assert_eq!(vars["PRODPACK_TEST_OVERRIDE"], "shell");
  assert_eq!(vars["PRODPACK_TEST_ONLY_FILE"], "1");

  let without_system = load_env_file(&EnvFileOptions { systemvars: false, ..options }, root.path()).unwrap();
  assert_eq!(without_system["PRODPACK_TEST_OVERRIDE"], "file");
}

#[test]
fn test_missing_env_file() {
  let root = tempfile::tempdir().unwrap();
  let options = EnvFileOptions { path: "config/env/prod.env".to_string(), systemvars: true };
  let error = load_env_file(&options, root.path()).unwrap_err();
  assert!(matches!(&error, ConfigDiagnostic::EnvFile { path, .. } if path.ends_with("config/env/prod.env")));
}
