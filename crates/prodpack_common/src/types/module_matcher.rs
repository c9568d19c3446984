use std::fmt::Display;

use regex::Regex;
use schemars::{JsonSchema, r#gen::SchemaGenerator, schema::Schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

/// A regular expression tested against module or asset paths.
///
/// Serialized as its pattern string. Case-insensitive matchers carry an inline
/// `(?i)` flag so the flag survives a round trip.
#[derive(Debug, Clone)]
pub struct ModuleMatcher(Regex);

impl ModuleMatcher {
  pub fn new(pattern: &str) -> Result<Self, regex::Error> {
    Regex::new(pattern).map(Self)
  }

  pub fn case_insensitive(pattern: &str) -> Result<Self, regex::Error> {
    // Builder flags are not visible through `Regex::as_str`.
    Regex::new(&format!("(?i){pattern}")).map(Self)
  }

  pub fn as_str(&self) -> &str {
    self.0.as_str()
  }

  /// Paths are compared with forward slashes regardless of platform.
  pub fn is_match(&self, path: &str) -> bool {
    if path.contains('\\') {
      self.0.is_match(&path.replace('\\', "/"))
    } else {
      self.0.is_match(path)
    }
  }
}

impl From<Regex> for ModuleMatcher {
  fn from(regex: Regex) -> Self {
    Self(regex)
  }
}

impl PartialEq for ModuleMatcher {
  fn eq(&self, other: &Self) -> bool {
    self.as_str() == other.as_str()
  }
}

impl Eq for ModuleMatcher {}

impl Display for ModuleMatcher {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "/{}/", self.as_str())
  }
}

impl Serialize for ModuleMatcher {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for ModuleMatcher {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let pattern = String::deserialize(deserializer)?;
    Self::new(&pattern).map_err(D::Error::custom)
  }
}

impl JsonSchema for ModuleMatcher {
  fn schema_name() -> String {
    "ModuleMatcher".to_string()
  }

  fn json_schema(generator: &mut SchemaGenerator) -> Schema {
    <String as JsonSchema>::json_schema(generator)
  }
}

#[test]
fn test_module_matcher() {
  let vendor = ModuleMatcher::new("node_modules").unwrap();
  assert!(vendor.is_match("/project/node_modules/react/index.js"));
  assert!(vendor.is_match(r"C:\project\node_modules\react\index.js"));
  assert!(!vendor.is_match("/project/src/index.js"));

  let images = ModuleMatcher::case_insensitive(r"\.(jpe?g|png|gif|svg)$").unwrap();
  assert!(images.is_match("assets/LOGO.PNG"));
  assert!(images.is_match("assets/photo.jpeg"));
  assert!(!images.is_match("assets/logo.png.map"));
  assert_eq!(images.to_string(), r"/(?i)\.(jpe?g|png|gif|svg)$/");
}

#[test]
fn test_module_matcher_serde() {
  let images = ModuleMatcher::case_insensitive(r"\.(png|svg)$").unwrap();
  let json = serde_json::to_string(&images).unwrap();
  assert_eq!(json, r#""(?i)\\.(png|svg)$""#);

  let decoded: ModuleMatcher = serde_json::from_str(&json).unwrap();
  assert_eq!(decoded, images);
  assert!(decoded.is_match("A.PNG"));

  assert!(serde_json::from_str::<ModuleMatcher>(r#""(unclosed""#).is_err());
}
