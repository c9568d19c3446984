use std::fmt;

use prodpack_utils::indexmap::FxIndexMap;
use schemars::JsonSchema;
use serde::{
  Deserialize, Deserializer, Serialize,
  de::{Error as _, MapAccess, Visitor},
};

/// Named bundles and the modules each one starts from, in declaration order.
///
/// Names are unique. Decoding rejects a document that repeats a name instead of
/// letting the last occurrence win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct EntryPoints(FxIndexMap<String, Vec<String>>);

impl EntryPoints {
  /// Declares `name`, returning the modules it previously pointed at.
  pub fn insert<I, S>(&mut self, name: impl Into<String>, modules: I) -> Option<Vec<String>>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.0.insert(name.into(), modules.into_iter().map(Into::into).collect())
  }

  pub fn get(&self, name: &str) -> Option<&[String]> {
    self.0.get(name).map(Vec::as_slice)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.0.iter().map(|(name, modules)| (name.as_str(), modules.as_slice()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<'de> Deserialize<'de> for EntryPoints {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct EntryPointsVisitor;

    impl<'de> Visitor<'de> for EntryPointsVisitor {
      type Value = EntryPoints;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from entry names to module lists")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = FxIndexMap::default();
        while let Some((name, modules)) = access.next_entry::<String, Vec<String>>()? {
          if entries.contains_key(&name) {
            return Err(A::Error::custom(format!("duplicate entry point `{name}`")));
          }
          entries.insert(name, modules);
        }
        Ok(EntryPoints(entries))
      }
    }

    deserializer.deserialize_map(EntryPointsVisitor)
  }
}

#[test]
fn test_entry_points_keep_order() {
  let mut entry = EntryPoints::default();
  assert!(entry.insert("app", ["babel-polyfill", "./app/index.jsx"]).is_none());
  assert!(entry.insert("admin", ["./admin/index.jsx"]).is_none());

  assert_eq!(entry.names().collect::<Vec<_>>(), ["app", "admin"]);
  assert_eq!(entry.get("app"), Some(["babel-polyfill".to_string(), "./app/index.jsx".to_string()].as_slice()));

  let previous = entry.insert("app", ["./app/main.jsx"]);
  assert_eq!(previous.map(|modules| modules.len()), Some(2));
  assert_eq!(entry.len(), 2);
}

#[test]
fn test_entry_points_reject_duplicate_names() {
  let decoded: EntryPoints = serde_json::from_str(r#"{"app":["./a"],"admin":["./b"]}"#).unwrap();
  assert_eq!(decoded.names().collect::<Vec<_>>(), ["app", "admin"]);

  let error = serde_json::from_str::<EntryPoints>(r#"{"app":["./a"],"app":["./b"]}"#).unwrap_err();
  assert!(error.to_string().contains("duplicate entry point `app`"));
}
