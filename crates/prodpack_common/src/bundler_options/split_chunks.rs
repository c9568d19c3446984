use std::cmp::Reverse;

use prodpack_utils::indexmap::FxIndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ModuleMatcher;

/// Which chunks a cache group may pull modules out of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChunkScope {
  All,
  #[default]
  Async,
  Initial,
}

/// How the chunk a module currently lives in gets loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOrigin {
  Initial,
  Async,
}

impl ChunkScope {
  #[inline]
  pub fn admits(self, origin: ChunkOrigin) -> bool {
    match self {
      Self::All => true,
      Self::Async => origin == ChunkOrigin::Async,
      Self::Initial => origin == ChunkOrigin::Initial,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub test: Option<ModuleMatcher>,
  #[serde(default)]
  pub chunks: ChunkScope,
  #[serde(default)]
  pub priority: i32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub min_chunks: Option<u32>,
  #[serde(default)]
  pub reuse_existing_chunk: bool,
  #[serde(default)]
  pub enforce: bool,
}

impl CacheGroup {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      test: None,
      chunks: ChunkScope::default(),
      priority: 0,
      min_chunks: None,
      reuse_existing_chunk: false,
      enforce: false,
    }
  }

  /// Number of chunks that must share a module before it moves here.
  pub fn min_chunks(&self) -> u32 {
    self.min_chunks.unwrap_or(1)
  }

  pub fn accepts(&self, module_path: &str, shared_references: u32, origin: ChunkOrigin) -> bool {
    self.chunks.admits(origin)
      && shared_references >= self.min_chunks()
      && self.test.as_ref().is_none_or(|test| test.is_match(module_path))
  }
}

/// A cache group slot. `false` switches off a group the bundler would
/// otherwise provide under that key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CacheGroupEntry {
  Toggle(bool),
  Group(CacheGroup),
}

impl CacheGroupEntry {
  pub fn as_group(&self) -> Option<&CacheGroup> {
    match self {
      Self::Group(group) => Some(group),
      Self::Toggle(_) => None,
    }
  }

  pub fn is_disabled(&self) -> bool {
    matches!(self, Self::Toggle(false))
  }
}

impl From<CacheGroup> for CacheGroupEntry {
  fn from(group: CacheGroup) -> Self {
    Self::Group(group)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunksOptions {
  pub cache_groups: FxIndexMap<String, CacheGroupEntry>,
}

impl SplitChunksOptions {
  pub fn groups(&self) -> impl Iterator<Item = (&str, &CacheGroup)> {
    self.cache_groups.iter().filter_map(|(key, entry)| Some((key.as_str(), entry.as_group()?)))
  }

  /// Keys switched off with `false`.
  pub fn disabled(&self) -> impl Iterator<Item = &str> {
    self.cache_groups.iter().filter(|(_, entry)| entry.is_disabled()).map(|(key, _)| key.as_str())
  }

  /// Groups from highest to lowest priority. Equal priorities keep their
  /// declaration order.
  pub fn groups_by_priority(&self) -> Vec<(&str, &CacheGroup)> {
    let mut groups = self.groups().collect::<Vec<_>>();
    groups.sort_by_key(|(_, group)| Reverse(group.priority));
    groups
  }

  /// The group a module moves into, if any claims it.
  pub fn select(
    &self,
    module_path: &str,
    shared_references: u32,
    origin: ChunkOrigin,
  ) -> Option<(&str, &CacheGroup)> {
    self
      .groups_by_priority()
      .into_iter()
      .find(|(_, group)| group.accepts(module_path, shared_references, origin))
  }
}

#[cfg(test)]
fn fixture() -> SplitChunksOptions {
  let mut options = SplitChunksOptions::default();
  options.cache_groups.insert("default".to_string(), CacheGroupEntry::Toggle(false));
  options.cache_groups.insert(
    "common".to_string(),
    CacheGroup {
      chunks: ChunkScope::All,
      priority: 10,
      min_chunks: Some(2),
      reuse_existing_chunk: true,
      enforce: true,
      ..CacheGroup::named("common")
    }
    .into(),
  );
  options.cache_groups.insert(
    "vendor".to_string(),
    CacheGroup {
      test: Some(ModuleMatcher::new("node_modules").unwrap()),
      chunks: ChunkScope::All,
      priority: 20,
      ..CacheGroup::named("vendor")
    }
    .into(),
  );
  options
}

#[test]
fn test_highest_priority_wins() {
  let options = fixture();
  let keys = options.groups_by_priority().into_iter().map(|(key, _)| key).collect::<Vec<_>>();
  assert_eq!(keys, ["vendor", "common"]);

  // Shared by three chunks, matches both groups.
  let (key, group) = options.select("/p/node_modules/react/index.js", 3, ChunkOrigin::Initial).unwrap();
  assert_eq!(key, "vendor");
  assert_eq!(group.name.as_deref(), Some("vendor"));

  let (key, _) = options.select("/p/src/util.js", 2, ChunkOrigin::Async).unwrap();
  assert_eq!(key, "common");
}

#[test]
fn test_min_chunks_and_scope_gate_selection() {
  let options = fixture();
  assert!(options.select("/p/src/util.js", 1, ChunkOrigin::Initial).is_none());

  let mut async_only = CacheGroup::named("lazy");
  async_only.chunks = ChunkScope::Async;
  assert!(async_only.accepts("/p/src/a.js", 1, ChunkOrigin::Async));
  assert!(!async_only.accepts("/p/src/a.js", 1, ChunkOrigin::Initial));
}

#[test]
fn test_equal_priorities_fall_back_to_declaration_order() {
  let mut options = SplitChunksOptions::default();
  options.cache_groups.insert("first".to_string(), CacheGroup::named("first").into());
  options.cache_groups.insert("second".to_string(), CacheGroup::named("second").into());

  let (key, _) = options.select("/p/src/a.js", 1, ChunkOrigin::Async).unwrap();
  assert_eq!(key, "first");
}

#[test]
fn test_disabled_slots_round_trip() {
  let options = fixture();
  assert_eq!(options.disabled().collect::<Vec<_>>(), ["default"]);

  let json = serde_json::to_value(&options).unwrap();
  assert_eq!(json["cacheGroups"]["default"], serde_json::Value::Bool(false));
  assert_eq!(json["cacheGroups"]["common"]["minChunks"], 2);
  assert_eq!(json["cacheGroups"]["vendor"]["test"], "node_modules");
  assert!(json["cacheGroups"]["vendor"].get("minChunks").is_none());

  let decoded: SplitChunksOptions = serde_json::from_value(json).unwrap();
  assert_eq!(decoded, options);
}
