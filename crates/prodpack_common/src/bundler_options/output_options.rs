use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{FilenameRenderContext, FilenameTemplate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
  pub path: PathBuf,
  pub public_path: String,
  pub filename: FilenameTemplate,
}

impl OutputOptions {
  /// File name of the chunk `name` whose content hashed to `chunk_hash`.
  pub fn chunk_filename(&self, name: &str, chunk_hash: &str) -> String {
    self.filename.render(&FilenameRenderContext {
      name: Some(name),
      chunk_hash: Some(chunk_hash),
      content_hash: Some(chunk_hash),
      ..Default::default()
    })
  }

  /// Absolute location of a chunk written under `path`.
  pub fn chunk_path(&self, name: &str, chunk_hash: &str) -> PathBuf {
    self.path.join(self.chunk_filename(name, chunk_hash))
  }

  /// URL the chunk is served from.
  pub fn chunk_url(&self, name: &str, chunk_hash: &str) -> String {
    let filename = self.chunk_filename(name, chunk_hash);
    if self.public_path.is_empty() || self.public_path.ends_with('/') {
      format!("{}{filename}", self.public_path)
    } else {
      format!("{}/{filename}", self.public_path)
    }
  }
}

#[test]
fn test_chunk_locations() {
  use sugar_path::SugarPath;

  let output = OutputOptions {
    path: PathBuf::from("/project/public"),
    public_path: "/".to_string(),
    filename: FilenameTemplate::new("[name].[chunkhash].js"),
  };
  assert_eq!(output.chunk_filename("app", "abc123"), "app.abc123.js");
  assert_eq!(output.chunk_path("app", "abc123").to_slash_lossy(), "/project/public/app.abc123.js");
  assert_eq!(output.chunk_url("vendor", "ff00"), "/vendor.ff00.js");

  let cdn = OutputOptions { public_path: "https://cdn.example.com/static".to_string(), ..output };
  assert_eq!(cdn.chunk_url("app", "abc123"), "https://cdn.example.com/static/app.abc123.js");
}
