use std::{fmt::Display, sync::LazyLock};

use regex::{Captures, Regex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\[(?:(chunkhash|contenthash|hash)(?::(\d+))?|(name|id|ext|path|query|file|base))\]")
    .unwrap()
});

/// The placeholder name of a [`PLACEHOLDER_RE`] match, hash tokens are group 1
/// (with their length in group 2), the rest group 3.
fn token<'t>(caps: &Captures<'t>) -> &'t str {
  caps.get(1).or_else(|| caps.get(3)).map_or("", |token| token.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
  Name,
  Id,
  ChunkHash,
  ContentHash,
  Hash,
  Ext,
  Path,
  Query,
  File,
  Base,
}

impl Placeholder {
  fn from_token(token: &str) -> Option<Self> {
    Some(match token {
      "name" => Self::Name,
      "id" => Self::Id,
      "chunkhash" => Self::ChunkHash,
      "contenthash" => Self::ContentHash,
      "hash" => Self::Hash,
      "ext" => Self::Ext,
      "path" => Self::Path,
      "query" => Self::Query,
      "file" => Self::File,
      "base" => Self::Base,
      _ => return None,
    })
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "[name]",
      Self::Id => "[id]",
      Self::ChunkHash => "[chunkhash]",
      Self::ContentHash => "[contenthash]",
      Self::Hash => "[hash]",
      Self::Ext => "[ext]",
      Self::Path => "[path]",
      Self::Query => "[query]",
      Self::File => "[file]",
      Self::Base => "[base]",
    }
  }

  #[inline]
  pub fn is_hash(self) -> bool {
    matches!(self, Self::ChunkHash | Self::ContentHash | Self::Hash)
  }
}

/// Values substituted into a [`FilenameTemplate`]. Unset values leave their
/// placeholder in the output untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilenameRenderContext<'a> {
  pub name: Option<&'a str>,
  pub id: Option<&'a str>,
  pub chunk_hash: Option<&'a str>,
  pub content_hash: Option<&'a str>,
  pub hash: Option<&'a str>,
  /// Extension including the leading dot.
  pub ext: Option<&'a str>,
  pub path: Option<&'a str>,
  /// Query string including the leading `?`.
  pub query: Option<&'a str>,
  pub file: Option<&'a str>,
  pub base: Option<&'a str>,
}

impl<'a> FilenameRenderContext<'a> {
  fn value_of(&self, placeholder: Placeholder) -> Option<&'a str> {
    match placeholder {
      Placeholder::Name => self.name,
      Placeholder::Id => self.id,
      Placeholder::ChunkHash => self.chunk_hash,
      Placeholder::ContentHash => self.content_hash,
      Placeholder::Hash => self.hash,
      Placeholder::Ext => self.ext,
      Placeholder::Path => self.path,
      Placeholder::Query => self.query,
      Placeholder::File => self.file,
      Placeholder::Base => self.base,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FilenameTemplate {
  template: String,
}

impl FilenameTemplate {
  pub fn new(template: impl Into<String>) -> Self {
    Self { template: template.into() }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  /// Placeholders in order of appearance, repeats included.
  pub fn placeholders(&self) -> Vec<Placeholder> {
    PLACEHOLDER_RE
      .captures_iter(&self.template)
      .filter_map(|caps| Placeholder::from_token(token(&caps)))
      .collect()
  }

  pub fn has_placeholder(&self, placeholder: Placeholder) -> bool {
    self.placeholders().contains(&placeholder)
  }

  pub fn has_hash_placeholder(&self) -> bool {
    self.placeholders().into_iter().any(Placeholder::is_hash)
  }

  /// Hash placeholders accept a length, `[chunkhash:8]` keeps the first eight
  /// characters of the hash.
  pub fn render(&self, ctx: &FilenameRenderContext) -> String {
    PLACEHOLDER_RE
      .replace_all(&self.template, |caps: &Captures| {
        let Some(placeholder) = Placeholder::from_token(token(caps)) else {
          return caps[0].to_string();
        };
        let Some(value) = ctx.value_of(placeholder) else {
          return caps[0].to_string();
        };
        match caps.get(2).and_then(|len| len.as_str().parse::<usize>().ok()) {
          Some(len) => {
            let end = value.char_indices().nth(len).map_or(value.len(), |(index, _)| index);
            value[..end].to_string()
          }
          _ => value.to_string(),
        }
      })
      .into_owned()
  }
}

impl From<&str> for FilenameTemplate {
  fn from(template: &str) -> Self {
    Self::new(template)
  }
}

impl Display for FilenameTemplate {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.template)
  }
}

#[test]
fn test_render_chunk_filename() {
  let template = FilenameTemplate::new("[name].[chunkhash].js");
  let ctx = FilenameRenderContext { name: Some("app"), chunk_hash: Some("abc123"), ..Default::default() };
  assert_eq!(template.render(&ctx), "app.abc123.js");
}

#[test]
fn test_render_truncates_hashes_only() {
  let template = FilenameTemplate::new("[name].[contenthash:4].css");
  let ctx = FilenameRenderContext {
    name: Some("vendor"),
    content_hash: Some("0123456789"),
    ..Default::default()
  };
  assert_eq!(template.render(&ctx), "vendor.0123.css");

  let template = FilenameTemplate::new("[name:3].[id:2].[chunkhash:4].js");
  assert_eq!(template.placeholders(), [Placeholder::ChunkHash]);
  let ctx = FilenameRenderContext {
    name: Some("vendor"),
    id: Some("7"),
    chunk_hash: Some("abcdef"),
    ..Default::default()
  };
  assert_eq!(template.render(&ctx), "[name:3].[id:2].abcd.js");
}

#[test]
fn test_render_keeps_unknown_and_missing_placeholders() {
  let template = FilenameTemplate::new("[path].gz[query] [hash] [unknown]");
  let ctx = FilenameRenderContext { path: Some("js/app.abc123.js"), query: Some(""), ..Default::default() };
  assert_eq!(template.render(&ctx), "js/app.abc123.js.gz [hash] [unknown]");
}

#[test]
fn test_placeholders() {
  let template = FilenameTemplate::new("app.[chunkhash].css");
  assert_eq!(template.placeholders(), [Placeholder::ChunkHash]);
  assert!(template.has_hash_placeholder());
  assert!(!template.has_placeholder(Placeholder::Name));

  let template = FilenameTemplate::new("[name].js");
  assert_eq!(template.placeholders(), [Placeholder::Name]);
  assert!(!template.has_hash_placeholder());
  assert_eq!(Placeholder::ChunkHash.as_str(), "[chunkhash]");
}
