use std::fmt::Display;

use prodpack_utils::indexmap::FxIndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{FilenameTemplate, ModuleMatcher};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanOutputOptions {
  /// Directories removed before the build, relative to the project root.
  pub paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractStylesOptions {
  pub filename: FilenameTemplate,
  pub all_chunks: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CopyTargetType {
  #[default]
  Dir,
  File,
  Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyPattern {
  pub from: String,
  /// Destination relative to the output path. Empty means the output path
  /// itself.
  #[serde(default)]
  pub to: String,
  #[serde(default)]
  pub to_type: CopyTargetType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyAssetsOptions {
  pub patterns: Vec<CopyPattern>,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HtmlMinifyOptions {
  pub collapse_whitespace: bool,
  pub collapse_inline_tag_whitespace: bool,
  pub remove_comments: bool,
  pub remove_redundant_attributes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HtmlTemplateOptions {
  pub template: String,
  pub minify: HtmlMinifyOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LodashReplacementOptions {
  pub collections: bool,
  pub paths: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeImagesOptions {
  pub test: ModuleMatcher,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
  #[default]
  Gzip,
  Brotli,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompressOutputOptions {
  pub algorithm: CompressionAlgorithm,
  /// Name of the compressed copy, `[path]` and `[query]` refer to the
  /// original asset.
  pub asset: FilenameTemplate,
  pub test: ModuleMatcher,
  /// Compressed copies are only kept when `compressed / original` does not
  /// exceed this ratio.
  pub min_ratio: f64,
}

impl CompressOutputOptions {
  pub fn should_keep(&self, original_size: usize, compressed_size: usize) -> bool {
    if original_size == 0 {
      return false;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = compressed_size as f64 / original_size as f64;
    ratio <= self.min_ratio
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvFileOptions {
  /// Dotenv file relative to the project root.
  pub path: String,
  /// Also expose the process environment. Process variables win over the
  /// file.
  pub systemvars: bool,
}

/// A build-time capability the bundler is asked to run, with its options.
///
/// Directives run in the order they are declared, later directives see the
/// output of earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "options", rename_all = "kebab-case")]
pub enum PluginDirective {
  /// Free identifiers rewritten to imports of the given module request.
  ProvideGlobal(FxIndexMap<String, String>),
  CleanOutput(CleanOutputOptions),
  OccurrenceOrder,
  ExtractStyles(ExtractStylesOptions),
  CopyAssets(CopyAssetsOptions),
  InjectHtmlTemplate(HtmlTemplateOptions),
  AsyncChunkNames,
  LodashModuleReplacement(LodashReplacementOptions),
  OptimizeImages(OptimizeImagesOptions),
  CompressOutput(CompressOutputOptions),
  LoadEnvFile(EnvFileOptions),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
  ProvideGlobal,
  CleanOutput,
  OccurrenceOrder,
  ExtractStyles,
  CopyAssets,
  InjectHtmlTemplate,
  AsyncChunkNames,
  LodashModuleReplacement,
  OptimizeImages,
  CompressOutput,
  LoadEnvFile,
}

impl PluginKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::ProvideGlobal => "provide-global",
      Self::CleanOutput => "clean-output",
      Self::OccurrenceOrder => "occurrence-order",
      Self::ExtractStyles => "extract-styles",
      Self::CopyAssets => "copy-assets",
      Self::InjectHtmlTemplate => "inject-html-template",
      Self::AsyncChunkNames => "async-chunk-names",
      Self::LodashModuleReplacement => "lodash-module-replacement",
      Self::OptimizeImages => "optimize-images",
      Self::CompressOutput => "compress-output",
      Self::LoadEnvFile => "load-env-file",
    }
  }

  /// Kinds whose second declaration would fight the first over the same
  /// output.
  pub fn is_singleton(self) -> bool {
    matches!(self, Self::CleanOutput | Self::ExtractStyles | Self::InjectHtmlTemplate | Self::LoadEnvFile)
  }
}

impl Display for PluginKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl PluginDirective {
  pub fn kind(&self) -> PluginKind {
    match self {
      Self::ProvideGlobal(_) => PluginKind::ProvideGlobal,
      Self::CleanOutput(_) => PluginKind::CleanOutput,
      Self::OccurrenceOrder => PluginKind::OccurrenceOrder,
      Self::ExtractStyles(_) => PluginKind::ExtractStyles,
      Self::CopyAssets(_) => PluginKind::CopyAssets,
      Self::InjectHtmlTemplate(_) => PluginKind::InjectHtmlTemplate,
      Self::AsyncChunkNames => PluginKind::AsyncChunkNames,
      Self::LodashModuleReplacement(_) => PluginKind::LodashModuleReplacement,
      Self::OptimizeImages(_) => PluginKind::OptimizeImages,
      Self::CompressOutput(_) => PluginKind::CompressOutput,
      Self::LoadEnvFile(_) => PluginKind::LoadEnvFile,
    }
  }
}

#[test]
fn test_plugin_directive_wire_shape() {
  let directives = vec![
    PluginDirective::OccurrenceOrder,
    PluginDirective::LoadEnvFile(EnvFileOptions {
      path: "config/env/prod.env".to_string(),
      systemvars: true,
    }),
    PluginDirective::CopyAssets(CopyAssetsOptions {
      patterns: vec![CopyPattern {
        from: "app/assets".to_string(),
        to: String::new(),
        to_type: CopyTargetType::Dir,
      }],
    }),
  ];

  let json = serde_json::to_value(&directives).unwrap();
  assert_eq!(json[0], serde_json::json!({ "kind": "occurrence-order" }));
  assert_eq!(json[1]["kind"], "load-env-file");
  assert_eq!(json[1]["options"]["systemvars"], true);
  assert_eq!(json[2]["options"]["patterns"][0]["toType"], "dir");

  let decoded: Vec<PluginDirective> = serde_json::from_value(json).unwrap();
  assert_eq!(decoded, directives);
  assert_eq!(
    decoded.iter().map(PluginDirective::kind).collect::<Vec<_>>(),
    [PluginKind::OccurrenceOrder, PluginKind::LoadEnvFile, PluginKind::CopyAssets]
  );
}

#[test]
fn test_compress_output_ratio() {
  let options = CompressOutputOptions {
    algorithm: CompressionAlgorithm::Gzip,
    asset: FilenameTemplate::new("[path].gz[query]"),
    test: ModuleMatcher::new(r"\.(js|css)$").unwrap(),
    min_ratio: 0.5,
  };
  assert!(options.should_keep(1000, 400));
  assert!(options.should_keep(1000, 500));
  assert!(!options.should_keep(1000, 501));
  assert!(!options.should_keep(0, 0));
}
