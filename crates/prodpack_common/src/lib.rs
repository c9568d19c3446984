mod bundler_options;
mod types;

pub use bundler_options::{
  BundleConfig,
  entry_points::EntryPoints,
  es_target::ESTarget,
  filename_template::{FilenameRenderContext, FilenameTemplate, Placeholder},
  minimizer::{
    CompressOptions, CssMinifyOptions, CssProcessorOptions, DiscardComments, JsMinifyOptions,
    JsOutputOptions, MinimizerDirective, UglifyJsPluginOptions,
  },
  mode::Mode,
  module_rule::{LoaderUse, ModuleOptions, ModuleRule},
  optimization::OptimizationOptions,
  output_options::OutputOptions,
  plugin_directive::{
    CleanOutputOptions, CompressOutputOptions, CompressionAlgorithm, CopyAssetsOptions,
    CopyPattern, CopyTargetType, EnvFileOptions, ExtractStylesOptions, HtmlMinifyOptions,
    HtmlTemplateOptions, LodashReplacementOptions, OptimizeImagesOptions, PluginDirective,
    PluginKind,
  },
  resolve_options::ResolveOptions,
  split_chunks::{CacheGroup, CacheGroupEntry, ChunkOrigin, ChunkScope, SplitChunksOptions},
};

pub use crate::types::module_matcher::ModuleMatcher;
