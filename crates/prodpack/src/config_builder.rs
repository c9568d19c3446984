use std::{
  path::{Path, PathBuf},
  sync::LazyLock,
};

use prodpack_common::{
  BundleConfig, CacheGroup, CacheGroupEntry, ChunkScope, CleanOutputOptions, CompressOptions,
  CompressOutputOptions, CompressionAlgorithm, CopyAssetsOptions, CopyPattern, CopyTargetType,
  CssMinifyOptions, CssProcessorOptions, DiscardComments, ESTarget, EntryPoints, EnvFileOptions,
  ExtractStylesOptions, FilenameTemplate, HtmlMinifyOptions, HtmlTemplateOptions, JsMinifyOptions,
  JsOutputOptions, LodashReplacementOptions, MinimizerDirective, Mode, ModuleOptions,
  OptimizationOptions, OptimizeImagesOptions, OutputOptions, PluginDirective, ResolveOptions,
  SplitChunksOptions, UglifyJsPluginOptions,
};
use prodpack_utils::{indexmap::FxIndexMap, path_ext::PathExt};
use regex::Regex;

use crate::{DefaultLoaderRules, LoaderRules};

static NODE_MODULES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("node_modules").unwrap());
static IMAGE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)\.(jpe?g|png|gif|svg)$").unwrap());
static COMPRESSIBLE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\.(html|js|css|svg|ttf|eot|otf|woff|ico)$").unwrap());

const OUTPUT_DIR: &str = "public";
const ENV_FILE: &str = "config/env/prod.env";
const FETCH_POLYFILL: &str = "exports-loader?self.fetch!whatwg-fetch/dist/fetch.umd";

/// Assembles the production [`BundleConfig`] for the project at `root`.
///
/// Building does no I/O: paths are joined onto `root` and nothing is checked
/// for existence.
pub struct ConfigBuilder<R = DefaultLoaderRules> {
  root: PathBuf,
  loader_rules: R,
}

impl ConfigBuilder {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into(), loader_rules: DefaultLoaderRules::default() }
  }
}

impl<R: LoaderRules> ConfigBuilder<R> {
  pub fn loader_rules<T: LoaderRules>(self, loader_rules: T) -> ConfigBuilder<T> {
    ConfigBuilder { root: self.root, loader_rules }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn build(&self) -> BundleConfig {
    let mode = Mode::Production;
    BundleConfig {
      mode,
      devtool: None,
      entry: Self::entry(),
      output: self.output(),
      resolve: self.resolve(),
      optimization: OptimizationOptions {
        split_chunks: Self::split_chunks(),
        minimizer: Self::minimizer(),
      },
      module: ModuleOptions { rules: self.loader_rules.rules(mode) },
      plugins: Self::plugins(),
    }
  }

  fn entry() -> EntryPoints {
    let mut entry = EntryPoints::default();
    entry.insert("app", ["babel-polyfill", "./app/index.jsx"]);
    entry
  }

  fn output(&self) -> OutputOptions {
    OutputOptions {
      path: self.root.join_normalized(OUTPUT_DIR),
      public_path: "/".to_string(),
      filename: FilenameTemplate::new("[name].[chunkhash].js"),
    }
  }

  fn resolve(&self) -> ResolveOptions {
    let mut alias = FxIndexMap::default();
    alias.insert("styles".to_string(), self.root.join_normalized("styles/"));

    ResolveOptions {
      extensions: vec![".js".to_string(), ".jsx".to_string()],
      modules: vec![self.root.join_normalized("src"), self.root.join_normalized("node_modules")],
      alias,
    }
  }

  fn split_chunks() -> SplitChunksOptions {
    let mut cache_groups = FxIndexMap::default();
    cache_groups.insert("default".to_string(), CacheGroupEntry::Toggle(false));
    cache_groups.insert("vendors".to_string(), CacheGroupEntry::Toggle(false));
    cache_groups.insert(
      "vendor".to_string(),
      CacheGroup {
        test: Some(NODE_MODULES_RE.clone().into()),
        chunks: ChunkScope::All,
        priority: 20,
        ..CacheGroup::named("vendor")
      }
      .into(),
    );
    cache_groups.insert(
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
    SplitChunksOptions { cache_groups }
  }

  fn minimizer() -> Vec<MinimizerDirective> {
    let js = JsMinifyOptions {
      ecma: ESTarget::Es2017,
      warnings: false,
      compress: CompressOptions {
        warnings: false,
        conditionals: true,
        unused: true,
        comparisons: true,
        sequences: true,
        dead_code: true,
        evaluate: true,
        if_return: true,
        join_vars: true,
        drop_console: true,
        drop_debugger: true,
      },
      output: JsOutputOptions { comments: false, beautify: false },
      source_map: false,
      pure_funcs: vec!["console.log".to_string()],
      toplevel: false,
      name_cache: None,
      ie8: false,
      keep_classnames: None,
      keep_fnames: false,
      safari10: false,
    };
    let css = CssMinifyOptions {
      css_processor_options: CssProcessorOptions {
        discard_comments: DiscardComments { remove_all: true },
      },
    };
    vec![
      MinimizerDirective::UglifyJs(UglifyJsPluginOptions { uglify_options: js }),
      MinimizerDirective::OptimizeCss(css),
    ]
  }

  fn plugins() -> Vec<PluginDirective> {
    let mut provided = FxIndexMap::default();
    provided.insert("fetch".to_string(), FETCH_POLYFILL.to_string());

    vec![
      PluginDirective::ProvideGlobal(provided),
      PluginDirective::CleanOutput(CleanOutputOptions { paths: vec![OUTPUT_DIR.to_string()] }),
      PluginDirective::OccurrenceOrder,
      PluginDirective::ExtractStyles(ExtractStylesOptions {
        filename: FilenameTemplate::new("app.[chunkhash].css"),
        all_chunks: true,
      }),
      PluginDirective::CopyAssets(CopyAssetsOptions {
        patterns: vec![CopyPattern {
          from: "app/assets".to_string(),
          to: String::new(),
          to_type: CopyTargetType::Dir,
        }],
      }),
      PluginDirective::InjectHtmlTemplate(HtmlTemplateOptions {
        template: "app/index.html".to_string(),
        minify: HtmlMinifyOptions {
          collapse_whitespace: true,
          collapse_inline_tag_whitespace: true,
          remove_comments: true,
          remove_redundant_attributes: true,
        },
      }),
      PluginDirective::AsyncChunkNames,
      PluginDirective::LodashModuleReplacement(LodashReplacementOptions {
        collections: true,
        paths: true,
      }),
      PluginDirective::OptimizeImages(OptimizeImagesOptions { test: IMAGE_RE.clone().into() }),
      PluginDirective::CompressOutput(CompressOutputOptions {
        algorithm: CompressionAlgorithm::Gzip,
        asset: FilenameTemplate::new("[path].gz[query]"),
        test: COMPRESSIBLE_RE.clone().into(),
        min_ratio: 0.5,
      }),
      PluginDirective::LoadEnvFile(EnvFileOptions { path: ENV_FILE.to_string(), systemvars: true }),
    ]
  }
}

/// The production configuration for the project at `root` with the default
/// loader rules.
pub fn production_config(root: &Path) -> BundleConfig {
  ConfigBuilder::new(root).build()
}
