pub mod entry_points;
pub mod es_target;
pub mod filename_template;
pub mod minimizer;
pub mod mode;
pub mod module_rule;
pub mod optimization;
pub mod output_options;
pub mod plugin_directive;
pub mod resolve_options;
pub mod split_chunks;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
  EntryPoints, EnvFileOptions, ExtractStylesOptions, Mode, ModuleOptions, OptimizationOptions,
  OutputOptions, PluginDirective, PluginKind, ResolveOptions,
};

/// Everything the bundler needs to produce a bundle, read once at build start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
  // --- Input
  pub mode: Mode,
  /// Source map style, `None` disables source maps.
  #[serde(default)]
  pub devtool: Option<String>,
  pub entry: EntryPoints,

  // --- Output
  pub output: OutputOptions,

  // --- Resolve
  #[serde(default)]
  pub resolve: ResolveOptions,

  // --- Transform
  #[serde(default)]
  pub optimization: OptimizationOptions,
  #[serde(default)]
  pub module: ModuleOptions,
  #[serde(default)]
  pub plugins: Vec<PluginDirective>,
}

impl BundleConfig {
  pub fn plugin_kinds(&self) -> impl Iterator<Item = PluginKind> + '_ {
    self.plugins.iter().map(PluginDirective::kind)
  }

  /// First directive of `kind` with its position in the plugin list.
  pub fn plugin(&self, kind: PluginKind) -> Option<(usize, &PluginDirective)> {
    self.plugins.iter().enumerate().find(|(_, plugin)| plugin.kind() == kind)
  }

  pub fn extract_styles(&self) -> Option<&ExtractStylesOptions> {
    self.plugins.iter().find_map(|plugin| match plugin {
      PluginDirective::ExtractStyles(options) => Some(options),
      _ => None,
    })
  }

  pub fn env_file(&self) -> Option<&EnvFileOptions> {
    self.plugins.iter().find_map(|plugin| match plugin {
      PluginDirective::LoadEnvFile(options) => Some(options),
      _ => None,
    })
  }
}
