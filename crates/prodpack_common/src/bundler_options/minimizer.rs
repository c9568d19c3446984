use prodpack_utils::indexmap::FxIndexSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ESTarget;

// The uglify option bag keeps the minifier's own snake_case keys, it rejects
// anything else.

#[allow(clippy::struct_excessive_bools)] // Mirrors the minifier's own flag set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompressOptions {
  pub warnings: bool,
  pub conditionals: bool,
  pub unused: bool,
  pub comparisons: bool,
  pub sequences: bool,
  pub dead_code: bool,
  pub evaluate: bool,
  pub if_return: bool,
  pub join_vars: bool,
  pub drop_console: bool,
  pub drop_debugger: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JsOutputOptions {
  /// Keep comments in the emitted code.
  pub comments: bool,
  pub beautify: bool,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JsMinifyOptions {
  /// Written as the edition number (`8` for `es2017`).
  #[serde(serialize_with = "ecma_edition::serialize", deserialize_with = "ecma_edition::deserialize")]
  #[schemars(with = "u16")]
  pub ecma: ESTarget,
  pub warnings: bool,
  pub compress: CompressOptions,
  pub output: JsOutputOptions,
  #[serde(rename = "sourceMap")]
  pub source_map: bool,
  /// Calls to these functions are treated as side-effect free and dropped
  /// when their result is unused.
  pub pure_funcs: Vec<String>,
  pub toplevel: bool,
  #[serde(rename = "nameCache", default)]
  pub name_cache: Option<serde_json::Value>,
  pub ie8: bool,
  /// `None` leaves the choice to the minifier.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub keep_classnames: Option<bool>,
  pub keep_fnames: bool,
  pub safari10: bool,
}

impl JsMinifyOptions {
  pub fn strips_comments(&self) -> bool {
    !self.output.comments
  }

  /// Function names whose calls disappear from the output. `console.*` stands
  /// for every console method when `drop_console` is set.
  pub fn dropped_calls(&self) -> FxIndexSet<&str> {
    let mut calls = FxIndexSet::default();
    if self.compress.drop_console {
      calls.insert("console.*");
    }
    calls.extend(self.pure_funcs.iter().map(String::as_str));
    calls
  }

  pub fn preserves_function_names(&self) -> bool {
    self.keep_fnames
  }
}

mod ecma_edition {
  use std::fmt;

  use serde::{
    Deserializer, Serializer,
    de::{self, Visitor},
  };

  use crate::ESTarget;

  pub fn serialize<S: Serializer>(target: &ESTarget, serializer: S) -> Result<S::Ok, S::Error> {
    match target.edition() {
      Some(edition) => serializer.serialize_u16(edition),
      None => serializer.collect_str(target),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ESTarget, D::Error> {
    deserializer.deserialize_any(EditionVisitor)
  }

  struct EditionVisitor;

  impl Visitor<'_> for EditionVisitor {
    type Value = ESTarget;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
      f.write_str("an ECMAScript edition number, year, or target name")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
      u16::try_from(value)
        .ok()
        .and_then(ESTarget::from_edition)
        .ok_or_else(|| E::custom(format!("unknown ECMAScript edition {value}")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
      u64::try_from(value)
        .map_err(|_| E::custom(format!("unknown ECMAScript edition {value}")))
        .and_then(|value| self.visit_u64(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
      value.parse().map_err(E::custom)
    }
  }
}

/// What the uglify plugin is handed: the minifier settings sit under
/// `uglifyOptions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UglifyJsPluginOptions {
  pub uglify_options: JsMinifyOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscardComments {
  pub remove_all: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CssProcessorOptions {
  pub discard_comments: DiscardComments,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CssMinifyOptions {
  pub css_processor_options: CssProcessorOptions,
}

impl CssMinifyOptions {
  pub fn strips_comments(&self) -> bool {
    self.css_processor_options.discard_comments.remove_all
  }
}

/// One step of the minimizer pipeline, run in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "options", rename_all = "kebab-case")]
pub enum MinimizerDirective {
  UglifyJs(UglifyJsPluginOptions),
  OptimizeCss(CssMinifyOptions),
}

impl MinimizerDirective {
  pub fn name(&self) -> &'static str {
    match self {
      Self::UglifyJs(_) => "uglify-js",
      Self::OptimizeCss(_) => "optimize-css",
    }
  }

  pub fn strips_comments(&self) -> bool {
    match self {
      Self::UglifyJs(options) => options.uglify_options.strips_comments(),
      Self::OptimizeCss(options) => options.strips_comments(),
    }
  }
}

#[test]
fn test_js_minify_policy() {
  let options = JsMinifyOptions {
    ecma: ESTarget::Es2017,
    compress: CompressOptions { drop_console: true, ..Default::default() },
    pure_funcs: vec!["console.log".to_string(), "debug".to_string()],
    ..Default::default()
  };
  assert!(options.strips_comments());
  assert!(!options.preserves_function_names());
  assert_eq!(options.dropped_calls().into_iter().collect::<Vec<_>>(), ["console.*", "console.log", "debug"]);
}

#[test]
fn test_minimizer_wire_shape() {
  let directive = MinimizerDirective::OptimizeCss(CssMinifyOptions {
    css_processor_options: CssProcessorOptions { discard_comments: DiscardComments { remove_all: true } },
  });
  assert!(directive.strips_comments());
  assert_eq!(directive.name(), "optimize-css");

  let json = serde_json::to_value(&directive).unwrap();
  assert_eq!(json["kind"], "optimize-css");
  assert_eq!(json["options"]["cssProcessorOptions"]["discardComments"]["removeAll"], true);
  assert_eq!(serde_json::from_value::<MinimizerDirective>(json).unwrap(), directive);
}

#[test]
fn test_uglify_wire_shape() {
  let directive = MinimizerDirective::UglifyJs(UglifyJsPluginOptions {
    uglify_options: JsMinifyOptions {
      ecma: ESTarget::Es2017,
      compress: CompressOptions { dead_code: true, drop_console: true, ..Default::default() },
      pure_funcs: vec!["console.log".to_string()],
      ..Default::default()
    },
  });

  let json = serde_json::to_value(&directive).unwrap();
  let options = &json["options"]["uglifyOptions"];
  assert_eq!(options["ecma"], 8);
  assert_eq!(options["compress"]["dead_code"], true);
  assert_eq!(options["compress"]["drop_console"], true);
  assert_eq!(options["pure_funcs"], serde_json::json!(["console.log"]));
  assert_eq!(options["sourceMap"], false);
  assert!(options["nameCache"].is_null() && options.get("nameCache").is_some());
  assert!(options.get("keep_classnames").is_none());
  assert_eq!(options["keep_fnames"], false);
  assert!(options.get("deadCode").is_none() && options.get("pureFuncs").is_none());
  assert_eq!(serde_json::from_value::<MinimizerDirective>(json).unwrap(), directive);

  let edition = |value: serde_json::Value| ecma_edition::deserialize(value).ok();
  assert_eq!(edition(serde_json::json!(2015)), Some(ESTarget::Es2015));
  assert_eq!(edition(serde_json::json!(6)), Some(ESTarget::Es2015));
  assert_eq!(edition(serde_json::json!("esnext")), Some(ESTarget::EsNext));
  assert_eq!(edition(serde_json::json!(4)), None);
}
