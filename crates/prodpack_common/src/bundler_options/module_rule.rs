use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ModuleMatcher;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoaderUse {
  pub loader: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<serde_json::Value>,
}

impl LoaderUse {
  pub fn new(loader: impl Into<String>) -> Self {
    Self { loader: loader.into(), options: None }
  }

  #[must_use]
  pub fn with_options(mut self, options: serde_json::Value) -> Self {
    self.options = Some(options);
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRule {
  pub test: ModuleMatcher,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exclude: Vec<ModuleMatcher>,
  /// Loaders listed in the order they are declared. Bundlers apply them last
  /// to first.
  #[serde(rename = "use")]
  pub uses: Vec<LoaderUse>,
}

impl ModuleRule {
  pub fn applies_to(&self, module_path: &str) -> bool {
    self.test.is_match(module_path) && !self.exclude.iter().any(|exclude| exclude.is_match(module_path))
  }

  pub fn loaders(&self) -> impl Iterator<Item = &str> {
    self.uses.iter().map(|item| item.loader.as_str())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOptions {
  pub rules: Vec<ModuleRule>,
}

impl ModuleOptions {
  /// Rules that apply to `module_path`, in declaration order.
  pub fn rules_for<'a>(&'a self, module_path: &'a str) -> impl Iterator<Item = &'a ModuleRule> {
    self.rules.iter().filter(move |rule| rule.applies_to(module_path))
  }
}

#[test]
fn test_rules_for() {
  let options = ModuleOptions {
    rules: vec![
      ModuleRule {
        test: ModuleMatcher::new(r"\.jsx?$").unwrap(),
        exclude: vec![ModuleMatcher::new("node_modules").unwrap()],
        uses: vec![LoaderUse::new("babel-loader")],
      },
      ModuleRule {
        test: ModuleMatcher::new(r"\.s?css$").unwrap(),
        exclude: vec![],
        uses: vec![LoaderUse::new("css-loader"), LoaderUse::new("sass-loader")],
      },
    ],
  };

  let matched = options.rules_for("/p/app/index.jsx").flat_map(|rule| rule.loaders()).collect::<Vec<_>>();
  assert_eq!(matched, ["babel-loader"]);
  assert_eq!(options.rules_for("/p/node_modules/react/index.js").count(), 0);

  let matched = options.rules_for("/p/styles/base.scss").flat_map(|rule| rule.loaders()).collect::<Vec<_>>();
  assert_eq!(matched, ["css-loader", "sass-loader"]);

  let json = serde_json::to_value(&options.rules[1]).unwrap();
  assert_eq!(json["use"][1]["loader"], "sass-loader");
  assert!(json.get("exclude").is_none());
}
