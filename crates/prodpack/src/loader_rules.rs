use std::sync::LazyLock;

use prodpack_common::{LoaderUse, Mode, ModuleMatcher, ModuleRule};
use regex::Regex;
use serde_json::json;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.jsx?$").unwrap());
static CSS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.css$").unwrap());
static SCSS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.scss$").unwrap());
static FONT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\.(woff2?|ttf|eot|otf)(\?v=\d+\.\d+\.\d+)?$").unwrap());
static IMAGE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)\.(jpe?g|png|gif|svg|ico)$").unwrap());
static NODE_MODULES_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(node_modules|bower_components)").unwrap());

const EXTRACT_STYLES_LOADER: &str = "mini-css-extract-plugin/dist/loader";

/// Supplies `module.rules`. The set of loaders is owned by the project, not
/// by the bundle configuration, so it is plugged in from outside.
pub trait LoaderRules {
  fn rules(&self, mode: Mode) -> Vec<ModuleRule>;
}

impl<F> LoaderRules for F
where
  F: Fn(Mode) -> Vec<ModuleRule>,
{
  fn rules(&self, mode: Mode) -> Vec<ModuleRule> {
    self(mode)
  }
}

/// Scripts through babel, styles extracted to a stylesheet in production and
/// injected with `style-loader` otherwise, fonts and images inlined below
/// `inline_limit` bytes.
#[derive(Debug, Clone)]
pub struct DefaultLoaderRules {
  pub inline_limit: u32,
}

impl Default for DefaultLoaderRules {
  fn default() -> Self {
    Self { inline_limit: 10_000 }
  }
}

impl DefaultLoaderRules {
  fn style_loader(mode: Mode) -> LoaderUse {
    if mode.is_production() {
      LoaderUse::new(EXTRACT_STYLES_LOADER)
    } else {
      LoaderUse::new("style-loader")
    }
  }

  fn css_loader(mode: Mode, import_loaders: u8) -> LoaderUse {
    LoaderUse::new("css-loader").with_options(json!({
      "importLoaders": import_loaders,
      "sourceMap": !mode.is_production(),
    }))
  }
}

impl LoaderRules for DefaultLoaderRules {
  fn rules(&self, mode: Mode) -> Vec<ModuleRule> {
    vec![
      ModuleRule {
        test: SCRIPT_RE.clone().into(),
        exclude: vec![NODE_MODULES_RE.clone().into()],
        uses: vec![LoaderUse::new("babel-loader").with_options(json!({
          "cacheDirectory": !mode.is_production(),
        }))],
      },
      ModuleRule {
        test: CSS_RE.clone().into(),
        exclude: vec![],
        uses: vec![Self::style_loader(mode), Self::css_loader(mode, 0)],
      },
      ModuleRule {
        test: SCSS_RE.clone().into(),
        exclude: vec![NODE_MODULES_RE.clone().into()],
        uses: vec![Self::style_loader(mode), Self::css_loader(mode, 1), LoaderUse::new("sass-loader")],
      },
      ModuleRule {
        test: FONT_RE.clone().into(),
        exclude: vec![],
        uses: vec![LoaderUse::new("url-loader").with_options(json!({
          "limit": self.inline_limit,
          "name": "fonts/[name].[hash:8].[ext]",
        }))],
      },
      ModuleRule {
        test: ModuleMatcher::from(IMAGE_RE.clone()),
        exclude: vec![],
        uses: vec![LoaderUse::new("url-loader").with_options(json!({
          "limit": self.inline_limit,
          "name": "images/[name].[hash:8].[ext]",
        }))],
      },
    ]
  }
}

#[test]
fn test_default_loader_rules() {
  let rules = DefaultLoaderRules::default();

  let production = rules.rules(Mode::Production);
  let loaders_for = |rules: &[ModuleRule], path: &str| {
    rules
      .iter()
      .filter(|rule| rule.applies_to(path))
      .flat_map(|rule| rule.loaders().map(ToString::to_string).collect::<Vec<_>>())
      .collect::<Vec<_>>()
  };

  assert_eq!(loaders_for(&production, "/p/app/index.jsx"), ["babel-loader"]);
  assert!(loaders_for(&production, "/p/node_modules/react/index.js").is_empty());
  assert_eq!(
    loaders_for(&production, "/p/styles/base.scss"),
    [EXTRACT_STYLES_LOADER, "css-loader", "sass-loader"]
  );
  assert_eq!(loaders_for(&production, "/p/app/assets/Logo.PNG"), ["url-loader"]);
  assert_eq!(loaders_for(&production, "/p/fonts/icons.woff2?v=1.2.3"), ["url-loader"]);

  let development = rules.rules(Mode::Development);
  assert_eq!(loaders_for(&development, "/p/app/main.css"), ["style-loader", "css-loader"]);
}

#[test]
fn test_closure_loader_rules() {
  let only_scripts = |_: Mode| {
    vec![ModuleRule {
      test: SCRIPT_RE.clone().into(),
      exclude: vec![],
      uses: vec![LoaderUse::new("swc-loader")],
    }]
  };
  let rules = only_scripts.rules(Mode::Production);
  assert_eq!(rules.len(), 1);
  assert_eq!(rules[0].uses[0].loader, "swc-loader");
}
