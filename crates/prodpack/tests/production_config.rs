use std::path::Path;

use prodpack::{
  BundleConfig, CacheGroupEntry, ChunkOrigin, ConfigBuilder, ESTarget, LoaderUse, MinimizerDirective,
  Mode, ModuleMatcher, ModuleRule, Placeholder, PluginDirective, PluginKind, production_config,
};
use sugar_path::SugarPath;

fn config() -> BundleConfig {
  production_config(Path::new("/project"))
}

#[test]
fn entry_and_output() {
  let config = config();
  assert_eq!(config.mode, Mode::Production);
  assert_eq!(config.devtool, None);

  assert_eq!(config.entry.names().collect::<Vec<_>>(), ["app"]);
  assert_eq!(config.entry.get("app").unwrap(), ["babel-polyfill", "./app/index.jsx"]);

  assert_eq!(config.output.path.to_slash_lossy(), "/project/public");
  assert_eq!(config.output.public_path, "/");
  assert_eq!(config.output.filename.template(), "[name].[chunkhash].js");
  assert_eq!(config.output.chunk_filename("app", "abc123"), "app.abc123.js");
}

#[test]
fn resolution_rules() {
  let resolve = config().resolve;
  assert_eq!(resolve.extensions, [".js", ".jsx"]);
  assert_eq!(
    resolve.modules.iter().map(|dir| dir.to_slash_lossy().into_owned()).collect::<Vec<_>>(),
    ["/project/src", "/project/node_modules"]
  );
  assert_eq!(resolve.apply_alias("styles/main.scss").unwrap().to_slash_lossy(), "/project/styles/main.scss");
}

#[test]
fn cache_groups_are_totally_ordered() {
  let split_chunks = config().optimization.split_chunks;
  assert_eq!(split_chunks.disabled().collect::<Vec<_>>(), ["default", "vendors"]);

  let groups = split_chunks.groups_by_priority();
  assert_eq!(groups.iter().map(|(key, group)| (*key, group.priority)).collect::<Vec<_>>(), [
    ("vendor", 20),
    ("common", 10)
  ]);
  let mut priorities = groups.iter().map(|(_, group)| group.priority).collect::<Vec<_>>();
  priorities.dedup();
  assert_eq!(priorities.len(), groups.len());

  let common = split_chunks.cache_groups["common"].as_group().unwrap();
  assert_eq!(common.min_chunks(), 2);
  assert!(common.reuse_existing_chunk && common.enforce);

  // A shared vendor module goes to `vendor`, shared app code to `common`.
  let (key, _) = split_chunks.select("/project/node_modules/lodash/map.js", 2, ChunkOrigin::Initial).unwrap();
  assert_eq!(key, "vendor");
  let (key, _) = split_chunks.select("/project/src/api.js", 2, ChunkOrigin::Async).unwrap();
  assert_eq!(key, "common");
  assert!(split_chunks.select("/project/src/api.js", 1, ChunkOrigin::Async).is_none());
  assert!(matches!(split_chunks.cache_groups["default"], CacheGroupEntry::Toggle(false)));
}

#[test]
fn minimizers() {
  let minimizer = config().optimization.minimizer;
  assert_eq!(minimizer.iter().map(MinimizerDirective::name).collect::<Vec<_>>(), ["uglify-js", "optimize-css"]);
  assert!(minimizer.iter().all(MinimizerDirective::strips_comments));

  let MinimizerDirective::UglifyJs(uglify) = &minimizer[0] else { panic!("expected uglify-js first") };
  let js = &uglify.uglify_options;
  assert_eq!(js.ecma, ESTarget::Es2017);
  assert_eq!(js.ecma.edition(), Some(8));
  assert!(!js.preserves_function_names());
  assert_eq!(js.dropped_calls().into_iter().collect::<Vec<_>>(), ["console.*", "console.log"]);
  assert_eq!(js.keep_classnames, None);
}

#[test]
fn plugin_order_is_preserved() {
  let config = config();
  assert_eq!(config.plugin_kinds().collect::<Vec<_>>(), [
    PluginKind::ProvideGlobal,
    PluginKind::CleanOutput,
    PluginKind::OccurrenceOrder,
    PluginKind::ExtractStyles,
    PluginKind::CopyAssets,
    PluginKind::InjectHtmlTemplate,
    PluginKind::AsyncChunkNames,
    PluginKind::LodashModuleReplacement,
    PluginKind::OptimizeImages,
    PluginKind::CompressOutput,
    PluginKind::LoadEnvFile,
  ]);

  let (extract_index, _) = config.plugin(PluginKind::ExtractStyles).unwrap();
  let (copy_index, _) = config.plugin(PluginKind::CopyAssets).unwrap();
  assert!(extract_index < copy_index);
}

#[test]
fn plugin_options() {
  let config = config();

  let extract_styles = config.extract_styles().unwrap();
  assert_eq!(extract_styles.filename.placeholders(), [Placeholder::ChunkHash]);
  assert!(extract_styles.all_chunks);

  let env_file = config.env_file().unwrap();
  assert_eq!(env_file.path, "config/env/prod.env");
  assert!(env_file.systemvars);

  let Some((_, PluginDirective::CompressOutput(compress))) = config.plugin(PluginKind::CompressOutput) else {
    panic!("compress-output is declared")
  };
  assert!(compress.test.is_match("public/app.abc123.js"));
  assert!(!compress.test.is_match("public/app.abc123.js.map"));
  assert!((compress.min_ratio - 0.5).abs() < f64::EPSILON);

  let Some((_, PluginDirective::OptimizeImages(images))) = config.plugin(PluginKind::OptimizeImages) else {
    panic!("optimize-images is declared")
  };
  assert_eq!(images.test, ModuleMatcher::case_insensitive(r"\.(jpe?g|png|gif|svg)$").unwrap());

  let Some((_, PluginDirective::ProvideGlobal(provided))) = config.plugin(PluginKind::ProvideGlobal) else {
    panic!("provide-global is declared")
  };
  assert_eq!(provided["fetch"], "exports-loader?self.fetch!whatwg-fetch/dist/fetch.umd");
}

#[test]
fn json_round_trip() {
  let config = config();
  let json = serde_json::to_string(&config).unwrap();
  let decoded: BundleConfig = serde_json::from_str(&json).unwrap();
  assert_eq!(decoded, config);

  let value = serde_json::to_value(&config).unwrap();
  assert_eq!(value["output"]["filename"], "[name].[chunkhash].js");
  assert_eq!(value["optimization"]["splitChunks"]["cacheGroups"]["vendor"]["priority"], 20);
  assert_eq!(value["plugins"][3]["options"]["filename"], "app.[chunkhash].css");
  assert_eq!(value["plugins"][10]["kind"], "load-env-file");

  let uglify = &value["optimization"]["minimizer"][0]["options"]["uglifyOptions"];
  assert_eq!(uglify["ecma"], 8);
  for key in ["dead_code", "if_return", "join_vars", "drop_console", "drop_debugger"] {
    assert_eq!(uglify["compress"][key], true, "compress.{key}");
  }
  assert_eq!(uglify["pure_funcs"], serde_json::json!(["console.log"]));
  assert_eq!(uglify["keep_fnames"], false);
  assert_eq!(uglify["sourceMap"], false);
  assert!(uglify.get("nameCache").is_some_and(serde_json::Value::is_null));
  assert!(uglify.get("keep_classnames").is_none());
}

#[test]
fn custom_loader_rules() {
  let builder = ConfigBuilder::new("/project").loader_rules(|mode: Mode| {
    assert!(mode.is_production());
    vec![ModuleRule {
      test: ModuleMatcher::new(r"\.tsx?$").unwrap(),
      exclude: vec![],
      uses: vec![LoaderUse::new("ts-loader")],
    }]
  });
  assert_eq!(builder.root(), Path::new("/project"));

  let config = builder.build();
  assert_eq!(config.module.rules.len(), 1);
  assert_eq!(config.module.rules_for("/project/src/index.tsx").count(), 1);
  assert_eq!(production_config(Path::new("/project")).module.rules.len(), 5);
}
