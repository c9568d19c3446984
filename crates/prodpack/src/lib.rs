mod config_builder;
mod loader_rules;
mod utils;

pub use crate::{
  config_builder::{ConfigBuilder, production_config},
  loader_rules::{DefaultLoaderRules, LoaderRules},
  utils::{
    check_config::check_config,
    load_config_file::load_config_file,
    load_env_file::{env_definitions, load_env_file},
  },
};
pub use prodpack_common::*;
pub use prodpack_error::{BuildError, BuildResult, ConfigDiagnostic};
