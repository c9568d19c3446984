pub mod check_config;
pub mod load_config_file;
pub mod load_env_file;
