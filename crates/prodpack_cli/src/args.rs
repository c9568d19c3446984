use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::chunk_origin::ChunkOrigin;

#[derive(Args)]
pub struct RootArgs {
  /// Project root the configuration is built for. Defaults to the current directory.
  #[clap(long)]
  pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct LogArgs {
  #[clap(long, short, global = true)]
  pub verbose: bool,

  #[clap(long, short, global = true, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
  /// Print the production configuration as JSON.
  Print {
    #[clap(flatten)]
    root: RootArgs,

    #[clap(long)]
    compact: bool,
  },

  /// Print the JSON schema of the configuration.
  Schema,

  /// Check the structure of the production configuration or of a JSON config file.
  Check {
    #[clap(flatten)]
    root: RootArgs,

    #[clap(long, conflicts_with = "root")]
    config: Option<PathBuf>,
  },

  /// Render a filename template.
  Filename {
    #[clap(long, short = 't')]
    template: String,

    #[clap(long, short = 'n')]
    name: String,

    #[clap(long, conflicts_with = "content")]
    hash: Option<String>,

    /// Hash this file's content instead of passing `--hash`.
    #[clap(long)]
    content: Option<PathBuf>,
  },

  /// Show which cache group a module would be moved into.
  Group {
    #[clap(flatten)]
    root: RootArgs,

    #[clap(long, short = 'm')]
    module: String,

    /// Number of chunks that share the module.
    #[clap(long, default_value_t = 1)]
    shared: u32,

    #[clap(long, value_enum, default_value = "initial")]
    origin: ChunkOrigin,
  },

  /// Load the env file the configuration points at and print its definitions.
  Env {
    #[clap(flatten)]
    root: RootArgs,
  },
}
