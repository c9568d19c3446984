use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// `--verbose` and `--quiet` win over `RUST_LOG`, which wins over the
/// `info` default.
pub fn init_logger(verbose: bool, quiet: bool) {
  let filter = if verbose {
    EnvFilter::new("prodpack=debug,prodpack_cli=debug")
  } else if quiet {
    EnvFilter::new("error")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prodpack=info,prodpack_cli=info"))
  };

  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .try_init();
}
