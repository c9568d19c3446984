mod args;
mod logger;
mod types;

use std::{path::PathBuf, process::ExitCode};

use ansi_term::Colour;
use anyhow::Context;
use args::{Command, LogArgs, RootArgs};
use clap::Parser;

use prodpack::{
  BundleConfig, BuildError, FilenameRenderContext, FilenameTemplate, check_config, env_definitions,
  load_config_file, load_env_file, production_config,
};
use prodpack_utils::xxhash::content_hash;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  log: LogArgs,

  #[clap(subcommand)]
  command: Command,
}

fn resolve_root(args: RootArgs) -> anyhow::Result<PathBuf> {
  match args.root {
    Some(root) => Ok(root),
    None => std::env::current_dir().context("Failed to get current dir"),
  }
}

fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
  let json = if compact { serde_json::to_string(value)? } else { serde_json::to_string_pretty(value)? };
  println!("{json}");
  Ok(())
}

fn print_rows(rows: &[(String, String)]) {
  let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or_default();
  let dim = Colour::White.dimmed();
  for (key, value) in rows {
    println!(
      "{}{:width$} {} {}",
      Colour::Cyan.paint(key.as_str()),
      "",
      dim.paint("│"),
      value,
      width = width - key.len()
    );
  }
}

fn check(config: &BundleConfig) -> anyhow::Result<()> {
  check_config(config)?;
  println!(
    "{} {} entries, {} cache groups, {} plugins",
    Colour::Green.paint("✔"),
    config.entry.len(),
    config.optimization.split_chunks.groups().count(),
    config.plugins.len()
  );
  Ok(())
}

fn run(command: Command) -> anyhow::Result<()> {
  match command {
    Command::Print { root, compact } => {
      let root = resolve_root(root)?;
      tracing::debug!(root = %root.display(), "building production configuration");
      print_json(&production_config(&root), compact)?;
    }
    Command::Schema => {
      print_json(&schemars::schema_for!(BundleConfig), false)?;
    }
    Command::Check { root, config } => {
      let config = match config {
        Some(path) => load_config_file(&path)?,
        None => production_config(&resolve_root(root)?),
      };
      check(&config)?;
    }
    Command::Filename { template, name, hash, content } => {
      let hash = match (hash, content) {
        (Some(hash), _) => Some(hash),
        (None, Some(path)) => {
          let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
          Some(content_hash(&bytes))
        }
        (None, None) => None,
      };
      let template = FilenameTemplate::new(template);
      if hash.is_none() && template.has_hash_placeholder() {
        tracing::warn!("`{template}` has a hash placeholder but no hash was given");
      }
      let ctx = FilenameRenderContext {
        name: Some(name.as_str()),
        chunk_hash: hash.as_deref(),
        content_hash: hash.as_deref(),
        hash: hash.as_deref(),
        ..Default::default()
      };
      println!("{}", template.render(&ctx));
    }
    Command::Group { root, module, shared, origin } => {
      let config = production_config(&resolve_root(root)?);
      match config.optimization.split_chunks.select(&module, shared, origin.into()) {
        Some((key, group)) => print_rows(&[
          ("group".to_string(), key.to_string()),
          ("name".to_string(), group.name.clone().unwrap_or_default()),
          ("priority".to_string(), group.priority.to_string()),
        ]),
        None => println!("{}", Colour::White.dimmed().paint("no cache group claims this module")),
      }
    }
    Command::Env { root } => {
      let root = resolve_root(root)?;
      let config = production_config(&root);
      let Some(options) = config.env_file() else {
        tracing::info!("configuration does not load an env file");
        return Ok(());
      };
      let vars = load_env_file(options, &root).map_err(BuildError::from)?;
      let rows = env_definitions(&vars).into_iter().collect::<Vec<_>>();
      print_rows(&rows);
    }
  }
  Ok(())
}

fn main() -> ExitCode {
  let args = Commands::parse();
  logger::init_logger(args.log.verbose, args.log.quiet);

  let Err(error) = run(args.command) else {
    return ExitCode::SUCCESS;
  };

  match error.downcast::<BuildError>() {
    Ok(errors) => {
      for error in &*errors {
        eprintln!("{} {}", Colour::Red.paint("Error:"), error);
      }
    }
    Err(error) => eprintln!("{} {:#}", Colour::Red.paint("Error:"), error),
  }
  ExitCode::FAILURE
}
