use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use hs_cli::commands::{check, checks, schemes};
use hs_cli::input::load_mapset;
use hs_cli::{Cli, Commands, Config};
use hs_core::CheckRegistry;

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_path.filter(|path| !path.exists()) {
        bail!("config file not found: {}", path.display());
    }
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON output on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let registry = CheckRegistry::default();
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Check { mapset, json, only }) => {
            let config = load_config(cli.config.as_deref())?;
            let variants = load_mapset(mapset)?;
            check::run(&mut stdout, &registry, &variants, &config.checks, only, *json)?;
        }
        Some(Commands::Schemes { mapset, json }) => {
            let config = load_config(cli.config.as_deref())?;
            let variants = load_mapset(mapset)?;
            schemes::run(&mut stdout, &variants, &config.checks, *json)?;
        }
        Some(Commands::Checks) => {
            checks::run(&mut stdout, &registry)?;
        }
        None => {
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    stdout.flush()?;
    Ok(())
}
