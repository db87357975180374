use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

use jumpstack::config::Config;
use jumpstack::replay::Script;

/// Jump Stack - replay an editing session and show the remembered positions
#[derive(Parser, Debug)]
#[command(name = "jumpstack")]
#[command(version)]
#[command(about = "Replay an editing session against the jump stack", long_about = None)]
struct Cli {
    /// JSON replay script
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Config file (default: ~/.config/jumpstack/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum number of remembered positions (overrides the config file)
    #[arg(long)]
    capacity: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging before loading the config so config problems are reported;
    // the configured level is applied once the config is known.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let has_env_filter = env_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new("warn")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let loaded = match &cli.config {
        Some(path) => Config::try_load_from(path),
        None => Config::try_load(),
    };
    let mut config = loaded.unwrap_or_else(|err| {
        warn!("{err:#}, using defaults");
        Config::default()
    });
    if cli.capacity.is_some() {
        config.capacity = cli.capacity;
    }

    if !has_env_filter {
        filter_handle
            .reload(EnvFilter::new(&config.log_level))
            .context("Failed to apply configured log level")?;
    }

    let script = Script::load(&cli.script)?;
    let outcome = script.run(&config).await?;
    print!("{}", outcome.render());

    Ok(())
}
