//! CLI entrypoint for objective-answerer
//!
//! Loads configuration, initialises logging and hands off to [`app::run`],
//! which wires every layer together using dependency injection.

mod app;
mod cli;
mod logging;

use answerer_infrastructure::{ConfigLoader, FileConfig};
use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        let config = load_config(&cli)?;
        println!();
        println!("{}", toml::to_string_pretty(&app::redacted(&config))?);
        return Ok(());
    }

    let (config, warnings) = ConfigLoader::validated(load_config(&cli)?)?;

    // Guard must live until exit so buffered log lines are flushed
    let (format, _) = config.logging.parse_format();
    let _log_guard = logging::init(&config.logging.level, format, cli.verbose)?;

    for issue in &warnings {
        warn!(code = ?issue.code, "{}", issue.message);
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bootstrap_servers = %config.kafka.bootstrap_servers,
        store = %config.store.backend,
        "Starting objective-answerer"
    );

    app::run(config).await
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        Ok(ConfigLoader::load_defaults())
    } else {
        Ok(ConfigLoader::load(cli.config.as_ref())?)
    }
}
