//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for objective-answerer
#[derive(Parser, Debug)]
#[command(name = "objective-answerer")]
#[command(author, version, about = "Answer question events with an LLM and publish answer events")]
#[command(long_about = r#"
objective-answerer consumes question events from Kafka, looks up the
referenced objective, asks an LLM with a prompt chosen by objective type
and publishes one answer event per question.

Configuration is loaded from (in priority order):
1. ANSWERER_* environment variables (e.g. ANSWERER_KAFKA__BOOTSTRAP_SERVERS)
2. --config <path>     Explicit config file
3. ./answerer.toml     Project-level config
4. ~/.config/objective-answerer/config.toml   Global config

Example:
  objective-answerer -v
  objective-answerer --config /etc/answerer.toml
  ANSWERER_STORE__BACKEND=file ANSWERER_STORE__FILE_PATH=objectives.json objective-answerer
"#)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Print configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Verbosity level (-v = debug, -vv = trace); overrides the configured level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
