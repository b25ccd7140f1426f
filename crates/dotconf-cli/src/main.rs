//! # dotconf
//!
//! Read and edit JSON, YAML and TOML configuration files by dot-separated key.
//!
//! This is the main entry point for the dotconf CLI. It handles argument parsing,
//! sets up logging and panic reporting, and dispatches to the command handlers.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use dotconf_core::error::ConfigResult;
use tracing::{debug, error};

mod commands;
mod output;

use commands::{CommandContext, CommandStatus};
use output::errors::ErrorFormatter;

/// Read and edit configuration files by dot-separated key
#[derive(Parser, Debug)]
#[command(name = "dotconf", version, about = "Dot-path access to JSON, YAML and TOML config files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file to operate on
    #[arg(short, long, value_name = "FILE", default_value = "config.json", env = "DOTCONF_FILE", global = true)]
    pub config: Utf8PathBuf,

    /// Document format (json, yaml, toml); inferred from the extension by default
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Let `PREFIX_KEY_PATH` environment variables override file values
    #[arg(long, value_name = "PREFIX", global = true)]
    pub env_prefix: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value at a key
    Get { key: String },
    /// Exit with 0 if the key exists, 1 otherwise
    Has { key: String },
    /// Assign a value and write the file back
    Set {
        key: String,
        /// JSON literal such as 42, true or {"a": 1}; anything else is stored as text
        value: String,
        /// Store the value as a string without parsing it
        #[arg(long)]
        string: bool,
    },
    /// Print the whole tree
    Raw {
        /// Output format; defaults to the file's own format
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the selected format
    Format,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting dotconf v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> ConfigResult<CommandStatus> {
    let mut ctx = CommandContext::new(&cli)?;
    commands::dispatch_command(cli.command, &mut ctx)
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("dotconf={},dotconf_config={}", level, level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("dotconf encountered an unexpected error: {}", panic_info);
        eprintln!("dotconf crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/dotconf-rs/dotconf/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
