//! Command implementations and dispatch logic.
//!
//! Each command takes the shared [`CommandContext`] and reports a
//! [`CommandStatus`]; hard failures travel as `ConfigError`.

use std::process::ExitCode;
use std::str::FromStr;

use camino::Utf8Path;
use dotconf_config::{Config, ConfigOptions};
use dotconf_core::error::ConfigResult;
use dotconf_core::types::FormatKind;
use tracing::debug;

pub mod get;
pub mod has;
pub mod raw;
pub mod set;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Cli, Commands};

/// Outcome of a command that ran without a hard error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// The command ran but the answer is "no", e.g. a missing key
    Failure,
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Shared context for all commands
pub struct CommandContext {
    pub config: Config,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Build the context from global arguments. The file is not read yet.
    pub fn new(cli: &Cli) -> ConfigResult<Self> {
        let options = build_options(&cli.config, cli.format.as_deref(), cli.env_prefix.as_deref())?;
        debug!(path = %cli.config, format = %options.format(), "using configuration file");

        Ok(Self {
            config: Config::new(cli.config.clone(), options),
            output: OutputHandler::new(),
        })
    }
}

/// Resolve options: an explicit format name wins, then the file extension, then JSON
pub fn build_options(path: &Utf8Path, format: Option<&str>, env_prefix: Option<&str>) -> ConfigResult<ConfigOptions> {
    let mut options = match format {
        Some(name) => ConfigOptions::new().with_format(FormatKind::from_str(name)?),
        None => ConfigOptions::for_path(path),
    };
    if let Some(prefix) = env_prefix {
        options = options.automatic_env(prefix);
    }
    Ok(options)
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &mut CommandContext) -> ConfigResult<CommandStatus> {
    if !matches!(command, Commands::Format) {
        ctx.config.load()?;
    }

    match command {
        Commands::Get { key } => {
            debug!("Reading key: {}", key);
            get::execute(&key, ctx)
        },
        Commands::Has { key } => {
            debug!("Checking key: {}", key);
            has::execute(&key, ctx)
        },
        Commands::Set { key, value, string } => {
            debug!("Setting key: {} (string: {})", key, string);
            set::execute(&key, &value, string, ctx)
        },
        Commands::Raw { output } => {
            debug!("Printing tree (output: {:?})", output);
            raw::execute(output.as_deref(), ctx)
        },
        Commands::Format => show_format(ctx),
    }
}

/// Print the selected format and the extensions that map to it
fn show_format(ctx: &CommandContext) -> ConfigResult<CommandStatus> {
    ctx.output.value(&describe_format(ctx.config.format()));
    Ok(CommandStatus::Success)
}

fn describe_format(format: FormatKind) -> String {
    format!("{} ({})", format.name(), format.extensions().join(", "))
}
