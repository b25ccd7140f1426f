//! `dotconf get` command implementation.
//!
//! Prints scalars bare and trees or sequences as pretty JSON.

use dotconf_core::error::{CodecError, ConfigError, ConfigResult};
use dotconf_core::types::{ConfigValue, FormatKind};

use super::{CommandContext, CommandStatus};

/// Execute the `dotconf get` command
pub fn execute(key: &str, ctx: &CommandContext) -> ConfigResult<CommandStatus> {
    match ctx.config.lookup(key) {
        Some(value) => {
            ctx.output.value(&render(&value)?);
            Ok(CommandStatus::Success)
        },
        None => {
            ctx.output.warn(&format!("Key '{}' not found in {}", key, ctx.config.path()));
            Ok(CommandStatus::Failure)
        },
    }
}

/// Render a value for the terminal
pub fn render(value: &ConfigValue) -> ConfigResult<String> {
    if value.is_scalar() {
        return Ok(value.to_string());
    }
    serde_json::to_string_pretty(value).map_err(|e| ConfigError::Encode {
        format: FormatKind::Json,
        source: CodecError::new(e.to_string()),
    })
}
