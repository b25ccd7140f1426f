//! `dotconf set` command implementation.
//!
//! Assigns a value and writes the whole tree back to the file. Only keys
//! whose parent section already exists can be set.

use dotconf_config::json;
use dotconf_core::error::ConfigResult;
use dotconf_core::types::ConfigValue;

use super::{CommandContext, CommandStatus};

/// Execute the `dotconf set` command
pub fn execute(key: &str, raw: &str, as_string: bool, ctx: &mut CommandContext) -> ConfigResult<CommandStatus> {
    let value = parse_value(raw, as_string);
    let summary = format!("Set {} = {}", key, value);

    ctx.config.set(key, value)?;
    ctx.output.success(&summary);
    Ok(CommandStatus::Success)
}

/// Interpret a command-line value: JSON literals keep their type, anything
/// that fails to parse is taken as plain text
pub fn parse_value(raw: &str, as_string: bool) -> ConfigValue {
    if as_string {
        return ConfigValue::from(raw);
    }
    json::parse_value(raw).unwrap_or_else(|_| ConfigValue::from(raw))
}
