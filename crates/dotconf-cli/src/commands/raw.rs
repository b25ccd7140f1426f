//! `dotconf raw` command implementation.
//!
//! Prints the whole tree, optionally converted to another format.

use std::str::FromStr;

use dotconf_config::encode_tree;
use dotconf_core::error::ConfigResult;
use dotconf_core::types::FormatKind;

use super::{CommandContext, CommandStatus};

/// Execute the `dotconf raw` command
pub fn execute(output: Option<&str>, ctx: &CommandContext) -> ConfigResult<CommandStatus> {
    let format = match output {
        Some(name) => FormatKind::from_str(name)?,
        None => ctx.config.format(),
    };

    let document = encode_tree(format, ctx.config.raw())?;
    ctx.output.value(document.trim_end());
    Ok(CommandStatus::Success)
}
