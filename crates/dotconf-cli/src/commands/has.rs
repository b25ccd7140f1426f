//! `dotconf has` command implementation.

use dotconf_core::error::ConfigResult;

use super::{CommandContext, CommandStatus};

/// Execute the `dotconf has` command; the exit status carries the answer
pub fn execute(key: &str, ctx: &CommandContext) -> ConfigResult<CommandStatus> {
    let present = ctx.config.lookup(key).is_some();
    ctx.output.value(if present { "true" } else { "false" });

    Ok(if present {
        CommandStatus::Success
    } else {
        CommandStatus::Failure
    })
}
