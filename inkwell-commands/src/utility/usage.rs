use inkwell_core::{Context, Error};

use crate::CommandMeta;
use crate::utility::embeds::usage_reply;

pub const META: CommandMeta = CommandMeta {
    name: "usage",
    desc: "Show how to call a command.",
    category: "utility",
    usage: "!usage <command>",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn usage(
    ctx: Context<'_>,
    #[description = "Command name, e.g. submit"] command: Option<String>,
) -> Result<(), Error> {
    ctx.say(usage_reply(command.as_deref())).await?;
    Ok(())
}
