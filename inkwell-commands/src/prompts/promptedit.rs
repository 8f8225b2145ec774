use inkwell_core::{Context, Error};

use crate::CommandMeta;
use crate::prompts::embeds::not_implemented_message;
use crate::prompts::ensure_moderator;

pub const META: CommandMeta = CommandMeta {
    name: "promptedit",
    desc: "Edit a prompt (coming soon).",
    category: "moderation",
    usage: "!promptedit <prompt #> <text>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn promptedit(
    ctx: Context<'_>,
    #[description = "Prompt number and new text"]
    #[rename = "args"]
    #[rest]
    _args: Option<String>,
) -> Result<(), Error> {
    if !ensure_moderator(ctx).await? {
        return Ok(());
    }

    ctx.say(not_implemented_message()).await?;
    Ok(())
}
