use inkwell_core::{Context, Error};

use crate::CommandMeta;
use crate::prompts::embeds::not_implemented_message;
use crate::prompts::ensure_moderator;

pub const META: CommandMeta = CommandMeta {
    name: "promptdelete",
    desc: "Delete a prompt (coming soon).",
    category: "moderation",
    usage: "!promptdelete <prompt #>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn promptdelete(
    ctx: Context<'_>,
    #[description = "Prompt number"]
    #[rename = "prompt"]
    _prompt: Option<String>,
) -> Result<(), Error> {
    if !ensure_moderator(ctx).await? {
        return Ok(());
    }

    ctx.say(not_implemented_message()).await?;
    Ok(())
}
