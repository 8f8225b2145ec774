use tracing::error;

use inkwell_core::{Context, Error};
use inkwell_database::impls::prompts::add_prompt;

use crate::CommandMeta;
use crate::prompts::embeds::{prompt_add_failed_message, prompt_added_message, usage_message};
use crate::prompts::ensure_moderator;

pub const META: CommandMeta = CommandMeta {
    name: "promptadd",
    desc: "Add a new prompt to the pool.",
    category: "moderation",
    usage: "!promptadd <text>",
};

const PROMPT_TEXT_MAX_CHARS: usize = 1500;

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn promptadd(
    ctx: Context<'_>,
    #[description = "Prompt text"]
    #[rest]
    text: Option<String>,
) -> Result<(), Error> {
    if !ensure_moderator(ctx).await? {
        return Ok(());
    }

    let text = text.map(|raw| raw.trim().to_owned()).unwrap_or_default();
    if text.is_empty() {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    }

    if text.chars().count() > PROMPT_TEXT_MAX_CHARS {
        ctx.say(format!(
            "Prompt text is too long (max {} characters).",
            PROMPT_TEXT_MAX_CHARS
        ))
        .await?;
        return Ok(());
    }

    match add_prompt(&ctx.data().db, &text).await {
        Ok(prompt_id) => {
            ctx.say(prompt_added_message(prompt_id)).await?;
        }
        Err(source) => {
            error!(?source, "failed to add prompt");
            ctx.say(prompt_add_failed_message()).await?;
        }
    }

    Ok(())
}
