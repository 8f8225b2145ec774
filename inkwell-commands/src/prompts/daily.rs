use inkwell_core::{Context, Error};
use inkwell_database::impls::daily::get_daily_prompt;

use crate::CommandMeta;
use crate::prompts::embeds::{no_daily_prompt_message, prompt_embed};

pub const META: CommandMeta = CommandMeta {
    name: "daily",
    desc: "Get today's writing prompt.",
    category: "prompts",
    usage: "!daily",
};

#[poise::command(prefix_command, slash_command, category = "Prompts")]
pub async fn daily(ctx: Context<'_>) -> Result<(), Error> {
    match get_daily_prompt(&ctx.data().db).await? {
        Some(prompt) => {
            ctx.send(poise::CreateReply::default().embed(prompt_embed("Today's prompt", &prompt)))
                .await?;
        }
        None => {
            ctx.say(no_daily_prompt_message()).await?;
        }
    }

    Ok(())
}
