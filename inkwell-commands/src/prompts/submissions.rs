use inkwell_core::{Context, Error};
use inkwell_database::impls::prompts::get_prompt;
use inkwell_utils::parse::parse_prompt_id;

use crate::CommandMeta;
use crate::prompts::embeds::{
    no_submissions_message, submissions_embed, unknown_prompt_message, usage_message,
};

pub const META: CommandMeta = CommandMeta {
    name: "submissions",
    desc: "List the submissions for a prompt.",
    category: "prompts",
    usage: "!submissions <prompt #>",
};

#[poise::command(prefix_command, slash_command, category = "Prompts")]
pub async fn submissions(
    ctx: Context<'_>,
    #[description = "Prompt number"] prompt: Option<String>,
) -> Result<(), Error> {
    let Some(prompt_id) = prompt.as_deref().and_then(parse_prompt_id) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let Some(prompt) = get_prompt(&ctx.data().db, prompt_id).await? else {
        ctx.say(unknown_prompt_message(prompt_id)).await?;
        return Ok(());
    };

    if prompt.submission_count() == 0 {
        ctx.say(no_submissions_message(prompt_id)).await?;
        return Ok(());
    }

    ctx.send(poise::CreateReply::default().embed(submissions_embed(&prompt)))
        .await?;
    Ok(())
}
