use inkwell_core::{Context, Error};
use inkwell_database::impls::submissions::add_submission_to_prompt;
use inkwell_utils::parse::{parse_prompt_id, parse_submission_url};

use crate::CommandMeta;
use crate::prompts::embeds::{submission_thanks_message, unknown_prompt_message, usage_message};

pub const META: CommandMeta = CommandMeta {
    name: "submit",
    desc: "Submit a link to your entry for a prompt.",
    category: "prompts",
    usage: "!submit <prompt #> <link>",
};

#[poise::command(prefix_command, slash_command, category = "Prompts")]
pub async fn submit(
    ctx: Context<'_>,
    #[description = "Prompt number"] prompt: Option<String>,
    #[description = "Link to your entry (http or https)"] link: Option<String>,
) -> Result<(), Error> {
    let prompt_id = prompt.as_deref().and_then(parse_prompt_id);
    let link = link.as_deref().and_then(parse_submission_url);

    let (Some(prompt_id), Some(link)) = (prompt_id, link) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let author = ctx.author().id.get().to_string();
    if add_submission_to_prompt(&ctx.data().db, prompt_id, &author, link.as_str()).await? {
        ctx.say(submission_thanks_message(prompt_id)).await?;
    } else {
        ctx.say(unknown_prompt_message(prompt_id)).await?;
    }

    Ok(())
}
