use rand::seq::IteratorRandom;

use inkwell_core::{Context, Error};
use inkwell_database::impls::prompts::get_prompts;

use crate::CommandMeta;
use crate::prompts::embeds::{no_prompts_message, prompt_embed};

pub const META: CommandMeta = CommandMeta {
    name: "random",
    desc: "Get a random prompt from the pool.",
    category: "prompts",
    usage: "!random",
};

#[poise::command(prefix_command, slash_command, category = "Prompts")]
pub async fn random(ctx: Context<'_>) -> Result<(), Error> {
    let prompts = get_prompts(&ctx.data().db).await?;

    // ThreadRng is not Send; keep it out of the await points.
    let picked = {
        let mut rng = rand::rng();
        prompts.into_values().choose(&mut rng)
    };

    let Some(prompt) = picked else {
        ctx.say(no_prompts_message()).await?;
        return Ok(());
    };

    ctx.send(poise::CreateReply::default().embed(prompt_embed("Random prompt", &prompt)))
        .await?;
    Ok(())
}
