pub mod daily;
pub(crate) mod embeds;
pub mod promptadd;
pub mod promptdelete;
pub mod promptedit;
pub mod random;
pub mod submissions;
pub mod submit;

use inkwell_core::{Context, Error};
use inkwell_utils::permissions::has_moderator_role;

use crate::prompts::embeds::{guild_only_message, moderator_only_message};

/// Reply with a refusal and return `false` unless the author holds a moderator role.
pub(crate) async fn ensure_moderator(ctx: Context<'_>) -> Result<bool, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(false);
    };

    if !has_moderator_role(
        ctx.http(),
        guild_id,
        ctx.author().id,
        &ctx.data().moderator_roles,
    )
    .await?
    {
        ctx.say(moderator_only_message()).await?;
        return Ok(false);
    }

    Ok(true)
}
