use std::time::Duration;

use inkwell_core::{Context, Error};

use crate::CommandMeta;
use crate::utility::embeds::pong_message;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Check that Inkwell is awake.",
    category: "utility",
    usage: "!ping",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    let latency = (latency > Duration::ZERO).then_some(latency);

    ctx.say(pong_message(ctx.data().db.store().backend_name(), latency))
        .await?;
    Ok(())
}
