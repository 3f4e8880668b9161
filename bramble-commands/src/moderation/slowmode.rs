use crate::CommandMeta;
use crate::moderation::{gateway_for, moderator_for, send_guild_only, send_reply};
use bramble_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "slowmode",
    desc: "Set the per-user message rate limit of this channel.",
    category: "moderation",
    usage: "/slowmode <seconds>",
};

#[poise::command(slash_command, category = "Moderation")]
pub async fn slowmode(
    ctx: Context<'_>,
    #[description = "Seconds between messages (0 disables)"] seconds: u16,
) -> Result<(), Error> {
    let Some(gateway) = gateway_for(&ctx) else {
        return send_guild_only(ctx).await;
    };

    let reply = moderator_for(&ctx, &gateway).slowmode(seconds).await;
    send_reply(ctx, reply).await
}
