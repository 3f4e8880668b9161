use crate::CommandMeta;
use crate::moderation::{gateway_for, moderator_for, send_guild_only, send_reply};
use bramble_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "lock",
    desc: "Stop @everyone from sending messages in this channel.",
    category: "moderation",
    usage: "/lock",
};

pub const UNLOCK_META: CommandMeta = CommandMeta {
    name: "unlock",
    desc: "Let @everyone send messages in this channel again.",
    category: "moderation",
    usage: "/unlock",
};

#[poise::command(slash_command, category = "Moderation")]
pub async fn lock(ctx: Context<'_>) -> Result<(), Error> {
    let Some(gateway) = gateway_for(&ctx) else {
        return send_guild_only(ctx).await;
    };

    let reply = moderator_for(&ctx, &gateway).lock().await;
    send_reply(ctx, reply).await
}

#[poise::command(slash_command, category = "Moderation")]
pub async fn unlock(ctx: Context<'_>) -> Result<(), Error> {
    let Some(gateway) = gateway_for(&ctx) else {
        return send_guild_only(ctx).await;
    };

    let reply = moderator_for(&ctx, &gateway).unlock().await;
    send_reply(ctx, reply).await
}
