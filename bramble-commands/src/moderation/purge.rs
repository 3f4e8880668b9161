use crate::CommandMeta;
use crate::moderation::{gateway_for, moderator_for, send_guild_only, send_reply};
use bramble_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "purge",
    desc: "Delete the latest messages in this channel.",
    category: "moderation",
    usage: "/purge [amount]",
};

pub const CLEAR_META: CommandMeta = CommandMeta {
    name: "clear",
    desc: "Alias of purge.",
    category: "moderation",
    usage: "/clear [amount]",
};

#[poise::command(slash_command, category = "Moderation")]
pub async fn purge(
    ctx: Context<'_>,
    #[description = "Messages to delete (default 5, max 100)"] amount: Option<u16>,
) -> Result<(), Error> {
    run_purge(ctx, amount).await
}

#[poise::command(slash_command, category = "Moderation")]
pub async fn clear(
    ctx: Context<'_>,
    #[description = "Messages to delete (default 5, max 100)"] amount: Option<u16>,
) -> Result<(), Error> {
    run_purge(ctx, amount).await
}

async fn run_purge(ctx: Context<'_>, amount: Option<u16>) -> Result<(), Error> {
    let Some(gateway) = gateway_for(&ctx) else {
        return send_guild_only(ctx).await;
    };

    let reply = moderator_for(&ctx, &gateway).purge(amount).await;
    send_reply(ctx, reply).await
}
