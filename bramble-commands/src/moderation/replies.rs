use poise::CreateReply;

use bramble_core::{Context, Error};

use crate::moderation::actions::{Moderator, Reply};
use crate::moderation::gateway::SerenityGateway;

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

/// Gateway bound to the invoking guild, or `None` outside of one.
pub fn gateway_for<'a>(ctx: &Context<'a>) -> Option<SerenityGateway<'a>> {
    let guild_id = ctx.guild_id()?;
    Some(SerenityGateway::new(
        ctx.http(),
        guild_id,
        ctx.framework().bot_id,
    ))
}

pub fn moderator_for<'a, 'g>(
    ctx: &Context<'a>,
    gateway: &'g SerenityGateway<'a>,
) -> Moderator<'g, SerenityGateway<'a>> {
    Moderator::new(gateway, ctx.data(), ctx.author().id, ctx.channel_id())
}

pub async fn send_reply(ctx: Context<'_>, reply: Reply) -> Result<(), Error> {
    ctx.send(
        CreateReply::default()
            .content(reply.content)
            .ephemeral(reply.ephemeral),
    )
    .await?;
    Ok(())
}

pub async fn send_guild_only(ctx: Context<'_>) -> Result<(), Error> {
    send_reply(ctx, Reply::ephemeral(guild_only_message())).await
}
