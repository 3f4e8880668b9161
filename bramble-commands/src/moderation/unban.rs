use crate::CommandMeta;
use crate::moderation::{gateway_for, moderator_for, send_guild_only, send_reply};
use bramble_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "unban",
    desc: "Lift a ban by username and discriminator.",
    category: "moderation",
    usage: "/unban <name#1234>",
};

#[poise::command(slash_command, category = "Moderation")]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "The banned user's tag, e.g. name#1234"] user_tag: String,
) -> Result<(), Error> {
    let Some(gateway) = gateway_for(&ctx) else {
        return send_guild_only(ctx).await;
    };

    let reply = moderator_for(&ctx, &gateway).unban(&user_tag).await;
    send_reply(ctx, reply).await
}
