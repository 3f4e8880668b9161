use poise::serenity_prelude as serenity;

/// Position of a member's highest role.
///
/// The guild owner outranks every role, so `Owner` sorts above any position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoleRank {
    Position(u16),
    Owner,
}

impl RoleRank {
    /// Rank of a member holding no role besides `@everyone`.
    pub const EVERYONE: RoleRank = RoleRank::Position(0);
}

/// Effective guild permissions and top-role rank of one member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberStanding {
    pub permissions: serenity::Permissions,
    pub rank: RoleRank,
}

impl MemberStanding {
    pub fn owner() -> Self {
        Self {
            permissions: serenity::Permissions::all(),
            rank: RoleRank::Owner,
        }
    }
}

/// `ADMINISTRATOR` implicitly grants every permission.
pub fn grants(perms: serenity::Permissions, required: serenity::Permissions) -> bool {
    perms.contains(serenity::Permissions::ADMINISTRATOR) || perms.contains(required)
}

/// Fold a member's roles into its standing.
///
/// `roles` yields `(id, position, permissions)` for every role of the guild;
/// the `@everyone` role always applies.
pub fn fold_standing<I>(
    everyone_role_id: serenity::RoleId,
    member_roles: &[serenity::RoleId],
    roles: I,
) -> MemberStanding
where
    I: IntoIterator<Item = (serenity::RoleId, u16, serenity::Permissions)>,
{
    let mut permissions = serenity::Permissions::empty();
    let mut rank = RoleRank::EVERYONE;

    for (role_id, position, role_permissions) in roles {
        if role_id == everyone_role_id {
            permissions |= role_permissions;
            continue;
        }

        if member_roles.contains(&role_id) {
            permissions |= role_permissions;
            rank = rank.max(RoleRank::Position(position));
        }
    }

    MemberStanding { permissions, rank }
}

/// Resolve a member's effective guild permissions and top-role rank over HTTP.
pub async fn resolve_member_standing(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<MemberStanding> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user_id {
        return Ok(MemberStanding::owner());
    }

    let member = guild_id.member(http, user_id).await?;
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    Ok(fold_standing(
        everyone_role_id,
        &member.roles,
        guild
            .roles
            .values()
            .map(|role| (role.id, role.position, role.permissions)),
    ))
}
