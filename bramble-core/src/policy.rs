use poise::serenity_prelude as serenity;

use bramble_utils::permissions::{RoleRank, grants};

/// Every moderation command the bot exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Kick,
    Ban,
    Unban,
    Purge,
    Mute,
    Unmute,
    Warn,
    ListWarnings,
    Slowmode,
    Lock,
    Unlock,
    Nickname,
}

/// Authorization requirements and user-facing texts of one operation.
#[derive(Clone, Copy, Debug)]
pub struct OperationRule {
    pub required: Option<serenity::Permissions>,
    pub hierarchy: bool,
    pub denied: &'static str,
    pub hierarchy_denied: &'static str,
    pub failure: &'static str,
}

const NO_HIERARCHY: &str = "";

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::Kick,
        Operation::Ban,
        Operation::Unban,
        Operation::Purge,
        Operation::Mute,
        Operation::Unmute,
        Operation::Warn,
        Operation::ListWarnings,
        Operation::Slowmode,
        Operation::Lock,
        Operation::Unlock,
        Operation::Nickname,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Operation::Kick => "kick",
            Operation::Ban => "ban",
            Operation::Unban => "unban",
            Operation::Purge => "purge",
            Operation::Mute => "mute",
            Operation::Unmute => "unmute",
            Operation::Warn => "warn",
            Operation::ListWarnings => "warnings",
            Operation::Slowmode => "slowmode",
            Operation::Lock => "lock",
            Operation::Unlock => "unlock",
            Operation::Nickname => "nickname",
        }
    }

    pub const fn rule(self) -> OperationRule {
        match self {
            Operation::Kick => OperationRule {
                required: Some(serenity::Permissions::KICK_MEMBERS),
                hierarchy: true,
                denied: "You don't have permission to kick members.",
                hierarchy_denied: "You can't kick this member due to role hierarchy.",
                failure: "I couldn't kick that member. Check role hierarchy and my permissions.",
            },
            Operation::Ban => OperationRule {
                required: Some(serenity::Permissions::BAN_MEMBERS),
                hierarchy: true,
                denied: "You don't have permission to ban members.",
                hierarchy_denied: "You can't ban this member due to role hierarchy.",
                failure: "I couldn't ban that member. Check role hierarchy and my permissions.",
            },
            Operation::Unban => OperationRule {
                required: Some(serenity::Permissions::BAN_MEMBERS),
                hierarchy: false,
                denied: "You don't have permission to unban members.",
                hierarchy_denied: NO_HIERARCHY,
                failure: "I couldn't unban that user. Check my permissions.",
            },
            Operation::Purge => OperationRule {
                required: Some(serenity::Permissions::MANAGE_MESSAGES),
                hierarchy: false,
                denied: "You don't have permission to manage messages.",
                hierarchy_denied: NO_HIERARCHY,
                failure: "I couldn't delete messages. I likely need the 'Manage Messages' permission.",
            },
            Operation::Mute => OperationRule {
                required: Some(serenity::Permissions::MANAGE_ROLES),
                hierarchy: true,
                denied: "You don't have permission to manage roles.",
                hierarchy_denied: "You can't mute this member due to role hierarchy.",
                failure: "I couldn't mute that member. Check role hierarchy and my permissions.",
            },
            Operation::Unmute => OperationRule {
                required: Some(serenity::Permissions::MANAGE_ROLES),
                hierarchy: false,
                denied: "You don't have permission to manage roles.",
                hierarchy_denied: NO_HIERARCHY,
                failure: "I couldn't unmute that member. Check role hierarchy and my permissions.",
            },
            Operation::Warn => OperationRule {
                required: Some(serenity::Permissions::MANAGE_MESSAGES),
                hierarchy: true,
                denied: "You don't have permission to warn users.",
                hierarchy_denied: "You can't warn this member due to role hierarchy.",
                failure: "I couldn't record that warning. Try again later.",
            },
            Operation::ListWarnings => OperationRule {
                required: None,
                hierarchy: false,
                denied: NO_HIERARCHY,
                hierarchy_denied: NO_HIERARCHY,
                failure: "I couldn't load warnings right now. Try again later.",
            },
            Operation::Slowmode => OperationRule {
                required: Some(serenity::Permissions::MANAGE_CHANNELS),
                hierarchy: false,
                denied: "You don't have permission to set slowmode.",
                hierarchy_denied: NO_HIERARCHY,
                failure: "I couldn't change slowmode. I likely need the 'Manage Channels' permission.",
            },
            Operation::Lock => OperationRule {
                required: Some(serenity::Permissions::MANAGE_CHANNELS),
                hierarchy: false,
                denied: "You don't have permission to lock channels.",
                hierarchy_denied: NO_HIERARCHY,
                failure: "I couldn't lock this channel. I likely need the 'Manage Channels' permission.",
            },
            Operation::Unlock => OperationRule {
                required: Some(serenity::Permissions::MANAGE_CHANNELS),
                hierarchy: false,
                denied: "You don't have permission to unlock channels.",
                hierarchy_denied: NO_HIERARCHY,
                failure: "I couldn't unlock this channel. I likely need the 'Manage Channels' permission.",
            },
            Operation::Nickname => OperationRule {
                required: Some(serenity::Permissions::MANAGE_NICKNAMES),
                hierarchy: true,
                denied: "You don't have permission to change nicknames.",
                hierarchy_denied: "You can't change this member's nickname due to role hierarchy.",
                failure: "I couldn't change that nickname. Check role hierarchy and my permissions.",
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(&'static str),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Ranks compared by the role-hierarchy guard.
#[derive(Clone, Copy, Debug)]
pub struct HierarchyRanks {
    pub actor: RoleRank,
    pub target: RoleRank,
    pub bot: RoleRank,
}

/// Per-deployment authorization settings.
#[derive(Clone, Copy, Debug)]
pub struct ModerationPolicy {
    pub enforce_hierarchy: bool,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            enforce_hierarchy: true,
        }
    }
}

impl ModerationPolicy {
    /// Whether `operation` needs target and bot ranks under this policy.
    pub fn hierarchy_applies(&self, operation: Operation) -> bool {
        self.enforce_hierarchy && operation.rule().hierarchy
    }

    pub fn check_permission(
        &self,
        operation: Operation,
        actor_permissions: serenity::Permissions,
    ) -> Decision {
        let rule = operation.rule();
        match rule.required {
            Some(required) if !grants(actor_permissions, required) => Decision::Denied(rule.denied),
            _ => Decision::Allowed,
        }
    }

    /// Both the actor and the bot must strictly outrank the target.
    pub fn check_hierarchy(&self, operation: Operation, ranks: HierarchyRanks) -> Decision {
        if !self.hierarchy_applies(operation) {
            return Decision::Allowed;
        }

        if ranks.actor > ranks.target && ranks.bot > ranks.target {
            Decision::Allowed
        } else {
            Decision::Denied(operation.rule().hierarchy_denied)
        }
    }

    /// Permission check first, then the hierarchy check when ranks are known.
    pub fn authorize(
        &self,
        operation: Operation,
        actor_permissions: serenity::Permissions,
        ranks: Option<HierarchyRanks>,
    ) -> Decision {
        let decision = self.check_permission(operation, actor_permissions);
        if !decision.is_allowed() {
            return decision;
        }

        match ranks {
            Some(ranks) => self.check_hierarchy(operation, ranks),
            None if self.hierarchy_applies(operation) => {
                Decision::Denied(operation.rule().hierarchy_denied)
            }
            None => Decision::Allowed,
        }
    }
}
