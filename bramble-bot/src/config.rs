use std::env;

use anyhow::Context as _;

use bramble_core::DEFAULT_MUTED_ROLE_NAME;

const DEFAULT_REDIS_KEY_PREFIX: &str = "bramble:prod";

/// Startup settings read from the process environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotConfig {
    pub token: String,
    pub guild_id: Option<u64>,
    pub enforce_role_hierarchy: bool,
    pub muted_role_name: String,
    pub redis_enabled: bool,
    pub redis_url: Option<String>,
    pub redis_key_prefix: String,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|value| !value.trim().is_empty())
            .context("DISCORD_TOKEN must be set")?;

        let guild_id = match lookup("DISCORD_GUILD_ID").filter(|value| !value.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("DISCORD_GUILD_ID is not a guild id: {raw}"))?,
            ),
            None => None,
        };

        let muted_role_name = lookup("MUTED_ROLE_NAME")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MUTED_ROLE_NAME.to_owned());

        Ok(Self {
            token,
            guild_id,
            enforce_role_hierarchy: env_bool(&lookup, "ENFORCE_ROLE_HIERARCHY", true),
            muted_role_name,
            redis_enabled: env_bool(&lookup, "REDIS_ENABLED", false),
            redis_url: lookup("REDIS_URL").filter(|value| !value.trim().is_empty()),
            redis_key_prefix: lookup("REDIS_KEY_PREFIX")
                .unwrap_or_else(|| DEFAULT_REDIS_KEY_PREFIX.to_owned()),
        })
    }
}

fn env_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key) {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::BotConfig;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<BotConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        BotConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_with_only_a_token() {
        let config = config(&[("DISCORD_TOKEN", "abc")]).unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.guild_id, None);
        assert!(config.enforce_role_hierarchy);
        assert_eq!(config.muted_role_name, "Muted");
        assert!(!config.redis_enabled);
        assert_eq!(config.redis_url, None);
        assert_eq!(config.redis_key_prefix, "bramble:prod");
    }

    #[test]
    fn token_is_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[("DISCORD_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("DISCORD_TOKEN", "abc"),
            ("DISCORD_GUILD_ID", " 1234 "),
            ("ENFORCE_ROLE_HIERARCHY", "off"),
            ("MUTED_ROLE_NAME", "Quiet"),
            ("REDIS_ENABLED", "YES"),
            ("REDIS_URL", "redis://localhost"),
            ("REDIS_KEY_PREFIX", "bramble:test"),
        ])
        .unwrap();

        assert_eq!(config.guild_id, Some(1234));
        assert!(!config.enforce_role_hierarchy);
        assert_eq!(config.muted_role_name, "Quiet");
        assert!(config.redis_enabled);
        assert_eq!(config.redis_url.as_deref(), Some("redis://localhost"));
        assert_eq!(config.redis_key_prefix, "bramble:test");
    }

    #[test]
    fn rejects_malformed_guild_id() {
        assert!(config(&[("DISCORD_TOKEN", "abc"), ("DISCORD_GUILD_ID", "guild")]).is_err());
    }
}
