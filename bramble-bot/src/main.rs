mod config;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use bramble_core::{Data, Error, ModerationPolicy};
use bramble_database::ModerationStore;

use crate::config::BotConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;
    let store = build_store(&config).await;
    info!(
        redis_store = store.is_redis_enabled(),
        key_prefix = %config.redis_key_prefix,
        "Moderation store ready."
    );

    let policy = ModerationPolicy {
        enforce_hierarchy: config.enforce_role_hierarchy,
    };
    info!(
        enforce_role_hierarchy = policy.enforce_hierarchy,
        muted_role_name = %config.muted_role_name,
        "Moderation policy configured."
    );

    let data = Data::new(store, policy, config.muted_role_name.clone());
    let guild_id = config.guild_id.map(serenity::GuildId::new);

    let intents = serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: bramble_commands::commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                info!("Bramble has sprouted!");

                match guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            guild_id,
                        )
                        .await?;
                        info!(guild_id = guild_id.get(), "Commands registered in guild.");
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        info!("Commands registered globally.");
                    }
                }

                Ok(data)
            })
        })
        .build();

    info!("Bramble is connecting...");

    let mut client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

async fn build_store(config: &BotConfig) -> ModerationStore {
    let prefix = config.redis_key_prefix.clone();

    if !config.redis_enabled {
        info!("Redis store disabled (set REDIS_ENABLED=true to enable); warnings live in memory.");
        return ModerationStore::in_memory(prefix);
    }

    let Some(redis_url) = config.redis_url.as_deref() else {
        warn!(key_prefix = %prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with the memory store.");
        return ModerationStore::in_memory(prefix);
    };

    let store = match ModerationStore::redis(redis_url, prefix.clone()) {
        Ok(store) => {
            info!(key_prefix = %prefix, "Redis store enabled.");
            store
        }
        Err(err) => {
            warn!(?err, key_prefix = %prefix, "Failed to initialize Redis store; continuing with the memory store.");
            return ModerationStore::in_memory(prefix);
        }
    };

    if let Err(err) = store.ping().await {
        warn!(?err, "Redis store ping failed; store operations will report errors until it recovers.");
    } else {
        info!("Redis store health check passed.");
    }

    store
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(bramble_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = bramble_commands::COMMANDS
                .iter()
                .find(|meta| meta.name == ctx.command().name)
                .map(|meta| format!("Usage: `{}`", meta.usage))
                .unwrap_or_default();
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).content(description))
                .await;
        }
        poise::FrameworkError::UnknownInteraction { interaction, .. } => {
            debug!(command = %interaction.data.name, "unknown command interaction");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}
