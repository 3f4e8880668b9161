use crate::store::ModerationStore;

fn muted_role_key(store: &ModerationStore, guild_id: u64) -> String {
    store.key(format!("muted_role:{guild_id}"))
}

/// Remembered id of the guild's muted role, if one was resolved before.
pub async fn get_muted_role_id(store: &ModerationStore, guild_id: u64) -> anyhow::Result<Option<u64>> {
    store.get_json(&muted_role_key(store, guild_id)).await
}

pub async fn set_muted_role_id(
    store: &ModerationStore,
    guild_id: u64,
    role_id: u64,
) -> anyhow::Result<()> {
    store
        .set_json(&muted_role_key(store, guild_id), &role_id)
        .await
}

pub async fn clear_muted_role_id(store: &ModerationStore, guild_id: u64) -> anyhow::Result<()> {
    store.del(&muted_role_key(store, guild_id)).await
}

#[cfg(test)]
mod tests {
    use super::{clear_muted_role_id, get_muted_role_id, set_muted_role_id};
    use crate::store::ModerationStore;

    #[tokio::test]
    async fn remembers_role_per_guild() {
        let store = ModerationStore::in_memory("test");

        assert_eq!(get_muted_role_id(&store, 1).await.unwrap(), None);

        set_muted_role_id(&store, 1, 500).await.unwrap();
        assert_eq!(get_muted_role_id(&store, 1).await.unwrap(), Some(500));
        assert_eq!(get_muted_role_id(&store, 2).await.unwrap(), None);

        clear_muted_role_id(&store, 1).await.unwrap();
        assert_eq!(get_muted_role_id(&store, 1).await.unwrap(), None);
    }
}
