use bramble_utils::time::now_unix_secs;

use crate::model::warnings::{WarningEntry, WarningRecord};
use crate::store::ModerationStore;

fn warnings_key(store: &ModerationStore, guild_id: u64, user_id: u64) -> String {
    store.key(format!("warnings:{guild_id}:{user_id}"))
}

/// Record a warning for a target user and return the new warning number.
///
/// The ledger entry is created lazily on the first warning.
pub async fn record_warning(
    store: &ModerationStore,
    guild_id: u64,
    user_id: u64,
    moderator_id: u64,
    reason: &str,
) -> anyhow::Result<WarningRecord> {
    let entry = WarningEntry {
        reason: reason.to_owned(),
        moderator_id,
        warned_at: now_unix_secs(),
    };

    let warn_number = store
        .push_json(&warnings_key(store, guild_id, user_id), &entry)
        .await?;

    Ok(WarningRecord { warn_number })
}

/// Return every warning of a target user, oldest first.
pub async fn warnings_for(
    store: &ModerationStore,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<Vec<WarningEntry>> {
    store
        .list_json(&warnings_key(store, guild_id, user_id))
        .await
}

#[cfg(test)]
mod tests {
    use super::{record_warning, warnings_for};
    use crate::store::ModerationStore;

    #[tokio::test]
    async fn warnings_are_listed_in_order() {
        let store = ModerationStore::in_memory("test");

        for (expected, reason) in ["spam", "flood", "slurs"].into_iter().enumerate() {
            let record = record_warning(&store, 1, 10, 99, reason).await.unwrap();
            assert_eq!(record.warn_number, expected as u64 + 1);
        }

        let reasons: Vec<String> = warnings_for(&store, 1, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.reason)
            .collect();
        assert_eq!(reasons, vec!["spam", "flood", "slurs"]);
    }

    #[tokio::test]
    async fn unknown_user_has_no_warnings() {
        let store = ModerationStore::in_memory("test");
        record_warning(&store, 1, 10, 99, "spam").await.unwrap();

        assert!(warnings_for(&store, 1, 11).await.unwrap().is_empty());
        assert!(warnings_for(&store, 2, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_warnings_are_all_kept() {
        let store = ModerationStore::in_memory("test");

        let tasks = (0..16)
            .map(|index| {
                let store = store.clone();
                tokio::spawn(async move {
                    record_warning(&store, 1, 10, 99, &format!("reason {index}")).await
                })
            })
            .collect::<Vec<_>>();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let entries = warnings_for(&store, 1, 10).await.unwrap();
        assert_eq!(entries.len(), 16);
        assert!(entries.iter().all(|entry| entry.moderator_id == 99));
    }
}
