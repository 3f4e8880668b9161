use poise::serenity_prelude as serenity;
use tracing::error;

use crate::time::now_unix_secs;

const BULK_DELETE_MAX_AGE_SECS: u64 = 14 * 24 * 60 * 60;
const BULK_DELETE_SAFETY_BUFFER_SECS: u64 = 60 * 60;

/// Largest page the message history endpoint returns.
pub const MAX_HISTORY_PAGE: u8 = 100;

/// Delete up to `limit` of the most recent messages in a channel.
///
/// Messages young enough for the bulk endpoint go out in one request; older
/// ones (and a lone leftover) are deleted one by one. Returns how many were
/// actually removed.
pub async fn purge_recent_messages(
    http: &serenity::Http,
    channel_id: serenity::ChannelId,
    limit: u8,
) -> anyhow::Result<u64> {
    let limit = limit.clamp(1, MAX_HISTORY_PAGE);
    let messages = channel_id
        .messages(http, serenity::GetMessages::new().limit(limit))
        .await?;

    let bulk_delete_cutoff = now_unix_secs()
        .saturating_sub(BULK_DELETE_MAX_AGE_SECS.saturating_sub(BULK_DELETE_SAFETY_BUFFER_SECS))
        as i64;

    let (mut bulk_candidate_ids, mut single_delete_ids): (Vec<_>, Vec<_>) = (Vec::new(), Vec::new());
    for message in messages {
        if message.timestamp.unix_timestamp() >= bulk_delete_cutoff {
            bulk_candidate_ids.push(message.id);
        } else {
            single_delete_ids.push(message.id);
        }
    }

    let mut deleted_count = 0_u64;

    if bulk_candidate_ids.len() < 2 {
        single_delete_ids.append(&mut bulk_candidate_ids);
    } else {
        let count = bulk_candidate_ids.len();
        match channel_id
            .delete_messages(http, bulk_candidate_ids.clone())
            .await
        {
            Ok(()) => deleted_count = deleted_count.saturating_add(count as u64),
            Err(source) => {
                error!(
                    ?source,
                    channel_id = channel_id.get(),
                    count,
                    "bulk delete failed, falling back to single delete"
                );
                single_delete_ids.append(&mut bulk_candidate_ids);
            }
        }
    }

    let attempted_single = single_delete_ids.len();
    let mut last_error = None;
    for message_id in single_delete_ids {
        match channel_id.delete_message(http, message_id).await {
            Ok(()) => deleted_count = deleted_count.saturating_add(1),
            Err(source) => last_error = Some(source),
        }
    }

    // Surface the failure only when nothing at all could be removed.
    if deleted_count == 0
        && attempted_single > 0
        && let Some(source) = last_error
    {
        return Err(source.into());
    }

    Ok(deleted_count)
}
