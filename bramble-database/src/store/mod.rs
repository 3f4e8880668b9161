mod memory_store;
mod redis_store;

use serde::Serialize;
use tracing::warn;
use serde::de::DeserializeOwned;

use memory_store::MemoryStore;
use redis_store::RedisStore;

#[derive(Clone, Debug)]
enum StoreBackend {
    Memory(MemoryStore),
    Redis(RedisStore),
}

/// Moderation state handle passed across crates.
///
/// Cloning is cheap; clones share the same backend.
#[derive(Clone, Debug)]
pub struct ModerationStore {
    key_prefix: String,
    backend: StoreBackend,
}

impl ModerationStore {
    pub fn in_memory(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: StoreBackend::Memory(MemoryStore::default()),
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: StoreBackend::Redis(RedisStore::from_url(redis_url)?),
        })
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, StoreBackend::Redis(_))
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            StoreBackend::Memory(_) => Ok(()),
            StoreBackend::Redis(store) => store.ping().await,
        }
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            StoreBackend::Memory(store) => store.get(key).await,
            StoreBackend::Redis(store) => store.get(key).await,
        }?;

        value.map(|bytes| decode(key, &bytes)).transpose()
    }

    pub async fn set_json<T>(&self, key: &str, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let payload = encode(key, value)?;

        match &self.backend {
            StoreBackend::Memory(store) => store.set(key, payload).await,
            StoreBackend::Redis(store) => store.set(key, payload).await,
        }
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            StoreBackend::Memory(store) => store.del(key).await,
            StoreBackend::Redis(store) => store.del(key).await,
        }
    }

    /// Append to the list at `key` and return its new length.
    pub async fn push_json<T>(&self, key: &str, value: &T) -> anyhow::Result<u64>
    where
        T: Serialize,
    {
        let payload = encode(key, value)?;

        match &self.backend {
            StoreBackend::Memory(store) => store.push(key, payload).await,
            StoreBackend::Redis(store) => store.push(key, payload).await,
        }
    }

    /// Read the whole list at `key` in insertion order.
    pub async fn list_json<T>(&self, key: &str) -> anyhow::Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let values = match &self.backend {
            StoreBackend::Memory(store) => store.range(key).await,
            StoreBackend::Redis(store) => store.range(key).await,
        }?;

        values.iter().map(|bytes| decode(key, bytes)).collect()
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| anyhow::anyhow!("failed to serialize store value for `{key}`: {e}"))
}

fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> anyhow::Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        warn!(key, error = %e, "undecodable store value");
        anyhow::anyhow!("failed to deserialize store value for `{key}`: {e}")
    })
}
