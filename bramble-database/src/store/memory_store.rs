use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct MemoryState {
    values: HashMap<String, Vec<u8>>,
    lists: HashMap<String, Vec<Vec<u8>>>,
}

/// Process-local store. Everything is lost when the process exits.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.state.lock().await.values.get(key).cloned())
    }

    pub async fn set(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        self.state.lock().await.values.insert(key.to_owned(), value);
        Ok(())
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        let mut state = self.state.lock().await;
        state.values.remove(key);
        state.lists.remove(key);
        Ok(())
    }

    pub async fn push(&self, key: &str, value: Vec<u8>) -> anyhow::Result<u64> {
        let mut state = self.state.lock().await;
        let list = state.lists.entry(key.to_owned()).or_default();
        list.push(value);
        Ok(list.len() as u64)
    }

    pub async fn range(&self, key: &str) -> anyhow::Result<Vec<Vec<u8>>> {
        Ok(self
            .state
            .lock()
            .await
            .lists
            .get(key)
            .cloned()
            .unwrap_or_default())
    }
}
