use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;

#[derive(Clone, Debug)]
pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    pub fn from_url(redis_url: &str) -> anyhow::Result<Self> {
        let config = Config::from_url(redis_url);
        let pool = config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| anyhow::anyhow!("failed to create redis pool: {e}"))?;

        Ok(Self { pool })
    }

    async fn connection(&self) -> anyhow::Result<Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| anyhow::anyhow!("failed to get redis connection: {e}"))
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!("redis PING failed: {e}"))?;

        Ok(())
    }

    pub async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let value = conn
            .get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|e| anyhow::anyhow!("redis GET failed for key `{key}`: {e}"))?;

        Ok(value)
    }

    pub async fn set(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| anyhow::anyhow!("redis SET failed for key `{key}`: {e}"))?;

        Ok(())
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        let mut conn = self.connection().await?;
        let _ = conn
            .del::<_, u64>(key)
            .await
            .map_err(|e| anyhow::anyhow!("redis DEL failed for key `{key}`: {e}"))?;

        Ok(())
    }

    /// Append to a list and return its new length (`RPUSH` is atomic).
    pub async fn push(&self, key: &str, value: Vec<u8>) -> anyhow::Result<u64> {
        let mut conn = self.connection().await?;
        let len = conn
            .rpush::<_, _, u64>(key, value)
            .await
            .map_err(|e| anyhow::anyhow!("redis RPUSH failed for key `{key}`: {e}"))?;

        Ok(len)
    }

    pub async fn range(&self, key: &str) -> anyhow::Result<Vec<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let values = conn
            .lrange::<_, Vec<Vec<u8>>>(key, 0, -1)
            .await
            .map_err(|e| anyhow::anyhow!("redis LRANGE failed for key `{key}`: {e}"))?;

        Ok(values)
    }
}
