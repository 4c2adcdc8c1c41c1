use anyhow::Result;
use moka::future::Cache;
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

const LOCAL_CAPACITY: u64 = 1_000;

/// JSON snapshot cache. Entries live in a process-local moka tier and are
/// mirrored to Redis when `REDIS_URL` is configured.
pub struct CacheService {
    local: Cache<String, String>,
    shared: Option<ConnectionManager>,
}

impl CacheService {
    pub async fn new(redis_url: Option<&str>, local_ttl_secs: u64) -> Result<Self> {
        let shared = match redis_url {
            Some(url) => Self::open_shared(url).await,
            None => {
                tracing::info!("No REDIS_URL configured; dashboard cache is process-local");
                None
            }
        };

        Ok(Self {
            local: Self::local_tier(local_ttl_secs),
            shared,
        })
    }

    pub fn memory_only(local_ttl_secs: u64) -> Self {
        Self {
            local: Self::local_tier(local_ttl_secs),
            shared: None,
        }
    }

    fn local_tier(ttl_secs: u64) -> Cache<String, String> {
        Cache::builder()
            .max_capacity(LOCAL_CAPACITY)
            .time_to_live(Duration::from_secs(ttl_secs.max(1)))
            .build()
    }

    async fn open_shared(url: &str) -> Option<ConnectionManager> {
        let client = redis::Client::open(url)
            .map_err(|e| {
                tracing::warn!("Invalid REDIS_URL ({}); dashboard cache is process-local", e)
            })
            .ok()?;

        match client.get_connection_manager().await {
            Ok(conn) => {
                tracing::info!("Dashboard cache mirrored to Redis");
                Some(conn)
            }
            Err(e) => {
                tracing::warn!("Redis unreachable ({}); dashboard cache is process-local", e);
                None
            }
        }
    }

    fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
        serde_json::from_str(raw)
            .map_err(|e| tracing::debug!("Discarding undecodable cache entry {}: {}", key, e))
            .ok()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        if let Some(value) = self
            .local
            .get(key)
            .await
            .and_then(|raw| Self::decode(key, &raw))
        {
            return Ok(Some(value));
        }

        let Some(mut conn) = self.shared.clone() else {
            return Ok(None);
        };

        let raw: Option<String> = match conn.get::<_, Option<String>>(key).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Redis read of {} failed: {}", key, e);
                None
            }
        };

        let Some(raw) = raw else {
            return Ok(None);
        };
        let value = Self::decode(key, &raw);
        if value.is_some() {
            // Promote so the next read stays local.
            self.local.insert(key.to_string(), raw).await;
        }
        Ok(value)
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.local.insert(key.to_string(), raw.clone()).await;

        if let Some(mut conn) = self.shared.clone() {
            if let Err(e) = conn.set_ex::<_, _, ()>(key, raw, ttl_secs).await {
                tracing::warn!("Redis write of {} failed: {}", key, e);
            }
        }
        Ok(())
    }

    /// Drops `key` from both tiers.
    pub async fn invalidate(&self, key: &str) {
        self.local.invalidate(key).await;

        if let Some(mut conn) = self.shared.clone() {
            if let Err(e) = conn.del::<_, ()>(key).await {
                tracing::warn!("Redis delete of {} failed: {}", key, e);
            }
        }
    }

    /// `Ok(false)` when no Redis tier is configured or it does not answer.
    pub async fn ping(&self) -> Result<bool> {
        let Some(mut conn) = self.shared.clone() else {
            return Ok(false);
        };
        Ok(redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .is_ok())
    }

    pub fn has_redis(&self) -> bool {
        self.shared.is_some()
    }
}
