//! Redis-backed cache store.
//!
//! Expiry is delegated to Redis (`SET ... EX`), so a key that is present is
//! fresh by construction.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, RedisError};
use tracing::{debug, info, instrument};

use hoard_core::constants::{
    REDIS_CONNECTION_TIMEOUT_MS, REDIS_RECONNECT_MAX_DELAY_MS, REDIS_RECONNECT_RETRIES,
    REDIS_RESPONSE_TIMEOUT_MS,
};
use hoard_core::error::{HoardError, Result};
use hoard_core::traits::CacheStore;
use hoard_core::types::FlushSummary;

/// Cache store backed by a Redis server.
///
/// Holds a single multiplexed [`ConnectionManager`] that reconnects on its
/// own. Cloning it is cheap and every clone shares the same connection, so
/// one `RedisStore` is shared by all in-flight requests without locking.
///
/// Connecting, reconnecting and every command are bounded by the
/// `REDIS_*` limits in [`hoard_core::constants`], so an outage surfaces as
/// [`HoardError::StoreUnavailable`] within seconds.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    url: String,
}

impl RedisStore {
    /// Connects to the Redis server at `url` (`redis://host:port/db`).
    ///
    /// A malformed URL is a configuration error; a server that cannot be
    /// reached is reported as [`HoardError::StoreUnavailable`].
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| HoardError::ConfigError(format!("Invalid Redis URL '{}': {}", url, e)))?;

        let connection = client
            .get_connection_manager_with_config(manager_config())
            .await
            .map_err(map_redis_error)?;

        info!(url, "Connected to Redis");
        Ok(Self {
            connection,
            url: url.to_owned(),
        })
    }

    /// The URL this store connected to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(map_redis_error)?;
        debug!(hit = value.is_some(), "GET");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        if ttl_seconds == 0 {
            return Err(HoardError::InvalidTtl(ttl_seconds));
        }
        let mut conn = self.connection.clone();
        let _: () = conn
            .set_ex(key, value, ttl_seconds)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    /// Clears the database selected by the connection URL.
    ///
    /// Other databases on the same server are left alone, and `removed` is
    /// the size of the selected database just before the flush.
    #[instrument(skip(self))]
    async fn flush_all(&self) -> Result<FlushSummary> {
        let mut conn = self.connection.clone();

        let size: u64 = redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        let _: () = redis::cmd("FLUSHDB")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        info!(removed = size, "Flushed Redis");
        Ok(FlushSummary::with_count(size))
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

fn manager_config() -> ConnectionManagerConfig {
    ConnectionManagerConfig::new()
        .set_number_of_retries(REDIS_RECONNECT_RETRIES)
        .set_factor(50)
        .set_max_delay(REDIS_RECONNECT_MAX_DELAY_MS)
        .set_connection_timeout(Duration::from_millis(REDIS_CONNECTION_TIMEOUT_MS))
        .set_response_timeout(Duration::from_millis(REDIS_RESPONSE_TIMEOUT_MS))
}

/// Splits Redis failures into "could not talk to the server" and "the
/// server said no".
fn map_redis_error(err: RedisError) -> HoardError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        HoardError::StoreUnavailable(err.to_string())
    } else {
        HoardError::StoreCommand(err.to_string())
    }
}
