//! Defaults and wire constants for hoard.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Time-to-live applied to every cached upstream body, in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 60;

/// Default Redis address used when none is configured.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Upper bound on establishing a TCP connection to Redis, in milliseconds.
pub const REDIS_CONNECTION_TIMEOUT_MS: u64 = 2_000;

/// Upper bound on waiting for a reply to a single Redis command, in milliseconds.
pub const REDIS_RESPONSE_TIMEOUT_MS: u64 = 2_000;

/// Reconnect attempts the Redis connection manager makes before giving up.
pub const REDIS_RECONNECT_RETRIES: usize = 1;

/// Longest pause between Redis reconnect attempts, in milliseconds.
pub const REDIS_RECONNECT_MAX_DELAY_MS: u64 = 250;

/// Default capacity of the in-process store.
pub const DEFAULT_MEMORY_STORE_CAPACITY: usize = 10_000;

// ═══════════════════════════════════════════════════════════════════════════════
// SERVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Default upstream origin base URL.
pub const DEFAULT_ORIGIN: &str = "http://localhost";

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE CONTRACT
// ═══════════════════════════════════════════════════════════════════════════════

/// Header reporting whether the body came from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// `x-cache` value for responses served from the store.
pub const CACHE_HIT: &str = "HIT";

/// `x-cache` value for responses fetched from the origin and stored.
pub const CACHE_MISS: &str = "MISS";

/// Content type sent with cached bodies and upstream error pages.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Content type of the internal failure response.
pub const PLAIN_CONTENT_TYPE: &str = "text/plain";

/// Body of the internal failure response.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";
