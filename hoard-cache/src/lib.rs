//! # hoard Cache
//!
//! Backends for the [`CacheStore`](hoard_core::CacheStore) trait.
//!
//! - **Redis**: Shared store for production, expiry enforced by Redis itself
//! - **Memory**: In-process TTL map for development and testing
//!
//! ## Example
//!
//! ```rust,ignore
//! use hoard_cache::RedisStore;
//! use hoard_core::CacheStore;
//!
//! let store = RedisStore::connect("redis://127.0.0.1:6379").await?;
//! store.set_with_ttl("/foo?x=1", "hello", 60).await?;
//! assert_eq!(store.get("/foo?x=1").await?.as_deref(), Some("hello"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod redis_store;

pub use memory::{MemoryStore, MemoryStoreConfig, MemoryStoreStats};
pub use redis_store::RedisStore;
