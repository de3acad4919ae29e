//! # hoard Core
//!
//! Core types, errors, and traits for the hoard caching reverse proxy.
//!
//! This crate provides the vocabulary shared by every other hoard crate:
//!
//! - **Types**: Cache keys, upstream responses, flush summaries
//! - **Errors**: One error enum with a variant per failing I/O boundary
//! - **Constants**: Defaults and the response header contract
//! - **Traits**: The cache store and origin seams the proxy is built on
//!
//! ## Example
//!
//! ```rust
//! use hoard_core::{CacheKey, UpstreamResponse};
//!
//! let key = CacheKey::new("/foo?x=1");
//! assert_eq!(key.as_str(), "/foo?x=1");
//!
//! let ok = UpstreamResponse::new(200, Some("text/plain".into()), "hello");
//! assert!(ok.is_success());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{HoardError, Result};
pub use traits::*;
pub use types::*;
