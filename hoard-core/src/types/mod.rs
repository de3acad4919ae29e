//! Domain types for hoard.
//!
//! - [`CacheKey`]: The verbatim request target a response is cached under
//! - [`UpstreamResponse`]: What the origin answered for one request
//! - [`FlushSummary`]: Result of clearing the whole store

mod key;
mod upstream;
mod flush;

pub use key::*;
pub use upstream::*;
pub use flush::*;
