//! Error types for hoard.
//!
//! Every I/O boundary of the proxy pipeline (cache store, upstream origin)
//! gets its own variants so callers can tell them apart, even though the
//! request handler reports all of them to clients the same way.

use thiserror::Error;

/// Result type alias using `HoardError`.
pub type Result<T> = std::result::Result<T, HoardError>;

/// Main error type for all hoard operations.
#[derive(Debug, Error)]
pub enum HoardError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CACHE STORE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// The store could not be reached (connection refused, dropped, timed out).
    #[error("Cache store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store was reached but rejected or failed the command.
    #[error("Cache store command failed: {0}")]
    StoreCommand(String),

    /// A TTL of zero seconds was requested.
    #[error("Invalid TTL: expected at least 1 second, got {0}")]
    InvalidTtl(u64),

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// The origin could not be reached.
    #[error("Upstream unreachable at '{url}': {reason}")]
    UpstreamUnreachable {
        /// Full URL that was requested
        url: String,
        /// Transport error reported by the client
        reason: String,
    },

    /// The origin did not answer within the configured deadline.
    #[error("Upstream timed out at '{url}'")]
    UpstreamTimeout {
        /// Full URL that was requested
        url: String,
    },

    /// The origin answered but its body could not be read.
    #[error("Failed to read upstream body: {0}")]
    UpstreamBody(String),

    /// The origin answered with a status code HTTP cannot represent.
    #[error("Invalid upstream status code: {0}")]
    InvalidUpstreamStatus(u16),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION / IO ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl HoardError {
    /// Returns true if the error came from the cache store.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            HoardError::StoreUnavailable(_)
                | HoardError::StoreCommand(_)
                | HoardError::InvalidTtl(_)
        )
    }

    /// Returns true if the error came from talking to the origin.
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            HoardError::UpstreamUnreachable { .. }
                | HoardError::UpstreamTimeout { .. }
                | HoardError::UpstreamBody(_)
                | HoardError::InvalidUpstreamStatus(_)
        )
    }

    /// Returns true if the error is transient.
    ///
    /// The proxy never retries on its own; this is for operators and callers
    /// that embed the pipeline.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HoardError::StoreUnavailable(_)
                | HoardError::UpstreamUnreachable { .. }
                | HoardError::UpstreamTimeout { .. }
        )
    }

    /// Short, stable label for logs.
    pub fn kind(&self) -> &'static str {
        if self.is_store_error() {
            "store"
        } else if self.is_upstream_error() {
            "upstream"
        } else {
            match self {
                HoardError::ConfigError(_) => "config",
                HoardError::IoError(_) => "io",
                _ => "internal",
            }
        }
    }
}
