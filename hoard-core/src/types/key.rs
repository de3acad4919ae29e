//! Cache key derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key a response body is cached under.
///
/// The key is the inbound request target (path plus query) exactly as it
/// arrived: case-sensitive, query string included, host, scheme and method
/// excluded. No normalization is applied, so `/a?x=1&y=2` and `/a?y=2&x=1`
/// are different entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Wraps a string as a key without touching it.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derives the key from a raw request target.
    ///
    /// An empty target (no path at all) maps to `/`, which is what an
    /// HTTP/1.1 server sees for the root resource.
    pub fn from_target(target: &str) -> Self {
        if target.is_empty() {
            Self("/".into())
        } else {
            Self(target.to_owned())
        }
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the upstream URL for this key.
    ///
    /// This is plain concatenation of `base` and the key. Nothing is escaped
    /// and no `/` is inserted or removed at the seam.
    pub fn upstream_url(&self, base: &str) -> String {
        let mut url = String::with_capacity(base.len() + self.0.len());
        url.push_str(base);
        url.push_str(&self.0);
        url
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_keeps_query_string() {
        let key = CacheKey::from_target("/foo?x=1");
        assert_eq!(key.as_str(), "/foo?x=1");
    }

    #[test]
    fn test_key_is_case_sensitive() {
        assert_ne!(CacheKey::from_target("/Foo"), CacheKey::from_target("/foo"));
    }

    #[test]
    fn test_key_does_not_reorder_query() {
        assert_ne!(
            CacheKey::from_target("/a?x=1&y=2"),
            CacheKey::from_target("/a?y=2&x=1")
        );
    }

    #[test]
    fn test_empty_target_is_root() {
        assert_eq!(CacheKey::from_target("").as_str(), "/");
    }

    #[test]
    fn test_upstream_url_concatenates() {
        let key = CacheKey::from_target("/foo?x=1");
        assert_eq!(key.upstream_url("http://origin.test"), "http://origin.test/foo?x=1");
    }

    #[test]
    fn test_upstream_url_does_not_normalize_slashes() {
        let key = CacheKey::from_target("/foo");
        assert_eq!(key.upstream_url("http://origin.test/"), "http://origin.test//foo");

        let relative = CacheKey::new("foo");
        assert_eq!(relative.upstream_url("http://origin.test/api"), "http://origin.test/apifoo");
    }

    #[test]
    fn test_upstream_url_does_not_escape() {
        let key = CacheKey::from_target("/a b?q=%20");
        assert_eq!(key.upstream_url("http://o"), "http://o/a b?q=%20");
    }

    proptest! {
        #[test]
        fn prop_key_is_verbatim(target in "/[ -~]{0,64}") {
            let key = CacheKey::from_target(&target);
            prop_assert_eq!(key.as_str(), target.as_str());
        }

        #[test]
        fn prop_upstream_url_ends_with_key(base in "http://[a-z]{1,12}", target in "/[!-~]{0,32}") {
            let key = CacheKey::from_target(&target);
            let url = key.upstream_url(&base);
            prop_assert!(url.starts_with(&base));
            prop_assert!(url.ends_with(&target));
            prop_assert_eq!(url.len(), base.len() + target.len());
        }
    }
}
