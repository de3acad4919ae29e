use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a successful flush-all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlushSummary {
    /// Number of entries removed, when the backend can report it
    pub removed: Option<u64>,
}

impl FlushSummary {
    /// Summary with a known entry count.
    pub fn with_count(removed: u64) -> Self {
        Self {
            removed: Some(removed),
        }
    }
}

impl fmt::Display for FlushSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.removed {
            Some(1) => write!(f, "1 entry removed"),
            Some(n) => write!(f, "{} entries removed", n),
            None => write!(f, "OK"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_summary_display() {
        assert_eq!(FlushSummary::with_count(3).to_string(), "3 entries removed");
        assert_eq!(FlushSummary::with_count(1).to_string(), "1 entry removed");
        assert_eq!(FlushSummary::default().to_string(), "OK");
    }
}
