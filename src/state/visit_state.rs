//! Visit state definitions for tracking crawl progress
//!
//! Every identifier moves through `Unseen -> Claimed -> {Fetched | Failed}`.

use std::fmt;

/// Represents where an identifier is in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitState {
    // ===== Active States =====
    /// Identifier has not been claimed by any task
    Unseen,

    /// A task has claimed the identifier and its fetch is in flight
    Claimed,

    // ===== Terminal States =====
    /// Fetch succeeded and the content was recorded
    Fetched,

    /// Fetch failed; the identifier will not appear in results
    Failed,
}

impl VisitState {
    /// Short lowercase name used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::Claimed => "claimed",
            Self::Fetched => "fetched",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
