//! Load state and the owned feed state struct

use super::accumulator::Accumulator;
use crate::config::FeedConfig;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Load state of the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch in flight; a near-end signal may start one
    Idle,
    /// First page is being fetched and enriched
    LoadingInitial,
    /// A subsequent page is being fetched and enriched
    LoadingMore,
    /// Accumulated count reached the cap; awaiting an explicit user decision
    Capped,
    /// A page fetch failed; message is user-visible until an explicit retry
    /// succeeds. Previously accumulated items remain available.
    Error(String),
    /// Terminal: end-of-data reached or the user declined to continue past
    /// the cap. No further fetches are ever issued.
    Stopped,
}

impl LoadState {
    /// Whether a page fetch is currently in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::LoadingInitial | LoadState::LoadingMore)
    }

    /// Whether the feed will never fetch again
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Stopped)
    }

    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::LoadingInitial => "loading-initial",
            LoadState::LoadingMore => "loading-more",
            LoadState::Capped => "capped",
            LoadState::Error(_) => "error",
            LoadState::Stopped => "stopped",
        }
    }
}

/// All mutable feed state, owned in one place.
///
/// Invariant: at most one fetch is in flight, and the accumulator is only
/// mutated while `load` is a loading state.
#[derive(Debug)]
pub struct FeedState {
    pub load: LoadState,
    pub accumulator: Accumulator,
    /// Set once the user confirms loading past the cap; the gate does not
    /// re-engage afterwards
    pub cap_acknowledged: bool,
}

impl FeedState {
    /// Fresh state: cursor at zero, nothing accumulated, idle
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            load: LoadState::Idle,
            accumulator: Accumulator::new(config.page_size),
            cap_acknowledged: false,
        }
    }

    /// User-visible failure message, if the feed is in error
    pub fn visible_error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Shared handle to the feed state. Only the controller writes through it.
pub type SharedFeedState = Arc<RwLock<FeedState>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_predicates() {
        assert!(LoadState::LoadingInitial.is_loading());
        assert!(LoadState::LoadingMore.is_loading());
        assert!(!LoadState::Idle.is_loading());
        assert!(!LoadState::Capped.is_loading());
        assert!(!LoadState::Error("boom".to_string()).is_loading());
        assert!(!LoadState::Stopped.is_loading());
    }

    #[test]
    fn test_terminal_predicate() {
        assert!(LoadState::Stopped.is_terminal());
        assert!(!LoadState::Error("boom".to_string()).is_terminal());
        assert!(!LoadState::Capped.is_terminal());
    }

    #[test]
    fn test_fresh_state() {
        let state = FeedState::new(&FeedConfig::default());
        assert_eq!(state.load, LoadState::Idle);
        assert_eq!(state.accumulator.len(), 0);
        assert_eq!(state.accumulator.cursor(), 0);
        assert!(state.visible_error().is_none());
    }
}
