//! Feed controller: the load state machine and its event loop

use super::state::{FeedState, LoadState, SharedFeedState};
use crate::client::CatalogApi;
use crate::config::FeedConfig;
use crate::enrich::EnrichmentPipeline;
use crate::error::Error;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Control events consumed by the feed controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// The sentinel item became visible; request the next page
    NearEnd,
    /// User confirmed loading past the cap
    ContinuePastCap,
    /// User declined to continue past the cap
    StopAtCap,
    /// Explicit retry out of the error state
    Retry,
}

/// Drives the feed: decides when a page fetch may start, runs the
/// enrichment pipeline, and applies results to the accumulator.
///
/// Sole mutator of the shared [`FeedState`]. Events are handled one at a
/// time, so two pages are never in flight together; a signal arriving in
/// any state other than `Idle` is ignored.
pub struct FeedController<C: CatalogApi> {
    client: Arc<C>,
    pipeline: EnrichmentPipeline<C>,
    state: SharedFeedState,
    config: FeedConfig,
}

impl<C: CatalogApi> FeedController<C> {
    /// Create a controller with fresh feed state
    pub fn new(client: Arc<C>, config: FeedConfig) -> Self {
        let pipeline = EnrichmentPipeline::new(client.clone(), config.language.clone());
        let state = Arc::new(RwLock::new(FeedState::new(&config)));
        Self {
            client,
            pipeline,
            state,
            config,
        }
    }

    /// Shared handle to the feed state, for read-only collaborators
    pub fn state(&self) -> SharedFeedState {
        self.state.clone()
    }

    /// Load the first page. Ignored unless the feed is freshly created.
    pub async fn start(&self) {
        {
            let mut state = self.state.write().await;
            if state.load != LoadState::Idle || !state.accumulator.is_empty() {
                tracing::debug!("Ignoring start in state {}", state.load.label());
                return;
            }
            state.load = LoadState::LoadingInitial;
        }

        self.load_page().await;
    }

    /// Consume events until the channel closes
    pub async fn run(&self, mut events: mpsc::Receiver<FeedEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        tracing::debug!("Feed event channel closed");
    }

    /// Handle one control event
    pub async fn handle_event(&self, event: FeedEvent) {
        match event {
            FeedEvent::NearEnd => self.on_near_end().await,
            FeedEvent::ContinuePastCap => self.on_continue().await,
            FeedEvent::StopAtCap => self.on_stop().await,
            FeedEvent::Retry => self.on_retry().await,
        }
    }

    async fn on_near_end(&self) {
        {
            let mut state = self.state.write().await;
            if state.load != LoadState::Idle {
                tracing::debug!("Ignoring near-end signal in state {}", state.load.label());
                return;
            }
            if !state.cap_acknowledged && state.accumulator.len() >= self.config.item_cap {
                tracing::info!(
                    "Reached item cap of {}; awaiting user confirmation",
                    self.config.item_cap
                );
                state.load = LoadState::Capped;
                return;
            }
            state.load = LoadState::LoadingMore;
        }

        self.load_page().await;
    }

    async fn on_continue(&self) {
        {
            let mut state = self.state.write().await;
            if state.load != LoadState::Capped {
                tracing::debug!("Ignoring continue in state {}", state.load.label());
                return;
            }
            state.cap_acknowledged = true;
            state.load = LoadState::LoadingMore;
        }

        self.load_page().await;
    }

    async fn on_stop(&self) {
        let mut state = self.state.write().await;
        if state.load != LoadState::Capped {
            tracing::debug!("Ignoring stop in state {}", state.load.label());
            return;
        }
        tracing::info!(
            "Stopped at user request with {} items accumulated",
            state.accumulator.len()
        );
        state.load = LoadState::Stopped;
    }

    async fn on_retry(&self) {
        {
            let mut state = self.state.write().await;
            match state.load {
                LoadState::Error(_) => {
                    state.load = if state.accumulator.is_empty() {
                        LoadState::LoadingInitial
                    } else {
                        LoadState::LoadingMore
                    };
                }
                _ => {
                    tracing::debug!("Ignoring retry in state {}", state.load.label());
                    return;
                }
            }
        }

        self.load_page().await;
    }

    /// Fetch and enrich the page at the current cursor, then apply it.
    /// Expects a loading state to already be set.
    async fn load_page(&self) {
        let offset = self.state.read().await.accumulator.cursor();
        tracing::debug!("Loading page at offset {}", offset);

        let stubs = match self.client.fetch_page(offset, self.config.page_size).await {
            Ok(stubs) => stubs,
            Err(err) => {
                self.fail_page(offset, err).await;
                return;
            }
        };

        if stubs.is_empty() {
            let mut state = self.state.write().await;
            if state.load.is_loading() {
                tracing::info!(
                    "End of data at offset {}; {} items accumulated",
                    offset,
                    state.accumulator.len()
                );
                state.load = LoadState::Stopped;
            }
            return;
        }

        match self.pipeline.enrich_page(stubs).await {
            Ok(page) => {
                let mut state = self.state.write().await;
                let load = state.load.clone();
                if state.accumulator.append(page, &load) {
                    tracing::info!(
                        "Appended page at offset {}; {} items accumulated",
                        offset,
                        state.accumulator.len()
                    );
                    state.load = LoadState::Idle;
                }
            }
            Err(err) => self.fail_page(offset, err).await,
        }
    }

    async fn fail_page(&self, offset: u32, err: Error) {
        let mut state = self.state.write().await;
        if state.load.is_loading() {
            tracing::warn!("Page load failed at offset {}: {}", offset, err);
            state.load = LoadState::Error(format!("Failed to load catalog items: {}", err));
        }
    }
}
