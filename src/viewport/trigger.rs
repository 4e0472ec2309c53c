//! Sentinel observation and near-end signaling

use crate::feed::{FeedEvent, LoadState, SharedFeedState};
use tokio::sync::mpsc;

/// Visibility observation capability provided by the rendering layer.
///
/// The core never touches the rendering surface directly; whatever detects
/// that an element entered the visible area implements this and reports
/// transitions back through [`ViewportTrigger::sentinel_entered`].
pub trait SentinelObserver: Send {
    /// Begin watching the element with the given id
    fn observe(&mut self, sentinel_id: &str);

    /// Stop watching the currently observed element, if any
    fn disconnect(&mut self);
}

/// Emits one near-end signal per visibility transition of the sentinel.
///
/// Attachment is idempotent, and after emitting the trigger drops its
/// observation of the now-stale sentinel; the caller re-attaches to
/// whatever becomes the last element after the next render. The trigger
/// only reads feed state, it never mutates it.
pub struct ViewportTrigger<O: SentinelObserver> {
    observer: O,
    state: SharedFeedState,
    signal_tx: mpsc::Sender<FeedEvent>,
    observed: Option<String>,
}

impl<O: SentinelObserver> ViewportTrigger<O> {
    pub fn new(observer: O, state: SharedFeedState, signal_tx: mpsc::Sender<FeedEvent>) -> Self {
        Self {
            observer,
            state,
            signal_tx,
            observed: None,
        }
    }

    /// Attach to a sentinel element. No-op if it is already the one being
    /// observed; otherwise any previous observation is dropped first.
    pub fn attach(&mut self, sentinel_id: &str) {
        if self.observed.as_deref() == Some(sentinel_id) {
            return;
        }
        if self.observed.is_some() {
            self.observer.disconnect();
        }
        self.observer.observe(sentinel_id);
        self.observed = Some(sentinel_id.to_string());
    }

    /// Report that a sentinel became visible. Emits a near-end signal when
    /// the sentinel is the observed one and the feed is idle; returns
    /// whether a signal was sent.
    pub async fn sentinel_entered(&mut self, sentinel_id: &str) -> bool {
        if self.observed.as_deref() != Some(sentinel_id) {
            tracing::debug!("Ignoring visibility of unobserved sentinel {}", sentinel_id);
            return false;
        }

        // read-only debounce: while a load is in flight (or the feed is
        // capped, errored, or stopped) the transition is swallowed
        let idle = { self.state.read().await.load == LoadState::Idle };
        if !idle {
            return false;
        }

        // one signal per transition: drop the stale sentinel before the
        // next render produces a new last element
        self.observer.disconnect();
        self.observed = None;

        if self.signal_tx.send(FeedEvent::NearEnd).await.is_err() {
            tracing::debug!("Feed controller gone; dropping near-end signal");
            return false;
        }
        true
    }

    /// Stop observing entirely
    pub fn disconnect(&mut self) {
        if self.observed.take().is_some() {
            self.observer.disconnect();
        }
    }

    /// Id of the currently observed sentinel, if any
    pub fn observed(&self) -> Option<&str> {
        self.observed.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::feed::FeedState;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Records observe/disconnect calls
    #[derive(Default)]
    struct RecordingObserver {
        observed: Vec<String>,
        disconnects: usize,
    }

    impl SentinelObserver for RecordingObserver {
        fn observe(&mut self, sentinel_id: &str) {
            self.observed.push(sentinel_id.to_string());
        }

        fn disconnect(&mut self) {
            self.disconnects += 1;
        }
    }

    fn idle_state() -> SharedFeedState {
        Arc::new(RwLock::new(FeedState::new(&FeedConfig::default())))
    }

    fn trigger_with_state(
        state: SharedFeedState,
    ) -> (
        ViewportTrigger<RecordingObserver>,
        mpsc::Receiver<FeedEvent>,
    ) {
        let (tx, rx) = mpsc::channel(4);
        (
            ViewportTrigger::new(RecordingObserver::default(), state, tx),
            rx,
        )
    }

    #[tokio::test]
    async fn test_signal_on_visibility_transition() {
        let (mut trigger, mut rx) = trigger_with_state(idle_state());

        trigger.attach("card-19");
        assert!(trigger.sentinel_entered("card-19").await);
        assert_eq!(rx.recv().await, Some(FeedEvent::NearEnd));

        // observation of the stale sentinel was dropped
        assert_eq!(trigger.observed(), None);
    }

    #[tokio::test]
    async fn test_no_duplicate_signal_for_same_transition() {
        let (mut trigger, mut rx) = trigger_with_state(idle_state());

        trigger.attach("card-19");
        assert!(trigger.sentinel_entered("card-19").await);
        assert!(!trigger.sentinel_entered("card-19").await);

        assert_eq!(rx.recv().await, Some(FeedEvent::NearEnd));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_attach_is_idempotent() {
        let (mut trigger, _rx) = trigger_with_state(idle_state());

        trigger.attach("card-19");
        trigger.attach("card-19");
        trigger.attach("card-19");

        assert_eq!(trigger.observer.observed, vec!["card-19"]);
        assert_eq!(trigger.observer.disconnects, 0);
    }

    #[tokio::test]
    async fn test_reattach_replaces_sentinel() {
        let (mut trigger, mut rx) = trigger_with_state(idle_state());

        trigger.attach("card-19");
        trigger.attach("card-39");

        assert_eq!(trigger.observer.disconnects, 1);
        assert!(!trigger.sentinel_entered("card-19").await);
        assert!(trigger.sentinel_entered("card-39").await);
        assert_eq!(rx.recv().await, Some(FeedEvent::NearEnd));
    }

    #[tokio::test]
    async fn test_swallowed_while_loading() {
        let state = idle_state();
        state.write().await.load = LoadState::LoadingMore;
        let (mut trigger, mut rx) = trigger_with_state(state.clone());

        trigger.attach("card-19");
        assert!(!trigger.sentinel_entered("card-19").await);
        assert!(rx.try_recv().is_err());

        // still attached: once the feed goes idle the next transition fires
        state.write().await.load = LoadState::Idle;
        assert!(trigger.sentinel_entered("card-19").await);
        assert_eq!(rx.recv().await, Some(FeedEvent::NearEnd));
    }

    #[tokio::test]
    async fn test_swallowed_when_stopped() {
        let state = idle_state();
        state.write().await.load = LoadState::Stopped;
        let (mut trigger, mut rx) = trigger_with_state(state);

        trigger.attach("card-19");
        assert!(!trigger.sentinel_entered("card-19").await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_disconnect() {
        let (mut trigger, _rx) = trigger_with_state(idle_state());

        trigger.attach("card-19");
        trigger.disconnect();
        assert_eq!(trigger.observer.disconnects, 1);
        assert_eq!(trigger.observed(), None);

        // disconnecting again is a no-op
        trigger.disconnect();
        assert_eq!(trigger.observer.disconnects, 1);
    }
}
