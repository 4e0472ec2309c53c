//! Feed state machine and accumulator
//!
//! Owns all mutable feed state: the append-only item collection, the page
//! cursor, and the load state gating when a fetch may start. The controller
//! is the sole mutator; collaborators hold the shared state read-only.

mod accumulator;
mod controller;
mod state;

pub use accumulator::Accumulator;
pub use controller::{FeedController, FeedEvent};
pub use state::{FeedState, LoadState, SharedFeedState};
