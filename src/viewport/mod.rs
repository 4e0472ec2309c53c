//! Viewport proximity trigger
//!
//! Watches the sentinel (last rendered item) through a rendering-layer
//! capability and turns visibility transitions into near-end feed events.

mod trigger;

pub use trigger::{SentinelObserver, ViewportTrigger};
