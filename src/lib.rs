//! Cardfeed - incremental pagination and enrichment engine
//!
//! Cardfeed turns a paginated remote catalog API into an append-only,
//! display-ready item collection. Pages of item stubs are enriched through
//! dependent fan-out fetches (per-item details, per-detail sub-resources)
//! and applied atomically; a viewport trigger requests more data as the
//! user approaches the end of the rendered list, and a cap gate pauses
//! loading at a configured ceiling pending user confirmation.
//!
//! ## Data flow
//!
//! ```text
//! ViewportTrigger ──near-end──▶ FeedController (load state machine)
//!        ▲                           │
//!        │ re-observe new            ▼
//!        │ last item         CatalogApi::fetch_page
//!        │                           │
//!   re-render ◀── Accumulator ◀── EnrichmentPipeline
//!                                 (details ∥, sub-resources ∥, join)
//! ```
//!
//! All state mutation happens in the controller, one event at a time; the
//! fetches themselves fan out as concurrent tasks and join before a page
//! is applied. A page either lands whole or not at all: a single detail
//! failure discards the page, while sub-resource failures only degrade the
//! affected entry to a placeholder description.
//!
//! ## Modules
//!
//! - [`client`]: remote catalog access (trait seam + reqwest implementation)
//! - [`enrich`]: page enrichment pipeline
//! - [`feed`]: feed state, accumulator, and the controlling state machine
//! - [`viewport`]: sentinel observation and near-end signaling
//! - [`config`]: feed configuration and constants

pub mod client;
pub mod config;
pub mod enrich;
pub mod error;
pub mod feed;
pub mod viewport;

pub use config::FeedConfig;
pub use error::{Error, Result};
pub use feed::{FeedController, FeedEvent, LoadState};
