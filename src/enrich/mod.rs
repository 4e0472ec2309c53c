//! Enrichment pipeline
//!
//! Resolves one page of item stubs into fully-enriched records via dependent
//! fan-out fetches: one detail fetch per stub, then one fetch per declared
//! sub-resource of that detail.

mod pipeline;

pub use pipeline::EnrichmentPipeline;
