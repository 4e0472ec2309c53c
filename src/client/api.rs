//! Catalog API seam

use super::types::{DetailRecord, ItemStub, SubResourceRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Access to the remote catalog.
///
/// Implementations are stateless with respect to the feed: they answer one
/// request at a time and never retry on their own.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of item stubs starting at `offset`.
    ///
    /// An empty result for a well-formed offset signals end-of-data and is
    /// not an error.
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Vec<ItemStub>>;

    /// Fetch the detail record behind a stub's detail reference.
    async fn fetch_detail(&self, reference: &str) -> Result<DetailRecord>;

    /// Fetch one sub-resource record by reference.
    async fn fetch_sub_resource(&self, reference: &str) -> Result<SubResourceRecord>;
}
