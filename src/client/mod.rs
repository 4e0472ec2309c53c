//! Remote catalog client
//!
//! Stateless access to the paginated catalog API: one list endpoint for
//! item stubs, one detail endpoint per item, one sub-resource endpoint per
//! declared sub-resource reference. Retry policy does not live here; a
//! failed request surfaces as an error and the caller decides.

mod api;
mod http;
#[cfg(any(test, feature = "mock-client"))]
mod mock;
mod types;

pub use api::CatalogApi;
pub use http::HttpCatalogClient;
#[cfg(any(test, feature = "mock-client"))]
pub use mock::MockCatalog;
pub use types::{
    DetailRecord, EnrichedItem, ItemStub, LocalizedText, PageResponse, SubResource,
    SubResourceRecord, SubResourceRef,
};
