//! Page enrichment: fan-out, fan-in, degradation rules

use crate::client::{CatalogApi, EnrichedItem, ItemStub, SubResource, SubResourceRef};
use crate::config::{DESCRIPTION_FALLBACK, IMAGE_FALLBACK};
use crate::error::Result;
use futures::future;
use std::sync::Arc;

/// Enriches pages of item stubs into display-ready records.
///
/// All detail fetches of a page run in parallel, as do all sub-resource
/// fetches of a given item. A page only completes once every one of its
/// items has; the first detail failure aborts the whole page. Sub-resource
/// failures never abort anything, the affected entry degrades to a fixed
/// placeholder description.
pub struct EnrichmentPipeline<C: CatalogApi> {
    client: Arc<C>,
    language: String,
}

impl<C: CatalogApi> EnrichmentPipeline<C> {
    /// Create a pipeline picking descriptions in the given language
    pub fn new(client: Arc<C>, language: impl Into<String>) -> Self {
        Self {
            client,
            language: language.into(),
        }
    }

    /// Enrich one page of stubs. Output order equals input order regardless
    /// of fetch completion order.
    pub async fn enrich_page(&self, stubs: Vec<ItemStub>) -> Result<Vec<EnrichedItem>> {
        future::try_join_all(stubs.into_iter().map(|stub| self.enrich_item(stub))).await
    }

    async fn enrich_item(&self, stub: ItemStub) -> Result<EnrichedItem> {
        let detail = self.client.fetch_detail(&stub.detail_reference).await?;

        let sub_resources = future::join_all(
            detail
                .sub_resource_refs
                .iter()
                .map(|sub_ref| self.resolve_sub_resource(sub_ref)),
        )
        .await;

        Ok(EnrichedItem {
            identifier: stub.identifier,
            display_name: detail.display_name,
            image_ref: detail
                .image_ref
                .unwrap_or_else(|| IMAGE_FALLBACK.to_string()),
            category_tags: detail.category_tags,
            numeric_attributes: detail.numeric_attributes,
            sub_resources,
        })
    }

    async fn resolve_sub_resource(&self, sub_ref: &SubResourceRef) -> SubResource {
        match self.client.fetch_sub_resource(&sub_ref.reference).await {
            Ok(record) => {
                let description = record
                    .description_in(&self.language)
                    .unwrap_or(DESCRIPTION_FALLBACK)
                    .to_string();
                SubResource {
                    name: record.name,
                    description,
                }
            }
            Err(err) => {
                tracing::warn!(
                    "Sub-resource fetch failed for {}, using placeholder: {}",
                    sub_ref.reference,
                    err
                );
                SubResource {
                    name: sub_ref.identifier.clone(),
                    description: DESCRIPTION_FALLBACK.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockCatalog;

    async fn page_of(catalog: &MockCatalog, offset: u32, limit: u32) -> Vec<ItemStub> {
        catalog.fetch_page(offset, limit).await.unwrap()
    }

    #[tokio::test]
    async fn test_enrich_page_preserves_input_order() {
        let catalog = Arc::new(MockCatalog::with_total(8).staggered_details());
        let pipeline = EnrichmentPipeline::new(catalog.clone(), "en");

        let stubs = page_of(&catalog, 0, 8).await;
        let items = pipeline.enrich_page(stubs).await.unwrap();

        let order: Vec<&str> = items.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "card-0", "card-1", "card-2", "card-3", "card-4", "card-5", "card-6", "card-7"
            ]
        );
    }

    #[tokio::test]
    async fn test_detail_failure_fails_whole_page() {
        let catalog = Arc::new(MockCatalog::with_total(8).failing_detail("card-2"));
        let pipeline = EnrichmentPipeline::new(catalog.clone(), "en");

        let stubs = page_of(&catalog, 0, 8).await;
        assert!(pipeline.enrich_page(stubs).await.is_err());
    }

    #[tokio::test]
    async fn test_sub_resource_failure_degrades_to_placeholder() {
        let catalog = Arc::new(
            MockCatalog::with_total(4)
                .subs_per_item(2)
                .failing_sub("traits/card-1/0"),
        );
        let pipeline = EnrichmentPipeline::new(catalog.clone(), "en");

        let stubs = page_of(&catalog, 0, 4).await;
        let items = pipeline.enrich_page(stubs).await.unwrap();

        assert_eq!(items.len(), 4);
        let degraded = &items[1].sub_resources[0];
        assert_eq!(degraded.name, "trait-1-0");
        assert_eq!(degraded.description, DESCRIPTION_FALLBACK);

        // the sibling sub-resource of the same item resolved normally
        assert_eq!(items[1].sub_resources[1].description, "Effect of card-1-1.");
    }

    #[tokio::test]
    async fn test_missing_language_falls_back() {
        let catalog = Arc::new(MockCatalog::with_total(2));
        let pipeline = EnrichmentPipeline::new(catalog.clone(), "fr");

        let stubs = page_of(&catalog, 0, 2).await;
        let items = pipeline.enrich_page(stubs).await.unwrap();

        assert_eq!(items[0].sub_resources[0].description, DESCRIPTION_FALLBACK);
    }

    #[tokio::test]
    async fn test_missing_image_uses_sentinel() {
        let catalog = Arc::new(MockCatalog::with_total(2).without_image("card-0"));
        let pipeline = EnrichmentPipeline::new(catalog.clone(), "en");

        let stubs = page_of(&catalog, 0, 2).await;
        let items = pipeline.enrich_page(stubs).await.unwrap();

        assert_eq!(items[0].image_ref, IMAGE_FALLBACK);
        assert_eq!(items[1].image_ref, "sprites/card-1.png");
    }

    #[tokio::test]
    async fn test_empty_page_enriches_to_empty() {
        let catalog = Arc::new(MockCatalog::with_total(0));
        let pipeline = EnrichmentPipeline::new(catalog, "en");

        let items = pipeline.enrich_page(Vec::new()).await.unwrap();
        assert!(items.is_empty());
    }
}
