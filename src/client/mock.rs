//! Scripted in-memory catalog
//!
//! Deterministic stand-in for the remote API: `card-0` .. `card-{total-1}`,
//! each with a configurable number of sub-resources. Individual requests can
//! be scripted to fail, either persistently or exactly once, and detail
//! fetches can be staggered so that later items complete first.

use super::api::CatalogApi;
use super::types::{
    DetailRecord, ItemStub, LocalizedText, SubResourceRecord, SubResourceRef,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory catalog with failure injection
pub struct MockCatalog {
    total: u32,
    subs_per_item: usize,
    page_delay: Duration,
    stagger_details: bool,
    without_image: HashSet<String>,
    failing_details: HashSet<String>,
    failing_subs: HashSet<String>,
    failing_pages: HashSet<u32>,
    flaky_pages: Mutex<HashSet<u32>>,
    page_calls: Mutex<Vec<(u32, u32)>>,
}

impl MockCatalog {
    /// Catalog holding `total` items
    pub fn with_total(total: u32) -> Self {
        Self {
            total,
            subs_per_item: 1,
            page_delay: Duration::ZERO,
            stagger_details: false,
            without_image: HashSet::new(),
            failing_details: HashSet::new(),
            failing_subs: HashSet::new(),
            failing_pages: HashSet::new(),
            flaky_pages: Mutex::new(HashSet::new()),
            page_calls: Mutex::new(Vec::new()),
        }
    }

    /// Sub-resource references declared per item detail
    pub fn subs_per_item(mut self, count: usize) -> Self {
        self.subs_per_item = count;
        self
    }

    /// Delay every page fetch, keeping the feed in a loading state long
    /// enough for a racing signal to arrive
    pub fn page_delay_ms(mut self, millis: u64) -> Self {
        self.page_delay = Duration::from_millis(millis);
        self
    }

    /// Delay detail fetches so that later items in a page complete first
    pub fn staggered_details(mut self) -> Self {
        self.stagger_details = true;
        self
    }

    /// Detail record for `identifier` carries no image reference
    pub fn without_image(mut self, identifier: &str) -> Self {
        self.without_image.insert(identifier.to_string());
        self
    }

    /// Detail fetch for `identifier` always fails
    pub fn failing_detail(mut self, identifier: &str) -> Self {
        self.failing_details.insert(identifier.to_string());
        self
    }

    /// Sub-resource fetch for `reference` always fails
    pub fn failing_sub(mut self, reference: &str) -> Self {
        self.failing_subs.insert(reference.to_string());
        self
    }

    /// Page fetch at `offset` always fails
    pub fn failing_page(mut self, offset: u32) -> Self {
        self.failing_pages.insert(offset);
        self
    }

    /// Page fetch at `offset` fails once, then succeeds
    pub fn flaky_page(self, offset: u32) -> Self {
        self.flaky_pages.lock().unwrap().insert(offset);
        self
    }

    /// Every `(offset, limit)` pair passed to `fetch_page` so far
    pub fn page_calls(&self) -> Vec<(u32, u32)> {
        self.page_calls.lock().unwrap().clone()
    }

    fn item_index(reference: &str) -> Option<u32> {
        reference.rsplit("card-").next()?.parse().ok()
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Vec<ItemStub>> {
        self.page_calls.lock().unwrap().push((offset, limit));

        if !self.page_delay.is_zero() {
            tokio::time::sleep(self.page_delay).await;
        }

        if self.failing_pages.contains(&offset) || self.flaky_pages.lock().unwrap().remove(&offset)
        {
            return Err(Error::Network(format!(
                "connection reset fetching page at offset {}",
                offset
            )));
        }

        let end = self.total.min(offset.saturating_add(limit));
        Ok((offset..end)
            .map(|n| ItemStub {
                identifier: format!("card-{}", n),
                detail_reference: format!("items/card-{}", n),
            })
            .collect())
    }

    async fn fetch_detail(&self, reference: &str) -> Result<DetailRecord> {
        let index = Self::item_index(reference)
            .ok_or_else(|| Error::NotFound(reference.to_string()))?;
        let identifier = format!("card-{}", index);

        if self.stagger_details {
            // later items finish sooner
            let rank = self.total.saturating_sub(index) as u64;
            tokio::time::sleep(Duration::from_millis(rank * 2)).await;
        }

        if self.failing_details.contains(&identifier) {
            return Err(Error::Network(format!(
                "connection reset fetching {}",
                reference
            )));
        }

        let image_ref = if self.without_image.contains(&identifier) {
            None
        } else {
            Some(format!("sprites/{}.png", identifier))
        };

        Ok(DetailRecord {
            display_name: format!("Card {}", index),
            image_ref,
            category_tags: vec!["standard".to_string()],
            numeric_attributes: BTreeMap::from([("power".to_string(), i64::from(index))]),
            sub_resource_refs: (0..self.subs_per_item)
                .map(|k| SubResourceRef {
                    identifier: format!("trait-{}-{}", index, k),
                    reference: format!("traits/{}/{}", identifier, k),
                })
                .collect(),
        })
    }

    async fn fetch_sub_resource(&self, reference: &str) -> Result<SubResourceRecord> {
        if self.failing_subs.contains(reference) {
            return Err(Error::Network(format!(
                "connection reset fetching {}",
                reference
            )));
        }

        let name = reference.trim_start_matches("traits/").replace('/', "-");
        Ok(SubResourceRecord {
            name: name.clone(),
            localized_descriptions: vec![
                LocalizedText {
                    language: "en".to_string(),
                    text: format!("Effect of {}.", name),
                },
                LocalizedText {
                    language: "de".to_string(),
                    text: format!("Effekt von {}.", name),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_page_bounds() {
        let catalog = MockCatalog::with_total(25);

        let page = catalog.fetch_page(0, 20).await.unwrap();
        assert_eq!(page.len(), 20);
        assert_eq!(page[0].identifier, "card-0");

        let page = catalog.fetch_page(20, 20).await.unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page[4].identifier, "card-24");

        let page = catalog.fetch_page(25, 20).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_flaky_page_fails_once() {
        let catalog = MockCatalog::with_total(10).flaky_page(0);

        assert!(catalog.fetch_page(0, 20).await.is_err());
        assert!(catalog.fetch_page(0, 20).await.is_ok());
        assert_eq!(catalog.page_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_page_is_persistent() {
        let catalog = MockCatalog::with_total(10).failing_page(0);

        assert!(catalog.fetch_page(0, 20).await.is_err());
        assert!(catalog.fetch_page(0, 20).await.is_err());
    }

    #[tokio::test]
    async fn test_detail_and_sub_resource() {
        let catalog = MockCatalog::with_total(10).subs_per_item(2);

        let detail = catalog.fetch_detail("items/card-3").await.unwrap();
        assert_eq!(detail.display_name, "Card 3");
        assert_eq!(detail.sub_resource_refs.len(), 2);

        let sub = catalog
            .fetch_sub_resource(&detail.sub_resource_refs[0].reference)
            .await
            .unwrap();
        assert_eq!(sub.name, "card-3-0");
        assert!(sub.description_in("en").is_some());
    }
}
