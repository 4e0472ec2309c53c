//! HTTP catalog client backed by reqwest

use super::api::CatalogApi;
use super::types::{DetailRecord, ItemStub, PageResponse, SubResourceRecord};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;

/// Catalog client against the remote REST API
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Create a new client for the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn page_url(&self, offset: u32, limit: u32) -> String {
        format!(
            "{}/catalog?limit={}&offset={}",
            self.base_url, limit, offset
        )
    }

    /// References arrive either absolute or relative to the API base.
    fn resolve(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_string()
        } else {
            format!("{}/{}", self.base_url, reference.trim_start_matches('/'))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url.to_string()));
        }

        let value = response.error_for_status()?.json::<T>().await?;
        Ok(value)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Vec<ItemStub>> {
        let url = self.page_url(offset, limit);
        tracing::debug!("Fetching catalog page: {}", url);

        let page: PageResponse = self.get_json(&url).await?;
        Ok(page.results)
    }

    async fn fetch_detail(&self, reference: &str) -> Result<DetailRecord> {
        let url = self.resolve(reference);
        tracing::debug!("Fetching item detail: {}", url);

        self.get_json(&url).await
    }

    async fn fetch_sub_resource(&self, reference: &str) -> Result<SubResourceRecord> {
        let url = self.resolve(reference);
        tracing::debug!("Fetching sub-resource: {}", url);

        self.get_json(&url).await
    }
}
