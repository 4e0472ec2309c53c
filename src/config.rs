//! Cardfeed configuration

use serde::{Deserialize, Serialize};

/// Number of item stubs requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Accumulated item count at which loading pauses pending user confirmation.
pub const ITEM_CAP: usize = 2000;

/// Description used when a sub-resource fetch fails or carries no text in
/// the configured language.
pub const DESCRIPTION_FALLBACK: &str = "No description available";

/// Image reference used when a detail record carries none.
pub const IMAGE_FALLBACK: &str = "images/placeholder.png";

/// Feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the remote catalog API
    pub base_url: String,

    /// Items requested per page
    pub page_size: u32,

    /// Accumulated item ceiling before the cap gate engages
    pub item_cap: usize,

    /// Language variant picked from localized sub-resource descriptions
    pub language: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://catalog.example.org/api/v2".to_string(),
            page_size: PAGE_SIZE,
            item_cap: ITEM_CAP,
            language: "en".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeedConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.item_cap, 2000);
        assert_eq!(config.language, "en");
    }
}
