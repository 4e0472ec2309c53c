//! Append-only item accumulator

use super::state::LoadState;
use crate::client::EnrichedItem;

/// Append-only ordered collection of enriched items plus the page cursor.
///
/// The cursor advances by the fixed page size after every successful page
/// append and is never decremented. There is no removal operation.
#[derive(Debug)]
pub struct Accumulator {
    items: Vec<EnrichedItem>,
    cursor: u32,
    page_size: u32,
}

impl Accumulator {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            page_size,
        }
    }

    /// Append one enriched page and advance the cursor.
    ///
    /// No-op unless a load is in flight: a completion that lands after the
    /// load state was reset (teardown, stop) is discarded rather than
    /// allowed to corrupt the collection. Returns whether the page was
    /// applied.
    pub fn append(&mut self, page: Vec<EnrichedItem>, load: &LoadState) -> bool {
        if !load.is_loading() {
            tracing::debug!(
                "Discarding late page completion of {} items in state {}",
                page.len(),
                load.label()
            );
            return false;
        }
        if page.is_empty() {
            return false;
        }

        self.items.extend(page);
        self.cursor += self.page_size;
        true
    }

    /// Number of accumulated items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Offset of the next page to fetch
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// All accumulated items, in page order
    pub fn items(&self) -> &[EnrichedItem] {
        &self.items
    }

    /// Item at `index`, for selection callbacks from a rendering surface
    pub fn get(&self, index: usize) -> Option<&EnrichedItem> {
        self.items.get(index)
    }
}
