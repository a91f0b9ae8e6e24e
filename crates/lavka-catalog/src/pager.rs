use lavka_api::{ApiError, Good, GoodsQuery, StoreClient};

use crate::query::CatalogQuery;

/// Where the pager currently is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPhase {
    /// Nothing loaded since the last reset.
    Idle,
    /// A page fetch is in flight.
    Loading,
    /// At least one page landed; `has_more` says whether another exists.
    Loaded { has_more: bool },
}

/// The outcome of one successful page load.
#[derive(Debug)]
pub struct PageLoad {
    pub items: Vec<Good>,
    /// True when the display should be replaced (first load after a reset)
    /// rather than appended to.
    pub replace: bool,
    pub has_more: bool,
}

/// Stateful incremental catalog loader.
///
/// Owns the page cursor, the count of items accumulated so far, and the
/// last-applied query. A failed load leaves the cursor unmoved so retrying
/// re-fetches the same page; items from earlier pages are untouched because
/// the pager never holds them — it only tells the caller what to append.
#[derive(Debug)]
pub struct CatalogPager {
    query: CatalogQuery,
    per_page: u32,
    page: u32,
    loaded: u64,
    total: u64,
    phase: PagerPhase,
    pending_reset: bool,
}

impl CatalogPager {
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            query: CatalogQuery::default(),
            per_page,
            page: 1,
            loaded: 0,
            total: 0,
            phase: PagerPhase::Idle,
            pending_reset: true,
        }
    }

    /// Applies a new query, forcing the next load back to page 1 with the
    /// accumulated count zeroed. The next [`PageLoad`] will ask the caller
    /// to replace the display.
    pub fn reset(&mut self, query: CatalogQuery) {
        self.query = query;
        self.page = 1;
        self.loaded = 0;
        self.total = 0;
        self.phase = PagerPhase::Idle;
        self.pending_reset = true;
    }

    /// Fetches the next page and advances the cursor on success.
    ///
    /// # Errors
    ///
    /// Propagates the [`ApiError`] from the gateway. The cursor does not
    /// advance, so the same page can be retried; callers following the
    /// fail-safe rendering rule clear the display when this happens during
    /// a reset-triggered load.
    pub async fn load_next(&mut self, client: &StoreClient) -> Result<PageLoad, ApiError> {
        let previous_phase = self.phase;
        self.phase = PagerPhase::Loading;

        let request = GoodsQuery {
            page: self.page,
            per_page: self.per_page,
            query: self.query.search.clone(),
            sort_order: self.query.sort.as_str().to_string(),
        };

        match client.list_goods(&request).await {
            Ok(page) => {
                let replace = self.pending_reset;
                self.pending_reset = false;
                self.loaded += page.items.len() as u64;
                self.total = page.total;
                self.page += 1;
                let has_more = self.loaded < self.total;
                self.phase = PagerPhase::Loaded { has_more };
                tracing::debug!(
                    page = self.page - 1,
                    loaded = self.loaded,
                    total = self.total,
                    has_more,
                    "catalog page loaded"
                );
                Ok(PageLoad {
                    items: page.items,
                    replace,
                    has_more,
                })
            }
            Err(e) => {
                self.phase = previous_phase;
                Err(e)
            }
        }
    }

    /// True while another page is known to exist; drives the "load more"
    /// affordance.
    #[must_use]
    pub fn has_more(&self) -> bool {
        matches!(self.phase, PagerPhase::Loaded { has_more: true })
    }

    #[must_use]
    pub fn phase(&self) -> PagerPhase {
        self.phase
    }

    /// The 1-based page the next load will fetch.
    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn loaded(&self) -> u64 {
        self.loaded
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortOrder;

    #[test]
    fn new_pager_starts_at_page_one_and_replaces() {
        let pager = CatalogPager::new(12);
        assert_eq!(pager.next_page(), 1);
        assert_eq!(pager.loaded(), 0);
        assert_eq!(pager.phase(), PagerPhase::Idle);
        assert!(!pager.has_more());
    }

    #[test]
    fn reset_rewinds_the_cursor() {
        let mut pager = CatalogPager::new(12);
        pager.page = 3;
        pager.loaded = 24;
        pager.total = 30;
        pager.phase = PagerPhase::Loaded { has_more: true };
        pager.pending_reset = false;

        pager.reset(CatalogQuery {
            search: "tea".into(),
            sort: SortOrder::PriceAsc,
            ..CatalogQuery::default()
        });

        assert_eq!(pager.next_page(), 1);
        assert_eq!(pager.loaded(), 0);
        assert_eq!(pager.total(), 0);
        assert_eq!(pager.phase(), PagerPhase::Idle);
        assert_eq!(pager.query().search, "tea");
    }
}
