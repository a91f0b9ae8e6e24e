//! Incremental catalog loading for the lavka storefront client.
//!
//! [`CatalogPager`] owns the pagination cursor and the last-applied query;
//! the UI layer asks it for one page at a time and renders whatever comes
//! back. Changing the query resets the cursor so the next load replaces the
//! display instead of appending to it.

mod pager;
mod query;

pub use pager::{CatalogPager, PageLoad, PagerPhase};
pub use query::{CatalogQuery, SortOrder};
