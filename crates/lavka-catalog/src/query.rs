use std::fmt;
use std::str::FromStr;

/// Catalog sort keys understood by the goods endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    RatingAsc,
    /// The storefront's default ordering.
    #[default]
    RatingDesc,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::RatingAsc => "rating_asc",
            SortOrder::RatingDesc => "rating_desc",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating_asc" => Ok(SortOrder::RatingAsc),
            "rating_desc" => Ok(SortOrder::RatingDesc),
            "price_asc" => Ok(SortOrder::PriceAsc),
            "price_desc" => Ok(SortOrder::PriceDesc),
            other => Err(format!("unknown sort order \"{other}\"")),
        }
    }
}

/// The query and filters a catalog view is currently showing.
///
/// Only the free-text search and sort key go to the server; the category,
/// price, and discount filters are client-side state. Any change to this
/// struct is a reason to [`crate::CatalogPager::reset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub search: String,
    pub sort: SortOrder,
    pub categories: Vec<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub discount_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_round_trips_through_strings() {
        for sort in [
            SortOrder::RatingAsc,
            SortOrder::RatingDesc,
            SortOrder::PriceAsc,
            SortOrder::PriceDesc,
        ] {
            assert_eq!(sort.as_str().parse::<SortOrder>().unwrap(), sort);
        }
    }

    #[test]
    fn unknown_sort_order_is_rejected() {
        assert!("cheapest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn default_sort_is_rating_desc() {
        assert_eq!(CatalogQuery::default().sort, SortOrder::RatingDesc);
    }
}
