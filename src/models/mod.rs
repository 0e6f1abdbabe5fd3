use serde::{Deserialize, Serialize};

/// One classified listing extracted from a search results page.
///
/// `title` and `link` are always present; the remaining fields are
/// best-effort and may be missing when the card's markup doesn't
/// surface them. `link` is the dedup key across the whole run.
/// Field order here is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    /// Raw formatted price string, e.g. `₹1,200` (not parsed to a number)
    pub price: Option<String>,
    pub location: Option<String>,
    /// Normalized recency label: `today`, `yesterday`, `N days ago`
    /// (2..=6), or a verbatim `MON DD` date token
    pub posted: Option<String>,
    /// Absolute URL of the listing detail page
    pub link: String,
    /// First run of six or more digits in `link`, if any
    pub ad_id: Option<String>,
}
