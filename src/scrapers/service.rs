use std::thread;

use anyhow::Result;
use tracing::info;

use crate::config::ScrapeConfig;
use crate::models::Listing;
use crate::scrapers::parser;
use crate::scrapers::traits::RenderSource;

/// Fetch and parse search pages sequentially, merging the results.
///
/// Pages are visited in ascending order up to `cfg.max_pages`, with a
/// politeness pause between fetches. A page yielding zero records means
/// the listings ran out, not an error, and ends the loop early. Across
/// pages the merge deduplicates by link, last write winning.
pub fn scrape_listings<S: RenderSource>(
    source: &S,
    cfg: &ScrapeConfig,
) -> Result<Vec<Listing>> {
    let mut all_listings = Vec::new();

    for page in 1..=cfg.max_pages {
        let url = parser::build_search_url(cfg, page);
        info!("Fetching page {}: {}", page, url);

        let html = source.fetch(&url)?;
        let listings = parser::parse_search_page(&html, cfg);
        info!("Found {} listings on page {}", listings.len(), page);

        if listings.is_empty() {
            info!("No listings on page {}, stopping pagination", page);
            break;
        }
        all_listings.extend(listings);

        thread::sleep(cfg.page_delay);
    }

    Ok(parser::dedup_by_link(all_listings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    struct CannedPages {
        pages: HashMap<String, String>,
        fetched: RefCell<Vec<String>>,
    }

    impl CannedPages {
        fn new(pages: Vec<(String, &str)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(url, html)| (url, html.to_string()))
                    .collect(),
                fetched: RefCell::new(Vec::new()),
            }
        }
    }

    impl RenderSource for CannedPages {
        fn fetch(&self, url: &str) -> Result<String> {
            self.fetched.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no canned page for {}", url))
        }
    }

    fn test_config() -> ScrapeConfig {
        ScrapeConfig {
            max_pages: 5,
            render_delay: Duration::ZERO,
            page_delay: Duration::ZERO,
            ..ScrapeConfig::default()
        }
    }

    const EMPTY_PAGE: &str = "<html><body><p>No results</p></body></html>";

    #[test]
    fn empty_page_stops_pagination_early() {
        let cfg = test_config();
        let source = CannedPages::new(vec![
            (
                parser::build_search_url(&cfg, 1),
                r#"<div><a href="/item/one-111111111"><h5>One</h5></a><span>Agra</span></div>"#,
            ),
            (parser::build_search_url(&cfg, 2), EMPTY_PAGE),
        ]);

        let listings = scrape_listings(&source, &cfg).unwrap();

        assert_eq!(listings.len(), 1);
        // Pages 3..=5 were never requested.
        assert_eq!(source.fetched.borrow().len(), 2);
    }

    #[test]
    fn later_pages_overwrite_records_sharing_a_link() {
        let cfg = test_config();
        let source = CannedPages::new(vec![
            (
                parser::build_search_url(&cfg, 1),
                r#"<div>
                     <div><a href="/item/dup-123456789"><h5>Old Title</h5></a><span>Agra</span></div>
                     <div><a href="/item/solo-987654321"><h5>Solo</h5></a><span>Goa</span></div>
                   </div>"#,
            ),
            (
                parser::build_search_url(&cfg, 2),
                r#"<div><a href="/item/dup-123456789"><h5>New Title</h5></a><span>Agra</span></div>"#,
            ),
            (parser::build_search_url(&cfg, 3), EMPTY_PAGE),
        ]);

        let listings = scrape_listings(&source, &cfg).unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].link, "https://www.olx.in/item/dup-123456789");
        assert_eq!(listings[0].title, "New Title");
        assert_eq!(listings[1].title, "Solo");
    }

    #[test]
    fn fetch_failure_is_fatal() {
        let cfg = test_config();
        let source = CannedPages::new(vec![]);
        assert!(scrape_listings(&source, &cfg).is_err());
    }

    #[test]
    fn loop_honors_page_limit() {
        let cfg = ScrapeConfig {
            max_pages: 2,
            ..test_config()
        };
        let page = r#"<div><a href="/item/x-111111111"><h5>X</h5></a><span>Goa</span></div>"#;
        let source = CannedPages::new(vec![
            (parser::build_search_url(&cfg, 1), page),
            (parser::build_search_url(&cfg, 2), page),
            (parser::build_search_url(&cfg, 3), page),
        ]);

        let listings = scrape_listings(&source, &cfg).unwrap();

        assert_eq!(listings.len(), 1);
        assert_eq!(source.fetched.borrow().len(), 2);
    }
}
