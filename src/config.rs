use std::time::Duration;

/// Run-wide settings for one scrape: where to search, how far to paginate,
/// and how long to wait around each fetch.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site root, e.g. `https://www.olx.in`
    pub base_url: String,
    /// Search results path under the base URL
    pub search_path: String,
    /// Destination CSV file
    pub output_path: String,
    /// Upper bound on pages fetched; the loop may stop earlier
    pub max_pages: u32,
    /// Blind wait after navigation for client-side rendering
    pub render_delay: Duration,
    /// Politeness throttle between successive page fetches
    pub page_delay: Duration,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.olx.in".to_string(),
            search_path: "/items/q-car-cover".to_string(),
            output_path: "olx_car_cover_results.csv".to_string(),
            max_pages: 5,
            render_delay: Duration::from_millis(3500),
            page_delay: Duration::from_secs(2),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "en-IN,en;q=0.9".to_string(),
        }
    }
}
