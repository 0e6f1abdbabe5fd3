use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info};

use crate::config::ScrapeConfig;
use crate::scrapers::traits::RenderSource;

/// Renders pages through a headless Chrome instance.
///
/// One browser and one tab serve the whole run. The `Browser` handle
/// owns the Chrome process and shuts it down on drop, so the driver is
/// released on every exit path, including mid-loop failures.
pub struct ChromeRenderer {
    // Held for its Drop; all page work goes through the tab.
    _browser: Browser,
    tab: Arc<Tab>,
    render_delay: Duration,
}

impl ChromeRenderer {
    pub fn new(cfg: &ScrapeConfig) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options)
            .context("Failed to launch Chrome browser")?;

        let tab = browser.new_tab()?;
        tab.set_user_agent(
            &cfg.user_agent,
            Some(&cfg.accept_language),
            None,
        )?;

        Ok(Self {
            _browser: browser,
            tab,
            render_delay: cfg.render_delay,
        })
    }
}

impl RenderSource for ChromeRenderer {
    fn fetch(&self, url: &str) -> Result<String> {
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;
        self.tab.wait_until_navigated()?;

        // Blind wait for client-side rendering; there is no explicit
        // "render complete" signal to listen for.
        thread::sleep(self.render_delay);

        let result = self
            .tab
            .evaluate("document.documentElement.outerHTML", false)?;
        let html = result
            .value
            .as_ref()
            .and_then(|value| value.as_str())
            .unwrap_or("")
            .to_string();

        if html.is_empty() {
            bail!("Empty markup returned for {}", url);
        }
        debug!("Captured {} bytes of rendered markup", html.len());

        Ok(html)
    }
}
