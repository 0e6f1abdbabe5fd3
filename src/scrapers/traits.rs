use anyhow::Result;

/// Render-acquisition contract: given a URL, produce the fully rendered
/// page markup after any client-side script has run.
///
/// The page loop and parser only depend on this seam, so they can be
/// exercised against canned markup without a browser.
pub trait RenderSource {
    fn fetch(&self, url: &str) -> Result<String>;
}
