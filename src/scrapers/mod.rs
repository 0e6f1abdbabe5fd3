pub mod browser;
pub mod parser;
pub mod service;
pub mod traits;

pub use browser::ChromeRenderer;
pub use service::scrape_listings;
pub use traits::RenderSource;
