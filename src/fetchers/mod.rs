use async_trait::async_trait;

use crate::error::ImportError;

mod cache;
mod request;

pub use cache::HtmlCache;
pub use request::RequestFetcher;

/// Source of page bodies by URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ImportError>;
}
