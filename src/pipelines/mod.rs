//! Multi-page workflows built on the fetchers, cache and extractor.

pub mod batch;
pub mod download;
pub mod search;

pub use batch::BatchReport;
pub use download::DownloadReport;
