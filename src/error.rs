use thiserror::Error;

/// Errors raised by the ingredient normalization core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// A quantity, duration or content string does not match its grammar
    #[error("Format error: {0}")]
    Format(String),

    /// A unit token has no entry in the conversion table
    #[error("Unknown unit: {0:?}")]
    UnknownUnit(String),
}

/// Errors that can occur while crawling, caching or extracting recipe pages
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to fetch a page
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Failed to retrieve {url}: status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Failed to parse a recipe page
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    /// The page carries no JSON-LD recipe block
    #[error("No structured recipe data found on this page")]
    NoStructuredData,

    /// An ingredient or nutrition field could not be normalized
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Cache or store I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store or output serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
