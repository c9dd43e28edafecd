use scraper::Html;

use crate::error::ImportError;
use crate::model::RecipeRecord;

pub mod fields;
mod json_ld;

pub use self::json_ld::JsonLdExtractor;

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

/// A recipe page reduced to its record plus the links it advertises.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    pub recipe: RecipeRecord,
    /// Breadcrumb URLs found next to the recipe, candidates for crawling
    pub related_urls: Vec<String>,
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<ExtractedPage, ImportError>;
}
