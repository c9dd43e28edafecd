//! Crawl recipe pages and reduce their ingredient lists to canonical units.
//!
//! The core is [`ingredients`]: [`normalize`] turns a line such as
//! `"1 1/2 cups packed brown sugar"` into `(354.75, "brown sugar (mL)")`.
//! The remaining modules fetch, cache and parse recipe pages around it.

pub mod config;
pub mod crawler;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod ingredients;
pub mod model;
pub mod pipelines;
pub mod store;

use log::debug;

use crate::config::HttpConfig;
use crate::extractors::JsonLdExtractor;
use crate::fetchers::{Fetcher, RequestFetcher};

pub use crate::error::{ImportError, NormalizeError};
pub use crate::ingredients::{normalize, Normalizer};
pub use crate::model::{NormalizedIngredient, Nutrition, RecipeRecord};

/// Fetch a recipe page and extract its record, using the default HTTP settings.
pub async fn fetch_recipe(url: &str) -> Result<RecipeRecord, ImportError> {
    fetch_recipe_with_config(url, &HttpConfig::default()).await
}

pub async fn fetch_recipe_with_config(
    url: &str,
    http: &HttpConfig,
) -> Result<RecipeRecord, ImportError> {
    let fetcher = RequestFetcher::new(http)?;
    let html = fetcher.fetch(url).await?;

    let page = JsonLdExtractor::default().parse_html(url, &html)?;
    debug!("{:#?}", page.recipe);
    Ok(page.recipe)
}
