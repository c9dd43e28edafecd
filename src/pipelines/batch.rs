use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;
use tokio::fs;

use crate::error::ImportError;
use crate::extractors::JsonLdExtractor;
use crate::fetchers::HtmlCache;
use crate::model::RecipeRecord;

/// Parsed recipes and every value seen per product label.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// Cached pages that were parsed, successfully or not
    pub processed: usize,
    pub recipes: Vec<RecipeRecord>,
    pub ingredient_index: BTreeMap<String, Vec<f64>>,
    /// Pages that failed to parse, with the reason
    pub failures: Vec<(u64, String)>,
}

impl BatchReport {
    fn add(&mut self, recipe: RecipeRecord) {
        for ingredient in &recipe.ingredients {
            self.ingredient_index
                .entry(ingredient.product.clone())
                .or_default()
                .push(ingredient.value);
        }
        self.recipes.push(recipe);
    }

    /// The `limit` product labels seen most often, ties broken by label.
    pub fn most_common(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .ingredient_index
            .iter()
            .map(|(product, values)| (product.as_str(), values.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts.truncate(limit);
        counts
    }

    /// Write `recipes.json` and `ingredients.json` into `dir`.
    pub async fn write(&self, dir: &Path) -> Result<(), ImportError> {
        fs::create_dir_all(dir).await?;
        fs::write(
            dir.join("recipes.json"),
            serde_json::to_string_pretty(&self.recipes)?,
        )
        .await?;
        fs::write(
            dir.join("ingredients.json"),
            serde_json::to_string_pretty(&self.ingredient_index)?,
        )
        .await?;
        info!(
            "Wrote {} recipes and {} products to {}",
            self.recipes.len(),
            self.ingredient_index.len(),
            dir.display()
        );
        Ok(())
    }
}

/// Parse the cached pages for `ids`, at most `limit` of them.
///
/// A page that fails to parse is recorded in [`BatchReport::failures`] and
/// the batch moves on. Ids without a cached page are skipped.
pub async fn run(
    cache: &HtmlCache,
    extractor: &JsonLdExtractor,
    ids: &[u64],
    limit: Option<usize>,
) -> Result<BatchReport, ImportError> {
    let limit = limit.unwrap_or(usize::MAX);
    let mut report = BatchReport::default();

    for &id in ids {
        if report.processed >= limit {
            break;
        }

        let Some(html) = cache.load(id).await? else {
            debug!("Recipe {} is not cached, skipping", id);
            continue;
        };
        report.processed += 1;

        let url = cache.path_for(id).display().to_string();
        match extractor.parse_html(&url, &html) {
            Ok(page) => report.add(page.recipe),
            Err(e) => {
                warn!("Skipping recipe {}: {}", id, e);
                report.failures.push((id, e.to_string()));
            }
        }

        if report.processed % 100 == 0 {
            info!(
                "Processed {} recipes and {} products",
                report.processed,
                report.ingredient_index.len()
            );
        }
    }

    Ok(report)
}
