use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::SiteConfig;
use crate::error::ImportError;
use crate::fetchers::{Fetcher, HtmlCache};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Ids fetched from the network during this run
    pub fetched: Vec<u64>,
    /// Ids that were already in the cache
    pub already_cached: Vec<u64>,
}

/// Download every recipe page in `ids` that is not cached yet.
///
/// Network fetches are separated by `delay`. The first failed fetch stops the
/// run; pages stored before it stay cached.
pub async fn run<F>(
    fetcher: &F,
    cache: &HtmlCache,
    site: &SiteConfig,
    ids: &[u64],
    delay: Duration,
) -> Result<DownloadReport, ImportError>
where
    F: Fetcher + ?Sized,
{
    let mut report = DownloadReport::default();
    let total = ids.len();
    let started = Instant::now();

    for (index, &id) in ids.iter().enumerate() {
        if cache.contains(id).await? {
            debug!("Recipe {} already cached", id);
            report.already_cached.push(id);
            continue;
        }

        if !report.fetched.is_empty() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let html = fetcher.fetch(&site.recipe_url(id)).await?;
        cache.store(id, &html).await?;
        report.fetched.push(id);

        let done = index + 1;
        let average = started.elapsed() / done as u32;
        info!(
            "{}/{} ({:.1}%) cached recipe {}, avg {:?} per recipe, ~{:?} remaining",
            done,
            total,
            100.0 * done as f64 / total as f64,
            id,
            average,
            average * (total - done) as u32
        );
    }

    Ok(report)
}
