use crate::error::ImportError;
use crate::fetchers::HtmlCache;

/// Ids among `ids` whose cached page mentions `keyword`, in input order.
/// Pages that were never downloaded are skipped.
pub async fn ids_mentioning(
    cache: &HtmlCache,
    ids: &[u64],
    keyword: &str,
) -> Result<Vec<u64>, ImportError> {
    let mut matching = Vec::new();
    for &id in ids {
        if let Some(html) = cache.load(id).await? {
            if html.contains(keyword) {
                matching.push(id);
            }
        }
    }
    Ok(matching)
}
