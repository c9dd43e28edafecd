//! Recipe discovery from listing pages.

use std::collections::BTreeMap;

use log::{info, warn};
use regex::Regex;

use crate::error::ImportError;
use crate::fetchers::Fetcher;

/// Matches links of the form `https://{host}/recipe/{id}/{slug}/`.
#[derive(Debug, Clone)]
pub struct RecipeLinkPattern {
    regex: Regex,
}

impl RecipeLinkPattern {
    pub fn new(host: &str) -> Result<Self, ImportError> {
        let pattern = format!(r"https?://{}/recipe/([0-9]+)/([\w-]+)/?", regex::escape(host));
        let regex = Regex::new(&pattern)
            .map_err(|e| ImportError::ParseError(format!("invalid recipe link pattern: {e}")))?;
        Ok(Self { regex })
    }

    /// Recipe id to slug for every link in `html`. The first slug seen for an id wins.
    pub fn find_all(&self, html: &str) -> BTreeMap<u64, String> {
        let mut found = BTreeMap::new();
        for captures in self.regex.captures_iter(html) {
            if let Ok(id) = captures[1].parse::<u64>() {
                found.entry(id).or_insert_with(|| captures[2].to_string());
            }
        }
        found
    }
}

/// Crawl listing pages for recipe links.
///
/// A listing that cannot be fetched is logged and skipped; the others still
/// contribute.
pub async fn discover_recipes<F, I, S>(
    fetcher: &F,
    pattern: &RecipeLinkPattern,
    urls: I,
) -> BTreeMap<u64, String>
where
    F: Fetcher + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found = BTreeMap::new();

    for url in urls {
        let url = url.as_ref();
        match fetcher.fetch(url).await {
            Ok(html) => {
                let links = pattern.find_all(&html);
                info!("Found {} recipe links on {}", links.len(), url);
                for (id, label) in links {
                    found.entry(id).or_insert(label);
                }
            }
            Err(e) => warn!("Failed to retrieve listing {}: {}", url, e),
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_dedups_and_sorts() {
        let pattern = RecipeLinkPattern::new("www.allrecipes.com").unwrap();
        let html = r#"
            <a href="https://www.allrecipes.com/recipe/25037/best-big-fat-chewy-chocolate-chip-cookie/">a</a>
            <a href="http://www.allrecipes.com/recipe/10549/best-brownies">b</a>
            <a href="https://www.allrecipes.com/recipe/10549/best-brownies/">c</a>
            <a href="https://www.allrecipes.com/recipes/79/desserts/">listing</a>
            <a href="https://www.example.com/recipe/1/other/">elsewhere</a>
        "#;

        let found = pattern.find_all(html);

        assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![10549, 25037]);
        assert_eq!(found[&10549], "best-brownies");
    }

    #[test]
    fn test_host_is_matched_literally() {
        let pattern = RecipeLinkPattern::new("www.allrecipes.com").unwrap();
        assert!(pattern
            .find_all("https://wwwXallrecipesXcom/recipe/1/x/")
            .is_empty());
    }
}
