use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use tokio::fs;

use crate::error::ImportError;

const FILE_SUFFIX: &str = "_recipe.html";

/// Directory of downloaded recipe pages, one `{id}_recipe.html` file per recipe.
#[derive(Debug, Clone)]
pub struct HtmlCache {
    dir: PathBuf,
}

impl HtmlCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}{FILE_SUFFIX}"))
    }

    pub async fn contains(&self, id: u64) -> Result<bool, ImportError> {
        Ok(fs::try_exists(self.path_for(id)).await?)
    }

    /// Cached page for `id`, or `None` if it was never downloaded.
    pub async fn load(&self, id: u64) -> Result<Option<String>, ImportError> {
        match fs::read_to_string(self.path_for(id)).await {
            Ok(html) => Ok(Some(html)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn store(&self, id: u64, html: &str) -> Result<PathBuf, ImportError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(id);
        fs::write(&path, html).await?;
        debug!("Cached recipe {} at {}", id, path.display());
        Ok(path)
    }

    /// Ids of every cached page, ascending.
    pub async fn cached_ids(&self) -> Result<Vec<u64>, ImportError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let id = name
                .to_str()
                .and_then(|name| name.strip_suffix(FILE_SUFFIX))
                .and_then(|id| id.parse::<u64>().ok());
            if let Some(id) = id {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HtmlCache::new(dir.path().join("pages"));

        assert!(!cache.contains(10549).await.unwrap());
        assert_eq!(cache.load(10549).await.unwrap(), None);

        let path = cache.store(10549, "<html>brownies</html>").await.unwrap();
        assert_eq!(path, dir.path().join("pages").join("10549_recipe.html"));
        assert!(cache.contains(10549).await.unwrap());
        assert_eq!(
            cache.load(10549).await.unwrap().as_deref(),
            Some("<html>brownies</html>")
        );
    }

    #[tokio::test]
    async fn test_cached_ids_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HtmlCache::new(dir.path());

        cache.store(9599, "a").await.unwrap();
        cache.store(25, "b").await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join("abc_recipe.html"), "x").unwrap();

        assert_eq!(cache.cached_ids().await.unwrap(), vec![25, 9599]);
    }

    #[tokio::test]
    async fn test_missing_directory_has_no_ids() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HtmlCache::new(dir.path().join("missing"));
        assert!(cache.cached_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_contains_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("pages");
        std::fs::write(&not_a_dir, "plain file").unwrap();

        let cache = HtmlCache::new(&not_a_dir);
        assert!(matches!(cache.contains(1).await, Err(ImportError::Io(_))));
    }
}
