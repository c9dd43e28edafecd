//! Persistent record of recipe ids discovered by the crawler.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::ImportError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeenRecipe {
    pub id: u64,
    /// URL slug of the recipe, e.g. `best-brownies`
    pub label: String,
    pub retrieval_date: DateTime<Utc>,
}

/// JSON file holding every [`SeenRecipe`], keyed by id.
#[derive(Debug)]
pub struct SeenStore {
    path: PathBuf,
    entries: BTreeMap<u64, SeenRecipe>,
}

impl SeenStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ImportError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str::<Vec<SeenRecipe>>(&json)?
                .into_iter()
                .map(|recipe| (recipe.id, recipe))
                .collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!("Opened seen store {} with {} recipes", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: u64) -> Option<&SeenRecipe> {
        self.entries.get(&id)
    }

    /// Record `id`; returns `false` if it was already known.
    pub fn insert(&mut self, id: u64, label: impl Into<String>) -> bool {
        if self.contains(id) {
            return false;
        }
        self.entries.insert(
            id,
            SeenRecipe {
                id,
                label: label.into(),
                retrieval_date: Utc::now(),
            },
        );
        true
    }

    pub fn ids(&self) -> Vec<u64> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub async fn save(&self) -> Result<(), ImportError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let recipes: Vec<&SeenRecipe> = self.entries.values().collect();
        fs::write(&self.path, serde_json::to_string_pretty(&recipes)?).await?;
        Ok(())
    }
}
