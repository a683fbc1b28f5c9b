//! Taxonomy repository for JSON storage
//!
//! Manages loading and saving the category and item vocabularies to
//! data/taxonomy.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{Vocabulary, VocabularyKind};

use super::file_io::{read_json, write_json_atomic};

/// Serializable taxonomy data structure
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TaxonomyData {
    #[serde(default)]
    pub categories: Vocabulary,
    #[serde(default)]
    pub items: Vocabulary,
}

impl TaxonomyData {
    fn vocabulary_mut(&mut self, kind: VocabularyKind) -> &mut Vocabulary {
        match kind {
            VocabularyKind::Category => &mut self.categories,
            VocabularyKind::Item => &mut self.items,
        }
    }
}

/// Repository for the two vocabularies
pub struct TaxonomyRepository {
    path: PathBuf,
    data: RwLock<TaxonomyData>,
}

impl TaxonomyRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(TaxonomyData::default()),
        }
    }

    /// Load vocabularies from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: TaxonomyData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;

        Ok(())
    }

    /// Save vocabularies to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Snapshot of one vocabulary
    pub fn get(&self, kind: VocabularyKind) -> Result<Vocabulary, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(match kind {
            VocabularyKind::Category => data.categories.clone(),
            VocabularyKind::Item => data.items.clone(),
        })
    }

    /// Snapshot of both vocabularies
    pub fn get_all(&self) -> Result<TaxonomyData, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Run an edit against one vocabulary under the write lock
    pub fn modify<T, F>(&self, kind: VocabularyKind, edit: F) -> Result<T, TrackerError>
    where
        F: FnOnce(&mut Vocabulary) -> Result<T, TrackerError>,
    {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        edit(data.vocabulary_mut(kind))
    }
}
