use async_trait::async_trait;
use detective_core::model::{LevelDefinition, LevelNumber};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::source::DataSourceProvider;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for level content.
#[async_trait]
pub trait LevelRepository: Send + Sync {
    /// Persist or replace a level, including its accepted answers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the level cannot be stored.
    async fn upsert_level(&self, level: &LevelDefinition) -> Result<(), StorageError>;

    /// Fetch a level by number.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures; a missing level is `Ok(None)`.
    async fn get_level(&self, level: LevelNumber)
    -> Result<Option<LevelDefinition>, StorageError>;

    /// All levels ordered by level number.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage or mapping failures.
    async fn list_levels(&self) -> Result<Vec<LevelDefinition>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    levels: Arc<Mutex<BTreeMap<LevelNumber, LevelDefinition>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LevelRepository for InMemoryRepository {
    async fn upsert_level(&self, level: &LevelDefinition) -> Result<(), StorageError> {
        let mut guard = self
            .levels
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(level.level(), level.clone());
        Ok(())
    }

    async fn get_level(
        &self,
        level: LevelNumber,
    ) -> Result<Option<LevelDefinition>, StorageError> {
        let guard = self
            .levels
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&level).cloned())
    }

    async fn list_levels(&self) -> Result<Vec<LevelDefinition>, StorageError> {
        let guard = self
            .levels
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }
}

/// Level content plus the data sources levels point at, behind trait objects
/// for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub levels: Arc<dyn LevelRepository>,
    pub sources: Arc<dyn DataSourceProvider>,
}

impl Storage {
    /// In-memory level content over the given data sources.
    #[must_use]
    pub fn in_memory(sources: Arc<dyn DataSourceProvider>) -> Self {
        Self {
            levels: Arc::new(InMemoryRepository::new()),
            sources,
        }
    }
}
