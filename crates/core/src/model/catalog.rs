use thiserror::Error;

use crate::model::ids::LevelNumber;
use crate::model::level::LevelDefinition;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("level catalog is empty")]
    Empty,

    #[error("level {0} is defined more than once")]
    Duplicate(LevelNumber),
}

/// Immutable, ordered set of levels loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    // Sorted by level number, never empty.
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for no levels, `CatalogError::Duplicate`
    /// when two definitions share a level number.
    pub fn new(levels: impl IntoIterator<Item = LevelDefinition>) -> Result<Self, CatalogError> {
        let mut levels: Vec<LevelDefinition> = levels.into_iter().collect();
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        levels.sort_by_key(LevelDefinition::level);
        if let Some(pair) = levels.windows(2).find(|pair| pair[0].level() == pair[1].level()) {
            return Err(CatalogError::Duplicate(pair[0].level()));
        }
        Ok(Self { levels })
    }

    #[must_use]
    pub fn get(&self, level: LevelNumber) -> Option<&LevelDefinition> {
        self.levels
            .binary_search_by_key(&level, LevelDefinition::level)
            .ok()
            .map(|idx| &self.levels[idx])
    }

    #[must_use]
    pub fn first(&self) -> &LevelDefinition {
        &self.levels[0]
    }

    #[must_use]
    pub fn last(&self) -> &LevelDefinition {
        &self.levels[self.levels.len() - 1]
    }

    /// Next defined level strictly after `level`, if any.
    #[must_use]
    pub fn next_after(&self, level: LevelNumber) -> Option<LevelNumber> {
        let idx = self.levels.partition_point(|def| def.level() <= level);
        self.levels.get(idx).map(LevelDefinition::level)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }
}
