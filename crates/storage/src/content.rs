//! Authoring format for level content.
//!
//! ```json
//! { "levels": [ { "level": 1, "part": { "number": 1, "title": "The Call" },
//!                 "story": "...", "connection": "cases", "answers": ["1st floor"] } ] }
//! ```

use std::path::Path;

use detective_core::model::{AnswerSet, LevelDefinition, LevelError, LevelNumber, Part};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed content file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level {level}: {source}")]
    Level {
        level: LevelNumber,
        #[source]
        source: LevelError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartEntry {
    pub number: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub level: LevelNumber,
    pub part: PartEntry,
    #[serde(default)]
    pub story: String,
    pub connection: String,
    #[serde(default)]
    pub answers: Vec<String>,
}

impl LevelEntry {
    /// # Errors
    ///
    /// Returns `ContentError::Level` when the entry fails domain validation.
    pub fn into_definition(self) -> Result<LevelDefinition, ContentError> {
        let level = self.level;
        let wrap = |source| ContentError::Level { level, source };
        let part = Part::new(self.part.number, self.part.title).map_err(wrap)?;
        LevelDefinition::new(
            level,
            part,
            self.story,
            self.connection,
            AnswerSet::new(self.answers),
        )
        .map_err(wrap)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentFile {
    pub levels: Vec<LevelEntry>,
}

impl ContentFile {
    /// # Errors
    ///
    /// Returns `ContentError::Json` for malformed input.
    pub fn from_json(input: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(input)?)
    }

    /// # Errors
    ///
    /// Returns `ContentError` if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Validate every entry. Answers come out normalized.
    ///
    /// # Errors
    ///
    /// Returns the first `ContentError::Level` encountered.
    pub fn into_definitions(self) -> Result<Vec<LevelDefinition>, ContentError> {
        self.levels
            .into_iter()
            .map(LevelEntry::into_definition)
            .collect()
    }
}
