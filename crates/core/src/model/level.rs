use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::answer::{is_correct, normalize};
use crate::model::ids::LevelNumber;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("connection identifier cannot be empty")]
    EmptyConnection,

    #[error("part title cannot be empty")]
    EmptyPartTitle,

    #[error("part number must be > 0")]
    InvalidPartNumber,
}

//
// ─── PART ──────────────────────────────────────────────────────────────────────
//

/// Chapter of the story a level belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    number: u32,
    title: String,
}

impl Part {
    /// # Errors
    ///
    /// Returns `LevelError` if the number is zero or the title is blank.
    pub fn new(number: u32, title: impl Into<String>) -> Result<Self, LevelError> {
        let title = title.into();
        if number == 0 {
            return Err(LevelError::InvalidPartNumber);
        }
        if title.trim().is_empty() {
            return Err(LevelError::EmptyPartTitle);
        }
        Ok(Self { number, title })
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Heading shown above the story, e.g. `Part 1: The Call`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Part {}: {}", self.number, self.title)
    }
}

//
// ─── ANSWER SET ────────────────────────────────────────────────────────────────
//

/// Normalized answers accepted for a level.
///
/// Entries are normalized on the way in, so authors may write them the way a
/// player would type them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet(BTreeSet<String>);

impl AnswerSet {
    #[must_use]
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            raw.into_iter()
                .map(|answer| normalize(answer.as_ref()))
                .filter(|answer| !answer.is_empty())
                .collect(),
        )
    }

    /// Checks an already-normalized answer.
    #[must_use]
    pub fn accepts(&self, normalized: &str) -> bool {
        is_correct(normalized, &self.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

//
// ─── LEVEL DEFINITION ──────────────────────────────────────────────────────────
//

/// One stage of the game: narrative, data source and accepted answers.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    level: LevelNumber,
    part: Part,
    story: String,
    connection: String,
    answers: AnswerSet,
}

impl LevelDefinition {
    /// # Errors
    ///
    /// Returns `LevelError::EmptyConnection` if `connection` is blank.
    pub fn new(
        level: LevelNumber,
        part: Part,
        story: impl Into<String>,
        connection: impl Into<String>,
        answers: AnswerSet,
    ) -> Result<Self, LevelError> {
        let connection = connection.into().trim().to_string();
        if connection.is_empty() {
            return Err(LevelError::EmptyConnection);
        }
        Ok(Self {
            level,
            part,
            story: story.into(),
            connection,
            answers,
        })
    }

    #[must_use]
    pub fn level(&self) -> LevelNumber {
        self.level
    }

    #[must_use]
    pub fn part(&self) -> &Part {
        &self.part
    }

    #[must_use]
    pub fn story(&self) -> &str {
        &self.story
    }

    /// Identifier of the data source this level queries.
    #[must_use]
    pub fn connection(&self) -> &str {
        &self.connection
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
