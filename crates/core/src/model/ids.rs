use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of a level in the game. Levels start at 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LevelNumber(u32);

impl LevelNumber {
    /// The level every new session starts on.
    pub const FIRST: LevelNumber = LevelNumber(1);

    /// Creates a new `LevelNumber`.
    ///
    /// # Errors
    ///
    /// Returns `ParseLevelError::Zero` for `0`; levels are numbered from 1.
    pub fn new(value: u32) -> Result<Self, ParseLevelError> {
        if value == 0 {
            return Err(ParseLevelError::Zero);
        }
        Ok(Self(value))
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LevelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LevelNumber({})", self.0)
    }
}

impl fmt::Display for LevelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for LevelNumber {
    type Error = ParseLevelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LevelNumber> for u32 {
    fn from(level: LevelNumber) -> Self {
        level.0
    }
}

// ─── FromStr ───────────────────────────────────────────────────────────────────

/// Error type for parsing a level number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseLevelError {
    Zero,
    Invalid(String),
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseLevelError::Zero => write!(f, "level numbers start at 1"),
            ParseLevelError::Invalid(raw) => write!(f, "failed to parse level number from {raw:?}"),
        }
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for LevelNumber {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseLevelError::Invalid(s.to_string()))?;
        Self::new(value)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
