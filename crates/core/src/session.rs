//! Per-player game state and the level progression transitions.

use thiserror::Error;

use crate::answer::normalize;
use crate::model::{LevelCatalog, LevelNumber, QueryResult};
use crate::query::DEFAULT_QUERY;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("level {0} is not in the catalog")]
    UnknownLevel(LevelNumber),
}

/// Where the session is in the solve / confirm cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Solving,
    /// A correct answer moved the counter to `level`; the editor is reset once
    /// the player confirms with [`SessionState::proceed`].
    Advanced { level: LevelNumber },
    /// The last level was solved.
    Finished,
}

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Blank after normalization, or the session is not accepting answers.
    NoSubmission,
    Incorrect,
    Correct { level: LevelNumber },
    Finished,
}

/// State owned by a single interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    current_level: LevelNumber,
    query_text: String,
    pending_answer: String,
    last_result: Option<QueryResult>,
    phase: SessionPhase,
}

impl SessionState {
    /// Fresh session on the catalog's first level with the default query.
    #[must_use]
    pub fn start(catalog: &LevelCatalog) -> Self {
        Self::at_level(catalog.first().level())
    }

    #[must_use]
    pub fn at_level(level: LevelNumber) -> Self {
        Self {
            current_level: level,
            query_text: DEFAULT_QUERY.to_string(),
            pending_answer: String::new(),
            last_result: None,
            phase: SessionPhase::Solving,
        }
    }

    #[must_use]
    pub fn current_level(&self) -> LevelNumber {
        self.current_level
    }

    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    #[must_use]
    pub fn pending_answer(&self) -> &str {
        &self.pending_answer
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&QueryResult> {
        self.last_result.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn awaiting_proceed(&self) -> bool {
        matches!(self.phase, SessionPhase::Advanced { .. })
    }

    /// Keep the editor contents without running anything.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    /// Store the editor text and the result it produced. Level and phase are untouched.
    pub fn record_query(&mut self, text: impl Into<String>, result: QueryResult) {
        self.query_text = text.into();
        self.last_result = Some(result);
    }

    /// Store the result of a query started on `level`, keeping the editor text.
    ///
    /// Returns `false` and changes nothing when the session has moved to
    /// another level or left `Solving` since the query started.
    pub fn record_result(&mut self, level: LevelNumber, result: QueryResult) -> bool {
        if level != self.current_level || self.phase != SessionPhase::Solving {
            return false;
        }
        self.last_result = Some(result);
        true
    }

    /// Check `raw` against the current level and advance on a match.
    ///
    /// The level counter moves immediately; the editor keeps its text until
    /// [`proceed`](Self::proceed).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownLevel` if the current level is missing from `catalog`.
    pub fn submit_answer(
        &mut self,
        raw: &str,
        catalog: &LevelCatalog,
    ) -> Result<AnswerOutcome, SessionError> {
        if self.phase != SessionPhase::Solving {
            return Ok(AnswerOutcome::NoSubmission);
        }
        let normalized = normalize(raw);
        if normalized.is_empty() {
            self.pending_answer.clear();
            return Ok(AnswerOutcome::NoSubmission);
        }

        let level = catalog
            .get(self.current_level)
            .ok_or(SessionError::UnknownLevel(self.current_level))?;
        self.pending_answer = raw.to_string();

        if !level.answers().accepts(&normalized) {
            return Ok(AnswerOutcome::Incorrect);
        }

        match catalog.next_after(self.current_level) {
            Some(next) => {
                self.current_level = next;
                self.phase = SessionPhase::Advanced { level: next };
                Ok(AnswerOutcome::Correct { level: next })
            }
            None => {
                self.phase = SessionPhase::Finished;
                Ok(AnswerOutcome::Finished)
            }
        }
    }

    /// Confirm a level transition: reset the editor and clear the answer.
    ///
    /// Returns `false` (and changes nothing) unless a transition is pending.
    pub fn proceed(&mut self) -> bool {
        if !self.awaiting_proceed() {
            return false;
        }
        self.query_text = DEFAULT_QUERY.to_string();
        self.pending_answer.clear();
        self.last_result = None;
        self.phase = SessionPhase::Solving;
        true
    }
}
