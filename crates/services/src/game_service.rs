use std::sync::Arc;

use detective_core::gate::check_query;
use detective_core::model::{LevelCatalog, LevelDefinition, LevelNumber, QueryError, QueryResult};
use detective_core::query::effective_query;
use detective_core::session::{AnswerOutcome, SessionState};
use storage::source::DataSourceProvider;
use tracing::{debug, info, warn};

use crate::error::GameError;

/// Runs player queries and drives level progression for one catalog.
#[derive(Clone)]
pub struct GameService {
    catalog: Arc<LevelCatalog>,
    sources: Arc<dyn DataSourceProvider>,
}

impl GameService {
    #[must_use]
    pub fn new(catalog: Arc<LevelCatalog>, sources: Arc<dyn DataSourceProvider>) -> Self {
        Self { catalog, sources }
    }

    /// A new session on the first level with the default query in the editor.
    #[must_use]
    pub fn start_session(&self) -> SessionState {
        SessionState::start(&self.catalog)
    }

    /// # Errors
    ///
    /// Returns `GameError::UnknownLevel` if `level` is not in the catalog.
    pub fn level(&self, level: LevelNumber) -> Result<&LevelDefinition, GameError> {
        self.catalog
            .get(level)
            .ok_or(GameError::UnknownLevel(level))
    }

    /// Gate and execute `query_text` against the data source of `level`.
    ///
    /// Blank text runs the default query. Every failure comes back as
    /// `QueryResult::Error`; nothing is cached, so repeated calls re-execute.
    pub async fn run_query(&self, level: LevelNumber, query_text: &str) -> QueryResult {
        let query = effective_query(query_text);

        if let Err(blocked) = check_query(query) {
            warn!(%level, term = blocked.term, "query blocked by denylist");
            return QueryResult::Error(QueryError::disallowed());
        }

        let Some(definition) = self.catalog.get(level) else {
            return QueryResult::Error(QueryError::execution(GameError::UnknownLevel(level)));
        };

        let source = match self.sources.source(definition.connection()) {
            Ok(source) => source,
            Err(err) => {
                warn!(%level, connection = definition.connection(), error = %err, "data source unavailable");
                return QueryResult::Error(QueryError::execution(err));
            }
        };

        match source.fetch(query).await {
            Ok(table) => {
                debug!(%level, rows = table.row_count(), "query executed");
                QueryResult::from_table(table)
            }
            Err(err) => {
                debug!(%level, error = %err, "query failed");
                QueryResult::Error(QueryError::execution(err))
            }
        }
    }

    /// Run the editor text for the session's current level and remember the result.
    ///
    /// Only the editor text and last result change; level and phase do not.
    pub async fn submit_query(&self, session: &mut SessionState, query_text: &str) -> QueryResult {
        let result = self.run_query(session.current_level(), query_text).await;
        session.record_query(query_text, result.clone());
        result
    }

    /// Check an answer for the session's current level.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Session` if the session points at a level missing from the catalog.
    pub fn submit_answer(
        &self,
        session: &mut SessionState,
        raw: &str,
    ) -> Result<AnswerOutcome, GameError> {
        let from = session.current_level();
        let outcome = session.submit_answer(raw, &self.catalog)?;
        match outcome {
            AnswerOutcome::Correct { level } => info!(%from, to = %level, "level solved"),
            AnswerOutcome::Finished => info!(%from, "final level solved"),
            AnswerOutcome::Incorrect => debug!(%from, "incorrect answer"),
            AnswerOutcome::NoSubmission => {}
        }
        Ok(outcome)
    }

    /// Confirm a pending level transition. Returns `false` if none was pending.
    pub fn proceed(&self, session: &mut SessionState) -> bool {
        session.proceed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detective_core::model::{
        AnswerSet, Cell, Column, ColumnKind, Part, QueryErrorKind, ResultTable,
    };
    use detective_core::query::DEFAULT_QUERY;
    use detective_core::session::SessionPhase;
    use storage::source::{InMemoryDataSource, InMemoryDataSources};

    fn level(n: u32, answers: &[&str]) -> LevelDefinition {
        LevelDefinition::new(
            LevelNumber::new(n).unwrap(),
            Part::new(1, "The Call").unwrap(),
            format!("Story {n}"),
            "cases",
            AnswerSet::new(answers.iter().copied()),
        )
        .unwrap()
    }

    fn tables() -> ResultTable {
        ResultTable::new(
            vec![Column::new("available_tables", ColumnKind::Text)],
            vec![vec![Cell::Text("cases".into())], vec![Cell::Text("reports".into())]],
        )
    }

    fn fixture() -> (GameService, Arc<InMemoryDataSource>) {
        let source = Arc::new(
            InMemoryDataSource::new()
                .with_table(DEFAULT_QUERY, tables())
                .with_table(
                    "SELECT * FROM reports WHERE 1 = 0",
                    ResultTable::new(vec![Column::new("report_id", ColumnKind::Integer)], vec![]),
                )
                .with_error("SELECT * FROM nope", "no such table: nope"),
        );
        let sources = InMemoryDataSources::new().with_source("cases", Arc::clone(&source));
        let catalog = LevelCatalog::new([level(1, &["1st floor"]), level(2, &["john smith"])])
            .unwrap();
        (
            GameService::new(Arc::new(catalog), Arc::new(sources)),
            source,
        )
    }

    #[tokio::test]
    async fn blank_query_runs_default_query() {
        let (game, source) = fixture();
        let result = game.run_query(LevelNumber::FIRST, "   ").await;
        assert_eq!(result, QueryResult::Rows(tables()));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn disallowed_query_is_never_executed() {
        let (game, source) = fixture();
        let result = game
            .run_query(LevelNumber::FIRST, "UPDATE cases SET status = 'closed'")
            .await;
        let err = result.error().expect("error result");
        assert_eq!(err.kind(), QueryErrorKind::Disallowed);
        assert!(err.message().contains("not allowed"));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn zero_rows_is_distinct_from_error() {
        let (game, _) = fixture();
        let result = game
            .run_query(LevelNumber::FIRST, "SELECT * FROM reports WHERE 1 = 0")
            .await;
        assert_eq!(result, QueryResult::NoRows);
    }

    #[tokio::test]
    async fn every_run_hits_the_data_source() {
        let (game, source) = fixture();
        game.run_query(LevelNumber::FIRST, DEFAULT_QUERY).await;
        game.run_query(LevelNumber::FIRST, DEFAULT_QUERY).await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn failing_query_leaves_progress_untouched() {
        let (game, _) = fixture();
        let mut session = game.start_session();
        let result = game.submit_query(&mut session, "SELECT * FROM nope").await;

        let err = result.error().expect("error result");
        assert_eq!(err.kind(), QueryErrorKind::Execution);
        assert_eq!(err.message(), "Error: no such table: nope");
        assert_eq!(session.current_level(), LevelNumber::FIRST);
        assert_eq!(session.phase(), SessionPhase::Solving);
        assert_eq!(session.pending_answer(), "");
        assert_eq!(session.last_result(), Some(&result));
    }

    #[tokio::test]
    async fn unknown_connection_surfaces_as_error_result() {
        let catalog = LevelCatalog::new([LevelDefinition::new(
            LevelNumber::FIRST,
            Part::new(1, "The Call").unwrap(),
            "",
            "archive",
            AnswerSet::default(),
        )
        .unwrap()])
        .unwrap();
        let game = GameService::new(Arc::new(catalog), Arc::new(InMemoryDataSources::new()));
        let result = game.run_query(LevelNumber::FIRST, "SELECT 1").await;
        assert_eq!(
            result.error().map(QueryError::message),
            Some("Error: unknown connection: archive")
        );
    }

    #[tokio::test]
    async fn correct_answer_advances_and_proceed_resets_editor() {
        let (game, _) = fixture();
        let mut session = game.start_session();
        game.submit_query(&mut session, "SELECT * FROM nope").await;

        let outcome = game.submit_answer(&mut session, "1st Floor").unwrap();
        let level_two = LevelNumber::new(2).unwrap();
        assert_eq!(outcome, AnswerOutcome::Correct { level: level_two });
        assert_eq!(session.current_level(), level_two);
        assert_eq!(session.query_text(), "SELECT * FROM nope");

        assert!(game.proceed(&mut session));
        assert_eq!(session.query_text(), DEFAULT_QUERY);
        assert_eq!(game.level(session.current_level()).unwrap().story(), "Story 2");
    }

    #[tokio::test]
    async fn incorrect_answer_keeps_level() {
        let (game, _) = fixture();
        let mut session = game.start_session();
        let outcome = game.submit_answer(&mut session, "second floor").unwrap();
        assert_eq!(outcome, AnswerOutcome::Incorrect);
        assert_eq!(session.current_level(), LevelNumber::FIRST);
    }

    #[test]
    fn unknown_level_lookup_fails() {
        let (game, _) = fixture();
        let missing = LevelNumber::new(7).unwrap();
        assert!(matches!(game.level(missing), Err(GameError::UnknownLevel(l)) if l == missing));
    }
}
