//! Read paths the player's queries run against.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use detective_core::model::ResultTable;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DataSourceError {
    #[error("unknown connection: {0}")]
    UnknownConnection(String),

    #[error("invalid url for connection {connection}: {message}")]
    InvalidUrl { connection: String, message: String },

    /// The data source rejected or failed the query. Holds the driver's message.
    #[error("{0}")]
    Query(String),
}

/// Something a query can be executed against.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Execute `query` and return every row. Results are never cached.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError::Query` for malformed SQL, permission or connection failures.
    async fn fetch(&self, query: &str) -> Result<ResultTable, DataSourceError>;
}

/// Resolves a level's connection identifier to a data source.
pub trait DataSourceProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `DataSourceError::UnknownConnection` if nothing is configured for `connection`.
    fn source(&self, connection: &str) -> Result<Arc<dyn DataSource>, DataSourceError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// Canned responses keyed by exact query text, for tests and prototyping.
#[derive(Default)]
pub struct InMemoryDataSource {
    responses: Mutex<HashMap<String, Result<ResultTable, String>>>,
    calls: AtomicUsize,
}

impl InMemoryDataSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table(self, query: impl Into<String>, table: ResultTable) -> Self {
        if let Ok(mut guard) = self.responses.lock() {
            guard.insert(query.into(), Ok(table));
        }
        self
    }

    #[must_use]
    pub fn with_error(self, query: impl Into<String>, message: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.responses.lock() {
            guard.insert(query.into(), Err(message.into()));
        }
        self
    }

    /// How many times `fetch` has been called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn fetch(&self, query: &str) -> Result<ResultTable, DataSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let guard = self
            .responses
            .lock()
            .map_err(|e| DataSourceError::Query(e.to_string()))?;
        match guard.get(query) {
            Some(Ok(table)) => Ok(table.clone()),
            Some(Err(message)) => Err(DataSourceError::Query(message.clone())),
            None => Err(DataSourceError::Query(format!(
                "no canned response for query: {query}"
            ))),
        }
    }
}

/// In-memory registry of named data sources.
#[derive(Clone, Default)]
pub struct InMemoryDataSources {
    sources: HashMap<String, Arc<InMemoryDataSource>>,
}

impl InMemoryDataSources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_source(mut self, connection: impl Into<String>, source: Arc<InMemoryDataSource>) -> Self {
        self.sources.insert(connection.into(), source);
        self
    }
}

impl DataSourceProvider for InMemoryDataSources {
    fn source(&self, connection: &str) -> Result<Arc<dyn DataSource>, DataSourceError> {
        self.sources
            .get(connection)
            .map(|source| Arc::clone(source) as Arc<dyn DataSource>)
            .ok_or_else(|| DataSourceError::UnknownConnection(connection.to_string()))
    }
}
