//! Shared error types for the services crate.

use thiserror::Error;

use detective_core::model::{CatalogError, LevelNumber};
use detective_core::session::SessionError;
use storage::content::ContentError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `GameService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error("level {0} is not in the catalog")]
    UnknownLevel(LevelNumber),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted while seeding level content and fixtures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error("no data source url configured for connection {0:?}")]
    UnknownConnection(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("level content could not be loaded: {0}")]
    Catalog(#[from] CatalogError),
}
