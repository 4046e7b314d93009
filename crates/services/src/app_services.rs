use std::sync::Arc;

use storage::repository::Storage;
use storage::source::DataSourceProvider;

use crate::catalog::load_catalog;
use crate::error::AppServicesError;
use crate::game_service::GameService;

/// Assembles app-facing services from storage.
#[derive(Clone)]
pub struct AppServices {
    game: Arc<GameService>,
}

impl AppServices {
    /// Build services backed by the `SQLite` content store at `db_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or catalog loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        sources: Arc<dyn DataSourceProvider>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url, sources).await?;
        Self::from_storage(&storage).await
    }

    /// Build services over an already constructed `Storage`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the level catalog cannot be loaded.
    pub async fn from_storage(storage: &Storage) -> Result<Self, AppServicesError> {
        let catalog = load_catalog(storage.levels.as_ref()).await?;
        let game = Arc::new(GameService::new(
            Arc::new(catalog),
            Arc::clone(&storage.sources),
        ));
        Ok(Self { game })
    }

    #[must_use]
    pub fn game(&self) -> Arc<GameService> {
        Arc::clone(&self.game)
    }
}
