use detective_core::model::LevelCatalog;
use storage::repository::LevelRepository;
use tracing::info;

use crate::error::AppServicesError;

/// Read every level from the content store and validate it as a catalog.
///
/// # Errors
///
/// Returns `AppServicesError::Storage` if the repository fails, or
/// `AppServicesError::Catalog` if the stored levels do not form a catalog.
pub async fn load_catalog(repo: &dyn LevelRepository) -> Result<LevelCatalog, AppServicesError> {
    let levels = repo.list_levels().await?;
    let catalog = LevelCatalog::new(levels)?;
    info!(
        levels = catalog.len(),
        first = %catalog.first().level(),
        last = %catalog.last().level(),
        "level catalog loaded"
    );
    Ok(catalog)
}
