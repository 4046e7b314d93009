//! Authoring helpers: import level content and write fixture data.

use detective_core::model::LevelCatalog;
use storage::content::ContentFile;
use storage::repository::LevelRepository;
use storage::sqlite::{SqliteDataSources, load_fixture};
use tracing::info;

use crate::error::SeedError;

/// Validate `content` as a whole catalog, then upsert every level.
///
/// Nothing is written if any level is invalid or duplicated.
///
/// # Errors
///
/// Returns `SeedError` if the content is invalid or the repository fails.
pub async fn import_levels(
    repo: &dyn LevelRepository,
    content: ContentFile,
) -> Result<usize, SeedError> {
    let catalog = LevelCatalog::new(content.into_definitions()?)?;
    for level in catalog.iter() {
        repo.upsert_level(level).await?;
    }
    info!(levels = catalog.len(), "level content imported");
    Ok(catalog.len())
}

/// Run `script` against the database configured for `connection`.
///
/// Fixture scripts are trusted authoring input and skip the query gate.
///
/// # Errors
///
/// Returns `SeedError::UnknownConnection` if `connection` has no URL, or
/// `SeedError::Sqlite` if the script fails.
pub async fn load_connection_fixture(
    sources: &SqliteDataSources,
    connection: &str,
    script: &str,
) -> Result<(), SeedError> {
    let url = sources
        .url(connection)
        .ok_or_else(|| SeedError::UnknownConnection(connection.to_string()))?;
    load_fixture(url, script).await?;
    info!(%connection, "fixture loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    const CONTENT: &str = r#"{
        "levels": [
            {"level": 2, "part": {"number": 1, "title": "The Call"}, "connection": "cases", "answers": ["Dana Whitfield"]},
            {"level": 1, "part": {"number": 1, "title": "The Call"}, "story": "A call comes in.", "connection": "cases", "answers": ["1st floor"]}
        ]
    }"#;

    #[tokio::test]
    async fn imports_every_level() {
        let repo = InMemoryRepository::new();
        let count = import_levels(&repo, ContentFile::from_json(CONTENT).unwrap())
            .await
            .unwrap();
        assert_eq!(count, 2);

        let levels = repo.list_levels().await.unwrap();
        assert!(levels[0].answers().accepts("firstfloor"));
        assert!(levels[1].answers().accepts("danawhitfield"));
    }

    #[tokio::test]
    async fn duplicate_levels_write_nothing() {
        let repo = InMemoryRepository::new();
        let dup = r#"{"levels": [
            {"level": 1, "part": {"number": 1, "title": "A"}, "connection": "cases"},
            {"level": 1, "part": {"number": 1, "title": "A"}, "connection": "cases"}
        ]}"#;
        let err = import_levels(&repo, ContentFile::from_json(dup).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Catalog(_)));
        assert!(repo.list_levels().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fixture_needs_a_configured_connection() {
        let sources = SqliteDataSources::default();
        let err = load_connection_fixture(&sources, "cases", "SELECT 1;")
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::UnknownConnection(c) if c == "cases"));
    }
}
