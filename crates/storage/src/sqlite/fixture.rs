use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use std::str::FromStr;

use super::SqliteInitError;

/// Write a SQL script into the database at `url`, creating it if needed.
///
/// Used to author data-source databases; it bypasses the query gate and the
/// read-only connection settings on purpose.
///
/// # Errors
///
/// Returns `SqliteInitError` if the database cannot be opened or a statement fails.
pub async fn load_fixture(url: &str, script: &str) -> Result<(), SqliteInitError> {
    let mut conn = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .connect()
        .await?;
    let mut tx = conn.begin().await?;
    sqlx::raw_sql(script).execute(&mut *tx).await?;
    tx.commit().await?;
    conn.close().await?;
    Ok(())
}
