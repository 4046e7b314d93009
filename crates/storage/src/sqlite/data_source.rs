use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use detective_core::model::{Cell, Column, ColumnKind, ResultTable};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as _, Row, SqlitePool, TypeInfo, ValueRef};

use crate::source::{DataSource, DataSourceError, DataSourceProvider};

impl DataSourceError {
    fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => DataSourceError::Query(db.message().to_string()),
            other => DataSourceError::Query(other.to_string()),
        }
    }
}

/// A read-only `SQLite` database the player queries.
///
/// The file is opened read-only (`SQLITE_OPEN_READONLY`), so no statement,
/// pragmas included, can write to it. A missing database file is an error
/// rather than silently created.
#[derive(Clone)]
pub struct SqliteDataSource {
    pool: SqlitePool,
}

impl SqliteDataSource {
    /// Build a lazily-connecting pool for `url`.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError::InvalidUrl` if the URL cannot be parsed.
    pub fn connect_lazy(connection: &str, url: &str) -> Result<Self, DataSourceError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DataSourceError::InvalidUrl {
                connection: connection.to_string(),
                message: e.to_string(),
            })?
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA query_only = ON;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect_lazy_with(options);
        Ok(Self { pool })
    }
}

#[async_trait]
impl DataSource for SqliteDataSource {
    async fn fetch(&self, query: &str) -> Result<ResultTable, DataSourceError> {
        // Player queries are one-off text; keep them out of the statement cache.
        let rows = sqlx::query(query)
            .persistent(false)
            .fetch_all(&self.pool)
            .await
            .map_err(DataSourceError::from_sqlx)?;
        table_from_rows(&rows)
    }
}

/// Connection identifier → `SQLite` data source.
#[derive(Clone, Default)]
pub struct SqliteDataSources {
    sources: HashMap<String, Arc<SqliteDataSource>>,
    urls: HashMap<String, String>,
}

impl SqliteDataSources {
    /// # Errors
    ///
    /// Returns `DataSourceError::InvalidUrl` for the first URL that cannot be parsed.
    pub fn new<I, K, V>(urls: I) -> Result<Self, DataSourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut registry = Self::default();
        for (connection, url) in urls {
            let connection = connection.into();
            let url = url.into();
            let source = SqliteDataSource::connect_lazy(&connection, &url)?;
            tracing::debug!(%connection, %url, "registered data source");
            registry.sources.insert(connection.clone(), Arc::new(source));
            registry.urls.insert(connection, url);
        }
        Ok(registry)
    }

    /// The configured URL for `connection`, if any.
    #[must_use]
    pub fn url(&self, connection: &str) -> Option<&str> {
        self.urls.get(connection).map(String::as_str)
    }

    pub fn connections(&self) -> impl Iterator<Item = &str> {
        self.urls.keys().map(String::as_str)
    }
}

impl DataSourceProvider for SqliteDataSources {
    fn source(&self, connection: &str) -> Result<Arc<dyn DataSource>, DataSourceError> {
        self.sources
            .get(connection)
            .map(|source| Arc::clone(source) as Arc<dyn DataSource>)
            .ok_or_else(|| DataSourceError::UnknownConnection(connection.to_string()))
    }
}

//
// ─── ROW MAPPING ───────────────────────────────────────────────────────────────
//

/// Message for a query whose statements return differently shaped rows.
const MIXED_RESULT_SETS: &str =
    "statements returned result sets with different columns; run one statement at a time";

fn column_names(row: &SqliteRow) -> Vec<&str> {
    row.columns().iter().map(|column| column.name()).collect()
}

fn table_from_rows(rows: &[SqliteRow]) -> Result<ResultTable, DataSourceError> {
    let Some(first) = rows.first() else {
        return Ok(ResultTable::default());
    };

    // Every statement in the text contributes rows; they must share one shape.
    let names = column_names(first);
    if rows.iter().any(|row| column_names(row) != names) {
        return Err(DataSourceError::Query(MIXED_RESULT_SETS.to_string()));
    }

    let mut data = Vec::with_capacity(rows.len());
    for row in rows {
        let mut cells = Vec::with_capacity(row.len());
        for idx in 0..row.len() {
            cells.push(cell_at(row, idx).map_err(DataSourceError::from_sqlx)?);
        }
        data.push(cells);
    }

    let columns = first
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let declared = kind_from_type_name(column.type_info().name());
            let kind = if declared == ColumnKind::Unknown {
                infer_kind(&data, idx)
            } else {
                declared
            };
            Column::new(column.name(), kind)
        })
        .collect();

    Ok(ResultTable::new(columns, data))
}

fn cell_at(row: &SqliteRow, idx: usize) -> Result<Cell, sqlx::Error> {
    let storage_class = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(Cell::Null);
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get_unchecked::<i64, _>(idx).map(Cell::Integer),
        "REAL" => row.try_get_unchecked::<f64, _>(idx).map(Cell::Real),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(idx).map(Cell::Blob),
        _ => row.try_get_unchecked::<String, _>(idx).map(Cell::Text),
    }
}

/// Maps a declared column type using `SQLite`'s affinity rules.
fn kind_from_type_name(name: &str) -> ColumnKind {
    let upper = name.to_ascii_uppercase();
    if upper.contains("INT") || upper == "BOOLEAN" {
        ColumnKind::Integer
    } else if upper.contains("CHAR")
        || upper.contains("CLOB")
        || upper.contains("TEXT")
        || upper.starts_with("DATE")
        || upper == "TIME"
    {
        ColumnKind::Text
    } else if upper.contains("BLOB") {
        ColumnKind::Blob
    } else if upper.contains("REAL")
        || upper.contains("FLOA")
        || upper.contains("DOUB")
        || upper == "NUMERIC"
    {
        ColumnKind::Real
    } else {
        ColumnKind::Unknown
    }
}

fn infer_kind(rows: &[Vec<Cell>], idx: usize) -> ColumnKind {
    rows.iter()
        .filter_map(|row| row.get(idx))
        .find_map(|cell| match cell {
            Cell::Null => None,
            Cell::Integer(_) => Some(ColumnKind::Integer),
            Cell::Real(_) => Some(ColumnKind::Real),
            Cell::Text(_) => Some(ColumnKind::Text),
            Cell::Blob(_) => Some(ColumnKind::Blob),
        })
        .unwrap_or(ColumnKind::Unknown)
}
