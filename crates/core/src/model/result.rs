use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gate::DISALLOWED_MESSAGE;

//
// ─── COLUMNS & CELLS ───────────────────────────────────────────────────────────
//

/// Semantic type of a result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
    Blob,
    /// No declared type and no non-null value to infer one from.
    Unknown,
}

impl ColumnKind {
    /// Numeric columns are right-aligned by the shell.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Real)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One value of a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "NULL"),
            Cell::Integer(v) => write!(f, "{v}"),
            Cell::Real(v) => write!(f, "{v}"),
            Cell::Text(v) => write!(f, "{v}"),
            Cell::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

//
// ─── TABLE ─────────────────────────────────────────────────────────────────────
//

/// Ordered columns plus ordered rows, each row as wide as `columns`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultTable {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    #[must_use]
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//
// ─── QUERY RESULT ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryErrorKind {
    /// Blocked by the denylist; never executed.
    Disallowed,
    /// The data source rejected or failed the query.
    Execution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryError {
    kind: QueryErrorKind,
    message: String,
}

impl QueryError {
    #[must_use]
    pub fn disallowed() -> Self {
        Self {
            kind: QueryErrorKind::Disallowed,
            message: DISALLOWED_MESSAGE.to_string(),
        }
    }

    /// Wraps an underlying failure message as `Error: <message>`.
    #[must_use]
    pub fn execution(message: impl fmt::Display) -> Self {
        let detail = message.to_string();
        let detail = if detail.trim().is_empty() {
            "query failed".to_string()
        } else {
            detail
        };
        Self {
            kind: QueryErrorKind::Execution,
            message: format!("Error: {detail}"),
        }
    }

    #[must_use]
    pub fn kind(&self) -> QueryErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of running one query. Never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryResult {
    Rows(ResultTable),
    NoRows,
    Error(QueryError),
}

impl QueryResult {
    /// Builds `Rows` or `NoRows` depending on the table.
    #[must_use]
    pub fn from_table(table: ResultTable) -> Self {
        if table.is_empty() {
            QueryResult::NoRows
        } else {
            QueryResult::Rows(table)
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, QueryResult::Error(_))
    }

    #[must_use]
    pub fn table(&self) -> Option<&ResultTable> {
        match self {
            QueryResult::Rows(table) => Some(table),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&QueryError> {
        match self {
            QueryResult::Error(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_becomes_no_rows() {
        let table = ResultTable::new(vec![Column::new("a", ColumnKind::Integer)], Vec::new());
        assert_eq!(QueryResult::from_table(table), QueryResult::NoRows);
    }

    #[test]
    fn non_empty_table_keeps_rows() {
        let table = ResultTable::new(
            vec![Column::new("a", ColumnKind::Integer)],
            vec![vec![Cell::Integer(1)]],
        );
        let result = QueryResult::from_table(table);
        assert_eq!(result.table().map(ResultTable::row_count), Some(1));
        assert!(!result.is_error());
    }

    #[test]
    fn execution_error_always_has_a_message() {
        let err = QueryError::execution("");
        assert_eq!(err.kind(), QueryErrorKind::Execution);
        assert_eq!(err.message(), "Error: query failed");
        let err = QueryError::execution("no such table: nope");
        assert_eq!(err.message(), "Error: no such table: nope");
    }

    #[test]
    fn cells_display_plainly() {
        assert_eq!(Cell::Null.to_string(), "NULL");
        assert_eq!(Cell::Integer(42).to_string(), "42");
        assert_eq!(Cell::Text("x".into()).to_string(), "x");
        assert_eq!(Cell::Blob(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }
}
