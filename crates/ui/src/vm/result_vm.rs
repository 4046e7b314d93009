use detective_core::model::{Cell, QueryResult, ResultTable};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellVm {
    pub text: String,
    pub numeric: bool,
    pub null: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultTableVm {
    pub summary: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellVm>>,
}

/// What the result pane shows after a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultVm {
    Table(ResultTableVm),
    Empty,
    Error(String),
}

impl ResultVm {
    pub const EMPTY_MESSAGE: &'static str = "No results to display.";
}

#[must_use]
pub fn map_query_result(result: &QueryResult) -> ResultVm {
    match result {
        QueryResult::Rows(table) => ResultVm::Table(map_table(table)),
        QueryResult::NoRows => ResultVm::Empty,
        QueryResult::Error(err) => ResultVm::Error(err.message().to_string()),
    }
}

fn map_table(table: &ResultTable) -> ResultTableVm {
    let numeric: Vec<bool> = table.columns().iter().map(|c| c.kind.is_numeric()).collect();
    let rows = table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(idx, cell)| CellVm {
                    text: cell.to_string(),
                    numeric: numeric.get(idx).copied().unwrap_or(false),
                    null: matches!(cell, Cell::Null),
                })
                .collect()
        })
        .collect();

    ResultTableVm {
        summary: records_summary(table.row_count()),
        headers: table.columns().iter().map(|c| c.name.clone()).collect(),
        rows,
    }
}

#[must_use]
pub fn records_summary(count: usize) -> String {
    format!("Returned {count} records.")
}
