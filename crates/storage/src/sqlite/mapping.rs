use detective_core::model::{AnswerSet, LevelDefinition, LevelNumber, Part};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn level_to_i64(level: LevelNumber) -> i64 {
    i64::from(level.value())
}

pub(crate) fn level_from_i64(v: i64) -> Result<LevelNumber, StorageError> {
    let value = u32::try_from(v)
        .map_err(|_| StorageError::Serialization(format!("level out of range: {v}")))?;
    LevelNumber::new(value).map_err(ser)
}

pub(crate) fn map_level_row(
    row: &sqlx::sqlite::SqliteRow,
    answers: Vec<String>,
) -> Result<LevelDefinition, StorageError> {
    let part_number: i64 = row.try_get("part_number").map_err(ser)?;
    let part_number = u32::try_from(part_number)
        .map_err(|_| StorageError::Serialization(format!("invalid part_number: {part_number}")))?;
    let part = Part::new(part_number, row.try_get::<String, _>("part_title").map_err(ser)?)
        .map_err(ser)?;

    LevelDefinition::new(
        level_from_i64(row.try_get::<i64, _>("level").map_err(ser)?)?,
        part,
        row.try_get::<String, _>("story").map_err(ser)?,
        row.try_get::<String, _>("connection").map_err(ser)?,
        AnswerSet::new(answers),
    )
    .map_err(ser)
}
