use std::collections::HashMap;

use detective_core::model::{LevelDefinition, LevelNumber};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{level_to_i64, map_level_row};
use crate::repository::{LevelRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl LevelRepository for SqliteRepository {
    async fn upsert_level(&self, level: &LevelDefinition) -> Result<(), StorageError> {
        let number = level_to_i64(level.level());
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO levels (level, part_number, part_title, story, connection)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(level) DO UPDATE SET
                part_number = excluded.part_number,
                part_title = excluded.part_title,
                story = excluded.story,
                connection = excluded.connection
            ",
        )
        .bind(number)
        .bind(i64::from(level.part().number()))
        .bind(level.part().title())
        .bind(level.story())
        .bind(level.connection())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        sqlx::query("DELETE FROM level_answers WHERE level = ?1")
            .bind(number)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        for answer in level.answers().iter() {
            sqlx::query("INSERT INTO level_answers (level, answer) VALUES (?1, ?2)")
                .bind(number)
                .bind(answer)
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn get_level(
        &self,
        level: LevelNumber,
    ) -> Result<Option<LevelDefinition>, StorageError> {
        let number = level_to_i64(level);
        let row = sqlx::query(
            r"
            SELECT level, part_number, part_title, story, connection
            FROM levels WHERE level = ?1
            ",
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let answers = sqlx::query("SELECT answer FROM level_answers WHERE level = ?1 ORDER BY answer")
            .bind(number)
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?
            .iter()
            .map(|row| row.try_get::<String, _>("answer"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        map_level_row(&row, answers).map(Some)
    }

    async fn list_levels(&self) -> Result<Vec<LevelDefinition>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT level, part_number, part_title, story, connection
            FROM levels
            ORDER BY level ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let answer_rows = sqlx::query("SELECT level, answer FROM level_answers ORDER BY level, answer")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        let mut answers: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &answer_rows {
            let level: i64 = row
                .try_get("level")
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            let answer: String = row
                .try_get("answer")
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            answers.entry(level).or_default().push(answer);
        }

        let mut levels = Vec::with_capacity(rows.len());
        for row in rows {
            let level: i64 = row
                .try_get("level")
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            levels.push(map_level_row(&row, answers.remove(&level).unwrap_or_default())?);
        }
        Ok(levels)
    }
}
