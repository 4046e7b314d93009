#![forbid(unsafe_code)]

pub mod content;
pub mod repository;
pub mod source;
pub mod sqlite;

pub use repository::{InMemoryRepository, LevelRepository, Storage, StorageError};
pub use source::{DataSource, DataSourceError, DataSourceProvider};
