mod catalog;
mod ids;
mod level;
mod result;

pub use catalog::{CatalogError, LevelCatalog};
pub use ids::{LevelNumber, ParseLevelError};
pub use level::{AnswerSet, LevelDefinition, LevelError, Part};
pub use result::{Cell, Column, ColumnKind, QueryError, QueryErrorKind, QueryResult, ResultTable};
