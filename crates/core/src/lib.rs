#![forbid(unsafe_code)]

pub mod answer;
pub mod gate;
pub mod model;
pub mod query;
pub mod session;

pub use gate::{DENYLIST, is_query_allowed};
pub use query::DEFAULT_QUERY;
pub use session::{AnswerOutcome, SessionPhase, SessionState};
