mod feedback_vm;
mod help_vm;
mod level_vm;
mod markdown_vm;
mod result_vm;

pub use feedback_vm::{FeedbackVm, map_feedback};
pub use help_vm::{HelpVm, help_content};
pub use level_vm::{LevelVm, map_level};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use result_vm::{CellVm, ResultTableVm, ResultVm, map_query_result, records_summary};
