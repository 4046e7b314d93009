use detective_core::session::{SessionPhase, SessionState};

/// Banner under the answer box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedbackVm {
    None,
    Correct { message: String },
    Incorrect,
    Finished,
}

impl FeedbackVm {
    pub const INCORRECT_MESSAGE: &'static str = "Incorrect. Try again.";
    pub const FINISHED_MESSAGE: &'static str =
        "Case closed! You solved the final level.";
}

/// An answer was checked and rejected when the session is still solving but
/// holds a pending answer.
#[must_use]
pub fn map_feedback(session: &SessionState) -> FeedbackVm {
    match session.phase() {
        SessionPhase::Advanced { level } => FeedbackVm::Correct {
            message: format!("Correct! Welcome to level {level}"),
        },
        SessionPhase::Finished => FeedbackVm::Finished,
        SessionPhase::Solving if !session.pending_answer().is_empty() => FeedbackVm::Incorrect,
        SessionPhase::Solving => FeedbackVm::None,
    }
}
