mod game;
mod help;
mod session;
mod sidebar;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use game::GameView;
pub use help::HelpView;
pub use session::{use_session, use_session_provider};
pub use sidebar::StorySidebar;
pub use state::{ViewError, ViewState};
