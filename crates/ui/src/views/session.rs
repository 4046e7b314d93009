use std::sync::Arc;

use detective_core::session::SessionState;
use dioxus::prelude::*;
use services::GameService;

/// Start a session and share it with every view below the caller.
pub fn use_session_provider(game: Arc<GameService>) -> Signal<SessionState> {
    let session = use_signal(move || game.start_session());
    use_context_provider(|| session)
}

/// The session shared by [`use_session_provider`].
#[must_use]
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}
