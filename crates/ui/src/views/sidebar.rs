use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, use_session};
use crate::vm::{LevelVm, map_level};

#[component]
pub fn StorySidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let game = ctx.game();
    let session = use_session();
    let current = session.read().current_level();

    let state: ViewState<LevelVm> = match game.level(current) {
        Ok(level) => ViewState::Ready(map_level(level)),
        Err(_) => ViewState::Error(ViewError::Unknown),
    };

    rsx! {
        aside { class: "sidebar",
            h1 { class: "sidebar-title", "SQL Detective" }
            match state {
                ViewState::Ready(vm) => rsx! {
                    h2 { class: "sidebar-part", "{vm.part_heading}" }
                    h3 { class: "sidebar-level", "{vm.level_label}" }
                    div { class: "story", dangerous_inner_html: "{vm.story_html}" }
                },
                ViewState::Error(_) => rsx! {
                    p { class: "error-banner", "{ViewError::message()}" }
                },
                ViewState::Idle | ViewState::Loading => rsx! {},
            }
        }
    }
}
