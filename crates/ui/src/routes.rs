use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{GameView, HelpView, StorySidebar, use_session_provider};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", GameView)] Game {},
        #[route("/help", HelpView)] Help {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    use_session_provider(ctx.game());

    rsx! {
        div { class: "app",
            StorySidebar {}
            main { class: "content",
                nav { class: "tabs",
                    Link { class: "tab", active_class: "tab--active", to: Route::Game {}, "Enter your SQL query" }
                    Link { class: "tab", active_class: "tab--active", to: Route::Help {}, "Help" }
                }
                Outlet::<Route> {}
            }
        }
    }
}
