use dioxus::prelude::*;

use crate::vm::help_content;

#[component]
pub fn HelpView() -> Element {
    let help = help_content();

    rsx! {
        div { class: "page page--help",
            h2 { "Help" }
            section {
                h3 { "SQL flavor" }
                p { "Queries run against {help.flavor}. Any read-only SELECT works, "
                    "including joins and subqueries." }
            }
            section {
                h3 { "Listing the tables" }
                p { "An empty editor runs this query:" }
                pre { class: "help-query", "{help.default_query}" }
            }
            section {
                h3 { "Blocked words" }
                p { "A query containing any of these words, in any casing and anywhere in the "
                    "text (including names and comments), is not run:" }
                ul { class: "denylist",
                    for term in help.denylist {
                        li { code { "{term}" } }
                    }
                }
            }
        }
    }
}
