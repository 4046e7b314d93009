use dioxus::prelude::*;

use detective_core::query::DEFAULT_QUERY;
use detective_core::session::SessionPhase;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, use_session};
use crate::vm::{FeedbackVm, ResultTableVm, ResultVm, map_feedback, map_query_result};

/// Ctrl+Enter, or Cmd+Enter on macOS, runs the editor.
fn is_run_shortcut(key: &Key, modifiers: Modifiers) -> bool {
    *key == Key::Enter
        && (modifiers.contains(Modifiers::CONTROL) || modifiers.contains(Modifiers::META))
}

#[component]
pub fn GameView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_session();
    let mut running = use_signal(|| false);
    let mut answer_input = use_signal(String::new);
    let mut answer_error = use_signal(|| None::<ViewError>);

    let game_for_run = ctx.game();
    let run_query = use_callback(move |()| {
        if running() {
            return;
        }
        let game = game_for_run.clone();
        let (level, text) = {
            let state = session.read();
            (state.current_level(), state.query_text().to_string())
        };
        running.set(true);
        spawn(async move {
            let result = game.run_query(level, &text).await;
            // Dropped if the level changed while the query ran.
            session.write().record_result(level, result);
            running.set(false);
        });
    });

    let game_for_answer = ctx.game();
    let submit_answer = use_callback(move |raw: String| {
        let outcome = game_for_answer.submit_answer(&mut session.write(), &raw);
        answer_error.set(outcome.err().map(|_| ViewError::Unknown));
        answer_input.set(String::new());
    });

    let game_for_proceed = ctx.game();
    let proceed = use_callback(move |()| {
        game_for_proceed.proceed(&mut session.write());
    });

    let (query_text, result_state, feedback, accepting_answers) = {
        let state = session.read();
        let result_state = if running() {
            ViewState::Loading
        } else {
            state
                .last_result()
                .map_or(ViewState::Idle, |result| ViewState::Ready(map_query_result(result)))
        };
        let feedback = map_feedback(&state);
        let accepting_answers = matches!(state.phase(), SessionPhase::Solving);
        (state.query_text().to_string(), result_state, feedback, accepting_answers)
    };

    rsx! {
        div { class: "page page--game",
            section { class: "editor",
                textarea {
                    class: "sql-editor",
                    id: "sql-editor",
                    spellcheck: "false",
                    rows: "10",
                    placeholder: DEFAULT_QUERY,
                    value: "{query_text}",
                    oninput: move |evt| session.write().set_query_text(evt.value()),
                    onkeydown: move |evt| {
                        if is_run_shortcut(&evt.data.key(), evt.data.modifiers()) {
                            evt.prevent_default();
                            run_query.call(());
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    id: "run-query",
                    r#type: "button",
                    disabled: running(),
                    onclick: move |_| run_query.call(()),
                    "Run"
                }
            }

            section { class: "results",
                match result_state {
                    ViewState::Idle => rsx! {},
                    ViewState::Loading => rsx! {
                        p { class: "muted", "Running..." }
                    },
                    ViewState::Ready(ResultVm::Table(table)) => rsx! {
                        ResultTable { table }
                    },
                    ViewState::Ready(ResultVm::Empty) => rsx! {
                        p { class: "muted", "{ResultVm::EMPTY_MESSAGE}" }
                    },
                    ViewState::Ready(ResultVm::Error(message)) => rsx! {
                        div { class: "error-banner", role: "alert", "{message}" }
                    },
                    ViewState::Error(_) => rsx! {
                        div { class: "error-banner", role: "alert", "{ViewError::message()}" }
                    },
                }
            }

            section { class: "answer",
                h3 { "Solve the Puzzle" }
                if accepting_answers {
                    input {
                        class: "answer-input",
                        id: "answer-input",
                        r#type: "text",
                        placeholder: "Type your answer and press Enter",
                        value: "{answer_input}",
                        oninput: move |evt| answer_input.set(evt.value()),
                        onkeydown: move |evt| {
                            if evt.data.key() == Key::Enter {
                                evt.prevent_default();
                                submit_answer.call(answer_input());
                            }
                        },
                    }
                }
                if answer_error().is_some() {
                    p { class: "error-banner", "{ViewError::message()}" }
                }
                match feedback {
                    FeedbackVm::None => rsx! {},
                    FeedbackVm::Correct { message } => rsx! {
                        p { class: "feedback feedback--correct", "{message}" }
                        button {
                            class: "btn btn-primary",
                            id: "proceed",
                            r#type: "button",
                            onclick: move |_| proceed.call(()),
                            "Proceed to next level"
                        }
                    },
                    FeedbackVm::Incorrect => rsx! {
                        p { class: "feedback feedback--incorrect", "{FeedbackVm::INCORRECT_MESSAGE}" }
                    },
                    FeedbackVm::Finished => rsx! {
                        p { class: "feedback feedback--finished", "{FeedbackVm::FINISHED_MESSAGE}" }
                    },
                }
            }
        }
    }
}

#[component]
fn ResultTable(table: ResultTableVm) -> Element {
    let ResultTableVm {
        summary,
        headers,
        rows,
    } = table;

    rsx! {
        p { class: "result-summary", "{summary}" }
        div { class: "result-scroll",
            table { class: "result-table",
                thead {
                    tr {
                        for header in headers {
                            th { "{header}" }
                        }
                    }
                }
                tbody {
                    for row in rows {
                        tr {
                            for cell in row {
                                td {
                                    class: if cell.numeric { "cell cell--numeric" } else { "cell" },
                                    class: if cell.null { "cell--null" },
                                    "{cell.text}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
