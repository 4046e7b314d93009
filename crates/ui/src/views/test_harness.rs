use std::sync::Arc;

use detective_core::model::{
    AnswerSet, Cell, Column, ColumnKind, LevelCatalog, LevelDefinition, LevelNumber, Part,
    ResultTable,
};
use detective_core::query::DEFAULT_QUERY;
use detective_core::session::SessionState;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::GameService;
use storage::source::{InMemoryDataSource, InMemoryDataSources};

use crate::context::{UiApp, build_app_context};
use crate::views::{GameView, HelpView, StorySidebar};

pub const SUSPECTS_QUERY: &str = "SELECT name, age FROM suspects";
pub const EMPTY_QUERY: &str = "SELECT name FROM suspects WHERE age > 100";
pub const BROKEN_QUERY: &str = "SELECT * FROM witnesses";

#[derive(Clone)]
struct TestApp {
    game: Arc<GameService>,
}

impl UiApp for TestApp {
    fn game(&self) -> Arc<GameService> {
        Arc::clone(&self.game)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Game,
    Help,
    Sidebar,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: SessionState,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    let initial = props.session.clone();
    let session = use_signal(move || initial);
    use_context_provider(|| session);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Game => rsx! { GameView {} },
        ViewKind::Help => rsx! { HelpView {} },
        ViewKind::Sidebar => rsx! { StorySidebar {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn level(n: u32, part: u32, title: &str, story: &str, answers: &[&str]) -> LevelDefinition {
    LevelDefinition::new(
        LevelNumber::new(n).expect("level number"),
        Part::new(part, title).expect("part"),
        story,
        "cases",
        AnswerSet::new(answers.iter().copied()),
    )
    .expect("level")
}

/// Two levels over a canned `cases` source.
pub fn test_game() -> Arc<GameService> {
    let suspects = ResultTable::new(
        vec![
            Column::new("name", ColumnKind::Text),
            Column::new("age", ColumnKind::Integer),
        ],
        vec![
            vec![Cell::Text("Marcus Lee".into()), Cell::Integer(41)],
            vec![Cell::Text("Ivy Park".into()), Cell::Null],
        ],
    );
    let source = InMemoryDataSource::new()
        .with_table(DEFAULT_QUERY, suspects.clone())
        .with_table(SUSPECTS_QUERY, suspects)
        .with_table(EMPTY_QUERY, ResultTable::default())
        .with_error(BROKEN_QUERY, "no such table: witnesses");
    let sources = InMemoryDataSources::new().with_source("cases", Arc::new(source));

    let catalog = LevelCatalog::new([
        level(1, 1, "The Cold Case", "A burglary on **Harbor Street**.", &["1st floor"]),
        level(2, 2, "The Suspects", "Who had the motive?", &["Marcus Lee"]),
    ])
    .expect("catalog");
    Arc::new(GameService::new(Arc::new(catalog), Arc::new(sources)))
}

pub fn setup_view_harness(
    view: ViewKind,
    game: Arc<GameService>,
    session: SessionState,
) -> ViewHarness {
    let app = Arc::new(TestApp { game });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view, session });
    ViewHarness { dom }
}
