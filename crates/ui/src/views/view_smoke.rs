use detective_core::model::LevelNumber;

use super::test_harness::{
    BROKEN_QUERY, EMPTY_QUERY, SUSPECTS_QUERY, ViewKind, setup_view_harness, test_game,
};

#[tokio::test(flavor = "current_thread")]
async fn sidebar_smoke_renders_part_level_and_story() {
    let game = test_game();
    let mut harness = setup_view_harness(ViewKind::Sidebar, game.clone(), game.start_session());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("SQL Detective"), "missing title in {html}");
    assert!(html.contains("Part 1: The Cold Case"), "missing part in {html}");
    assert!(html.contains("Level 1"), "missing level in {html}");
    assert!(html.contains("<strong>Harbor Street</strong>"), "missing story in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sidebar_smoke_follows_the_current_level() {
    let game = test_game();
    let mut session = game.start_session();
    game.submit_answer(&mut session, "First Floor").unwrap();
    game.proceed(&mut session);

    let mut harness = setup_view_harness(ViewKind::Sidebar, game, session);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Part 2: The Suspects"), "missing part in {html}");
    assert!(html.contains("Level 2"), "missing level in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_editor_and_answer_box() {
    let game = test_game();
    let mut harness = setup_view_harness(ViewKind::Game, game.clone(), game.start_session());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("sql-editor"), "missing editor in {html}");
    assert!(html.contains("Run"), "missing run button in {html}");
    assert!(html.contains("Solve the Puzzle"), "missing answer heading in {html}");
    assert!(html.contains("answer-input"), "missing answer box in {html}");
    assert!(!html.contains("Returned"), "unexpected result in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_result_table() {
    let game = test_game();
    let mut session = game.start_session();
    game.submit_query(&mut session, SUSPECTS_QUERY).await;

    let mut harness = setup_view_harness(ViewKind::Game, game, session);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Returned 2 records."), "missing summary in {html}");
    assert!(html.contains("<th>name</th>"), "missing header in {html}");
    assert!(html.contains("Marcus Lee"), "missing row in {html}");
    assert!(html.contains("NULL"), "missing null cell in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_empty_and_error_results() {
    let game = test_game();

    let mut session = game.start_session();
    game.submit_query(&mut session, EMPTY_QUERY).await;
    let mut harness = setup_view_harness(ViewKind::Game, game.clone(), session);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No results to display."), "missing empty state in {html}");

    let mut session = game.start_session();
    game.submit_query(&mut session, BROKEN_QUERY).await;
    let mut harness = setup_view_harness(ViewKind::Game, game.clone(), session);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("error-banner"), "missing banner in {html}");
    assert!(html.contains("no such table: witnesses"), "missing message in {html}");

    let mut session = game.start_session();
    game.submit_query(&mut session, "DROP TABLE suspects").await;
    let mut harness = setup_view_harness(ViewKind::Game, game, session);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("not allowed in this context"), "missing gate message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_answer_feedback() {
    let game = test_game();

    let mut session = game.start_session();
    game.submit_answer(&mut session, "basement").unwrap();
    let mut harness = setup_view_harness(ViewKind::Game, game.clone(), session);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Incorrect. Try again."), "missing incorrect in {html}");

    let mut session = game.start_session();
    game.submit_answer(&mut session, "1st Floor").unwrap();
    assert_eq!(session.current_level(), LevelNumber::new(2).unwrap());
    let mut harness = setup_view_harness(ViewKind::Game, game.clone(), session);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Correct! Welcome to level 2"), "missing success in {html}");
    assert!(html.contains("Proceed to next level"), "missing proceed in {html}");
    assert!(!html.contains("answer-input"), "answer box should be hidden in {html}");

    let mut session = game.start_session();
    game.submit_answer(&mut session, "1st Floor").unwrap();
    game.proceed(&mut session);
    game.submit_answer(&mut session, "marcus-lee").unwrap();
    let mut harness = setup_view_harness(ViewKind::Game, game, session);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Case closed!"), "missing finished banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn help_view_smoke_lists_flavor_and_denylist() {
    let game = test_game();
    let mut harness = setup_view_harness(ViewKind::Help, game.clone(), game.start_session());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("SQLite"), "missing flavor in {html}");
    assert!(html.contains("available_tables"), "missing default query in {html}");
    for term in ["update", "truncate", "into"] {
        assert!(html.contains(&format!("<code>{term}</code>")), "missing {term} in {html}");
    }
}
