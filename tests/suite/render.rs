//! Render checks against a test terminal backend.

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::common::test_app;

use taskpane_engine::{App, Strategy};
use taskpane_tui::draw;

fn render(app: &App) -> String {
    let backend = TestBackend::new(70, 24);
    let mut terminal = Terminal::new(backend).expect("failed to create terminal");
    terminal.draw(|frame| draw(frame, app)).expect("failed to draw");
    terminal.backend().to_string()
}

#[test]
fn idle_screen_shows_selector_and_help() {
    let app = test_app(1);
    let screen = render(&app);

    assert!(screen.contains("Strategy"));
    assert!(screen.contains("Blocking"));
    assert!(screen.contains("Non-Blocking (deferred)"));
    assert!(screen.contains("Non-Blocking (reactive)"));
    assert!(screen.contains("Select a strategy"));
    assert!(screen.contains("q quit"));
}

#[test]
fn completed_run_lists_results_and_count() {
    let mut app = test_app(2);
    app.run_strategy(Some(Strategy::Blocking));
    let screen = render(&app);

    assert!(screen.contains("Tasks 9/9"));
    assert!(screen.contains("Task1"));
    assert!(screen.contains("Task9"));
    assert!(screen.contains("Done: Blocking"));
}

#[test]
fn running_deferred_batch_shows_progress() {
    let mut app = test_app(3);
    app.run_strategy(Some(Strategy::Deferred));
    app.tick();
    let screen = render(&app);

    assert!(screen.contains("Tasks 1/9"));
    assert!(screen.contains("Running Non-Blocking (deferred)"));
}
