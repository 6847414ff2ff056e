//! End-to-end strategy scenarios, driven the way the event loop drives the app.

use crate::common::{parse_entry, run_to_completion, test_app};

use taskpane_engine::{App, RunConfig, Strategy};
use taskpane_types::SLOW_THRESHOLD_MS;

#[test]
fn blocking_scenario_renders_nine_entries_ascending() {
    let mut app = test_app(100);
    app.run_strategy(Some(Strategy::Blocking));

    assert_eq!(app.results().len(), 9);
    for (i, entry) in app.results().iter().enumerate() {
        let (label, duration) = parse_entry(entry);
        let index = i + 1;
        // Label is "Task{i}" or "Task{i} (slow)", ascending i.
        if duration > SLOW_THRESHOLD_MS {
            assert_eq!(label, format!("Task{index} (slow)"));
        } else {
            assert_eq!(label, format!("Task{index}"));
        }
    }
}

#[test]
fn same_seed_reproduces_the_same_batch() {
    let mut first = test_app(7);
    first.run_strategy(Some(Strategy::Blocking));

    let mut second = test_app(7);
    second.run_strategy(Some(Strategy::Blocking));

    assert_eq!(first.results(), second.results());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn every_strategy_produces_the_same_content_for_a_seed() {
    let mut blocking = test_app(55);
    blocking.run_strategy(Some(Strategy::Blocking));
    let mut expected: Vec<String> = blocking.results().to_vec();
    expected.sort();

    for strategy in [Strategy::Deferred, Strategy::Reactive] {
        let mut app = test_app(55);
        app.run_strategy(Some(strategy));
        run_to_completion(&mut app).await;

        let mut actual: Vec<String> = app.results().to_vec();
        actual.sort();
        assert_eq!(actual, expected, "content diverged under {strategy}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn switching_selection_twice_leaves_no_residue() {
    let mut app = test_app(8);
    app.run_strategy(Some(Strategy::Deferred));
    app.tick(); // execute one unit, leave the rest queued

    app.run_strategy(Some(Strategy::Reactive));
    assert!(app.results().is_empty(), "sink not cleared on reselection");

    run_to_completion(&mut app).await;
    assert_eq!(app.results().len(), 9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancelled_run_still_yields_a_full_batch_of_entries() {
    // Demo-length sleeps so cancellation actually lands mid-wait.
    let mut app = App::with_run_config(
        RunConfig {
            tasks: 10,
            max_sleep_ms: 1000,
            slow_threshold_ms: 500,
        },
        9,
    );
    app.run_strategy(Some(Strategy::Reactive));
    app.cancel_active_run();

    run_to_completion(&mut app).await;

    assert_eq!(app.results().len(), 9);
    for entry in app.results() {
        let (label, duration) = parse_entry(entry);
        if label == "-" {
            assert_eq!(duration, 0);
        } else {
            assert!(label.starts_with("Task"), "unexpected label: {label:?}");
        }
    }
}
