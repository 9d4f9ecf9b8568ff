//! Lifecycle tests: acquisition order, failure gating, loop termination and
//! teardown, driven by a scripted platform.

mod support;

use imgui_shell::{AppStatus, LifecycleState, ShellEvent};
use pretty_assertions::assert_eq;
use support::{
    Fail, MAIN_WINDOW, OTHER_WINDOW, ScriptedApp, ScriptedPlatform, config, snapshot,
};

const FULL_SETUP: [&str; 6] = [
    "init",
    "query scale",
    "create window 960x540",
    "create renderer",
    "vsync on",
    "attach gui x1",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn renders(journal: &[String]) -> usize {
    journal.iter().filter(|e| e.starts_with("render ")).count()
}

#[test]
fn quit_right_away_still_runs_one_full_iteration() {
    let platform = ScriptedPlatform::new(vec![vec![ShellEvent::Quit]]);
    let journal = platform.journal.clone();

    let mut app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.status(), AppStatus::Success);
    assert_eq!(app.state(), LifecycleState::Ready);

    assert_eq!(app.run(), AppStatus::Success);
    assert_eq!(app.status(), AppStatus::Success);
    assert_eq!(app.state(), LifecycleState::Terminated);
    assert_eq!(app.iterations(), 1);
    assert_eq!(app.frames_rendered(), 1);
    drop(app);

    let mut expected = strings(&FULL_SETUP);
    expected.extend(strings(&[
        "load resources",
        "show window",
        "gui event Quit",
        "render 0 demo window 7",
        "release gui",
        "destroy renderer",
        "destroy window",
        "shutdown",
    ]));
    assert_eq!(snapshot(&journal), expected);
}

#[test]
fn setup_failure_stops_acquisition_and_releases_in_reverse() {
    let cases: [(Fail, usize, &[&str]); 4] = [
        (Fail::Init, 1, &["shutdown"]),
        (Fail::CreateWindow, 3, &["shutdown"]),
        (Fail::CreateRenderer, 4, &["destroy window", "shutdown"]),
        (
            Fail::AttachGui,
            6,
            &["destroy renderer", "destroy window", "shutdown"],
        ),
    ];

    for (fail, acquired, teardown) in cases {
        let platform = ScriptedPlatform::new(vec![]).failing_at(fail);
        let journal = platform.journal.clone();

        let app = ScriptedApp::new(platform, config(), "demo");
        assert_eq!(app.status(), AppStatus::InitializationError, "{fail:?}");
        assert_eq!(app.state(), LifecycleState::Failed, "{fail:?}");
        assert_eq!(snapshot(&journal), strings(&FULL_SETUP[..acquired]), "{fail:?}");

        drop(app);
        let mut expected = strings(&FULL_SETUP[..acquired]);
        expected.extend(strings(teardown));
        assert_eq!(snapshot(&journal), expected, "{fail:?}");
    }
}

#[test]
fn vsync_failure_is_not_fatal() {
    let platform = ScriptedPlatform::new(vec![]).failing_at(Fail::Vsync);
    let journal = platform.journal.clone();

    let app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.status(), AppStatus::Success);
    assert_eq!(snapshot(&journal), strings(&FULL_SETUP));
}

#[test]
fn teardown_is_idempotent() {
    let platform = ScriptedPlatform::new(vec![]).failing_at(Fail::CreateRenderer);
    let journal = platform.journal.clone();

    let mut app = ScriptedApp::new(platform, config(), "demo");
    app.shutdown();
    app.shutdown();
    drop(app);

    let log = snapshot(&journal);
    assert_eq!(log.iter().filter(|e| *e == "shutdown").count(), 1);
    assert_eq!(log.iter().filter(|e| *e == "destroy window").count(), 1);
}

#[test]
fn zero_scale_falls_back_to_one() {
    let platform = ScriptedPlatform::new(vec![]).with_scale(0.0);
    let journal = platform.journal.clone();

    let app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.scale(), 1.0);
    assert_eq!(app.window_size(), (960, 540));
    assert!(snapshot(&journal).contains(&"create window 960x540".to_string()));
}

#[test]
fn positive_scale_is_used_exactly() {
    let platform = ScriptedPlatform::new(vec![]).with_scale(2.0);
    let journal = platform.journal.clone();

    let app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.scale(), 2.0);
    assert_eq!(app.window_size(), (1920, 1080));
    let log = snapshot(&journal);
    assert!(log.contains(&"create window 1920x1080".to_string()));
    assert!(log.contains(&"attach gui x2".to_string()));
}

#[test]
fn minimized_window_skips_rendering_but_keeps_polling() {
    let platform = ScriptedPlatform::new(vec![
        vec![ShellEvent::Minimized(MAIN_WINDOW)],
        vec![],
        vec![ShellEvent::Restored(MAIN_WINDOW)],
        vec![ShellEvent::Quit],
    ]);
    let journal = platform.journal.clone();

    let mut app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.run(), AppStatus::Success);
    assert_eq!(app.iterations(), 4);
    assert_eq!(app.frames_rendered(), 2);
    assert_eq!(renders(&snapshot(&journal)), 2);
}

#[test]
fn another_window_minimizing_does_not_pause_rendering() {
    let platform = ScriptedPlatform::new(vec![
        vec![ShellEvent::Minimized(OTHER_WINDOW)],
        vec![ShellEvent::Quit],
    ]);

    let mut app = ScriptedApp::new(platform, config(), "demo");
    app.run();
    assert_eq!(app.frames_rendered(), 2);
}

#[test]
fn close_request_for_another_window_is_ignored() {
    let platform = ScriptedPlatform::new(vec![
        vec![ShellEvent::CloseRequested(OTHER_WINDOW)],
        vec![ShellEvent::Other],
        vec![ShellEvent::CloseRequested(MAIN_WINDOW)],
    ]);
    let journal = platform.journal.clone();

    let mut app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.run(), AppStatus::Success);
    assert_eq!(app.iterations(), 3);
    assert_eq!(app.frames_rendered(), 3);

    // Every event reaches the GUI bindings, including the ignored one.
    let log = snapshot(&journal);
    assert!(log.contains(&format!("gui event CloseRequested({OTHER_WINDOW})")));
    assert!(log.contains(&format!("gui event CloseRequested({MAIN_WINDOW})")));
}

#[test]
fn run_after_setup_failure_is_a_guarded_no_op() {
    let platform = ScriptedPlatform::new(vec![vec![ShellEvent::Quit]])
        .failing_at(Fail::CreateRenderer);
    let journal = platform.journal.clone();

    let mut app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.status(), AppStatus::InitializationError);
    let before = snapshot(&journal);

    assert_eq!(app.run(), AppStatus::InitializationError);
    assert_eq!(app.iterations(), 0);
    assert_eq!(snapshot(&journal), before);
}

#[test]
fn resource_load_failure_is_a_runtime_error() {
    let platform = ScriptedPlatform::new(vec![]).failing_at(Fail::LoadResources);
    let journal = platform.journal.clone();

    let mut app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.status(), AppStatus::Success);
    assert_eq!(app.run(), AppStatus::RuntimeError);
    assert_eq!(app.state(), LifecycleState::Failed);
    assert_eq!(app.iterations(), 0);

    let log = snapshot(&journal);
    assert!(!log.contains(&"show window".to_string()));
    assert_eq!(renders(&log), 0);
}

#[test]
fn show_failure_is_a_runtime_error() {
    let platform = ScriptedPlatform::new(vec![]).failing_at(Fail::ShowWindow);
    let journal = platform.journal.clone();

    let mut app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.run(), AppStatus::RuntimeError);
    assert_eq!(renders(&snapshot(&journal)), 0);
}

#[test]
fn render_failure_ends_the_loop() {
    let platform =
        ScriptedPlatform::new(vec![vec![], vec![], vec![ShellEvent::Quit]])
            .failing_at(Fail::RenderFrame(1));
    let journal = platform.journal.clone();

    let mut app = ScriptedApp::new(platform, config(), "demo");
    assert_eq!(app.run(), AppStatus::RuntimeError);
    assert_eq!(app.iterations(), 2);
    assert_eq!(app.frames_rendered(), 1);
    drop(app);

    let log = snapshot(&journal);
    assert_eq!(
        log[log.len() - 4..].to_vec(),
        strings(&["release gui", "destroy renderer", "destroy window", "shutdown"])
    );
}

#[test]
fn second_run_does_nothing() {
    let platform = ScriptedPlatform::new(vec![vec![ShellEvent::Quit]]);
    let mut app = ScriptedApp::new(platform, config(), "demo");

    app.run();
    let iterations = app.iterations();
    assert_eq!(app.run(), AppStatus::Success);
    assert_eq!(app.iterations(), iterations);
}

#[test]
fn run_after_shutdown_does_nothing() {
    let platform = ScriptedPlatform::new(vec![vec![ShellEvent::Quit]]);
    let journal = platform.journal.clone();

    let mut app = ScriptedApp::new(platform, config(), "demo");
    app.shutdown();
    assert_eq!(app.run(), AppStatus::Success);
    assert_eq!(renders(&snapshot(&journal)), 0);
}

