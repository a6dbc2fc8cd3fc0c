use panel_core::{update, Effect, Msg, PanelState, RunState, ServerStatus, StatusIndicator};
use pretty_assertions::assert_eq;

fn init_logging() {
    panel_logging::initialize_for_tests();
}

fn full_refresh(generation: u64) -> Vec<Effect> {
    Effect::full_refresh(generation).to_vec()
}

#[test]
fn idle_report_while_idle_triggers_nothing() {
    init_logging();
    let mut state = PanelState::new();
    state.consume_dirty();

    for _ in 0..3 {
        let (next, effects) = update(state, Msg::StatusReceived(ServerStatus::idle()));
        assert!(effects.is_empty());
        state = next;
    }
    assert_eq!(state.run_state(), &RunState::Idle);
    assert!(!state.consume_dirty());
    assert_eq!(state.polls_reconciled(), 3);
}

#[test]
fn running_report_forces_running_and_refreshes_every_tick() {
    init_logging();
    let state = PanelState::new();

    let (state, effects) = update(state, Msg::StatusReceived(ServerStatus::running("detail")));
    assert_eq!(effects, full_refresh(1));
    assert_eq!(state.run_state(), &RunState::Running("detail".to_string()));
    let controls = state.controls();
    assert!(!controls.start_enabled);
    assert!(controls.stop_enabled);

    let (state, effects) = update(state, Msg::StatusReceived(ServerStatus::running("detail")));
    assert_eq!(effects, full_refresh(2));
    let view = state.view();
    assert_eq!(view.indicator, StatusIndicator::Running);
    assert_eq!(view.status_text, "detail crawling...");
}

#[test]
fn end_of_job_refreshes_once_then_goes_quiet() {
    init_logging();
    let (state, _) = update(
        PanelState::new(),
        Msg::StatusReceived(ServerStatus::running("search")),
    );

    let (state, effects) = update(state, Msg::StatusReceived(ServerStatus::idle()));
    assert_eq!(effects, full_refresh(2));
    assert_eq!(state.run_state(), &RunState::Idle);
    assert!(state.controls().start_enabled);
    assert!(!state.controls().stop_enabled);
    assert_eq!(state.view().status_text, "Ready");

    let (_state, effects) = update(state, Msg::StatusReceived(ServerStatus::idle()));
    assert!(effects.is_empty());
}

#[test]
fn server_truth_overrides_optimistic_start() {
    init_logging();
    let (state, _) = update(PanelState::new(), Msg::KeywordsChanged("cats".to_string()));
    let (state, _) = update(state, Msg::StartClicked);
    let (state, _) = update(state, Msg::StartFinished(Ok(())));
    assert!(state.run_state().is_active());

    let (state, effects) = update(state, Msg::StatusReceived(ServerStatus::idle()));
    assert_eq!(state.run_state(), &RunState::Idle);
    assert_eq!(effects, full_refresh(1));
}

#[test]
fn missing_task_label_falls_back() {
    init_logging();
    let status = ServerStatus {
        running: true,
        current_task: None,
        progress: 3,
        total: 15,
    };
    let (state, _) = update(PanelState::new(), Msg::StatusReceived(status));

    assert_eq!(state.run_state(), &RunState::Running("crawler".to_string()));
    let view = state.view();
    assert_eq!(view.progress_text.as_deref(), Some("3 / 15"));
}

#[test]
fn running_report_during_pending_start_keeps_controls_locked() {
    init_logging();
    let (state, _) = update(PanelState::new(), Msg::KeywordsChanged("cats".to_string()));
    let (state, _) = update(state, Msg::StartClicked);

    let (state, effects) = update(state, Msg::StatusReceived(ServerStatus::running("search")));
    assert_eq!(effects, full_refresh(1));
    assert!(!state.controls().start_enabled);
    assert!(!state.controls().stop_enabled);

    let (state, _) = update(state, Msg::StartFinished(Ok(())));
    assert!(state.controls().stop_enabled);
}
