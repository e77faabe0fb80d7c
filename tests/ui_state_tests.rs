use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sandbox_ethvol::input::UiCommand;
use sandbox_ethvol::snapshot::{DashboardSnapshot, SnapshotParams};
use sandbox_ethvol::ui::{AppState, OnChainMetric, Tab, DEFAULT_SELECTED_METRICS};

fn snapshot(seed: u64) -> DashboardSnapshot {
    let now = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    DashboardSnapshot::generate(
        SnapshotParams {
            history_days: 120,
            forecast_horizon_days: 30,
        },
        now,
        &mut StdRng::seed_from_u64(seed),
    )
}

#[test]
/// Tab navigation wraps in both directions.
fn tabs_cycle_and_wrap() {
    let mut state = AppState::new(snapshot(1), 60);
    assert_eq!(state.tab, Tab::Overview);
    state.apply(UiCommand::PrevTab);
    assert_eq!(state.tab, Tab::Performance);
    state.apply(UiCommand::NextTab);
    assert_eq!(state.tab, Tab::Overview);
    state.apply(UiCommand::SelectTab(Tab::Regimes));
    assert_eq!(state.tab, Tab::Regimes);
}

#[test]
/// Model toggles only act on the Models tab and only on the row under the cursor.
fn toggle_model_follows_cursor_on_models_tab() {
    let mut state = AppState::new(snapshot(1), 60);
    state.apply(UiCommand::ToggleModel);
    assert_eq!(state.models.active_count(), 3);

    state.apply(UiCommand::SelectTab(Tab::Models));
    state.apply(UiCommand::CursorDown);
    state.apply(UiCommand::CursorDown);
    assert_eq!(state.selected_model_id(), Some("gp"));
    state.apply(UiCommand::ToggleModel);
    assert!(state.models.is_active("gp"));
    assert_eq!(state.summary().active_models, 4);

    for _ in 0..10 {
        state.apply(UiCommand::CursorDown);
    }
    assert_eq!(state.model_cursor, 3);
    for _ in 0..10 {
        state.apply(UiCommand::CursorUp);
    }
    assert_eq!(state.model_cursor, 0);
}

#[test]
/// Metric toggles apply on the On-Chain tab and keep canonical order.
fn metric_toggles_keep_canonical_order() {
    let mut state = AppState::new(snapshot(1), 60);
    assert_eq!(state.selected_metrics, DEFAULT_SELECTED_METRICS.to_vec());

    state.apply(UiCommand::ToggleMetric(OnChainMetric::HashRate));
    assert_eq!(state.selected_metrics, DEFAULT_SELECTED_METRICS.to_vec());

    state.apply(UiCommand::SelectTab(Tab::OnChain));
    state.apply(UiCommand::ToggleMetric(OnChainMetric::HashRate));
    state.apply(UiCommand::ToggleMetric(OnChainMetric::GasUsed));
    assert_eq!(
        state.selected_metrics,
        vec![
            OnChainMetric::ActiveAddresses,
            OnChainMetric::HashRate,
            OnChainMetric::Volatility
        ]
    );
}

#[test]
/// Regenerating swaps the data but keeps operator toggles.
fn replace_snapshot_keeps_toggles() {
    let mut state = AppState::new(snapshot(1), 60);
    state.models.set_active("garch", false);
    let before = state.snapshot.price_data.clone();

    state.replace_snapshot(snapshot(2));
    assert_eq!(state.generation, 2);
    assert_ne!(state.snapshot.price_data, before);
    assert!(!state.models.is_active("garch"));
}

#[test]
/// Only the trailing window of history is shown beside the forecast.
fn visible_history_is_trailing_window() {
    let state = AppState::new(snapshot(1), 60);
    let visible = state.visible_history();
    assert_eq!(visible.len(), 60);
    assert_eq!(visible.last(), state.snapshot.price_data.last());

    let wide = AppState::new(snapshot(1), 1_000);
    assert_eq!(wide.visible_history().len(), 120);
}

#[test]
fn quit_sets_flag() {
    let mut state = AppState::new(snapshot(1), 60);
    state.apply(UiCommand::Quit);
    assert!(state.should_quit);
}
