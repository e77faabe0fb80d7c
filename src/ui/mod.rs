pub mod chart;
pub mod dashboard;
pub mod model_activity;
pub mod projection;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::input::UiCommand;
use crate::model::{DailyObservation, OnChainObservation};
use crate::snapshot::DashboardSnapshot;

use chart::{MetricSparkline, VolatilityChart};
use dashboard::{
    CurrentRegimePanel, ForecastMetricsPanel, KeybindBar, MetricSelectionBar, MetricsCard,
    ModelListPanel, PerformanceSummaryPanel, PerformanceTable, RegimeTimeline, StatusBar, TabBar,
};
use model_activity::ModelActivity;
use projection::{metric_readings, metric_series, OverviewSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Forecasting,
    Models,
    OnChain,
    Regimes,
    Performance,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Self::Overview,
        Self::Forecasting,
        Self::Models,
        Self::OnChain,
        Self::Regimes,
        Self::Performance,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Forecasting => "Volatility Forecasting",
            Self::Models => "Bayesian Models",
            Self::OnChain => "On-Chain Signals",
            Self::Regimes => "Volatility Regimes",
            Self::Performance => "Model Performance",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OnChainMetric {
    GasUsed,
    ActiveAddresses,
    TransactionCount,
    NetworkValue,
    HashRate,
    Volatility,
}

impl OnChainMetric {
    pub const ALL: [OnChainMetric; 6] = [
        Self::GasUsed,
        Self::ActiveAddresses,
        Self::TransactionCount,
        Self::NetworkValue,
        Self::HashRate,
        Self::Volatility,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::GasUsed => "gasUsed",
            Self::ActiveAddresses => "activeAddresses",
            Self::TransactionCount => "transactionCount",
            Self::NetworkValue => "networkValue",
            Self::HashRate => "hashRate",
            Self::Volatility => "volatility",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GasUsed => "Gas Used (M)",
            Self::ActiveAddresses => "Active Addresses (K)",
            Self::TransactionCount => "Transactions (K)",
            Self::NetworkValue => "Network Value (B)",
            Self::HashRate => "Hash Rate (TH/s)",
            Self::Volatility => "Volatility (%)",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::GasUsed => "M",
            Self::ActiveAddresses | Self::TransactionCount => "K",
            Self::NetworkValue => "B",
            Self::HashRate => "TH/s",
            Self::Volatility => "%",
        }
    }

    /// Value in display units (millions, thousands, billions, percent).
    pub fn value(self, on_chain: &OnChainObservation, daily: &DailyObservation) -> f64 {
        match self {
            Self::GasUsed => on_chain.gas_used as f64 / 1_000_000.0,
            Self::ActiveAddresses => on_chain.active_addresses as f64 / 1_000.0,
            Self::TransactionCount => on_chain.transaction_count as f64 / 1_000.0,
            Self::NetworkValue => on_chain.network_value / 1_000_000_000.0,
            Self::HashRate => on_chain.hash_rate,
            Self::Volatility => daily.volatility * 100.0,
        }
    }
}

pub const DEFAULT_SELECTED_METRICS: [OnChainMetric; 3] = [
    OnChainMetric::GasUsed,
    OnChainMetric::ActiveAddresses,
    OnChainMetric::Volatility,
];

pub struct AppState {
    pub snapshot: DashboardSnapshot,
    pub tab: Tab,
    pub models: ModelActivity,
    pub model_cursor: usize,
    pub selected_metrics: Vec<OnChainMetric>,
    pub history_window: usize,
    pub generation: u64,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(snapshot: DashboardSnapshot, history_window: usize) -> Self {
        let models = ModelActivity::from_catalog(&snapshot.models);
        Self {
            snapshot,
            tab: Tab::Overview,
            models,
            model_cursor: 0,
            selected_metrics: DEFAULT_SELECTED_METRICS.to_vec(),
            history_window: history_window.max(1),
            generation: 1,
            should_quit: false,
        }
    }

    /// Swap in freshly generated data; operator toggles survive.
    pub fn replace_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.models.sync(&snapshot.models);
        self.model_cursor = self
            .model_cursor
            .min(snapshot.models.len().saturating_sub(1));
        self.snapshot = snapshot;
        self.generation += 1;
    }

    pub fn selected_model_id(&self) -> Option<&str> {
        self.snapshot
            .models
            .get(self.model_cursor)
            .map(|m| m.id.as_str())
    }

    /// Add or remove a series, keeping the canonical metric order.
    pub fn toggle_metric(&mut self, metric: OnChainMetric) {
        if let Some(pos) = self.selected_metrics.iter().position(|m| *m == metric) {
            self.selected_metrics.remove(pos);
        } else {
            self.selected_metrics.push(metric);
            self.selected_metrics.sort();
        }
    }

    pub fn summary(&self) -> OverviewSummary {
        OverviewSummary::new(&self.snapshot, &self.models)
    }

    /// History shown next to the forecast.
    pub fn visible_history(&self) -> &[DailyObservation] {
        let series = &self.snapshot.price_data;
        &series[series.len().saturating_sub(self.history_window)..]
    }

    /// Apply a UI command. `Regenerate` needs a random source and is handled by the caller.
    pub fn apply(&mut self, cmd: UiCommand) {
        match cmd {
            UiCommand::Quit => self.should_quit = true,
            UiCommand::SelectTab(tab) => self.tab = tab,
            UiCommand::NextTab => self.tab = self.tab.next(),
            UiCommand::PrevTab => self.tab = self.tab.prev(),
            UiCommand::CursorUp => {
                self.model_cursor = self.model_cursor.saturating_sub(1);
            }
            UiCommand::CursorDown => {
                let last = self.snapshot.models.len().saturating_sub(1);
                self.model_cursor = (self.model_cursor + 1).min(last);
            }
            UiCommand::ToggleModel => {
                if self.tab != Tab::Models {
                    return;
                }
                if let Some(id) = self.selected_model_id().map(str::to_string) {
                    if let Some(active) = self.models.toggle(&id) {
                        tracing::info!(model = %id, active, "Model toggled");
                    }
                }
            }
            UiCommand::ToggleMetric(metric) => {
                if self.tab == Tab::OnChain {
                    self.toggle_metric(metric);
                }
            }
            UiCommand::Regenerate => {}
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // tabs
            Constraint::Min(10),   // body
            Constraint::Length(1), // keybinds
        ])
        .split(frame.area());

    let latest = state.snapshot.latest();
    frame.render_widget(
        StatusBar {
            price: latest.map(|o| o.price),
            volatility: latest.map(|o| o.volatility),
            history_days: state.snapshot.price_data.len(),
            generation: state.generation,
        },
        outer[0],
    );
    frame.render_widget(TabBar { selected: state.tab }, outer[1]);

    match state.tab {
        Tab::Overview => render_overview(frame, state, outer[2]),
        Tab::Forecasting => render_forecasting(frame, state, outer[2]),
        Tab::Models => frame.render_widget(
            ModelListPanel::new(&state.snapshot.models, &state.models, state.model_cursor),
            outer[2],
        ),
        Tab::OnChain => render_on_chain(frame, state, outer[2]),
        Tab::Regimes => {
            frame.render_widget(RegimeTimeline::new(&state.snapshot.regimes), outer[2])
        }
        Tab::Performance => frame.render_widget(
            PerformanceTable::new(&state.snapshot.performance),
            outer[2],
        ),
    }

    frame.render_widget(KeybindBar { tab: state.tab }, outer[3]);
}

fn render_overview(frame: &mut Frame, state: &AppState, area: Rect) {
    let summary = state.summary();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(8),
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    frame.render_widget(
        MetricsCard::new("ETH Price", format!("${:.2}", summary.current_price))
            .change(summary.price_change_pct, 2, true)
            .description("Current Ethereum price"),
        cards[0],
    );
    frame.render_widget(
        MetricsCard::new(
            "Current Volatility",
            format!("{:.2}%", summary.current_volatility * 100.0),
        )
        // rising volatility is shown as adverse
        .change(summary.volatility_change_pct, 1, false)
        .description("Daily realized volatility"),
        cards[1],
    );
    frame.render_widget(
        MetricsCard::new(
            "Active Models",
            format!("{}/{}", summary.active_models, summary.total_models),
        )
        .description("Bayesian models running"),
        cards[2],
    );
    let accuracy = state
        .snapshot
        .performance
        .iter()
        .map(|p| p.interval_accuracy95)
        .fold(f64::NAN, f64::max);
    frame.render_widget(
        MetricsCard::new(
            "Forecast Accuracy",
            if accuracy.is_nan() {
                "---".to_string()
            } else {
                format!("{:.1}%", accuracy * 100.0)
            },
        )
        .description("95% CI accuracy rate"),
        cards[3],
    );

    frame.render_widget(
        VolatilityChart::new(state.visible_history(), &state.snapshot.forecasts),
        rows[1],
    );

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    frame.render_widget(
        PerformanceSummaryPanel::new(&state.snapshot.performance, 3),
        bottom[0],
    );
    frame.render_widget(CurrentRegimePanel::new(summary.regime.as_ref()), bottom[1]);
}

fn render_forecasting(frame: &mut Frame, state: &AppState, area: Rect) {
    let summary = state.summary();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(36)])
        .split(area);
    frame.render_widget(
        VolatilityChart::new(state.visible_history(), &state.snapshot.forecasts).bands(true),
        cols[0],
    );
    frame.render_widget(
        ForecastMetricsPanel::new(summary.current_volatility, summary.forecast_end.as_ref()),
        cols[1],
    );
}

fn render_on_chain(frame: &mut Frame, state: &AppState, area: Rect) {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(state.selected_metrics.iter().map(|_| Constraint::Length(5)));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    frame.render_widget(
        MetricSelectionBar {
            selected: &state.selected_metrics,
        },
        rows[0],
    );

    let readings = metric_readings(&state.snapshot, &state.selected_metrics);
    for (i, reading) in readings.iter().enumerate() {
        let series = metric_series(&state.snapshot, reading.metric);
        frame.render_widget(MetricSparkline::new(&series, reading), rows[i + 1]);
    }
}
