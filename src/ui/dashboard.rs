use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Widget},
};

use super::model_activity::ModelActivity;
use super::projection::{ForecastSummary, RegimeSummary};
use super::{OnChainMetric, Tab};
use crate::catalog::{best_model, PerformanceMetric};
use crate::model::{ModelDescriptor, PerformanceRecord, RegimeClass, VolatilityRegime};

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

pub fn regime_color(class: RegimeClass) -> Color {
    match class {
        RegimeClass::Low => Color::Green,
        RegimeClass::Medium => Color::Blue,
        RegimeClass::High => Color::Yellow,
        RegimeClass::Extreme => Color::Red,
    }
}

pub struct StatusBar {
    pub price: Option<f64>,
    pub volatility: Option<f64>,
    pub history_days: usize,
    pub generation: u64,
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let price = self
            .price
            .map(|p| format!("${:.2}", p))
            .unwrap_or_else(|| "---".to_string());
        let vol = self
            .volatility
            .map(|v| format!("{:.2}%", v * 100.0))
            .unwrap_or_else(|| "---".to_string());

        let line = Line::from(vec![
            Span::styled(
                " sandbox-ethvol ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled("ETH ", Style::default().fg(Color::Cyan)),
            Span::styled(price, Style::default().fg(Color::White)),
            Span::styled(" | vol ", Style::default().fg(Color::DarkGray)),
            Span::styled(vol, Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" | {} days | gen {}", self.history_days, self.generation),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct TabBar {
    pub selected: Tab,
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let titles: Vec<String> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{} {}", i + 1, t.title()))
            .collect();
        Tabs::new(titles)
            .select(self.selected.index())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .render(area, buf);
    }
}

pub struct MetricsCard<'a> {
    title: &'a str,
    value: String,
    change: Option<(f64, usize, bool)>,
    description: &'a str,
}

impl<'a> MetricsCard<'a> {
    pub fn new(title: &'a str, value: String) -> Self {
        Self {
            title,
            value,
            change: None,
            description: "",
        }
    }

    /// `up_is_good` picks the color for a positive change.
    pub fn change(mut self, pct: f64, decimals: usize, up_is_good: bool) -> Self {
        self.change = Some((pct, decimals, up_is_good));
        self
    }

    pub fn description(mut self, text: &'a str) -> Self {
        self.description = text;
        self
    }
}

impl Widget for MetricsCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut value_line = vec![Span::styled(
            self.value,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some((pct, decimals, up_is_good)) = self.change {
            let good = (pct >= 0.0) == up_is_good;
            value_line.push(Span::styled(
                format!(
                    "  {}{:.*}%",
                    if pct >= 0.0 { "+" } else { "" },
                    decimals,
                    pct
                ),
                Style::default().fg(if good { Color::Green } else { Color::Red }),
            ));
        }
        let lines = vec![
            Line::from(value_line),
            Line::from(Span::styled(
                self.description,
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines)
            .block(panel(self.title))
            .render(area, buf);
    }
}

pub struct PerformanceSummaryPanel<'a> {
    records: &'a [PerformanceRecord],
    limit: usize,
}

impl<'a> PerformanceSummaryPanel<'a> {
    pub fn new(records: &'a [PerformanceRecord], limit: usize) -> Self {
        Self { records, limit }
    }
}

impl Widget for PerformanceSummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .records
            .iter()
            .take(self.limit)
            .map(|p| {
                Line::from(vec![
                    Span::styled(format!("{:<22}", p.model_name), Style::default().fg(Color::White)),
                    Span::styled(
                        format!(" RMSE {:.4} ", p.rmse),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!(" {:.1}% 95% CI", p.interval_accuracy95 * 100.0),
                        Style::default().fg(Color::Green),
                    ),
                ])
            })
            .collect();
        Paragraph::new(lines)
            .block(panel("Model Performance Summary"))
            .render(area, buf);
    }
}

pub struct CurrentRegimePanel<'a> {
    regime: Option<&'a RegimeSummary>,
}

impl<'a> CurrentRegimePanel<'a> {
    pub fn new(regime: Option<&'a RegimeSummary>) -> Self {
        Self { regime }
    }
}

impl Widget for CurrentRegimePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = match self.regime {
            Some(r) => vec![
                Line::from(vec![
                    Span::styled(
                        r.name.clone(),
                        Style::default()
                            .fg(regime_color(r.classification))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {:.1}%", r.probability * 100.0),
                        Style::default().fg(Color::White),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("Average Volatility: {:.2}%", r.avg_volatility * 100.0),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    format!("Since {} ({} days)", r.start_date, r.duration_days),
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            None => vec![Line::from(Span::styled(
                "No regime data",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        Paragraph::new(lines)
            .block(panel("Current Volatility Regime"))
            .render(area, buf);
    }
}

pub struct ForecastMetricsPanel<'a> {
    current_volatility: f64,
    forecast_end: Option<&'a ForecastSummary>,
}

impl<'a> ForecastMetricsPanel<'a> {
    pub fn new(current_volatility: f64, forecast_end: Option<&'a ForecastSummary>) -> Self {
        Self {
            current_volatility,
            forecast_end,
        }
    }
}

impl Widget for ForecastMetricsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<16}", label), Style::default().fg(Color::DarkGray)),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        };
        let mut lines = vec![row(
            "Current:",
            format!("{:.2}%", self.current_volatility * 100.0),
        )];
        if let Some(f) = self.forecast_end {
            lines.push(row("Horizon:", format!("{} days", f.horizon_days)));
            lines.push(row("Forecast end:", f.date.to_string()));
            lines.push(row("Predicted:", format!("{:.2}%", f.predicted * 100.0)));
            lines.push(row(
                "95% CI:",
                format!("{:.2}% - {:.2}%", f.lower95 * 100.0, f.upper95 * 100.0),
            ));
        }
        Paragraph::new(lines)
            .block(panel("Forecast Metrics"))
            .render(area, buf);
    }
}

pub struct ModelListPanel<'a> {
    models: &'a [ModelDescriptor],
    activity: &'a ModelActivity,
    cursor: usize,
}

impl<'a> ModelListPanel<'a> {
    pub fn new(models: &'a [ModelDescriptor], activity: &'a ModelActivity, cursor: usize) -> Self {
        Self {
            models,
            activity,
            cursor,
        }
    }
}

impl Widget for ModelListPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        for (i, m) in self.models.iter().enumerate() {
            let active = self.activity.is_active(&m.id);
            let marker = if i == self.cursor { "> " } else { "  " };
            let name_style = if i == self.cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(
                    if active { "[ON ] " } else { "[OFF] " },
                    Style::default().fg(if active { Color::Green } else { Color::DarkGray }),
                ),
                Span::styled(m.name.clone(), name_style),
                Span::styled(
                    format!("  ({})  updated {}", m.model_type.as_str(), m.last_updated),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("      {}", m.description),
                Style::default().fg(Color::DarkGray),
            )));
            let params = m
                .parameters
                .iter()
                .map(|(k, v)| format!("{}={:.6}", k, v))
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(Line::from(Span::styled(
                format!("      {}", params),
                Style::default().fg(Color::White),
            )));
            lines.push(Line::default());
        }
        Paragraph::new(lines)
            .block(panel("Bayesian Models"))
            .render(area, buf);
    }
}

pub struct MetricSelectionBar<'a> {
    pub selected: &'a [OnChainMetric],
}

impl Widget for MetricSelectionBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = OnChainMetric::ALL
            .iter()
            .map(|m| {
                let on = self.selected.contains(m);
                Span::styled(
                    format!(" {} ", m.key()),
                    if on {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    },
                )
            })
            .collect();
        Paragraph::new(Line::from(spans))
            .block(panel("On-Chain Metrics Selection"))
            .render(area, buf);
    }
}

pub struct RegimeTimeline<'a> {
    regimes: &'a [VolatilityRegime],
}

impl<'a> RegimeTimeline<'a> {
    pub fn new(regimes: &'a [VolatilityRegime]) -> Self {
        Self { regimes }
    }
}

impl Widget for RegimeTimeline<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(vec!["Id", "Regime", "Start", "End", "Days", "Avg Vol", "Prob"])
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));
        // newest first
        let rows = self.regimes.iter().rev().map(|r| {
            Row::new(vec![
                Cell::from(r.id.clone()),
                Cell::from(r.name.clone())
                    .style(Style::default().fg(regime_color(r.classification))),
                Cell::from(r.start_date.to_string()),
                Cell::from(r.end_date.to_string()),
                Cell::from(r.duration_days().to_string()),
                Cell::from(format!("{:.2}%", r.avg_volatility * 100.0)),
                Cell::from(format!("{:.1}%", r.probability * 100.0)),
            ])
        });
        Table::new(
            rows,
            [
                Constraint::Length(11),
                Constraint::Min(26),
                Constraint::Length(11),
                Constraint::Length(11),
                Constraint::Length(5),
                Constraint::Length(8),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(panel("Volatility Regime Timeline"))
        .render(area, buf);
    }
}

pub struct PerformanceTable<'a> {
    records: &'a [PerformanceRecord],
}

impl<'a> PerformanceTable<'a> {
    pub fn new(records: &'a [PerformanceRecord]) -> Self {
        Self { records }
    }
}

impl Widget for PerformanceTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut header_cells = vec!["Model".to_string()];
        header_cells.extend(PerformanceMetric::ALL.iter().map(|m| m.label().to_string()));
        let header = Row::new(header_cells)
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

        let winners: Vec<Option<&str>> = PerformanceMetric::ALL
            .iter()
            .map(|&m| best_model(self.records, m).map(|r| r.model_name.as_str()))
            .collect();

        let rows = self.records.iter().map(|r| {
            let mut cells = vec![Cell::from(r.model_name.clone())];
            for (metric, winner) in PerformanceMetric::ALL.iter().zip(&winners) {
                let text = metric.format_value(metric.value(r));
                if *winner == Some(r.model_name.as_str()) {
                    cells.push(
                        Cell::from(format!("{} *", text))
                            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    );
                } else {
                    cells.push(Cell::from(text));
                }
            }
            Row::new(cells)
        });

        let mut widths = vec![Constraint::Min(22)];
        widths.extend(PerformanceMetric::ALL.iter().map(|_| Constraint::Length(16)));
        Table::new(rows, widths)
            .header(header)
            .block(panel("Model Performance Comparison (* best)"))
            .render(area, buf);
    }
}

pub struct KeybindBar {
    pub tab: Tab,
}

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
        let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));
        let mut spans = vec![
            key(" [Q]"),
            text("uit  "),
            key("[1-6]"),
            text(" tabs  "),
            key("[R]"),
            text("egenerate  "),
        ];
        match self.tab {
            Tab::Models => {
                spans.push(key("[J/K]"));
                spans.push(text(" move  "));
                spans.push(key("[Space]"));
                spans.push(text(" toggle model"));
            }
            Tab::OnChain => {
                spans.push(key("[G/A/T/N/H/V]"));
                spans.push(text(" toggle series"));
            }
            _ => {}
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
