use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use super::projection::MetricReading;
use crate::model::{DailyObservation, ForecastPoint};

/// Historical volatility followed by the forecast path, one column per day.
/// Confidence bands are off unless enabled with [`VolatilityChart::bands`].
pub struct VolatilityChart<'a> {
    history: &'a [DailyObservation],
    forecasts: &'a [ForecastPoint],
    show_bands: bool,
}

impl<'a> VolatilityChart<'a> {
    pub fn new(history: &'a [DailyObservation], forecasts: &'a [ForecastPoint]) -> Self {
        Self {
            history,
            forecasts,
            show_bands: false,
        }
    }

    pub fn bands(mut self, show: bool) -> Self {
        self.show_bands = show;
        self
    }
}

struct Column {
    value: f64,
    band95: Option<(f64, f64)>,
    band50: Option<(f64, f64)>,
    is_forecast: bool,
}

impl Widget for VolatilityChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Volatility Forecast (history + 95%/50% bands) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 8 {
            return;
        }

        let mut columns: Vec<Column> = self
            .history
            .iter()
            .map(|o| Column {
                value: o.volatility,
                band95: None,
                band50: None,
                is_forecast: false,
            })
            .chain(self.forecasts.iter().map(|f| Column {
                value: f.predicted,
                band95: Some((f.lower95, f.upper95)),
                band50: Some((f.lower50, f.upper50)),
                is_forecast: true,
            }))
            .collect();
        if columns.is_empty() {
            return;
        }

        let chart_width = inner.width as usize;
        if columns.len() > chart_width {
            columns.drain(..columns.len() - chart_width);
        }

        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for c in &columns {
            min_v = min_v.min(c.value);
            max_v = max_v.max(c.value);
            if self.show_bands {
                if let Some((lo, hi)) = c.band95 {
                    min_v = min_v.min(lo);
                    max_v = max_v.max(hi);
                }
            }
        }
        let range = max_v - min_v;
        let range = if range < 1e-6 { 0.01 } else { range };

        let chart_height = inner.height.saturating_sub(1) as usize; // last row for labels
        let row_for = |v: f64| -> u16 {
            let normalized = ((v - min_v) / range).clamp(0.0, 1.0);
            let from_top = chart_height - 1 - ((normalized * (chart_height - 1) as f64) as usize);
            inner.y + from_top as u16
        };

        for (i, c) in columns.iter().enumerate() {
            let x = inner.x + i as u16;
            if self.show_bands {
                if let Some((lo, hi)) = c.band95 {
                    buf.set_string(x, row_for(lo), "·", Style::default().fg(Color::DarkGray));
                    buf.set_string(x, row_for(hi), "·", Style::default().fg(Color::DarkGray));
                }
                if let Some((lo, hi)) = c.band50 {
                    buf.set_string(x, row_for(lo), "-", Style::default().fg(Color::Blue));
                    buf.set_string(x, row_for(hi), "-", Style::default().fg(Color::Blue));
                }
            }
            let color = if c.is_forecast {
                Color::Yellow
            } else {
                Color::Cyan
            };
            buf.set_string(x, row_for(c.value), "●", Style::default().fg(color));
        }

        let label_y = inner.y + inner.height - 1;
        buf.set_string(
            inner.x,
            inner.y,
            format!("{:.2}%", max_v * 100.0),
            Style::default().fg(Color::DarkGray),
        );
        let legend = Line::from(vec![
            Span::styled(format!("{:.2}%  ", min_v * 100.0), Style::default().fg(Color::DarkGray)),
            Span::styled("● historical ", Style::default().fg(Color::Cyan)),
            Span::styled("● forecast", Style::default().fg(Color::Yellow)),
        ]);
        buf.set_line(inner.x, label_y, &legend, inner.width);
    }
}

const SPARK_LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// One on-chain series with its latest value and day-over-day change.
pub struct MetricSparkline<'a> {
    values: &'a [f64],
    reading: &'a MetricReading,
}

impl<'a> MetricSparkline<'a> {
    pub fn new(values: &'a [f64], reading: &'a MetricReading) -> Self {
        Self { values, reading }
    }
}

impl Widget for MetricSparkline<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let metric = self.reading.metric;
        let change = match self.reading.change_pct {
            Some(pct) => Span::styled(
                format!(" {}{:.1}% 24h ", if pct >= 0.0 { "+" } else { "" }, pct),
                Style::default().fg(if pct >= 0.0 { Color::Green } else { Color::Red }),
            ),
            None => Span::styled(" --- ", Style::default().fg(Color::DarkGray)),
        };
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(format!(
                    " {}: {:.2} {} ",
                    metric.label(),
                    self.reading.latest,
                    metric.unit()
                )),
                change,
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.values.is_empty() || inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = inner.width as usize;
        let visible = &self.values[self.values.len().saturating_sub(width)..];
        let min_v = visible.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_v = visible.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = (max_v - min_v).max(f64::EPSILON);

        let bottom = inner.y + inner.height - 1;
        for (i, v) in visible.iter().enumerate() {
            let level = (((v - min_v) / range) * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
            buf.set_string(
                inner.x + i as u16,
                bottom,
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)],
                Style::default().fg(Color::Cyan),
            );
        }
    }
}
