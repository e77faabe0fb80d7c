use std::collections::HashMap;

use chrono::NaiveDate;

use super::model_activity::ModelActivity;
use super::OnChainMetric;
use crate::model::{DailyObservation, RegimeClass};
use crate::snapshot::DashboardSnapshot;

/// Percent change from `prev` to `current`; `None` when `prev` is zero.
pub fn pct_change(prev: f64, current: f64) -> Option<f64> {
    if prev.abs() <= f64::EPSILON {
        return None;
    }
    Some((current - prev) / prev * 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegimeSummary {
    pub name: String,
    pub classification: RegimeClass,
    pub probability: f64,
    pub avg_volatility: f64,
    pub start_date: NaiveDate,
    pub duration_days: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub horizon_days: usize,
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower95: f64,
    pub upper95: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewSummary {
    pub current_price: f64,
    pub price_change_pct: f64,
    pub current_volatility: f64,
    pub volatility_change_pct: f64,
    pub active_models: usize,
    pub total_models: usize,
    pub regime: Option<RegimeSummary>,
    pub forecast_end: Option<ForecastSummary>,
}

impl OverviewSummary {
    pub fn new(snapshot: &DashboardSnapshot, activity: &ModelActivity) -> Self {
        let series = &snapshot.price_data;
        let last = series.last();
        let prev = series.len().checked_sub(2).and_then(|i| series.get(i));

        let (price_change_pct, volatility_change_pct) = match (prev, last) {
            (Some(p), Some(l)) => (
                pct_change(p.price, l.price).unwrap_or(0.0),
                pct_change(p.volatility, l.volatility).unwrap_or(0.0),
            ),
            _ => (0.0, 0.0),
        };

        let regime = snapshot.current_regime().map(|r| RegimeSummary {
            name: r.name.clone(),
            classification: r.classification,
            probability: r.probability,
            avg_volatility: r.avg_volatility,
            start_date: r.start_date,
            duration_days: r.duration_days(),
        });
        let forecast_end = snapshot.forecasts.last().map(|f| ForecastSummary {
            horizon_days: snapshot.forecasts.len(),
            date: f.date,
            predicted: f.predicted,
            lower95: f.lower95,
            upper95: f.upper95,
        });

        Self {
            current_price: last.map(|o| o.price).unwrap_or(0.0),
            price_change_pct,
            current_volatility: last.map(|o| o.volatility).unwrap_or(0.0),
            volatility_change_pct,
            active_models: snapshot
                .models
                .iter()
                .filter(|m| activity.is_active(&m.id))
                .count(),
            total_models: snapshot.models.len(),
            regime,
            forecast_end,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    pub metric: OnChainMetric,
    pub latest: f64,
    /// Day-over-day change; `None` with fewer than two points or a zero base.
    pub change_pct: Option<f64>,
}

/// Values of `metric` in on-chain date order, joined to the price series by date.
pub fn metric_series(snapshot: &DashboardSnapshot, metric: OnChainMetric) -> Vec<f64> {
    let by_date: HashMap<NaiveDate, &DailyObservation> =
        snapshot.price_data.iter().map(|o| (o.date, o)).collect();
    snapshot
        .on_chain
        .iter()
        .filter_map(|oc| by_date.get(&oc.date).map(|daily| metric.value(oc, daily)))
        .collect()
}

pub fn metric_readings(snapshot: &DashboardSnapshot, metrics: &[OnChainMetric]) -> Vec<MetricReading> {
    metrics
        .iter()
        .filter_map(|&metric| {
            let series = metric_series(snapshot, metric);
            let latest = *series.last()?;
            let change_pct = series
                .len()
                .checked_sub(2)
                .and_then(|i| pct_change(series[i], latest));
            Some(MetricReading {
                metric,
                latest,
                change_pct,
            })
        })
        .collect()
}
