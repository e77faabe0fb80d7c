use chrono::{Days, NaiveDate};

use crate::generator::rounding::round_bp;
use crate::model::{DailyObservation, ForecastPoint};

#[derive(Debug, Clone, Copy)]
pub struct VolatilityForecasterConfig {
    /// Trailing observations averaged into the starting level.
    pub lookback: usize,
    pub mean_reversion_rate: f64,
    pub long_term_mean: f64,
    pub base_uncertainty: f64,
    /// Uncertainty added at the final horizon step.
    pub horizon_uncertainty: f64,
    pub z95: f64,
    pub z50: f64,
}

impl Default for VolatilityForecasterConfig {
    fn default() -> Self {
        Self {
            lookback: 30,
            mean_reversion_rate: 0.95,
            long_term_mean: 0.025,
            base_uncertainty: 0.002,
            horizon_uncertainty: 0.005,
            z95: 1.96,
            z50: 0.67,
        }
    }
}

/// Mean volatility over the last `lookback` observations, or all of them when
/// fewer are available. `None` for an empty series.
pub fn trailing_mean_volatility(series: &[DailyObservation], lookback: usize) -> Option<f64> {
    let take = lookback.max(1).min(series.len());
    if take == 0 {
        return None;
    }
    let tail = &series[series.len() - take..];
    Some(tail.iter().map(|o| o.volatility).sum::<f64>() / take as f64)
}

#[derive(Debug, Clone, Default)]
pub struct VolatilityForecaster {
    cfg: VolatilityForecasterConfig,
}

impl VolatilityForecaster {
    pub fn new(cfg: VolatilityForecasterConfig) -> Self {
        Self { cfg }
    }

    /// Unrounded point forecast `step` days ahead of a starting level.
    pub fn predicted_at(&self, start_level: f64, step: usize) -> f64 {
        let decay = self.cfg.mean_reversion_rate.powi(step as i32);
        start_level * decay + self.cfg.long_term_mean * (1.0 - decay)
    }

    /// Band half-width scale; grows with `sqrt(step / horizon)`.
    pub fn uncertainty_at(&self, step: usize, horizon_days: usize) -> f64 {
        let time_factor = (step as f64 / horizon_days as f64).sqrt();
        self.cfg.horizon_uncertainty * time_factor + self.cfg.base_uncertainty
    }

    pub fn point_at(
        &self,
        start_level: f64,
        step: usize,
        horizon_days: usize,
        date: NaiveDate,
    ) -> ForecastPoint {
        let predicted = self.predicted_at(start_level, step);
        let uncertainty = self.uncertainty_at(step, horizon_days);
        let half95 = self.cfg.z95 * uncertainty;
        let half50 = self.cfg.z50 * uncertainty;
        ForecastPoint {
            date,
            predicted: round_bp(predicted),
            lower95: round_bp(predicted - half95),
            upper95: round_bp(predicted + half95),
            lower50: round_bp(predicted - half50),
            upper50: round_bp(predicted + half50),
        }
    }

    /// Forecast `horizon_days` points starting the day after the last observation.
    ///
    /// Panics on an empty series or a zero horizon.
    pub fn forecast(&self, series: &[DailyObservation], horizon_days: usize) -> Vec<ForecastPoint> {
        assert!(horizon_days > 0, "forecast horizon must be at least one day");
        assert!(!series.is_empty(), "forecast needs a non-empty history");
        let last_date = series[series.len() - 1].date;
        let start_level = trailing_mean_volatility(series, self.cfg.lookback)
            .unwrap_or(self.cfg.long_term_mean);

        let out: Vec<ForecastPoint> = (1..=horizon_days)
            .map(|step| {
                let date = last_date + Days::new(step as u64);
                self.point_at(start_level, step, horizon_days, date)
            })
            .collect();
        tracing::debug!(
            horizon_days,
            start_level,
            final_predicted = out[horizon_days - 1].predicted,
            "Built volatility forecast"
        );
        out
    }
}

/// [`VolatilityForecaster::forecast`] with the default parameters.
pub fn forecast(series: &[DailyObservation], horizon_days: usize) -> Vec<ForecastPoint> {
    VolatilityForecaster::default().forecast(series, horizon_days)
}
