use chrono::{NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::config::GeneratorConfig;
use crate::generator::{OnChainDeriver, PricePathSimulator, VolatilityForecaster};
use crate::generator::regime::segment;
use crate::model::{
    DailyObservation, ForecastPoint, ModelDescriptor, OnChainObservation, PerformanceRecord,
    VolatilityRegime,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotParams {
    pub history_days: usize,
    pub forecast_horizon_days: usize,
}

impl Default for SnapshotParams {
    fn default() -> Self {
        Self {
            history_days: 365,
            forecast_horizon_days: 30,
        }
    }
}

impl From<&GeneratorConfig> for SnapshotParams {
    fn from(cfg: &GeneratorConfig) -> Self {
        Self {
            history_days: cfg.history_days,
            forecast_horizon_days: cfg.forecast_horizon_days,
        }
    }
}

/// Seeded when `seed` is given, otherwise drawn from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Everything the dashboard shows, generated from a single price path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: NaiveDateTime,
    pub price_data: Vec<DailyObservation>,
    pub on_chain: Vec<OnChainObservation>,
    pub forecasts: Vec<ForecastPoint>,
    pub regimes: Vec<VolatilityRegime>,
    pub models: Vec<ModelDescriptor>,
    pub performance: Vec<PerformanceRecord>,
}

impl DashboardSnapshot {
    /// Simulate once, then derive on-chain data, the forecast and regimes from
    /// the same read-only series.
    ///
    /// Panics on zero lengths; `Config::validate` and the export CLI bound them first.
    pub fn generate<R: Rng + ?Sized>(
        params: SnapshotParams,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Self {
        // timestamps carry whole seconds only
        let now = now.with_nanosecond(0).unwrap_or(now);
        let today = now.date();
        let price_data = PricePathSimulator::default().simulate(params.history_days, today, rng);
        let on_chain = OnChainDeriver::default().derive(&price_data, rng);
        let forecasts =
            VolatilityForecaster::default().forecast(&price_data, params.forecast_horizon_days);
        let regimes = segment(&price_data, rng);

        tracing::info!(
            history_days = params.history_days,
            horizon_days = params.forecast_horizon_days,
            regimes = regimes.len(),
            "Generated dashboard snapshot"
        );

        Self {
            generated_at: now,
            price_data,
            on_chain,
            forecasts,
            regimes,
            models: catalog::list_models(now),
            performance: catalog::list_performance(),
        }
    }

    pub fn latest(&self) -> Option<&DailyObservation> {
        self.price_data.last()
    }

    pub fn current_regime(&self) -> Option<&VolatilityRegime> {
        self.regimes.last()
    }
}
