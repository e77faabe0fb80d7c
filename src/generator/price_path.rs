use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::generator::rounding::{round_bp, round_cents, round_to};
use crate::model::DailyObservation;

#[derive(Debug, Clone, Copy)]
pub struct PricePathConfig {
    pub initial_price: f64,
    pub initial_volatility: f64,
    /// Weight on yesterday's volatility in the clustering update.
    pub persistence: f64,
    pub long_run_volatility: f64,
    pub shock_half_width: f64,
    pub volatility_floor: f64,
    /// Days per radian of the cyclical bull/bear signal.
    pub regime_cycle_days: f64,
    pub regime_threshold: f64,
    pub bull_drift: f64,
    pub bear_drift: f64,
    pub volume_min: f64,
    pub volume_max: f64,
    /// Circulating supply used for market cap.
    pub supply: f64,
}

impl Default for PricePathConfig {
    fn default() -> Self {
        Self {
            initial_price: 2500.0,
            initial_volatility: 0.03,
            persistence: 0.95,
            long_run_volatility: 0.03,
            shock_half_width: 0.005,
            volatility_floor: 0.01,
            regime_cycle_days: 50.0,
            regime_threshold: 0.6,
            bull_drift: 0.001,
            bear_drift: -0.0005,
            volume_min: 50_000.0,
            volume_max: 250_000.0,
            supply: 120_000_000.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PricePathSimulator {
    cfg: PricePathConfig,
}

impl PricePathSimulator {
    pub fn new(cfg: PricePathConfig) -> Self {
        Self { cfg }
    }

    /// Cyclical bull/bear signal for day `index`, in `[0.4, 1.0]`.
    pub fn regime_signal(&self, index: usize) -> f64 {
        0.7 + 0.3 * (index as f64 / self.cfg.regime_cycle_days).sin()
    }

    fn drift_for(&self, index: usize) -> f64 {
        if self.regime_signal(index) > self.cfg.regime_threshold {
            self.cfg.bull_drift
        } else {
            self.cfg.bear_drift
        }
    }

    /// Simulate `days` consecutive daily observations ending the day before `today`.
    ///
    /// Panics when `days` is zero.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        days: usize,
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<DailyObservation> {
        assert!(days > 0, "price path needs at least one day");
        let start = today - Days::new(days as u64);

        let cfg = &self.cfg;
        let mut price = cfg.initial_price;
        let mut volatility = cfg.initial_volatility;
        let mut out = Vec::with_capacity(days);

        for i in 0..days {
            let shock = (rng.gen::<f64>() - 0.5) * 2.0 * cfg.shock_half_width;
            volatility = (cfg.persistence * volatility
                + (1.0 - cfg.persistence) * cfg.long_run_volatility
                + shock)
                .max(cfg.volatility_floor);

            let returns = self.drift_for(i) + (rng.gen::<f64>() - 0.5) * volatility;
            price *= 1.0 + returns;

            let volume = cfg.volume_min + rng.gen::<f64>() * (cfg.volume_max - cfg.volume_min);
            let market_cap = price * cfg.supply;

            out.push(DailyObservation {
                date: start + Days::new(i as u64),
                price: round_cents(price),
                volume: round_to(volume, 0),
                market_cap: round_to(market_cap, 0),
                returns: round_bp(returns),
                volatility: round_bp(volatility),
            });
        }

        tracing::debug!(
            days,
            first = %out[0].date,
            last_price = out[days - 1].price,
            "Simulated price path"
        );
        out
    }
}

/// [`PricePathSimulator::simulate`] with the default parameters.
pub fn simulate<R: Rng + ?Sized>(days: usize, today: NaiveDate, rng: &mut R) -> Vec<DailyObservation> {
    PricePathSimulator::default().simulate(days, today, rng)
}
