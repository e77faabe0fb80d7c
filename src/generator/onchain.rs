use rand::Rng;

use crate::model::{DailyObservation, OnChainObservation};

#[derive(Debug, Clone, Copy)]
pub struct OnChainDeriverConfig {
    pub base_gas: f64,
    /// Gas added per unit of absolute daily return.
    pub gas_per_abs_return: f64,
    pub gas_noise_width: f64,
    pub base_addresses: f64,
    pub volume_per_address: f64,
    pub address_noise_max: f64,
    pub base_tx_count: f64,
    pub volume_per_tx: f64,
    pub tx_noise_max: f64,
    /// Share of market cap reported as network value.
    pub network_value_ratio: f64,
    pub hash_rate_min: f64,
    pub hash_rate_max: f64,
}

impl Default for OnChainDeriverConfig {
    fn default() -> Self {
        Self {
            base_gas: 15_000_000.0,
            gas_per_abs_return: 500_000_000.0,
            gas_noise_width: 5_000_000.0,
            base_addresses: 400_000.0,
            volume_per_address: 1_000.0,
            address_noise_max: 100_000.0,
            base_tx_count: 1_000_000.0,
            volume_per_tx: 200.0,
            tx_noise_max: 200_000.0,
            network_value_ratio: 0.8,
            hash_rate_min: 200.0,
            hash_rate_max: 250.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OnChainDeriver {
    cfg: OnChainDeriverConfig,
}

impl OnChainDeriver {
    pub fn new(cfg: OnChainDeriverConfig) -> Self {
        Self { cfg }
    }

    /// Derive one record; depends only on `obs` and fresh noise.
    pub fn derive_one<R: Rng + ?Sized>(&self, obs: &DailyObservation, rng: &mut R) -> OnChainObservation {
        let cfg = &self.cfg;
        let gas_used = cfg.base_gas
            + obs.returns.abs() * cfg.gas_per_abs_return
            + (rng.gen::<f64>() - 0.5) * cfg.gas_noise_width;
        let active_addresses = cfg.base_addresses
            + obs.volume / cfg.volume_per_address
            + rng.gen::<f64>() * cfg.address_noise_max;
        let transaction_count =
            cfg.base_tx_count + obs.volume / cfg.volume_per_tx + rng.gen::<f64>() * cfg.tx_noise_max;
        let hash_rate =
            cfg.hash_rate_min + rng.gen::<f64>() * (cfg.hash_rate_max - cfg.hash_rate_min);

        OnChainObservation {
            date: obs.date,
            gas_used: to_count(gas_used),
            active_addresses: to_count(active_addresses),
            transaction_count: to_count(transaction_count),
            network_value: (obs.market_cap * cfg.network_value_ratio).round(),
            hash_rate: hash_rate.round(),
        }
    }

    pub fn derive<R: Rng + ?Sized>(
        &self,
        series: &[DailyObservation],
        rng: &mut R,
    ) -> Vec<OnChainObservation> {
        let out: Vec<OnChainObservation> =
            series.iter().map(|obs| self.derive_one(obs, rng)).collect();
        tracing::debug!(count = out.len(), "Derived on-chain metrics");
        out
    }
}

fn to_count(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

/// [`OnChainDeriver::derive`] with the default parameters.
pub fn derive<R: Rng + ?Sized>(series: &[DailyObservation], rng: &mut R) -> Vec<OnChainObservation> {
    OnChainDeriver::default().derive(series, rng)
}
