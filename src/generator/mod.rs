//! Synthetic series generators.
//!
//! The price path is produced once and then read by the on-chain deriver, the
//! forecaster and the regime segmenter. None of them mutate their input.

pub mod forecast;
pub mod onchain;
pub mod price_path;
pub mod regime;
pub mod rounding;

pub use forecast::{forecast, trailing_mean_volatility, VolatilityForecaster, VolatilityForecasterConfig};
pub use onchain::{derive, OnChainDeriver, OnChainDeriverConfig};
pub use price_path::{simulate, PricePathConfig, PricePathSimulator};
pub use regime::{segment, RegimeBuilder, RegimeSegmenter};
