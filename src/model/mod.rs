pub mod catalog;
pub mod forecast;
pub mod observation;
pub mod regime;

pub use catalog::{ModelDescriptor, ModelType, PerformanceRecord};
pub use forecast::ForecastPoint;
pub use observation::{DailyObservation, OnChainObservation};
pub use regime::{RegimeClass, VolatilityRegime};
