use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "ARCH")]
    Arch,
    #[serde(rename = "GARCH")]
    Garch,
    Kalman,
    #[serde(rename = "GP")]
    Gp,
    RegimeSwitching,
}

impl ModelType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arch => "ARCH",
            Self::Garch => "GARCH",
            Self::Kalman => "Kalman",
            Self::Gp => "GP",
            Self::RegimeSwitching => "RegimeSwitching",
        }
    }
}

/// Static description of a volatility model.
///
/// `is_active` is the catalog default only; live toggling belongs to
/// [`crate::ui::model_activity::ModelActivity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub model_type: ModelType,
    pub description: String,
    pub parameters: BTreeMap<String, f64>,
    pub is_active: bool,
    pub last_updated: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub model_name: String,
    pub rmse: f64,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    pub interval_accuracy95: f64,
    pub interval_accuracy50: f64,
}
