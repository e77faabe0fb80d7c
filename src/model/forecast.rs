use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Point forecast with nested 50% and 95% credible bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower95: f64,
    pub upper95: f64,
    pub lower50: f64,
    pub upper50: f64,
}

impl ForecastPoint {
    pub fn width95(&self) -> f64 {
        self.upper95 - self.lower95
    }

    pub fn width50(&self) -> f64 {
        self.upper50 - self.lower50
    }

    /// `lower95 <= lower50 <= predicted <= upper50 <= upper95`
    pub fn bands_nested(&self) -> bool {
        self.lower95 <= self.lower50
            && self.lower50 <= self.predicted
            && self.predicted <= self.upper50
            && self.upper50 <= self.upper95
    }
}
