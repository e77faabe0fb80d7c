use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const LOW_VOL_CEILING: f64 = 0.02;
pub const MEDIUM_VOL_CEILING: f64 = 0.03;
pub const HIGH_VOL_CEILING: f64 = 0.05;

/// Volatility bucket, ordered `Low < Medium < High < Extreme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegimeClass {
    Low,
    Medium,
    High,
    Extreme,
}

impl RegimeClass {
    /// Thresholds are checked in order; anything at or above 0.05 is extreme.
    pub fn classify(volatility: f64) -> Self {
        if volatility < LOW_VOL_CEILING {
            Self::Low
        } else if volatility < MEDIUM_VOL_CEILING {
            Self::Medium
        } else if volatility < HIGH_VOL_CEILING {
            Self::High
        } else {
            Self::Extreme
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Extreme => "Extreme",
        }
    }

    pub fn period_name(self) -> String {
        format!("{} Volatility Period", self.label())
    }

    /// Half-open volatility range `[lower, upper)` covered by this class.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Low => (0.0, LOW_VOL_CEILING),
            Self::Medium => (LOW_VOL_CEILING, MEDIUM_VOL_CEILING),
            Self::High => (MEDIUM_VOL_CEILING, HIGH_VOL_CEILING),
            Self::Extreme => (HIGH_VOL_CEILING, f64::INFINITY),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityRegime {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub avg_volatility: f64,
    pub classification: RegimeClass,
    /// Placeholder confidence weight in `(0.7, 1.0]`; not a fitted statistic.
    pub probability: f64,
}

impl VolatilityRegime {
    /// Whole days between start and end; a single-day regime lasts 0 days.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_ordered_thresholds() {
        assert_eq!(RegimeClass::classify(0.0), RegimeClass::Low);
        assert_eq!(RegimeClass::classify(0.0199), RegimeClass::Low);
        assert_eq!(RegimeClass::classify(0.02), RegimeClass::Medium);
        assert_eq!(RegimeClass::classify(0.03), RegimeClass::High);
        assert_eq!(RegimeClass::classify(0.0499), RegimeClass::High);
        assert_eq!(RegimeClass::classify(0.05), RegimeClass::Extreme);
    }

    #[test]
    fn classes_are_ordered() {
        assert!(RegimeClass::Low < RegimeClass::Medium);
        assert!(RegimeClass::Medium < RegimeClass::High);
        assert!(RegimeClass::High < RegimeClass::Extreme);
    }

    #[test]
    fn classification_serializes_lowercase() {
        let json = serde_json::to_string(&RegimeClass::Extreme).unwrap();
        assert_eq!(json, "\"extreme\"");
        assert_eq!(RegimeClass::Medium.period_name(), "Medium Volatility Period");
    }
}
