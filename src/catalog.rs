use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::model::{ModelDescriptor, ModelType, PerformanceRecord};

fn params(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Built-in model descriptors, stamped relative to `now`.
pub fn list_models(now: NaiveDateTime) -> Vec<ModelDescriptor> {
    let now = now.with_nanosecond(0).unwrap_or(now);
    vec![
        ModelDescriptor {
            id: "garch".to_string(),
            name: "Bayesian GARCH(1,1)".to_string(),
            model_type: ModelType::Garch,
            description:
                "Generalized Autoregressive Conditional Heteroskedasticity with Bayesian inference"
                    .to_string(),
            parameters: params(&[("alpha", 0.085), ("beta", 0.891), ("omega", 0.000023)]),
            is_active: true,
            last_updated: now,
        },
        ModelDescriptor {
            id: "kalman".to_string(),
            name: "Kalman Filter + ARCH".to_string(),
            model_type: ModelType::Kalman,
            description: "State-space model with time-varying volatility using Kalman filtering"
                .to_string(),
            parameters: params(&[
                ("processNoise", 0.001),
                ("observationNoise", 0.025),
                ("initialState", 0.03),
            ]),
            is_active: true,
            last_updated: now - Duration::days(1),
        },
        ModelDescriptor {
            id: "gp".to_string(),
            name: "Gaussian Process".to_string(),
            model_type: ModelType::Gp,
            description: "Non-parametric Bayesian approach with RBF kernel for volatility modeling"
                .to_string(),
            parameters: params(&[
                ("lengthScale", 12.5),
                ("outputScale", 0.008),
                ("noiseLevel", 0.002),
            ]),
            is_active: false,
            last_updated: now - Duration::days(3),
        },
        ModelDescriptor {
            id: "regime".to_string(),
            name: "Markov Regime Switching".to_string(),
            model_type: ModelType::RegimeSwitching,
            description: "Two-state Markov model capturing volatility regime changes".to_string(),
            parameters: params(&[
                ("lowVolRegime", 0.018),
                ("highVolRegime", 0.045),
                ("transitionProb", 0.95),
            ]),
            is_active: true,
            last_updated: now - Duration::days(2),
        },
    ]
}

fn record(
    model_name: &str,
    rmse: f64,
    log_likelihood: f64,
    aic: f64,
    bic: f64,
    interval_accuracy95: f64,
    interval_accuracy50: f64,
) -> PerformanceRecord {
    PerformanceRecord {
        model_name: model_name.to_string(),
        rmse,
        log_likelihood,
        aic,
        bic,
        interval_accuracy95,
        interval_accuracy50,
    }
}

pub fn list_performance() -> Vec<PerformanceRecord> {
    vec![
        record("Bayesian GARCH(1,1)", 0.0087, 2847.3, -5686.6, -5671.2, 0.943, 0.487),
        record("Kalman Filter + ARCH", 0.0092, 2831.7, -5655.4, -5640.1, 0.931, 0.502),
        record("Gaussian Process", 0.0095, 2823.1, -5638.2, -5615.8, 0.925, 0.518),
        record("Regime Switching", 0.0089, 2841.9, -5673.8, -5651.4, 0.937, 0.493),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerformanceMetric {
    Rmse,
    LogLikelihood,
    Aic,
    Bic,
    IntervalAccuracy95,
    IntervalAccuracy50,
}

impl PerformanceMetric {
    pub const ALL: [PerformanceMetric; 6] = [
        Self::Rmse,
        Self::LogLikelihood,
        Self::Aic,
        Self::Bic,
        Self::IntervalAccuracy95,
        Self::IntervalAccuracy50,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rmse => "RMSE",
            Self::LogLikelihood => "Log-Likelihood",
            Self::Aic => "AIC",
            Self::Bic => "BIC",
            Self::IntervalAccuracy95 => "95% CI Accuracy",
            Self::IntervalAccuracy50 => "50% CI Accuracy",
        }
    }

    pub fn lower_is_better(self) -> bool {
        matches!(self, Self::Rmse | Self::Aic | Self::Bic)
    }

    pub fn value(self, record: &PerformanceRecord) -> f64 {
        match self {
            Self::Rmse => record.rmse,
            Self::LogLikelihood => record.log_likelihood,
            Self::Aic => record.aic,
            Self::Bic => record.bic,
            Self::IntervalAccuracy95 => record.interval_accuracy95,
            Self::IntervalAccuracy50 => record.interval_accuracy50,
        }
    }

    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::Rmse => format!("{:.4}", value),
            Self::LogLikelihood | Self::Aic | Self::Bic => format!("{:.1}", value),
            Self::IntervalAccuracy95 | Self::IntervalAccuracy50 => {
                format!("{:.1}%", value * 100.0)
            }
        }
    }
}

/// Winning record for `metric`; the first record wins ties.
pub fn best_model(records: &[PerformanceRecord], metric: PerformanceMetric) -> Option<&PerformanceRecord> {
    let mut best: Option<&PerformanceRecord> = None;
    for r in records {
        let better = match best {
            None => true,
            Some(b) if metric.lower_is_better() => metric.value(r) < metric.value(b),
            Some(b) => metric.value(r) > metric.value(b),
        };
        if better {
            best = Some(r);
        }
    }
    best
}
