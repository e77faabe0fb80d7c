use chrono::NaiveDate;
use rand::Rng;

use crate::model::{DailyObservation, RegimeClass, VolatilityRegime};

const PROBABILITY_SPAN: f64 = 0.3;

/// Confidence weight drawn uniformly from `(0.7, 1.0]`.
pub fn sample_probability<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // gen::<f64>() is in [0, 1), so the result never reaches the floor.
    1.0 - PROBABILITY_SPAN * rng.gen::<f64>()
}

/// Accumulates one still-open regime.
#[derive(Debug, Clone)]
pub struct RegimeBuilder {
    id: String,
    classification: RegimeClass,
    start_date: NaiveDate,
    end_date: NaiveDate,
    probability: f64,
    volatility_sum: f64,
    count: usize,
}

impl RegimeBuilder {
    pub fn open(id: String, obs: &DailyObservation, probability: f64) -> Self {
        Self {
            id,
            classification: RegimeClass::classify(obs.volatility),
            start_date: obs.date,
            end_date: obs.date,
            probability,
            volatility_sum: obs.volatility,
            count: 1,
        }
    }

    pub fn extend(&mut self, obs: &DailyObservation) {
        self.end_date = obs.date;
        self.volatility_sum += obs.volatility;
        self.count += 1;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn classification(&self) -> RegimeClass {
        self.classification
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Observations absorbed so far; at least one once opened.
    pub fn observation_count(&self) -> usize {
        self.count
    }

    /// Mean volatility over `start_date..=end_date`.
    pub fn avg_volatility(&self) -> f64 {
        self.volatility_sum / self.count as f64
    }

    pub fn finish(&self) -> VolatilityRegime {
        VolatilityRegime {
            id: self.id.clone(),
            name: self.classification.period_name(),
            start_date: self.start_date,
            end_date: self.end_date,
            avg_volatility: self.avg_volatility(),
            classification: self.classification,
            probability: self.probability,
        }
    }
}

/// Splits a date-ordered volatility series into maximal same-class runs.
#[derive(Debug, Default)]
pub struct RegimeSegmenter {
    open: Option<RegimeBuilder>,
    closed: Vec<VolatilityRegime>,
}

impl RegimeSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panics if `obs` is not strictly after the previous observation.
    pub fn push<R: Rng + ?Sized>(&mut self, obs: &DailyObservation, rng: &mut R) {
        let class = RegimeClass::classify(obs.volatility);
        if let Some(open) = self.open.as_mut() {
            assert!(obs.date > open.end_date, "observations must be in date order");
            if open.classification == class {
                open.extend(obs);
                return;
            }
        }
        if let Some(prev) = self.open.take() {
            // prev.end_date already holds the previous observation's date.
            self.closed.push(prev.finish());
        }
        let id = format!("regime-{}", self.closed.len() + 1);
        self.open = Some(RegimeBuilder::open(id, obs, sample_probability(rng)));
    }

    pub fn current(&self) -> Option<&RegimeBuilder> {
        self.open.as_ref()
    }

    pub fn closed(&self) -> &[VolatilityRegime] {
        &self.closed
    }

    pub fn finish(mut self) -> Vec<VolatilityRegime> {
        if let Some(open) = self.open.take() {
            self.closed.push(open.finish());
        }
        self.closed
    }
}

/// Segment a full series. Panics on an empty series.
pub fn segment<R: Rng + ?Sized>(series: &[DailyObservation], rng: &mut R) -> Vec<VolatilityRegime> {
    assert!(!series.is_empty(), "regime segmentation needs a non-empty series");
    let mut segmenter = RegimeSegmenter::new();
    for obs in series {
        segmenter.push(obs, rng);
    }
    let regimes = segmenter.finish();
    tracing::debug!(
        observations = series.len(),
        regimes = regimes.len(),
        "Segmented volatility regimes"
    );
    regimes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn obs(day: u32, volatility: f64) -> DailyObservation {
        DailyObservation {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            price: 2500.0,
            volume: 100_000.0,
            market_cap: 300_000_000_000.0,
            returns: 0.0,
            volatility,
        }
    }

    #[test]
    fn builder_tracks_running_mean() {
        let mut b = RegimeBuilder::open("regime-1".to_string(), &obs(1, 0.010), 0.9);
        b.extend(&obs(2, 0.012));
        b.extend(&obs(3, 0.017));
        assert_eq!(b.observation_count(), 3);
        assert!((b.avg_volatility() - 0.013).abs() < 1e-12);
        let r = b.finish();
        assert_eq!(r.name, "Low Volatility Period");
        assert_eq!(r.end_date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
    }

    #[test]
    fn segmenter_exposes_open_regime_while_building() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seg = RegimeSegmenter::new();
        seg.push(&obs(1, 0.025), &mut rng);
        seg.push(&obs(2, 0.026), &mut rng);
        assert!(seg.closed().is_empty());
        assert_eq!(seg.current().map(|r| r.observation_count()), Some(2));
        seg.push(&obs(3, 0.06), &mut rng);
        assert_eq!(seg.closed().len(), 1);
        assert_eq!(seg.current().map(|r| r.classification()), Some(RegimeClass::Extreme));
    }

    #[test]
    fn probability_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let p = sample_probability(&mut rng);
            assert!(p > 0.7 && p <= 1.0, "p={p}");
        }
    }

    #[test]
    #[should_panic(expected = "observations must be in date order")]
    fn out_of_order_input_panics() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seg = RegimeSegmenter::new();
        seg.push(&obs(5, 0.025), &mut rng);
        seg.push(&obs(4, 0.025), &mut rng);
    }
}
