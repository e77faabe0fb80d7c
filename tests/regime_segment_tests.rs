use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sandbox_ethvol::generator::{segment, simulate, RegimeSegmenter};
use sandbox_ethvol::model::{DailyObservation, RegimeClass};

fn series_from(vols: &[f64]) -> Vec<DailyObservation> {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    vols.iter()
        .enumerate()
        .map(|(i, &volatility)| DailyObservation {
            date: start + Days::new(i as u64),
            price: 2500.0,
            volume: 100_000.0,
            market_cap: 300_000_000_000.0,
            returns: 0.0,
            volatility,
        })
        .collect()
}

#[test]
/// Four calm days followed by six turbulent ones form exactly two regimes.
fn low_then_high_yields_two_regimes() {
    let mut vols = vec![0.015; 4];
    vols.extend([0.04; 6]);
    let series = series_from(&vols);
    let regimes = segment(&series, &mut StdRng::seed_from_u64(2));

    assert_eq!(regimes.len(), 2);

    let low = &regimes[0];
    assert_eq!(low.id, "regime-1");
    assert_eq!(low.classification, RegimeClass::Low);
    assert_eq!(low.name, "Low Volatility Period");
    assert_eq!(low.start_date, series[0].date);
    assert_eq!(low.end_date, series[3].date);
    assert_eq!(low.duration_days(), 3);
    assert!((low.avg_volatility - 0.015).abs() < 1e-12);

    let high = &regimes[1];
    assert_eq!(high.id, "regime-2");
    assert_eq!(high.classification, RegimeClass::High);
    assert_eq!(high.start_date, series[4].date);
    assert_eq!(high.end_date, series[9].date);
    assert!((high.avg_volatility - 0.04).abs() < 1e-12);
}

#[test]
/// A single observation is a single one-day regime.
fn single_observation_single_regime() {
    let series = series_from(&[0.06]);
    let regimes = segment(&series, &mut StdRng::seed_from_u64(2));
    assert_eq!(regimes.len(), 1);
    assert_eq!(regimes[0].classification, RegimeClass::Extreme);
    assert_eq!(regimes[0].start_date, regimes[0].end_date);
}

#[test]
/// Regimes tile the series: contiguous, non-overlapping, in order, with
/// every member matching the regime's class.
fn regimes_cover_series_contiguously() {
    let mut rng = StdRng::seed_from_u64(77);
    let series = simulate(365, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), &mut rng);
    let regimes = segment(&series, &mut rng);

    assert_eq!(regimes.first().unwrap().start_date, series[0].date);
    assert_eq!(regimes.last().unwrap().end_date, series[364].date);
    for pair in regimes.windows(2) {
        assert_eq!(pair[1].start_date, pair[0].end_date + Days::new(1));
        assert_ne!(pair[1].classification, pair[0].classification);
    }

    for (i, regime) in regimes.iter().enumerate() {
        assert_eq!(regime.id, format!("regime-{}", i + 1));
        assert!(regime.probability > 0.7 && regime.probability <= 1.0);
        let (lower, upper) = regime.classification.bounds();
        let members: Vec<&DailyObservation> = series
            .iter()
            .filter(|o| regime.contains(o.date))
            .collect();
        assert!(!members.is_empty());
        for obs in &members {
            assert!(obs.volatility >= lower && obs.volatility < upper);
        }
        let mean = members.iter().map(|o| o.volatility).sum::<f64>() / members.len() as f64;
        assert!((regime.avg_volatility - mean).abs() < 1e-9);
    }
}

#[test]
/// Boundary values land in the upper class.
fn threshold_values_classify_upward() {
    let series = series_from(&[0.0199, 0.02, 0.03, 0.05]);
    let regimes = segment(&series, &mut StdRng::seed_from_u64(4));
    let classes: Vec<RegimeClass> = regimes.iter().map(|r| r.classification).collect();
    assert_eq!(
        classes,
        vec![
            RegimeClass::Low,
            RegimeClass::Medium,
            RegimeClass::High,
            RegimeClass::Extreme
        ]
    );
}

#[test]
/// Streaming through the segmenter matches batch segmentation.
fn streaming_matches_batch() {
    let series = series_from(&[0.01, 0.012, 0.025, 0.026, 0.011]);
    let batch = segment(&series, &mut StdRng::seed_from_u64(9));

    let mut rng = StdRng::seed_from_u64(9);
    let mut seg = RegimeSegmenter::new();
    for obs in &series {
        seg.push(obs, &mut rng);
    }
    assert_eq!(seg.closed().len(), 2);
    let open = seg.current().unwrap();
    assert_eq!(open.observation_count(), 1);
    assert_eq!(open.id(), "regime-3");
    assert_eq!(open.classification(), RegimeClass::Low);
    assert_eq!(open.start_date(), series[4].date);
    assert_eq!(open.end_date(), series[4].date);
    assert!(open.probability() > 0.7 && open.probability() <= 1.0);
    assert_eq!(seg.finish(), batch);
}

#[test]
#[should_panic(expected = "regime segmentation needs a non-empty series")]
fn empty_series_panics() {
    let _ = segment(&[], &mut StdRng::seed_from_u64(1));
}
