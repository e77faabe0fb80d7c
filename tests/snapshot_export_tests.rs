use chrono::{Days, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sandbox_ethvol::config::{MAX_HISTORY_DAYS, MAX_HORIZON_DAYS};
use sandbox_ethvol::error::AppError;
use sandbox_ethvol::export::{parse_args, render_json, ExportOptions};
use sandbox_ethvol::snapshot::{make_rng, DashboardSnapshot, SnapshotParams};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
/// One generation pass feeds every consumer from the same price path.
fn snapshot_consumers_share_one_series() {
    let snapshot = DashboardSnapshot::generate(
        SnapshotParams::default(),
        now(),
        &mut StdRng::seed_from_u64(12),
    );

    assert_eq!(snapshot.price_data.len(), 365);
    assert_eq!(snapshot.on_chain.len(), 365);
    assert_eq!(snapshot.forecasts.len(), 30);
    assert_eq!(snapshot.models.len(), 4);
    assert_eq!(snapshot.performance.len(), 4);

    let last = snapshot.latest().unwrap();
    assert_eq!(last.date, now().date() - Days::new(1));
    assert_eq!(snapshot.forecasts[0].date, last.date + Days::new(1));
    assert_eq!(snapshot.on_chain[364].date, last.date);
    assert_eq!(snapshot.current_regime().unwrap().end_date, last.date);
    assert_eq!(snapshot.regimes[0].start_date, snapshot.price_data[0].date);
}

#[test]
/// Same seed, same snapshot.
fn seeded_snapshots_are_reproducible() {
    let params = SnapshotParams {
        history_days: 50,
        forecast_horizon_days: 10,
    };
    let a = DashboardSnapshot::generate(params, now(), &mut make_rng(Some(3)));
    let b = DashboardSnapshot::generate(params, now(), &mut make_rng(Some(3)));
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
/// JSON uses camelCase keys, ISO dates and lowercase regime classes.
fn snapshot_json_shape() {
    let params = SnapshotParams {
        history_days: 20,
        forecast_horizon_days: 5,
    };
    let snapshot = DashboardSnapshot::generate(params, now(), &mut make_rng(Some(8)));
    let json: serde_json::Value = serde_json::from_str(&render_json(&snapshot, true).unwrap()).unwrap();

    assert_eq!(json["generatedAt"], "2024-06-01T10:00:00");
    assert_eq!(json["priceData"][19]["date"], "2024-05-31");
    assert!(json["priceData"][0]["marketCap"].is_number());
    assert!(json["onChain"][0]["gasUsed"].is_u64());
    assert!(json["forecasts"][0]["lower95"].is_number());
    assert!(json["regimes"][0]["avgVolatility"].is_number());
    let class = json["regimes"][0]["classification"].as_str().unwrap();
    assert!(["low", "medium", "high", "extreme"].contains(&class));
    assert_eq!(json["performance"][0]["intervalAccuracy95"], 0.943);

    let round_trip: DashboardSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(round_trip.regimes.len(), snapshot.regimes.len());
    assert_eq!(round_trip.price_data[19].date, snapshot.price_data[19].date);
}

#[test]
fn compact_json_is_single_line() {
    let params = SnapshotParams {
        history_days: 3,
        forecast_horizon_days: 2,
    };
    let snapshot = DashboardSnapshot::generate(params, now(), &mut make_rng(Some(1)));
    assert!(!render_json(&snapshot, true).unwrap().contains('\n'));
    assert!(render_json(&snapshot, false).unwrap().contains('\n'));
}

#[test]
/// Flags override the defaults.
fn parse_args_reads_flags() {
    let opts = parse_args(&args(&[
        "--days", "90", "--horizon", "14", "--seed", "5", "--out", "snap.json", "--compact",
    ]))
    .unwrap();
    assert_eq!(opts.params.history_days, 90);
    assert_eq!(opts.params.forecast_horizon_days, 14);
    assert_eq!(opts.seed, Some(5));
    assert_eq!(opts.out.as_deref(), Some(std::path::Path::new("snap.json")));
    assert!(opts.compact);

    assert_eq!(parse_args(&[]).unwrap(), ExportOptions::default());
}

#[test]
/// Unknown flags, missing values and malformed numbers are usage errors.
fn parse_args_rejects_bad_input() {
    assert!(matches!(
        parse_args(&args(&["--verbose"])),
        Err(AppError::Usage(_))
    ));
    assert!(matches!(
        parse_args(&args(&["--days"])),
        Err(AppError::Usage(_))
    ));
    assert!(matches!(
        parse_args(&args(&["--seed", "-4"])),
        Err(AppError::Usage(_))
    ));
}

#[test]
/// Day counts outside 1..=100000 are rejected before any date arithmetic runs,
/// and the message names the allowed range.
fn parse_args_bounds_day_counts() {
    for bad in [
        &["--days", "0"][..],
        &["--days", "200000000"][..],
        &["--horizon", "0"][..],
        &["--horizon", "100001"][..],
    ] {
        match parse_args(&args(bad)) {
            Err(AppError::Usage(msg)) => assert!(msg.contains("1..=100000"), "{}", msg),
            other => panic!("expected usage error for {:?}, got {:?}", bad, other),
        }
    }

    let opts = parse_args(&args(&["--days", "100000", "--horizon", "100000"])).unwrap();
    assert_eq!(opts.params.history_days, MAX_HISTORY_DAYS);
    assert_eq!(opts.params.forecast_horizon_days, MAX_HORIZON_DAYS);
}

#[test]
/// The largest accepted history still yields valid dates.
fn max_history_generates_without_overflow() {
    let params = SnapshotParams {
        history_days: MAX_HISTORY_DAYS,
        forecast_horizon_days: 30,
    };
    let snapshot = DashboardSnapshot::generate(params, now(), &mut make_rng(Some(2)));
    assert_eq!(snapshot.price_data.len(), MAX_HISTORY_DAYS);
    assert_eq!(snapshot.price_data[0].date, now().date() - Days::new(MAX_HISTORY_DAYS as u64));
}

#[test]
/// Sub-second parts of the wall clock never reach the exported timestamps.
fn generated_at_is_truncated_to_seconds() {
    let precise = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_nano_opt(12, 0, 0, 123_456_789)
        .unwrap();
    let params = SnapshotParams {
        history_days: 3,
        forecast_horizon_days: 2,
    };
    let snapshot = DashboardSnapshot::generate(params, precise, &mut make_rng(Some(4)));
    let json: serde_json::Value = serde_json::from_str(&render_json(&snapshot, true).unwrap()).unwrap();
    assert_eq!(json["generatedAt"], "2024-06-01T12:00:00");
    assert_eq!(json["models"][0]["lastUpdated"], "2024-06-01T12:00:00");
}
