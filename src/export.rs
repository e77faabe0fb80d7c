use std::io::Write;
use std::path::PathBuf;

use crate::config::{parse_seed, MAX_HISTORY_DAYS, MAX_HORIZON_DAYS, SEED_ENV_VAR};
use crate::error::AppError;
use crate::snapshot::{make_rng, DashboardSnapshot, SnapshotParams};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub params: SnapshotParams,
    pub seed: Option<u64>,
    pub out: Option<PathBuf>,
    pub compact: bool,
    pub help: bool,
}

fn flag_value<'a>(
    flag: &str,
    iter: &mut impl Iterator<Item = &'a String>,
) -> Result<&'a String, AppError> {
    iter.next()
        .ok_or_else(|| AppError::Usage(format!("`{}` requires a value", flag)))
}

fn parse_seed_flag(flag: &str, raw: &str) -> Result<u64, AppError> {
    raw.parse::<u64>()
        .map_err(|_| AppError::Usage(format!("`{}` expects an unsigned integer, got `{}`", flag, raw)))
}

/// Day count in `1..=max`.
fn parse_day_count(flag: &str, raw: &str, max: usize) -> Result<usize, AppError> {
    match raw.parse::<usize>() {
        Ok(days) if (1..=max).contains(&days) => Ok(days),
        _ => Err(AppError::Usage(format!(
            "`{}` expects a day count in 1..={}, got `{}`",
            flag, max, raw
        ))),
    }
}

pub fn parse_args(args: &[String]) -> Result<ExportOptions, AppError> {
    let mut opts = ExportOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--days" => {
                let raw = flag_value(arg, &mut iter)?;
                opts.params.history_days = parse_day_count(arg, raw, MAX_HISTORY_DAYS)?;
            }
            "--horizon" => {
                let raw = flag_value(arg, &mut iter)?;
                opts.params.forecast_horizon_days = parse_day_count(arg, raw, MAX_HORIZON_DAYS)?;
            }
            "--seed" => {
                let raw = flag_value(arg, &mut iter)?;
                opts.seed = Some(parse_seed_flag(arg, raw)?);
            }
            "--out" => {
                opts.out = Some(PathBuf::from(flag_value(arg, &mut iter)?));
            }
            "--compact" => opts.compact = true,
            "help" | "--help" | "-h" => opts.help = true,
            other => return Err(AppError::Usage(format!("unknown argument `{}`", other))),
        }
    }
    Ok(opts)
}

pub fn render_json(snapshot: &DashboardSnapshot, compact: bool) -> Result<String, AppError> {
    let json = if compact {
        serde_json::to_string(snapshot)?
    } else {
        serde_json::to_string_pretty(snapshot)?
    };
    Ok(json)
}

pub fn run_cli(args: &[String]) -> Result<(), AppError> {
    let mut opts = parse_args(args)?;
    if opts.help {
        print_usage();
        return Ok(());
    }
    if opts.seed.is_none() {
        if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
            opts.seed = parse_seed(&raw).map_err(|e| AppError::Config(format!("{:#}", e)))?;
        }
    }

    let mut rng = make_rng(opts.seed);
    let snapshot =
        DashboardSnapshot::generate(opts.params, chrono::Local::now().naive_local(), &mut rng);
    let json = render_json(&snapshot, opts.compact)?;

    match &opts.out {
        Some(path) => {
            std::fs::write(path, json.as_bytes())?;
            tracing::info!(path = %path.display(), bytes = json.len(), "Snapshot exported");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn print_usage() {
    println!("ethvol-export commands:");
    println!("  ethvol-export [--days N] [--horizon N] [--seed N] [--out PATH] [--compact]");
    println!("    --days N      days of simulated history, 1..={} (default 365)", MAX_HISTORY_DAYS);
    println!("    --horizon N   forecast horizon in days, 1..={} (default 30)", MAX_HORIZON_DAYS);
    println!("    --seed N      seed for a reproducible snapshot (or ETHVOL_SEED)");
    println!("    --out PATH    write to a file instead of stdout");
    println!("    --compact     single-line JSON");
}
