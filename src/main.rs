use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event;

use sandbox_ethvol::config::Config;
use sandbox_ethvol::input::{parse_command, UiCommand};
use sandbox_ethvol::snapshot::{make_rng, DashboardSnapshot, SnapshotParams};
use sandbox_ethvol::ui::{self, AppState};

fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure config/default.toml exists and ETHVOL_SEED (if set) is an integer");
            std::process::exit(1);
        }
    };

    // Log to file so it doesn't interfere with the TUI
    let log_file = std::fs::File::create("sandbox-ethvol.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.as_str())
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        history_days = config.generator.history_days,
        horizon_days = config.generator.forecast_horizon_days,
        seed = ?config.generator.seed,
        "Starting sandbox-ethvol"
    );

    let params = SnapshotParams::from(&config.generator);
    let mut rng = make_rng(config.generator.seed);
    let snapshot = DashboardSnapshot::generate(params, chrono::Local::now().naive_local(), &mut rng);
    let mut app_state = AppState::new(snapshot, config.ui.history_window);

    let mut terminal = ratatui::init();
    let outcome = run_loop(&mut terminal, &mut app_state, &config, params, &mut rng);
    ratatui::restore();

    outcome?;
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check sandbox-ethvol.log for details.");
    Ok(())
}

fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app_state: &mut AppState,
    config: &Config,
    params: SnapshotParams,
    rng: &mut rand::rngs::StdRng,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app_state))?;

        if crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if let Some(cmd) = parse_command(&key.code) {
                    if cmd == UiCommand::Regenerate {
                        let snapshot = DashboardSnapshot::generate(
                            params,
                            chrono::Local::now().naive_local(),
                            rng,
                        );
                        app_state.replace_snapshot(snapshot);
                        tracing::info!(generation = app_state.generation, "Regenerated data");
                    } else {
                        app_state.apply(cmd);
                    }
                }
            }
        }

        if app_state.should_quit {
            tracing::info!("User quit");
            return Ok(());
        }
    }
}
