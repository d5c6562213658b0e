use std::process::ExitCode;

use tracing::{error, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transit_timetable::request::{config_from_env, load_request, run};

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });
    // Schedules go to stdout, so logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> ExitCode {
    init_logger();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: transit-timetable <request.json>");
        return ExitCode::from(2);
    };

    let config = match config_from_env(|k| std::env::var(k).ok()) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        path = %path,
        max_trips = config.max_trips_per_direction,
        window_bound = ?config.window_bound,
        rotation = ?config.rotation,
        "generating schedule"
    );

    let result = load_request(&path).and_then(|request| run(&request, &config));
    let schedule = match result {
        Ok(schedule) => schedule,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&schedule) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to render schedule: {e}");
            ExitCode::FAILURE
        }
    }
}
