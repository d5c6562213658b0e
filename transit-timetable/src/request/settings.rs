//! Generator settings taken from the environment.

use crate::generator::{GeneratorConfig, Rotation, WindowBound};

use super::error::RequestError;

pub const MAX_TRIPS_VAR: &str = "TIMETABLE_MAX_TRIPS";
pub const WINDOW_BOUND_VAR: &str = "TIMETABLE_WINDOW_BOUND";
pub const ROTATION_VAR: &str = "TIMETABLE_ROTATION";

/// Build a generator configuration from environment-style variables.
///
/// Unset variables keep their defaults. `lookup` is usually
/// `|k| std::env::var(k).ok()`.
pub fn config_from_env(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<GeneratorConfig, RequestError> {
    let mut config = GeneratorConfig::default();

    if let Some(value) = lookup(MAX_TRIPS_VAR) {
        config.max_trips_per_direction = match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => return Err(env_error(MAX_TRIPS_VAR, value)),
        };
    }

    if let Some(value) = lookup(WINDOW_BOUND_VAR) {
        config.window_bound = match value.trim() {
            "last_departure" => WindowBound::LastDeparture,
            "last_arrival" => WindowBound::LastArrival,
            _ => return Err(env_error(WINDOW_BOUND_VAR, value)),
        };
    }

    if let Some(value) = lookup(ROTATION_VAR) {
        config.rotation = match value.trim() {
            "blocks" => Rotation::Blocks,
            "paired" => Rotation::Paired,
            _ => return Err(env_error(ROTATION_VAR, value)),
        };
    }

    Ok(config)
}

fn env_error(var: &'static str, value: String) -> RequestError {
    RequestError::Env { var, value }
}
