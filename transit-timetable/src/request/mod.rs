//! JSON request boundary.
//!
//! Reads a generation request, resolves its station references and
//! raw fields into core types, runs the generator and renders the
//! resulting schedule for output.

mod directory;
mod dto;
mod error;
mod prepare;
mod settings;

use std::path::Path;

use tracing::info;

use crate::generator::{GeneratorConfig, ScheduleGenerator};

pub use directory::StationDirectory;
pub use dto::{
    AvailabilityResult, AvailabilitySpec, DistanceSpec, DwellKindSpec, DwellSpec,
    GenerationRequest, HailPolicySpec, LineSpec, RouteSpec, ScheduleResult, SpeedSpec,
    SpeedUnitSpec, StationSpec, StopResult, TripResult, WindowSpec,
};
pub use error::RequestError;
pub use prepare::PreparedRequest;
pub use settings::{MAX_TRIPS_VAR, ROTATION_VAR, WINDOW_BOUND_VAR, config_from_env};

/// Read and parse a request file.
pub fn load_request(path: impl AsRef<Path>) -> Result<GenerationRequest, RequestError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| RequestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Generate the schedule a request describes.
pub fn run(
    request: &GenerationRequest,
    config: &GeneratorConfig,
) -> Result<ScheduleResult, RequestError> {
    let prepared = request.prepare()?;
    let generator = ScheduleGenerator::new(&prepared.resolver, config);
    let schedule = generator.generate(&prepared.schedule)?;

    info!(
        line = %schedule.line(),
        trips = schedule.trip_count(),
        vehicles = schedule.vehicle_count(),
        "schedule generated"
    );

    Ok(ScheduleResult::from_schedule(&schedule, &prepared.stations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerationError, Rotation};
    use std::io::Write;

    const REQUEST: &str = r#"{
        "description": "Weekday service",
        "stations": [
            { "id": "A", "name": "Alpha", "lat": 50.0, "lon": 30.00, "vehicle_types": ["bus"] },
            { "id": "B", "name": "Beta",  "lat": 50.0, "lon": 30.01, "vehicle_types": ["bus"] },
            { "id": "C", "name": "Gamma", "lat": 50.0, "lon": 30.02, "vehicle_types": ["bus"] }
        ],
        "line": {
            "id": "12",
            "name": "Route 12",
            "vehicle_type": "bus",
            "inbound":  { "code": "12-in",  "stations": ["A", "B", "C"], "lengths_m": [3000, 3000] },
            "outbound": { "code": "12-out", "stations": ["C", "B", "A"], "lengths_m": [3000, 3000] }
        },
        "speed": { "value": 36, "unit": "km/h" },
        "inbound":  { "start": "06:00", "end": "07:00" },
        "outbound": { "start": "06:20", "end": "07:20" },
        "headway_mins": 10,
        "min_layover_mins": 5,
        "availability": { "from": "2024-03-04", "to": "2024-03-29", "weekdays": ["working_days"] },
        "default_dwell_secs": 30
    }"#;

    fn write_request(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_and_run() {
        let file = write_request(REQUEST);
        let request = load_request(file.path()).unwrap();
        let result = run(&request, &GeneratorConfig::default()).unwrap();

        assert_eq!(result.line, "12");
        assert_eq!(result.description, "Weekday service");
        assert_eq!(result.inbound.len(), 7);
        assert_eq!(result.outbound.len(), 7);

        // 3000 m at 10 m/s is 300 s per segment, plus 30 s dwell at B and C
        let first = &result.inbound[0];
        assert_eq!(first.headsign.as_deref(), Some("Gamma"));
        assert_eq!(first.departure, "06:00:00");
        assert_eq!(first.stops[1].arrival, "06:05:00");
        assert_eq!(first.stops[1].departure, "06:05:30");
        assert_eq!(first.stops[1].name, "Beta");
        assert_eq!(first.arrival, "06:10:30");
        assert_eq!(first.duration_secs, 630);

        assert_eq!(result.outbound[0].departure, "06:20:00");
        assert_eq!(result.inbound[6].departure, "07:00:00");
    }

    #[test]
    fn paired_rotation_from_request() {
        let request: GenerationRequest = serde_json::from_str(REQUEST).unwrap();
        let config = GeneratorConfig {
            rotation: Rotation::Paired,
            ..GeneratorConfig::default()
        };
        let result = run(&request, &config).unwrap();
        assert_eq!(result.vehicles, 7);
        for (inbound, outbound) in result.inbound.iter().zip(&result.outbound) {
            assert_eq!(inbound.vehicle, outbound.vehicle);
        }
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_request(&path).unwrap_err();
        assert!(matches!(err, RequestError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn malformed_json() {
        let file = write_request("{ \"stations\": ");
        let err = load_request(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("malformed request: "));
    }

    #[test]
    fn generation_errors_pass_through() {
        let request: GenerationRequest = serde_json::from_str(REQUEST).unwrap();
        let config = GeneratorConfig {
            max_trips_per_direction: 3,
            ..GeneratorConfig::default()
        };
        let err = run(&request, &config).unwrap_err();
        assert!(matches!(
            err,
            RequestError::Generation(GenerationError::TooManyTrips { projected: 7, limit: 3, .. })
        ));
    }
}
