//! Request boundary error types.

use std::path::PathBuf;

use crate::domain::{StationId, TimeError, UnknownVehicleType, ValidationError, VehicleType};
use crate::generator::{ConfigurationError, GenerationError, InvalidConstraints};

/// Errors that can occur turning a request into a schedule.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Request file couldn't be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Request isn't valid JSON or doesn't have the expected shape
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A clock time field couldn't be parsed
    #[error("invalid {field}: {source}")]
    Time {
        field: &'static str,
        source: TimeError,
    },

    /// A required field is absent
    #[error("missing {0}")]
    MissingField(&'static str),

    /// The same quantity is given in two units
    #[error("{first} and {second} are both set; give only one")]
    ConflictingFields {
        first: &'static str,
        second: &'static str,
    },

    /// A duration field is too large to represent
    #[error("{field} is out of range")]
    DurationOutOfRange { field: &'static str },

    #[error(transparent)]
    Constraints(#[from] InvalidConstraints),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    UnknownVehicleType(#[from] UnknownVehicleType),

    /// Route or dwell refers to a station that wasn't supplied
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Two station records share an id
    #[error("duplicate station: {0}")]
    DuplicateStation(StationId),

    /// Line runs a vehicle type a station on its route can't serve
    #[error("station {station} does not serve {vehicle_type}")]
    UnsupportedVehicleType {
        station: StationId,
        vehicle_type: VehicleType,
    },

    /// Availability names a day that doesn't exist
    #[error("unknown weekday: {0}")]
    UnknownWeekday(String),

    /// Hail dwells need a probability
    #[error("hail dwell at station {station} needs a probability")]
    MissingProbability { station: StationId },

    /// Dwell window gives only one end
    #[error("dwell at station {station} needs both ends of its window, or neither")]
    PartialDwellWindow { station: StationId },

    /// Environment variable has a value that can't be used
    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },
}

impl RequestError {
    pub(crate) fn time(field: &'static str) -> impl FnOnce(TimeError) -> Self {
        move |source| RequestError::Time { field, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RequestError::UnknownStation("Z9".into());
        assert_eq!(err.to_string(), "unknown station: Z9");

        let err = RequestError::UnsupportedVehicleType {
            station: StationId::new("pier").unwrap(),
            vehicle_type: VehicleType::Tram,
        };
        assert_eq!(err.to_string(), "station pier does not serve tram");

        let err = RequestError::Env {
            var: "TIMETABLE_MAX_TRIPS",
            value: "lots".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for TIMETABLE_MAX_TRIPS: \"lots\""
        );

        let err = RequestError::DurationOutOfRange {
            field: "headway_mins",
        };
        assert_eq!(err.to_string(), "headway_mins is out of range");

        let err = RequestError::ConflictingFields {
            first: "headway_mins",
            second: "headway_secs",
        };
        assert_eq!(
            err.to_string(),
            "headway_mins and headway_secs are both set; give only one"
        );
    }

    #[test]
    fn time_errors_name_their_field() {
        let source = crate::domain::ServiceTime::parse("6am").unwrap_err();
        let err = RequestError::time("inbound.start")(source);
        assert!(err.to_string().starts_with("invalid inbound.start: "));
    }

    #[test]
    fn wrapped_errors_are_transparent() {
        let err: RequestError = ValidationError::Speed("speed must be positive").into();
        assert_eq!(err.to_string(), "invalid speed: speed must be positive");
    }
}
