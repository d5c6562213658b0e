//! Data transfer objects for generation requests and schedules.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::{Schedule, ServiceTime, SpeedUnit, Stop, Trip};
use crate::generator::HailPolicy;

use super::directory::StationDirectory;

/// Request to generate a line's schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    /// Free-text description carried into the schedule
    #[serde(default)]
    pub description: String,

    /// Every station the line's routes or dwell rules refer to
    pub stations: Vec<StationSpec>,

    /// The line and its routes
    pub line: LineSpec,

    /// Average vehicle speed
    pub speed: SpeedSpec,

    /// Inbound operating window
    pub inbound: WindowSpec,

    /// Outbound operating window; required for lines with an outbound route
    pub outbound: Option<WindowSpec>,

    /// Minutes between consecutive departures in one direction; give this
    /// or `headway_secs`
    pub headway_mins: Option<i64>,

    /// Seconds between consecutive departures in one direction
    pub headway_secs: Option<i64>,

    /// Minimum turnaround between a vehicle's trips, in minutes; give at
    /// most one of this and `min_layover_secs`, zero when neither is set
    pub min_layover_mins: Option<i64>,

    pub min_layover_secs: Option<i64>,

    /// Dates the schedule runs on
    pub availability: AvailabilitySpec,

    /// Dwell at stations without a matching rule (seconds)
    #[serde(default)]
    pub default_dwell_secs: i64,

    /// How probabilistic dwells are scheduled
    #[serde(default)]
    pub hail_policy: HailPolicySpec,

    /// Per-station dwell rules
    #[serde(default)]
    pub dwells: Vec<DwellSpec>,

    /// Surveyed distances between stations
    #[serde(default)]
    pub distances: Vec<DistanceSpec>,

    /// Fill segments without a surveyed distance from station coordinates
    #[serde(default)]
    pub estimate_missing_distances: bool,
}

/// A station record.
#[derive(Debug, Clone, Deserialize)]
pub struct StationSpec {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Vehicle types served, e.g. `["bus", "tram"]`
    pub vehicle_types: Vec<String>,
}

/// A line with its inbound and optional outbound route.
#[derive(Debug, Clone, Deserialize)]
pub struct LineSpec {
    pub id: String,
    pub name: String,
    pub vehicle_type: String,
    pub inbound: RouteSpec,
    pub outbound: Option<RouteSpec>,
}

/// A route given as the stations it passes through.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSpec {
    pub code: String,

    /// Station ids in travel order
    pub stations: Vec<String>,

    /// Shown on trips; defaults to the terminal station's name
    pub headsign: Option<String>,

    /// Segment lengths in metres, one per consecutive station pair
    pub lengths_m: Option<Vec<f64>>,
}

/// Speed with its unit.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpeedSpec {
    pub value: f64,
    pub unit: SpeedUnitSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnitSpec {
    #[serde(alias = "m/s")]
    Mps,
    #[serde(alias = "km/h")]
    Kmh,
    Mph,
}

impl From<SpeedUnitSpec> for SpeedUnit {
    fn from(unit: SpeedUnitSpec) -> Self {
        match unit {
            SpeedUnitSpec::Mps => SpeedUnit::MetresPerSecond,
            SpeedUnitSpec::Kmh => SpeedUnit::KilometresPerHour,
            SpeedUnitSpec::Mph => SpeedUnit::MilesPerHour,
        }
    }
}

/// Operating window as `HH:MM` or `HH:MM:SS` strings.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowSpec {
    pub start: String,
    pub end: String,
}

/// Service calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilitySpec {
    pub from: NaiveDate,
    pub to: NaiveDate,

    /// Day names (`"mon"`, `"Tuesday"`) or one of the presets
    /// `"working_days"`, `"weekend_days"`, `"every_day"`
    pub weekdays: Vec<String>,

    /// Dates with no service
    #[serde(default)]
    pub exceptions: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HailPolicySpec {
    #[default]
    Expected,
    Full,
    Skip,
}

impl From<HailPolicySpec> for HailPolicy {
    fn from(policy: HailPolicySpec) -> Self {
        match policy {
            HailPolicySpec::Expected => HailPolicy::Expected,
            HailPolicySpec::Full => HailPolicy::Full,
            HailPolicySpec::Skip => HailPolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DwellKindSpec {
    Regular,
    EquallyLikely,
    Hail,
}

/// A dwell rule at one station.
#[derive(Debug, Clone, Deserialize)]
pub struct DwellSpec {
    pub station: String,
    pub kind: DwellKindSpec,
    pub duration_secs: i64,

    /// Window start; omit both ends for an all-day rule
    pub from: Option<String>,
    pub to: Option<String>,

    /// Required for hail rules
    pub probability: Option<f64>,
}

/// Distance between two stations, in metres.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceSpec {
    pub from: String,
    pub to: String,
    pub metres: f64,
}

/// A generated schedule.
#[derive(Debug, Serialize)]
pub struct ScheduleResult {
    /// Line id
    pub line: String,

    pub description: String,

    /// Service calendar
    pub availability: AvailabilityResult,

    /// Number of vehicles needed
    pub vehicles: usize,

    pub inbound: Vec<TripResult>,

    pub outbound: Vec<TripResult>,
}

/// Service calendar in a schedule.
#[derive(Debug, Serialize)]
pub struct AvailabilityResult {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub weekdays: Vec<Weekday>,
    pub exceptions: Vec<NaiveDate>,
}

/// A trip in a schedule.
#[derive(Debug, Serialize)]
pub struct TripResult {
    /// Vehicle number
    pub vehicle: u32,

    pub headsign: Option<String>,

    /// Departure from the origin
    pub departure: String,

    /// Arrival at the terminal
    pub arrival: String,

    /// Origin departure to terminal arrival, in seconds
    pub duration_secs: i64,

    pub stops: Vec<StopResult>,
}

/// A stop on a trip.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Station id
    pub station: String,

    /// Station name
    pub name: String,

    pub arrival: String,

    pub departure: String,
}

// Conversion implementations

impl ScheduleResult {
    /// Create from a domain Schedule, naming stations from the directory.
    pub fn from_schedule(schedule: &Schedule, stations: &StationDirectory) -> Self {
        use crate::domain::Direction;

        let availability = schedule.availability();
        Self {
            line: schedule.line().to_string(),
            description: schedule.description().to_string(),
            availability: AvailabilityResult {
                from: availability.start_date(),
                to: availability.end_date(),
                weekdays: availability.weekdays(),
                exceptions: availability.exception_dates().iter().copied().collect(),
            },
            vehicles: schedule.vehicle_count(),
            inbound: schedule
                .trips(Direction::Inbound)
                .iter()
                .map(|t| TripResult::from_trip(t, stations))
                .collect(),
            outbound: schedule
                .trips(Direction::Outbound)
                .iter()
                .map(|t| TripResult::from_trip(t, stations))
                .collect(),
        }
    }
}

impl TripResult {
    /// Create from a domain Trip.
    pub fn from_trip(trip: &Trip, stations: &StationDirectory) -> Self {
        Self {
            vehicle: trip.vehicle().0,
            headsign: trip.headsign().map(str::to_string),
            departure: format_time(trip.first_departure()),
            arrival: format_time(trip.last_arrival()),
            duration_secs: trip.duration().num_seconds(),
            stops: trip
                .stops()
                .iter()
                .map(|s| StopResult::from_stop(s, stations))
                .collect(),
        }
    }
}

impl StopResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop, stations: &StationDirectory) -> Self {
        Self {
            station: stop.station().to_string(),
            name: stations.name(stop.station()).to_string(),
            arrival: format_time(stop.arrival()),
            departure: format_time(stop.departure()),
        }
    }
}

/// Format a ServiceTime as "HH:MM:SS".
fn format_time(time: ServiceTime) -> String {
    time.to_string()
}
