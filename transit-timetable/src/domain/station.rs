//! Station records and vehicle types.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::{StationId, ValidationError};

/// Kind of vehicle a line runs or a station can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VehicleType {
    Tram,
    Subway,
    Rail,
    Bus,
    Trolleybus,
    Ferry,
    CableCar,
    Funicular,
}

impl VehicleType {
    /// Lowercase name used in requests and output.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Tram => "tram",
            VehicleType::Subway => "subway",
            VehicleType::Rail => "rail",
            VehicleType::Bus => "bus",
            VehicleType::Trolleybus => "trolleybus",
            VehicleType::Ferry => "ferry",
            VehicleType::CableCar => "cable_car",
            VehicleType::Funicular => "funicular",
        }
    }
}

/// Error returned when parsing an unknown vehicle type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle type: {0}")]
pub struct UnknownVehicleType(pub String);

impl FromStr for VehicleType {
    type Err = UnknownVehicleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tram" => Ok(VehicleType::Tram),
            "subway" | "metro" => Ok(VehicleType::Subway),
            "rail" => Ok(VehicleType::Rail),
            "bus" => Ok(VehicleType::Bus),
            "trolleybus" => Ok(VehicleType::Trolleybus),
            "ferry" => Ok(VehicleType::Ferry),
            "cable_car" => Ok(VehicleType::CableCar),
            "funicular" => Ok(VehicleType::Funicular),
            _ => Err(UnknownVehicleType(s.to_string())),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WGS84 coordinates of a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Create a location, checking both coordinates are in range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::Station("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::Station(
                "longitude must be within [-180, 180]",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A place where vehicles stop to pick up or drop off passengers.
///
/// # Examples
///
/// ```
/// use transit_timetable::domain::{Location, Station, StationId, VehicleType};
///
/// let station = Station::new(
///     StationId::new("central").unwrap(),
///     "Central Square",
///     Location::new(50.45, 30.52).unwrap(),
///     [VehicleType::Bus, VehicleType::Tram],
/// )
/// .unwrap();
///
/// assert!(station.supports(VehicleType::Tram));
/// assert!(!station.supports(VehicleType::Ferry));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    name: String,
    location: Location,
    vehicle_types: BTreeSet<VehicleType>,
}

impl Station {
    /// Create a station.
    ///
    /// The name must not be blank and at least one vehicle type must be
    /// served.
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        location: Location,
        vehicle_types: impl IntoIterator<Item = VehicleType>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Station("name cannot be blank"));
        }
        let vehicle_types: BTreeSet<_> = vehicle_types.into_iter().collect();
        if vehicle_types.is_empty() {
            return Err(ValidationError::Station(
                "at least one vehicle type must be served",
            ));
        }
        Ok(Self {
            id,
            name,
            location,
            vehicle_types,
        })
    }

    pub fn id(&self) -> &StationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Vehicle types served, in a stable order.
    pub fn vehicle_types(&self) -> impl Iterator<Item = VehicleType> + '_ {
        self.vehicle_types.iter().copied()
    }

    /// Does this station serve the given vehicle type?
    pub fn supports(&self, vehicle_type: VehicleType) -> bool {
        self.vehicle_types.contains(&vehicle_type)
    }
}
