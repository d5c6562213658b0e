//! Timed trips and their stops.
//!
//! A `Stop` is a visit to one station with arrival and departure times on
//! the service-day clock. A `Trip` is one vehicle's run through a route's
//! stations in order.

use chrono::Duration;

use super::{Direction, ServiceTime, StationId, ValidationError, VehicleId};

/// Position of a stop within a trip.
///
/// # Examples
///
/// ```
/// use transit_timetable::domain::StopIndex;
///
/// let idx = StopIndex(0);
/// assert_eq!(idx.next(), StopIndex(1));
/// assert_eq!(idx.prev(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// Returns the next index.
    pub fn next(self) -> Self {
        StopIndex(self.0 + 1)
    }

    /// Returns the previous index, if any.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(StopIndex)
    }
}

impl std::fmt::Display for StopIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station visit.
///
/// # Invariants
///
/// - `arrival <= departure`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    station: StationId,
    arrival: ServiceTime,
    departure: ServiceTime,
}

impl Stop {
    /// Create a stop; the vehicle can't leave before it arrives.
    ///
    /// ```
    /// use transit_timetable::domain::{ServiceTime, StationId, Stop};
    ///
    /// let station = StationId::new("A").unwrap();
    /// let arr = ServiceTime::parse("06:00").unwrap();
    /// let dep = ServiceTime::parse("06:00:30").unwrap();
    ///
    /// let stop = Stop::new(station.clone(), arr, dep).unwrap();
    /// assert_eq!(stop.dwell().num_seconds(), 30);
    ///
    /// assert!(Stop::new(station, dep, arr).is_err());
    /// ```
    pub fn new(
        station: StationId,
        arrival: ServiceTime,
        departure: ServiceTime,
    ) -> Result<Self, ValidationError> {
        if departure < arrival {
            return Err(ValidationError::Trip("stop departs before it arrives"));
        }
        Ok(Self::new_unchecked(station, arrival, departure))
    }

    /// Create a stop whose ordering the caller has already established.
    pub(crate) fn new_unchecked(
        station: StationId,
        arrival: ServiceTime,
        departure: ServiceTime,
    ) -> Self {
        debug_assert!(arrival <= departure);
        Self {
            station,
            arrival,
            departure,
        }
    }

    pub fn station(&self) -> &StationId {
        &self.station
    }

    pub fn arrival(&self) -> ServiceTime {
        self.arrival
    }

    pub fn departure(&self) -> ServiceTime {
        self.departure
    }

    /// Time spent at the station.
    pub fn dwell(&self) -> Duration {
        self.departure.signed_duration_since(self.arrival)
    }
}

/// One vehicle's timed run along a route.
///
/// # Invariants
///
/// - At least two stops
/// - Each stop arrives no earlier than the previous stop departs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    vehicle: VehicleId,
    headsign: Option<String>,
    direction: Direction,
    stops: Vec<Stop>,
}

impl Trip {
    /// Create a trip, checking that its stops run forwards in time.
    pub fn new(
        vehicle: VehicleId,
        headsign: Option<String>,
        direction: Direction,
        stops: Vec<Stop>,
    ) -> Result<Self, ValidationError> {
        if stops.len() < 2 {
            return Err(ValidationError::Trip("a trip needs at least two stops"));
        }
        if stops.windows(2).any(|w| w[1].arrival < w[0].departure) {
            return Err(ValidationError::Trip(
                "stop arrives before the previous stop departs",
            ));
        }
        Ok(Self::new_unchecked(vehicle, headsign, direction, stops))
    }

    /// Create a trip from stops the caller has already timed in order.
    pub(crate) fn new_unchecked(
        vehicle: VehicleId,
        headsign: Option<String>,
        direction: Direction,
        stops: Vec<Stop>,
    ) -> Self {
        debug_assert!(stops.len() >= 2);
        Self {
            vehicle,
            headsign,
            direction,
            stops,
        }
    }

    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    pub fn headsign(&self) -> Option<&str> {
        self.headsign.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns the stop at the given index, if it exists.
    pub fn stop(&self, idx: StopIndex) -> Option<&Stop> {
        self.stops.get(idx.0)
    }

    fn first(&self) -> &Stop {
        // Safe: a trip always has at least two stops
        &self.stops[0]
    }

    fn last(&self) -> &Stop {
        // Safe: a trip always has at least two stops
        &self.stops[self.stops.len() - 1]
    }

    /// Departure from the origin.
    pub fn first_departure(&self) -> ServiceTime {
        self.first().departure
    }

    /// Arrival at the terminal station.
    pub fn last_arrival(&self) -> ServiceTime {
        self.last().arrival
    }

    /// Departure from the terminal station, after any dwell there.
    pub fn last_departure(&self) -> ServiceTime {
        self.last().departure
    }

    pub fn origin(&self) -> &StationId {
        &self.first().station
    }

    pub fn terminal(&self) -> &StationId {
        &self.last().station
    }

    /// Time from origin departure to terminal arrival.
    pub fn duration(&self) -> Duration {
        self.last_arrival()
            .signed_duration_since(self.first_departure())
    }

    /// Running time from the stop before `idx` to `idx`.
    ///
    /// Returns `None` for the first stop or an index past the end.
    pub fn travel_time(&self, idx: StopIndex) -> Option<Duration> {
        let prev = self.stop(idx.prev()?)?;
        let stop = self.stop(idx)?;
        Some(stop.arrival.signed_duration_since(prev.departure))
    }

    /// Returns this trip run by a different vehicle.
    pub fn with_vehicle(self, vehicle: VehicleId) -> Self {
        Self { vehicle, ..self }
    }
}
