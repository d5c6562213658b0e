//! Station lookup at the request boundary.

use std::collections::BTreeMap;

use crate::domain::{Location, Station, StationId, VehicleType};

use super::error::RequestError;

/// Stations known to one request, by id.
///
/// The generator only sees station ids; names, locations and vehicle-type
/// support are looked up here when a request is prepared and when its
/// schedule is rendered.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: BTreeMap<StationId, Station>,
}

impl StationDirectory {
    /// Create a directory, rejecting repeated station ids.
    pub fn new(stations: impl IntoIterator<Item = Station>) -> Result<Self, RequestError> {
        let mut map = BTreeMap::new();
        for station in stations {
            if let Some(previous) = map.insert(station.id().clone(), station) {
                return Err(RequestError::DuplicateStation(previous.id().clone()));
            }
        }
        Ok(Self { stations: map })
    }

    /// Look up a station by id.
    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Look up a station by the raw id given in a request.
    pub fn resolve(&self, raw: &str) -> Result<&Station, RequestError> {
        StationId::new(raw)
            .ok()
            .and_then(|id| self.stations.get(&id))
            .ok_or_else(|| RequestError::UnknownStation(raw.to_string()))
    }

    /// Look up a station that must serve the given vehicle type.
    pub fn resolve_for(
        &self,
        raw: &str,
        vehicle_type: VehicleType,
    ) -> Result<&Station, RequestError> {
        let station = self.resolve(raw)?;
        if !station.supports(vehicle_type) {
            return Err(RequestError::UnsupportedVehicleType {
                station: station.id().clone(),
                vehicle_type,
            });
        }
        Ok(station)
    }

    /// Display name for a station, falling back to its id.
    pub fn name<'a>(&'a self, id: &'a StationId) -> &'a str {
        self.stations
            .get(id)
            .map(Station::name)
            .unwrap_or_else(|| id.as_str())
    }

    /// Every station's location, for distance estimates.
    pub fn locations(&self) -> impl Iterator<Item = (StationId, Location)> + '_ {
        self.stations
            .values()
            .map(|s| (s.id().clone(), s.location()))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
