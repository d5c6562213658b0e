//! Assigning vehicles to timed trips.

use chrono::Duration;
use tracing::trace;

use crate::domain::{Direction, ServiceTime, StationId, Stop, Trip, VehicleId};

use super::schedule::GenerationError;

/// A timed trip that has no vehicle yet.
#[derive(Debug, Clone)]
pub(crate) struct PlannedTrip {
    pub direction: Direction,
    pub headsign: Option<String>,
    pub stops: Vec<Stop>,
}

impl PlannedTrip {
    fn first(&self) -> &Stop {
        // Safe: the trip factory emits a stop per route station, at least two
        &self.stops[0]
    }

    fn last(&self) -> &Stop {
        // Safe: the trip factory emits a stop per route station, at least two
        &self.stops[self.stops.len() - 1]
    }

    pub fn first_departure(&self) -> ServiceTime {
        self.first().departure()
    }

    pub fn last_arrival(&self) -> ServiceTime {
        self.last().arrival()
    }

    pub fn last_departure(&self) -> ServiceTime {
        self.last().departure()
    }

    pub fn origin(&self) -> &StationId {
        self.first().station()
    }

    pub fn terminal(&self) -> &StationId {
        self.last().station()
    }

    fn into_trip(self, vehicle: VehicleId) -> Trip {
        Trip::new_unchecked(vehicle, self.headsign, self.direction, self.stops)
    }
}

/// Where a vehicle is and when it can next depart.
struct Standing {
    vehicle: VehicleId,
    station: StationId,
    free_at: Option<ServiceTime>,
}

/// Chain trips of both directions into vehicle blocks.
///
/// Trips are taken in departure order. A trip reuses the vehicle that has
/// been waiting longest at its origin, provided that vehicle's layover has
/// elapsed; otherwise a new vehicle is brought in. Returns the inbound and
/// outbound trips, each in departure order.
pub(crate) fn assign_blocks(
    inbound: Vec<PlannedTrip>,
    outbound: Vec<PlannedTrip>,
    min_layover: Duration,
) -> (Vec<Trip>, Vec<Trip>) {
    let mut planned: Vec<PlannedTrip> = inbound.into_iter().chain(outbound).collect();
    planned.sort_by_key(|p| (p.first_departure(), p.direction));

    let mut fleet: Vec<Standing> = Vec::new();
    let mut next_vehicle = VehicleId(1);
    let mut inbound_trips = Vec::new();
    let mut outbound_trips = Vec::new();

    for trip in planned {
        let departure = trip.first_departure();
        let waiting = fleet
            .iter_mut()
            .filter(|s| s.station == *trip.origin())
            .filter(|s| s.free_at.is_some_and(|free| free <= departure))
            .min_by_key(|s| (s.free_at, s.vehicle));

        let vehicle = match waiting {
            Some(standing) => {
                standing.station = trip.terminal().clone();
                standing.free_at = trip.last_departure().checked_add(min_layover);
                standing.vehicle
            }
            None => {
                let vehicle = next_vehicle;
                next_vehicle = next_vehicle.next();
                fleet.push(Standing {
                    vehicle,
                    station: trip.terminal().clone(),
                    free_at: trip.last_departure().checked_add(min_layover),
                });
                vehicle
            }
        };

        trace!(
            %vehicle,
            direction = %trip.direction,
            departure = %departure,
            "assigned vehicle"
        );

        match trip.direction {
            Direction::Inbound => inbound_trips.push(trip.into_trip(vehicle)),
            Direction::Outbound => outbound_trips.push(trip.into_trip(vehicle)),
        }
    }

    (inbound_trips, outbound_trips)
}

/// Pair the k-th inbound trip with the k-th outbound trip on one vehicle.
///
/// Each vehicle runs inbound, turns at the inbound terminal and runs
/// outbound. Trips without a partner get a vehicle of their own.
pub(crate) fn assign_pairs(
    inbound: Vec<PlannedTrip>,
    outbound: Vec<PlannedTrip>,
    min_layover: Duration,
) -> Result<(Vec<Trip>, Vec<Trip>), GenerationError> {
    if let (Some(first_in), Some(first_out)) = (inbound.first(), outbound.first()) {
        if first_in.terminal() != first_out.origin() {
            return Err(GenerationError::NoSharedTerminal {
                inbound_terminal: first_in.terminal().clone(),
                outbound_origin: first_out.origin().clone(),
            });
        }
    }

    for (k, (trip_in, trip_out)) in inbound.iter().zip(&outbound).enumerate() {
        let ready = trip_in.last_departure().checked_add(min_layover);
        if ready.is_none_or(|ready| trip_out.first_departure() < ready) {
            return Err(GenerationError::LayoverViolation {
                pairing: k + 1,
                inbound_departure: trip_in.last_departure(),
                outbound_departure: trip_out.first_departure(),
                min_layover_secs: min_layover.num_seconds(),
            });
        }
    }

    let paired = inbound.len().min(outbound.len());
    let inbound_count = inbound.len();

    let inbound_trips = inbound
        .into_iter()
        .enumerate()
        .map(|(k, p)| p.into_trip(vehicle_number(k)))
        .collect();
    let outbound_trips = outbound
        .into_iter()
        .enumerate()
        .map(|(k, p)| {
            // Unpaired outbound trips take numbers after every inbound vehicle
            let slot = if k < paired { k } else { inbound_count + k - paired };
            p.into_trip(vehicle_number(slot))
        })
        .collect();

    Ok((inbound_trips, outbound_trips))
}

fn vehicle_number(slot: usize) -> VehicleId {
    VehicleId(u32::try_from(slot).map_or(u32::MAX, |n| n.saturating_add(1)))
}
