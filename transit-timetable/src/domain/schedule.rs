//! Generated schedules.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::{Availability, Direction, LineId, Trip, VehicleId};

/// The trips of one line for both directions, valid on an availability
/// calendar.
///
/// Schedules are built by the generator and are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    line: LineId,
    availability: Availability,
    description: String,
    inbound: Vec<Trip>,
    outbound: Vec<Trip>,
}

impl Schedule {
    pub(crate) fn new(
        line: LineId,
        availability: Availability,
        description: String,
        inbound: Vec<Trip>,
        outbound: Vec<Trip>,
    ) -> Self {
        Self {
            line,
            availability,
            description,
            inbound,
            outbound,
        }
    }

    pub fn line(&self) -> &LineId {
        &self.line
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Trips in the given direction, ordered by first departure.
    pub fn trips(&self, direction: Direction) -> &[Trip] {
        match direction {
            Direction::Inbound => &self.inbound,
            Direction::Outbound => &self.outbound,
        }
    }

    /// All trips, inbound first.
    pub fn all_trips(&self) -> impl Iterator<Item = &Trip> + '_ {
        self.inbound.iter().chain(&self.outbound)
    }

    pub fn trip_count(&self) -> usize {
        self.inbound.len() + self.outbound.len()
    }

    /// Number of distinct vehicles needed to run every trip.
    pub fn vehicle_count(&self) -> usize {
        self.all_trips()
            .map(Trip::vehicle)
            .collect::<BTreeSet<VehicleId>>()
            .len()
    }

    /// Trips run by one vehicle, in departure order.
    pub fn vehicle_block(&self, vehicle: VehicleId) -> Vec<&Trip> {
        let mut block: Vec<_> = self
            .all_trips()
            .filter(|t| t.vehicle() == vehicle)
            .collect();
        block.sort_by_key(|t| t.first_departure());
        block
    }

    /// Does this schedule run on the given date?
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.availability.is_active_on(date)
    }
}
