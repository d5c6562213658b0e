//! Domain types for the timetable generator.
//!
//! This module contains the core domain model: stations, routes, dwell
//! rules, calendars and the trips a schedule is made of. All types enforce
//! their invariants at construction time, so code that receives these types
//! can trust their validity.

mod availability;
mod dwell;
mod error;
mod ids;
mod route;
mod schedule;
mod speed;
mod station;
mod time;
mod trip;

pub use availability::{Availability, AvailabilityBuilder};
pub use dwell::{Dwell, DwellKind, EQUALLY_LIKELY_PROBABILITY, REGULAR_PROBABILITY};
pub use error::ValidationError;
pub use ids::{InvalidId, LineId, StationId, VehicleId};
pub use route::{Direction, Line, Route, RouteError, Segment};
pub use schedule::Schedule;
pub use speed::{Speed, SpeedUnit};
pub use station::{Location, Station, UnknownVehicleType, VehicleType};
pub use time::{SECONDS_PER_DAY, ServiceTime, TimeError};
pub use trip::{Stop, StopIndex, Trip};
