//! Constraint-driven timetable generation.
//!
//! This module turns a line's route geometry and a set of timing
//! constraints into a complete schedule: trips at a fixed headway in each
//! direction, every stop timed from segment lengths, vehicle speed and
//! per-station dwell rules, and vehicles assigned so that each one gets
//! its minimum layover between trips.
//!
//! Generation is deterministic: probabilistic dwells are collapsed to a
//! fixed duration, and the same request always yields the same schedule.

mod config;
mod constraints;
mod resolver;
mod rotation;
mod schedule;
mod trip_factory;

pub use config::{GeneratorConfig, Rotation, WindowBound};
pub use constraints::{InvalidConstraints, OperatingWindow, TransitConstraints};
pub use resolver::{ConfigurationError, DwellTimeResolver, HailPolicy};
pub use schedule::{GenerationError, ScheduleGenerator, ScheduleRequest};
pub use trip_factory::TripFactory;
