//! Municipal transit timetable generator.
//!
//! Builds the full-day schedule of a transit line: trips at a fixed
//! headway inside each direction's operating window, every stop timed
//! from route geometry, vehicle speed and station dwell rules, and
//! vehicles rotated between directions.

pub mod domain;
pub mod generator;
pub mod geometry;
pub mod request;
