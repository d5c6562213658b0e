//! Domain validation errors.
//!
//! These errors are raised when a domain value is constructed from malformed
//! input. Construction always fails fast; nothing is clamped or defaulted.

use super::{InvalidId, StationId};

/// A domain value failed validation at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Malformed identifier
    #[error(transparent)]
    Id(#[from] InvalidId),

    /// Dwell window, duration or probability out of range
    #[error("invalid dwell: {0}")]
    Dwell(&'static str),

    /// Availability calendar is empty or reversed
    #[error("invalid availability: {0}")]
    Availability(&'static str),

    /// Segment endpoints or length are invalid
    #[error("invalid segment {begin} -> {end}: {reason}")]
    Segment {
        begin: StationId,
        end: StationId,
        reason: &'static str,
    },

    /// Route has no segments or its segments don't join up
    #[error("invalid route {route}: {reason}")]
    Route { route: String, reason: &'static str },

    /// Stop departs before it arrives, or trip runs backwards
    #[error("invalid trip: {0}")]
    Trip(&'static str),

    /// Speed is zero, negative or not finite
    #[error("invalid speed: {0}")]
    Speed(&'static str),

    /// Station record is incomplete or its location out of range
    #[error("invalid station: {0}")]
    Station(&'static str),
}
