//! Identifier types for cross-aggregate references.
//!
//! Stations and lines are referenced by identifier inside the generator.
//! Resolving an identifier to the full record happens at the boundary.

use std::fmt;

/// Error returned when an identifier is empty or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {reason}")]
pub struct InvalidId {
    reason: &'static str,
}

fn check_id(s: &str) -> Result<(), InvalidId> {
    if s.trim().is_empty() {
        return Err(InvalidId {
            reason: "identifier cannot be blank",
        });
    }
    if s.trim() != s {
        return Err(InvalidId {
            reason: "identifier cannot have surrounding whitespace",
        });
    }
    Ok(())
}

/// Identifier of a station.
///
/// # Examples
///
/// ```
/// use transit_timetable::domain::StationId;
///
/// let id = StationId::new("central").unwrap();
/// assert_eq!(id.as_str(), "central");
///
/// assert!(StationId::new("").is_err());
/// assert!(StationId::new("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Create a station identifier, rejecting blank strings.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidId> {
        let s = s.into();
        check_id(&s)?;
        Ok(Self(s))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a line.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(String);

impl LineId {
    /// Create a line identifier, rejecting blank strings.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidId> {
        let s = s.into();
        check_id(&s)?;
        Ok(Self(s))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vehicle number within one generated schedule, starting at 1.
///
/// Vehicle numbers are assigned by the generator and only mean something
/// relative to the schedule that contains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u32);

impl VehicleId {
    /// Returns the next vehicle number.
    pub fn next(self) -> Self {
        VehicleId(self.0 + 1)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
