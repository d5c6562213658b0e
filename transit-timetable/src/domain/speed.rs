//! Average vehicle speed.

use std::fmt;

use super::ValidationError;

/// Unit a speed was expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedUnit {
    MetresPerSecond,
    KilometresPerHour,
    MilesPerHour,
}

impl SpeedUnit {
    /// Distance and time one unit of this speed stands for, as
    /// (metres, seconds).
    fn metres_and_seconds(self) -> (f64, f64) {
        match self {
            SpeedUnit::MetresPerSecond => (1.0, 1.0),
            SpeedUnit::KilometresPerHour => (1000.0, 3600.0),
            SpeedUnit::MilesPerHour => (1609.344, 3600.0),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            SpeedUnit::MetresPerSecond => "m/s",
            SpeedUnit::KilometresPerHour => "km/h",
            SpeedUnit::MilesPerHour => "mph",
        }
    }
}

/// A strictly positive, finite speed.
///
/// # Examples
///
/// ```
/// use transit_timetable::domain::{Speed, SpeedUnit};
///
/// let speed = Speed::new(36.0, SpeedUnit::KilometresPerHour).unwrap();
/// assert!((speed.metres_per_second() - 10.0).abs() < 1e-9);
///
/// assert!(Speed::new(0.0, SpeedUnit::MetresPerSecond).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    value: f64,
    unit: SpeedUnit,
}

impl Speed {
    /// Create a speed; zero, negative and non-finite values are rejected.
    pub fn new(value: f64, unit: SpeedUnit) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::Speed("speed must be a finite number"));
        }
        if value <= 0.0 {
            return Err(ValidationError::Speed("speed must be positive"));
        }
        Ok(Self { value, unit })
    }

    /// Shorthand for a speed in metres per second.
    pub fn from_mps(value: f64) -> Result<Self, ValidationError> {
        Self::new(value, SpeedUnit::MetresPerSecond)
    }

    /// The value in the unit it was given in.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> SpeedUnit {
        self.unit
    }

    /// The speed normalised to metres per second.
    pub fn metres_per_second(&self) -> f64 {
        let (metres, seconds) = self.unit.metres_and_seconds();
        self.value * metres / seconds
    }

    /// Seconds needed to cover `metres`, unrounded.
    ///
    /// Computed in the speed's own unit rather than through
    /// [`Speed::metres_per_second`], so exact halves stay exact.
    pub fn seconds_to_cover(&self, metres: f64) -> f64 {
        let (unit_metres, unit_seconds) = self.unit.metres_and_seconds();
        metres * unit_seconds / (self.value * unit_metres)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}
