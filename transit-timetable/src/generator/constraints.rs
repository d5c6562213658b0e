//! Timing constraints for one generation run.

use std::fmt;

use chrono::Duration;

use crate::domain::{Direction, ServiceTime};

/// Error returned when transit constraints are inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid constraints: {reason}")]
pub struct InvalidConstraints {
    reason: &'static str,
}

impl InvalidConstraints {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// The rule that was broken.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Span of the service day in which trips of one direction start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingWindow {
    start: ServiceTime,
    end: ServiceTime,
}

impl OperatingWindow {
    pub fn start(&self) -> ServiceTime {
        self.start
    }

    pub fn end(&self) -> ServiceTime {
        self.end
    }

    pub fn length(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }
}

impl fmt::Display for OperatingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Operating windows, headway and layover governing one generation run.
///
/// # Invariants
///
/// - Each window starts strictly before it ends
/// - Headway is at least one second
/// - Minimum layover is not negative
///
/// Durations are kept to whole seconds.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use transit_timetable::domain::{Direction, ServiceTime};
/// use transit_timetable::generator::TransitConstraints;
///
/// let t = |s| ServiceTime::parse(s).unwrap();
///
/// let constraints = TransitConstraints::new(
///     t("06:00"), t("22:00"),
///     t("06:30"), t("22:30"),
///     Duration::minutes(10),
///     Duration::minutes(5),
/// )
/// .unwrap();
/// assert_eq!(constraints.window(Direction::Outbound).unwrap().to_string(), "06:30:00-22:30:00");
///
/// // Windows must not be empty
/// assert!(TransitConstraints::inbound_only(t("07:00"), t("07:00"), Duration::minutes(5), Duration::zero()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitConstraints {
    inbound: OperatingWindow,
    outbound: Option<OperatingWindow>,
    headway: Duration,
    min_layover: Duration,
}

impl TransitConstraints {
    /// Create constraints for a line running in both directions.
    pub fn new(
        inbound_start: ServiceTime,
        inbound_end: ServiceTime,
        outbound_start: ServiceTime,
        outbound_end: ServiceTime,
        headway: Duration,
        min_layover: Duration,
    ) -> Result<Self, InvalidConstraints> {
        let inbound = window(Direction::Inbound, inbound_start, inbound_end)?;
        let outbound = window(Direction::Outbound, outbound_start, outbound_end)?;
        Self::build(inbound, Some(outbound), headway, min_layover)
    }

    /// Create constraints for a line that only runs inbound.
    pub fn inbound_only(
        start: ServiceTime,
        end: ServiceTime,
        headway: Duration,
        min_layover: Duration,
    ) -> Result<Self, InvalidConstraints> {
        let inbound = window(Direction::Inbound, start, end)?;
        Self::build(inbound, None, headway, min_layover)
    }

    fn build(
        inbound: OperatingWindow,
        outbound: Option<OperatingWindow>,
        headway: Duration,
        min_layover: Duration,
    ) -> Result<Self, InvalidConstraints> {
        if headway.num_seconds() < 1 {
            return Err(InvalidConstraints::new(
                "headway must be at least one second",
            ));
        }
        if min_layover < Duration::zero() {
            return Err(InvalidConstraints::new("minimum layover cannot be negative"));
        }
        Ok(Self {
            inbound,
            outbound,
            headway: Duration::seconds(headway.num_seconds()),
            min_layover: Duration::seconds(min_layover.num_seconds()),
        })
    }

    /// Operating window for a direction, if that direction runs.
    pub fn window(&self, direction: Direction) -> Option<OperatingWindow> {
        match direction {
            Direction::Inbound => Some(self.inbound),
            Direction::Outbound => self.outbound,
        }
    }

    /// Interval between consecutive departures in one direction.
    pub fn headway(&self) -> Duration {
        self.headway
    }

    /// Shortest turnaround between a vehicle's trips.
    pub fn min_layover(&self) -> Duration {
        self.min_layover
    }

    pub fn is_bidirectional(&self) -> bool {
        self.outbound.is_some()
    }
}

fn window(
    direction: Direction,
    start: ServiceTime,
    end: ServiceTime,
) -> Result<OperatingWindow, InvalidConstraints> {
    if start >= end {
        return Err(InvalidConstraints::new(match direction {
            Direction::Inbound => "inbound window start must be before its end",
            Direction::Outbound => "outbound window start must be before its end",
        }));
    }
    Ok(OperatingWindow { start, end })
}
