//! Station dwell rules.
//!
//! A `Dwell` says how long a vehicle lingers at a station when it arrives
//! inside a time-of-day window, and how likely it is to stop at all.
//! Designated stops dwell with probability 1; hail-and-ride stops only stop
//! when somebody is waiting, which is modelled as a probability below 1.

use std::fmt;

use chrono::Duration;

use super::{ServiceTime, ValidationError};

/// Probability of a designated stop.
pub const REGULAR_PROBABILITY: f64 = 1.0;
/// Probability of a stop that is as likely to be made as skipped.
pub const EQUALLY_LIKELY_PROBABILITY: f64 = 0.5;

/// Classification of a dwell by its probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DwellKind {
    /// Probability 1: vehicles always stop.
    Regular,
    /// Probability 0.5.
    EquallyLikely,
    /// Any other probability below 1.
    Hail,
}

/// A validated dwell rule.
///
/// The window is half-open, `[from, to)`, and measured on a single
/// calendar day; `to` may be `24:00:00`.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use transit_timetable::domain::{Dwell, DwellKind, ServiceTime};
///
/// let t = |s| ServiceTime::parse(s).unwrap();
///
/// let peak = Dwell::regular(t("07:00"), t("09:00"), Duration::seconds(40)).unwrap();
/// assert!(peak.is_regular());
/// assert!(peak.applies(t("08:15")));
/// assert!(!peak.applies(t("09:00")));
///
/// let hail = Dwell::all_day_hail(Duration::seconds(20), 0.25).unwrap();
/// assert_eq!(hail.kind(), DwellKind::Hail);
///
/// // Zero-length and oversized dwells are rejected
/// assert!(Dwell::regular(t("07:00"), t("07:00"), Duration::seconds(1)).is_err());
/// assert!(Dwell::regular(t("07:00"), t("07:01"), Duration::seconds(61)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dwell {
    from: ServiceTime,
    to: ServiceTime,
    duration: Duration,
    probability: f64,
    kind: DwellKind,
}

impl Dwell {
    fn new(
        from: ServiceTime,
        to: ServiceTime,
        duration: Duration,
        probability: f64,
    ) -> Result<Self, ValidationError> {
        if from >= to {
            return Err(ValidationError::Dwell("window start must be before its end"));
        }
        if to > ServiceTime::END_OF_DAY {
            return Err(ValidationError::Dwell("window must end by 24:00:00"));
        }
        if duration.num_seconds() <= 0 {
            return Err(ValidationError::Dwell("dwell duration must be positive"));
        }
        if duration > to.signed_duration_since(from) {
            return Err(ValidationError::Dwell(
                "dwell duration cannot exceed its window",
            ));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(ValidationError::Dwell("probability must be within [0, 1]"));
        }

        let kind = if probability == REGULAR_PROBABILITY {
            DwellKind::Regular
        } else if probability == EQUALLY_LIKELY_PROBABILITY {
            DwellKind::EquallyLikely
        } else {
            DwellKind::Hail
        };

        Ok(Self {
            from,
            to,
            duration: Duration::seconds(duration.num_seconds()),
            probability,
            kind,
        })
    }

    /// A designated stop: vehicles always dwell for `duration`.
    pub fn regular(
        from: ServiceTime,
        to: ServiceTime,
        duration: Duration,
    ) -> Result<Self, ValidationError> {
        Self::new(from, to, duration, REGULAR_PROBABILITY)
    }

    /// A hail-and-ride stop that is served with the given probability.
    pub fn hail(
        from: ServiceTime,
        to: ServiceTime,
        duration: Duration,
        probability: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(from, to, duration, probability)
    }

    /// A stop served half of the time.
    pub fn equally_likely(
        from: ServiceTime,
        to: ServiceTime,
        duration: Duration,
    ) -> Result<Self, ValidationError> {
        Self::new(from, to, duration, EQUALLY_LIKELY_PROBABILITY)
    }

    pub fn all_day_regular(duration: Duration) -> Result<Self, ValidationError> {
        Self::regular(ServiceTime::MIDNIGHT, ServiceTime::END_OF_DAY, duration)
    }

    pub fn all_day_hail(duration: Duration, probability: f64) -> Result<Self, ValidationError> {
        Self::hail(
            ServiceTime::MIDNIGHT,
            ServiceTime::END_OF_DAY,
            duration,
            probability,
        )
    }

    pub fn all_day_equally_likely(duration: Duration) -> Result<Self, ValidationError> {
        Self::equally_likely(ServiceTime::MIDNIGHT, ServiceTime::END_OF_DAY, duration)
    }

    pub fn from(&self) -> ServiceTime {
        self.from
    }

    pub fn to(&self) -> ServiceTime {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn kind(&self) -> DwellKind {
        self.kind
    }

    /// Vehicles always stop.
    pub fn is_regular(&self) -> bool {
        self.probability == REGULAR_PROBABILITY
    }

    /// Vehicles may pass without stopping.
    pub fn is_hail(&self) -> bool {
        self.probability < REGULAR_PROBABILITY
    }

    /// Does an arrival at `time` fall inside this rule's window?
    ///
    /// Times past midnight are folded back onto the calendar day first.
    pub fn applies(&self, time: ServiceTime) -> bool {
        let time = time.time_of_day();
        self.from <= time && time < self.to
    }

    /// Do the two windows share an interval of positive length?
    ///
    /// Windows that only touch (`a.to == b.from`) do not overlap.
    pub fn overlaps(&self, other: &Dwell) -> bool {
        self.from < other.to && other.from < self.to
    }

    /// Mean dwell over many arrivals, rounded up to a whole second.
    pub fn expected_duration(&self) -> Duration {
        let secs = self.duration.num_seconds() as f64 * self.probability;
        Duration::seconds(secs.ceil() as i64)
    }
}

impl fmt::Display for Dwell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}s at p={} in [{}, {})",
            self.duration.num_seconds(),
            self.probability,
            self.from,
            self.to
        )
    }
}
