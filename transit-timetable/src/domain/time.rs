//! Service-day clock times.
//!
//! Timetables are computed against a service day rather than a calendar
//! date. A trip leaving at 23:50 and arriving twenty minutes later is
//! recorded as arriving at 24:10, so times along a trip never go backwards.
//! `ServiceTime` counts whole seconds from the start of the service day.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;
use std::ops::Add;

/// Seconds in one calendar day.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time on the service day, with one-second resolution.
///
/// Values past `24:00:00` are legal and denote the early hours of the
/// following calendar day.
///
/// # Examples
///
/// ```
/// use transit_timetable::domain::ServiceTime;
///
/// let t = ServiceTime::parse("06:30").unwrap();
/// assert_eq!(t.seconds(), 6 * 3600 + 30 * 60);
/// assert_eq!(t.to_string(), "06:30:00");
///
/// let late = ServiceTime::parse("25:10:05").unwrap();
/// assert_eq!(late.time_of_day().to_string(), "01:10:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ServiceTime(u32);

impl ServiceTime {
    /// Start of the service day.
    pub const MIDNIGHT: ServiceTime = ServiceTime(0);

    /// `24:00:00`, the exclusive end of a calendar day.
    pub const END_OF_DAY: ServiceTime = ServiceTime(SECONDS_PER_DAY);

    /// Create a time from seconds since the start of the service day.
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Create a time from hour, minute and second components.
    ///
    /// Hours may exceed 23; minutes and seconds must be below 60.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }
        hour.checked_mul(3600)
            .and_then(|h| h.checked_add(minute * 60 + second))
            .map(Self)
            .ok_or_else(|| TimeError::new("hour out of range"))
    }

    /// Parse a time in `HH:MM` or `HH:MM:SS` format.
    ///
    /// The hour field takes two or more digits so that after-midnight
    /// service (`24:15`, `25:00:30`) can be written directly.
    ///
    /// ```
    /// use transit_timetable::domain::ServiceTime;
    ///
    /// assert!(ServiceTime::parse("00:00").is_ok());
    /// assert!(ServiceTime::parse("23:59:59").is_ok());
    /// assert!(ServiceTime::parse("24:30").is_ok());
    ///
    /// assert!(ServiceTime::parse("0630").is_err());
    /// assert!(ServiceTime::parse("06:3").is_err());
    /// assert!(ServiceTime::parse("06:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.split(':');
        let hour = parts
            .next()
            .filter(|h| h.len() >= 2)
            .ok_or_else(|| TimeError::new("expected HH:MM or HH:MM:SS format"))?;
        let minute = parts
            .next()
            .ok_or_else(|| TimeError::new("expected HH:MM or HH:MM:SS format"))?;
        let second = parts.next();
        if parts.next().is_some() {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
        }

        let hour = parse_digits(hour).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(minute.as_bytes())
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        let second = match second {
            Some(sec) => parse_two_digits(sec.as_bytes())
                .ok_or_else(|| TimeError::new("invalid second digits"))?,
            None => 0,
        };

        Self::from_hms(hour, minute, second)
    }

    /// Seconds since the start of the service day.
    pub fn seconds(self) -> u32 {
        self.0
    }

    /// Returns the hour, which may be 24 or more.
    pub fn hour(self) -> u32 {
        self.0 / 3600
    }

    /// Returns the minute (0-59).
    pub fn minute(self) -> u32 {
        (self.0 / 60) % 60
    }

    /// Returns the second (0-59).
    pub fn second(self) -> u32 {
        self.0 % 60
    }

    /// Folds the time back onto a single calendar day (`00:00:00..24:00:00`).
    pub fn time_of_day(self) -> Self {
        Self(self.0 % SECONDS_PER_DAY)
    }

    /// Add a signed duration, returning `None` if the result would fall
    /// before the start of the service day or overflow.
    ///
    /// Sub-second parts of the duration are discarded.
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let secs = i64::from(self.0).checked_add(duration.num_seconds())?;
        u32::try_from(secs).ok().map(Self)
    }

    /// Subtract a signed duration.
    pub fn checked_sub(self, duration: Duration) -> Option<Self> {
        let secs = i64::from(self.0).checked_sub(duration.num_seconds())?;
        u32::try_from(secs).ok().map(Self)
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(self, other: Self) -> Duration {
        Duration::seconds(i64::from(self.0) - i64::from(other.0))
    }
}

impl From<NaiveTime> for ServiceTime {
    fn from(time: NaiveTime) -> Self {
        Self(time.num_seconds_from_midnight())
    }
}

/// # Panics
///
/// Panics if the result falls outside the service clock; use
/// [`ServiceTime::checked_add`] for untrusted durations.
impl Add<Duration> for ServiceTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs).expect("service time overflow")
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceTime({self})")
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// Parse an all-digit field of any length.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
