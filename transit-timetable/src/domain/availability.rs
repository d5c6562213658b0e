//! Service availability calendars.
//!
//! An `Availability` says on which calendar dates a schedule runs: a date
//! range, the days of the week inside it, and exception dates (holidays)
//! when service is withdrawn.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use super::ValidationError;

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekday_bit(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}

/// Calendar of active service dates.
///
/// # Invariants
///
/// - At least one weekday is set
/// - `start_date <= end_date`; both ends are inclusive
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use transit_timetable::domain::Availability;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
///
/// let availability = Availability::builder()
///     .from(d(3, 1))
///     .to(d(3, 31))
///     .working_days()
///     .exception_dates([d(3, 8)])
///     .build()
///     .unwrap();
///
/// assert!(availability.is_active_on(d(3, 4)));  // Monday
/// assert!(!availability.is_active_on(d(3, 9))); // Saturday
/// assert!(!availability.is_active_on(d(3, 8))); // exception
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    weekdays: u8,
    start_date: NaiveDate,
    end_date: NaiveDate,
    exception_dates: BTreeSet<NaiveDate>,
}

impl Availability {
    /// Create an availability calendar.
    pub fn new(
        weekdays: impl IntoIterator<Item = Weekday>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exception_dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let mask = weekdays.into_iter().fold(0, |acc, d| acc | weekday_bit(d));
        Self::from_parts(mask, Some(start_date), Some(end_date), exception_dates.into_iter().collect())
    }

    fn from_parts(
        weekdays: u8,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        exception_dates: BTreeSet<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        if weekdays == 0 {
            return Err(ValidationError::Availability(
                "at least one day of the week must be specified",
            ));
        }
        let start_date =
            start_date.ok_or(ValidationError::Availability("start date is required"))?;
        let end_date = end_date.ok_or(ValidationError::Availability("end date is required"))?;
        if start_date > end_date {
            return Err(ValidationError::Availability(
                "start date must not be after end date",
            ));
        }
        Ok(Self {
            weekdays,
            start_date,
            end_date,
            exception_dates,
        })
    }

    /// Start building a calendar.
    pub fn builder() -> AvailabilityBuilder {
        AvailabilityBuilder::default()
    }

    /// Monday to Friday between two dates.
    pub fn working_days(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        Self::builder().from(from).to(to).working_days().build()
    }

    /// Saturday and Sunday between two dates.
    pub fn weekend_days(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        Self::builder().from(from).to(to).weekend_days().build()
    }

    /// Every day between two dates.
    pub fn every_day(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        Self::builder().from(from).to(to).every_day().build()
    }

    /// Days of the week with service, Monday first.
    pub fn weekdays(&self) -> Vec<Weekday> {
        ALL_WEEKDAYS
            .into_iter()
            .filter(|d| self.runs_on(*d))
            .collect()
    }

    /// Does service run on this day of the week?
    pub fn runs_on(&self, day: Weekday) -> bool {
        self.weekdays & weekday_bit(day) != 0
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn exception_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.exception_dates
    }

    /// Does service run on this date?
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date
            && date <= self.end_date
            && self.runs_on(date.weekday())
            && !self.exception_dates.contains(&date)
    }

    /// All dates with service, in order.
    pub fn active_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .filter(|d| self.is_active_on(*d))
    }
}

/// Builder for [`Availability`].
#[derive(Debug, Clone, Default)]
pub struct AvailabilityBuilder {
    weekdays: u8,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    exception_dates: BTreeSet<NaiveDate>,
}

impl AvailabilityBuilder {
    /// First date of service (inclusive).
    pub fn from(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Last date of service (inclusive).
    pub fn to(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Add a day of the week.
    pub fn on(mut self, day: Weekday) -> Self {
        self.weekdays |= weekday_bit(day);
        self
    }

    /// Remove a day of the week.
    pub fn not_on(mut self, day: Weekday) -> Self {
        self.weekdays &= !weekday_bit(day);
        self
    }

    /// Add several days of the week.
    pub fn days(self, days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter().fold(self, |b, d| b.on(d))
    }

    pub fn working_days(self) -> Self {
        self.days(ALL_WEEKDAYS[..5].iter().copied())
    }

    pub fn weekend_days(self) -> Self {
        self.on(Weekday::Sat).on(Weekday::Sun)
    }

    pub fn every_day(self) -> Self {
        self.days(ALL_WEEKDAYS)
    }

    /// Add dates with no service.
    pub fn exception_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.exception_dates.extend(dates);
        self
    }

    /// Validate and build the calendar.
    pub fn build(self) -> Result<Availability, ValidationError> {
        Availability::from_parts(
            self.weekdays,
            self.start_date,
            self.end_date,
            self.exception_dates,
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    proptest! {
        /// Every active date is in range, on a selected weekday, and not an exception
        #[test]
        fn active_dates_respect_rules(
            mask in 1u8..128,
            start_offset in 0i64..365,
            len in 0i64..120,
            exceptions in proptest::collection::vec(0i64..500, 0..10),
        ) {
            let start = base() + chrono::Duration::days(start_offset);
            let end = start + chrono::Duration::days(len);
            let days: Vec<_> = ALL_WEEKDAYS
                .into_iter()
                .filter(|d| mask & weekday_bit(*d) != 0)
                .collect();
            let exception_dates: Vec<_> = exceptions
                .iter()
                .map(|o| base() + chrono::Duration::days(*o))
                .collect();

            let a = Availability::new(days.clone(), start, end, exception_dates.clone()).unwrap();

            for date in a.active_dates() {
                prop_assert!(date >= start && date <= end);
                prop_assert!(days.contains(&date.weekday()));
                prop_assert!(!exception_dates.contains(&date));
            }

            let expected = start
                .iter_days()
                .take_while(|d| *d <= end)
                .filter(|d| days.contains(&d.weekday()) && !exception_dates.contains(d))
                .count();
            prop_assert_eq!(a.active_dates().count(), expected);
        }

        /// Reversed ranges are always rejected
        #[test]
        fn reversed_range_rejected(start_offset in 1i64..365, back in 1i64..365) {
            let start = base() + chrono::Duration::days(start_offset + back);
            let end = base() + chrono::Duration::days(start_offset);
            prop_assert!(Availability::every_day(start, end).is_err());
        }
    }
}
