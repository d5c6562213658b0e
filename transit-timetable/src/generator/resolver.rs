//! Per-station dwell resolution.
//!
//! The resolver answers one question: a vehicle arrives at this station at
//! this time, how long does it stay? Resolution never consults randomness;
//! probabilistic rules are collapsed to a fixed duration by a `HailPolicy`.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::domain::{Dwell, ServiceTime, StationId};

/// Error in dwell configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// Two always-applied rules claim the same part of the day
    #[error("overlapping regular dwells at station {station}: {first} and {second}")]
    OverlappingDwells {
        station: StationId,
        first: Dwell,
        second: Dwell,
    },

    #[error("default dwell cannot be negative")]
    NegativeDefaultDwell,
}

/// How a probabilistic dwell turns into a scheduled duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HailPolicy {
    /// The mean dwell: duration × probability, rounded up to a whole second.
    #[default]
    Expected,
    /// Schedule as if the vehicle always stops.
    Full,
    /// Schedule as if the vehicle never stops.
    Skip,
}

impl HailPolicy {
    /// Scheduled duration for a probabilistic rule.
    pub fn apply(self, dwell: &Dwell) -> Duration {
        match self {
            HailPolicy::Expected => dwell.expected_duration(),
            HailPolicy::Full => dwell.duration(),
            HailPolicy::Skip => Duration::zero(),
        }
    }
}

/// Resolves the dwell a vehicle spends at a station.
///
/// Rules are checked in this order:
/// 1. a regular rule whose window contains the arrival time;
/// 2. probabilistic rules whose windows contain the arrival time, collapsed
///    by the hail policy, taking the longest;
/// 3. the default dwell.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use transit_timetable::domain::{Dwell, ServiceTime, StationId};
/// use transit_timetable::generator::{DwellTimeResolver, HailPolicy};
///
/// let t = |s| ServiceTime::parse(s).unwrap();
/// let market = StationId::new("market").unwrap();
///
/// let resolver = DwellTimeResolver::new(Duration::seconds(15), HailPolicy::Expected)
///     .unwrap()
///     .with_station(
///         market.clone(),
///         vec![Dwell::regular(t("07:00"), t("09:00"), Duration::seconds(60)).unwrap()],
///     )
///     .unwrap();
///
/// assert_eq!(resolver.resolve(&market, t("08:00")), Duration::seconds(60));
/// assert_eq!(resolver.resolve(&market, t("10:00")), Duration::seconds(15));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DwellTimeResolver {
    default_dwell: Duration,
    policy: HailPolicy,
    rules: BTreeMap<StationId, Vec<Dwell>>,
}

impl DwellTimeResolver {
    /// Create a resolver with no station rules.
    pub fn new(default_dwell: Duration, policy: HailPolicy) -> Result<Self, ConfigurationError> {
        if default_dwell < Duration::zero() {
            return Err(ConfigurationError::NegativeDefaultDwell);
        }
        Ok(Self {
            default_dwell: Duration::seconds(default_dwell.num_seconds()),
            policy,
            rules: BTreeMap::new(),
        })
    }

    /// Add dwell rules for a station.
    ///
    /// Rules added for a station that already has rules are merged with
    /// them. Fails if two regular rules of the station overlap; the
    /// resolver is left unchanged in that case.
    pub fn add_station(
        &mut self,
        station: StationId,
        dwells: impl IntoIterator<Item = Dwell>,
    ) -> Result<(), ConfigurationError> {
        let mut merged = self.rules.get(&station).cloned().unwrap_or_default();
        merged.extend(dwells);

        let regular: Vec<&Dwell> = merged.iter().filter(|d| d.is_regular()).collect();
        for (i, first) in regular.iter().enumerate() {
            if let Some(second) = regular[i + 1..].iter().find(|d| first.overlaps(d)) {
                return Err(ConfigurationError::OverlappingDwells {
                    station,
                    first: **first,
                    second: **second,
                });
            }
        }

        self.rules.insert(station, merged);
        Ok(())
    }

    /// Returns the resolver with dwell rules added for a station.
    pub fn with_station(
        mut self,
        station: StationId,
        dwells: impl IntoIterator<Item = Dwell>,
    ) -> Result<Self, ConfigurationError> {
        self.add_station(station, dwells)?;
        Ok(self)
    }

    pub fn default_dwell(&self) -> Duration {
        self.default_dwell
    }

    pub fn policy(&self) -> HailPolicy {
        self.policy
    }

    /// Rules configured for a station.
    pub fn rules(&self, station: &StationId) -> &[Dwell] {
        self.rules.get(station).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dwell for a vehicle arriving at `station` at `arrival`.
    pub fn resolve(&self, station: &StationId, arrival: ServiceTime) -> Duration {
        let rules = self.rules(station);

        if let Some(regular) = rules
            .iter()
            .find(|d| d.is_regular() && d.applies(arrival))
        {
            return regular.duration();
        }

        rules
            .iter()
            .filter(|d| d.is_hail() && d.applies(arrival))
            .map(|d| self.policy.apply(d))
            .max()
            .unwrap_or(self.default_dwell)
    }
}

impl Default for DwellTimeResolver {
    fn default() -> Self {
        Self {
            default_dwell: Duration::zero(),
            policy: HailPolicy::default(),
            rules: BTreeMap::new(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Resolution is a pure function of its inputs
        #[test]
        fn resolve_is_deterministic(
            arrival in 0u32..2 * crate::domain::SECONDS_PER_DAY,
            duration in 1i64..600,
            probability in 0.0f64..=1.0,
        ) {
            let station = StationId::new("A").unwrap();
            let resolver = DwellTimeResolver::default()
                .with_station(
                    station.clone(),
                    vec![Dwell::all_day_hail(Duration::seconds(duration), probability).unwrap()],
                )
                .unwrap();
            let at = ServiceTime::from_seconds(arrival);
            prop_assert_eq!(resolver.resolve(&station, at), resolver.resolve(&station, at));
        }

        /// A resolved dwell never exceeds the longest applicable rule or the default
        #[test]
        fn resolve_is_bounded(
            arrival in 0u32..crate::domain::SECONDS_PER_DAY,
            durations in proptest::collection::vec(1i64..600, 1..5),
            probability in 0.0f64..1.0,
            default in 0i64..60,
        ) {
            let station = StationId::new("A").unwrap();
            let rules: Vec<_> = durations
                .iter()
                .map(|d| Dwell::all_day_hail(Duration::seconds(*d), probability).unwrap())
                .collect();
            let resolver = DwellTimeResolver::new(Duration::seconds(default), HailPolicy::Expected)
                .unwrap()
                .with_station(station.clone(), rules)
                .unwrap();
            let longest = durations.iter().max().copied().unwrap_or(0);
            let resolved = resolver.resolve(&station, ServiceTime::from_seconds(arrival));
            prop_assert!(resolved >= Duration::zero());
            prop_assert!(resolved <= Duration::seconds(longest));
        }
    }
}
