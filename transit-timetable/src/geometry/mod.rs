//! Distances between stations.
//!
//! Route segments are built without lengths; the distances come from an
//! outside source (a survey table, a routing service) and are filled in
//! before generation. This module provides lookup for station pairs and
//! their distances in metres.

use std::collections::HashMap;

use crate::domain::{Location, StationId};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A source of distances between pairs of stations.
pub trait DistanceLookup {
    /// Distance in metres travelling from `from` to `to`, if known.
    fn distance_m(&self, from: &StationId, to: &StationId) -> Option<f64>;
}

/// A table of known distances between stations.
///
/// Distances are symmetric: the distance from A to B is the distance from
/// B to A.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    /// Map from (from, to) to distance in metres.
    /// Stored in both directions for O(1) lookup.
    distances: HashMap<(StationId, StationId), f64>,
}

impl DistanceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the distance between two stations.
    ///
    /// The distance is stored symmetrically (both A→B and B→A). A later
    /// entry for the same pair replaces the earlier one.
    pub fn add(&mut self, from: StationId, to: StationId, metres: f64) {
        self.distances.insert((to.clone(), from.clone()), metres);
        self.distances.insert((from, to), metres);
    }

    /// Get the distance between two stations, if known.
    pub fn get(&self, from: &StationId, to: &StationId) -> Option<f64> {
        self.distances.get(&(from.clone(), to.clone())).copied()
    }

    /// Check if the distance between two stations is known.
    pub fn contains(&self, from: &StationId, to: &StationId) -> bool {
        self.get(from, to).is_some()
    }

    /// Returns the number of station pairs (counting A→B and B→A as one).
    pub fn len(&self) -> usize {
        self.distances
            .keys()
            .filter(|(from, to)| from <= to)
            .count()
    }

    /// Returns true if the table has no distances.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Create a closure suitable for `Route::resolve_lengths`.
    ///
    /// # Example
    ///
    /// ```
    /// use transit_timetable::domain::{Route, StationId};
    /// use transit_timetable::geometry::DistanceTableBuilder;
    ///
    /// let table = DistanceTableBuilder::new()
    ///     .add("A", "B", 600.0)
    ///     .build();
    ///
    /// let ids: Vec<_> = ["B", "A"].iter().map(|s| StationId::new(*s).unwrap()).collect();
    /// let route = Route::through("1", &ids)
    ///     .unwrap()
    ///     .resolve_lengths(table.as_lookup())
    ///     .unwrap();
    ///
    /// assert_eq!(route.total_length_m(), Some(600.0));
    /// ```
    pub fn as_lookup(&self) -> impl Fn(&StationId, &StationId) -> Option<f64> + '_ {
        |from, to| self.get(from, to)
    }
}

impl DistanceLookup for DistanceTable {
    fn distance_m(&self, from: &StationId, to: &StationId) -> Option<f64> {
        self.get(from, to)
    }
}

/// Builder for creating distance tables.
///
/// Provides a fluent API for adding distances.
#[derive(Debug, Default)]
pub struct DistanceTableBuilder {
    inner: DistanceTable,
}

impl DistanceTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a distance in metres.
    ///
    /// Pairs with a blank or malformed station id are skipped.
    pub fn add(mut self, from: &str, to: &str, metres: f64) -> Self {
        if let (Ok(from), Ok(to)) = (StationId::new(from), StationId::new(to)) {
            self.inner.add(from, to, metres);
        }
        self
    }

    /// Build the distance table.
    pub fn build(self) -> DistanceTable {
        self.inner
    }
}

/// Great-circle distance between two locations, in metres.
///
/// Uses the haversine formula on a spherical Earth.
///
/// ```
/// use transit_timetable::domain::Location;
/// use transit_timetable::geometry::great_circle_m;
///
/// let a = Location::new(0.0, 0.0).unwrap();
/// let b = Location::new(0.0, 1.0).unwrap();
/// let d = great_circle_m(a, b);
/// assert!((d - 111_195.0).abs() < 1.0);
/// ```
pub fn great_circle_m(a: Location, b: Location) -> f64 {
    let (lat1, lat2) = (a.latitude().to_radians(), b.latitude().to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Straight-line distance estimates from station coordinates.
///
/// Used to fill in segments that no surveyed distance covers. Real track
/// is never shorter than the straight line, so these estimates understate
/// travel time.
#[derive(Debug, Clone, Default)]
pub struct StraightLine {
    locations: HashMap<StationId, Location>,
}

impl StraightLine {
    pub fn new(locations: impl IntoIterator<Item = (StationId, Location)>) -> Self {
        Self {
            locations: locations.into_iter().collect(),
        }
    }
}

impl DistanceLookup for StraightLine {
    fn distance_m(&self, from: &StationId, to: &StationId) -> Option<f64> {
        let a = self.locations.get(from)?;
        let b = self.locations.get(to)?;
        Some(great_circle_m(*a, *b))
    }
}

/// Look distances up in `primary`, falling back to `fallback` for pairs
/// it doesn't know.
#[derive(Debug, Clone)]
pub struct Fallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Fallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: DistanceLookup, F: DistanceLookup> DistanceLookup for Fallback<P, F> {
    fn distance_m(&self, from: &StationId, to: &StationId) -> Option<f64> {
        self.primary
            .distance_m(from, to)
            .or_else(|| self.fallback.distance_m(from, to))
    }
}

impl<T: DistanceLookup + ?Sized> DistanceLookup for &T {
    fn distance_m(&self, from: &StationId, to: &StationId) -> Option<f64> {
        (**self).distance_m(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::new(s).unwrap()
    }

    #[test]
    fn empty_table() {
        let table = DistanceTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.get(&id("A"), &id("B")).is_none());
    }

    #[test]
    fn add_and_lookup() {
        let mut table = DistanceTable::new();
        table.add(id("A"), id("B"), 420.0);

        assert!(!table.is_empty());
        assert_eq!(table.len(), 1);

        // Forward lookup
        assert_eq!(table.get(&id("A"), &id("B")), Some(420.0));

        // Reverse lookup (symmetric)
        assert_eq!(table.get(&id("B"), &id("A")), Some(420.0));

        // Unknown pair
        assert!(table.get(&id("A"), &id("C")).is_none());
    }

    #[test]
    fn later_entry_replaces_earlier() {
        let mut table = DistanceTable::new();
        table.add(id("A"), id("B"), 420.0);
        table.add(id("B"), id("A"), 500.0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&id("A"), &id("B")), Some(500.0));
    }

    #[test]
    fn builder() {
        let table = DistanceTableBuilder::new()
            .add("A", "B", 100.0)
            .add("B", "C", 200.0)
            .build();

        assert_eq!(table.len(), 2);
        assert!(table.contains(&id("C"), &id("B")));
    }

    #[test]
    fn builder_skips_invalid_ids() {
        let table = DistanceTableBuilder::new()
            .add("", "B", 100.0)
            .add(" A", "B", 100.0)
            .add("A", "B", 100.0)
            .build();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn lookup_trait_matches_table() {
        let table = DistanceTableBuilder::new().add("A", "B", 75.0).build();
        assert_eq!(table.distance_m(&id("B"), &id("A")), Some(75.0));
        assert_eq!((&table).distance_m(&id("A"), &id("B")), Some(75.0));
    }

    #[test]
    fn great_circle_zero_for_same_point() {
        let p = Location::new(48.85, 2.35).unwrap();
        assert_eq!(great_circle_m(p, p), 0.0);
    }

    #[test]
    fn straight_line_needs_both_locations() {
        let estimate = StraightLine::new([
            (id("A"), Location::new(0.0, 0.0).unwrap()),
            (id("B"), Location::new(0.0, 0.01).unwrap()),
        ]);
        let d = estimate.distance_m(&id("A"), &id("B")).unwrap();
        assert!((d - 1_111.95).abs() < 0.1);
        assert!(estimate.distance_m(&id("A"), &id("C")).is_none());
    }

    #[test]
    fn fallback_prefers_primary() {
        let surveyed = DistanceTableBuilder::new().add("A", "B", 1_500.0).build();
        let estimate = StraightLine::new([
            (id("A"), Location::new(0.0, 0.0).unwrap()),
            (id("B"), Location::new(0.0, 0.01).unwrap()),
            (id("C"), Location::new(0.0, 0.02).unwrap()),
        ]);
        let lookup = Fallback::new(&surveyed, &estimate);

        assert_eq!(lookup.distance_m(&id("A"), &id("B")), Some(1_500.0));
        assert!(lookup.distance_m(&id("B"), &id("C")).is_some());
        assert!(lookup.distance_m(&id("A"), &id("Z")).is_none());
    }
}
