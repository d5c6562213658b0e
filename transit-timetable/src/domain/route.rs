//! Route geometry and lines.
//!
//! A `Route` is an ordered chain of `Segment`s; each segment joins two
//! stations and carries the distance between them. Distances come from an
//! external collaborator and may still be unresolved when a route is first
//! built, so a segment length is optional until generation time.

use std::fmt;

use super::{LineId, StationId, ValidationError, VehicleType};

/// Travel direction of a trip along a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Inbound => Direction::Outbound,
            Direction::Outbound => Direction::Inbound,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route geometry that can't be used to time a trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The distance collaborator never filled in this segment
    #[error("route {route}: length of segment {begin} -> {end} is unresolved")]
    MissingLength {
        route: String,
        begin: StationId,
        end: StationId,
    },

    /// Travel time doesn't fit on the service-day clock
    #[error("route {route}: travel time from {begin} to {end} is out of range")]
    TravelTimeOutOfRange {
        route: String,
        begin: StationId,
        end: StationId,
    },
}

/// An edge of a route: two consecutive stations and the distance between
/// them in metres.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    begin: StationId,
    end: StationId,
    length_m: Option<f64>,
}

impl Segment {
    /// Create a segment with a known length.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_timetable::domain::{Segment, StationId};
    ///
    /// let a = StationId::new("A").unwrap();
    /// let b = StationId::new("B").unwrap();
    ///
    /// let seg = Segment::new(a.clone(), b.clone(), 600.0).unwrap();
    /// assert_eq!(seg.length_m(), Some(600.0));
    ///
    /// assert!(Segment::new(a, b, -1.0).is_err());
    /// ```
    pub fn new(begin: StationId, end: StationId, length_m: f64) -> Result<Self, ValidationError> {
        Self::unresolved(begin, end)?.with_length(length_m)
    }

    /// Create a segment whose length is not yet known.
    pub fn unresolved(begin: StationId, end: StationId) -> Result<Self, ValidationError> {
        if begin == end {
            return Err(ValidationError::Segment {
                begin,
                end,
                reason: "segment must join two distinct stations",
            });
        }
        Ok(Self {
            begin,
            end,
            length_m: None,
        })
    }

    /// Returns this segment with its length set.
    pub fn with_length(self, length_m: f64) -> Result<Self, ValidationError> {
        if !length_m.is_finite() {
            return Err(ValidationError::Segment {
                begin: self.begin,
                end: self.end,
                reason: "length must be a finite number",
            });
        }
        if length_m < 0.0 {
            return Err(ValidationError::Segment {
                begin: self.begin,
                end: self.end,
                reason: "length cannot be negative",
            });
        }
        Ok(Self {
            length_m: Some(length_m),
            ..self
        })
    }

    pub fn begin(&self) -> &StationId {
        &self.begin
    }

    pub fn end(&self) -> &StationId {
        &self.end
    }

    /// Length in metres, if resolved.
    pub fn length_m(&self) -> Option<f64> {
        self.length_m
    }
}

/// An ordered chain of connected segments.
///
/// # Invariants
///
/// - At least one segment, so at least two stations
/// - `segments[i].end() == segments[i + 1].begin()`
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    code: String,
    segments: Vec<Segment>,
    headsign: Option<String>,
}

impl Route {
    /// Create a route from its segments, checking they join up.
    pub fn new(code: impl Into<String>, segments: Vec<Segment>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(ValidationError::Route {
                route: code,
                reason: "route code cannot be blank",
            });
        }
        if segments.is_empty() {
            return Err(ValidationError::Route {
                route: code,
                reason: "route needs at least one segment",
            });
        }
        if segments.windows(2).any(|w| w[0].end() != w[1].begin()) {
            return Err(ValidationError::Route {
                route: code,
                reason: "consecutive segments must share a station",
            });
        }
        Ok(Self {
            code,
            segments,
            headsign: None,
        })
    }

    /// Build a route through the given stations with every length
    /// unresolved.
    ///
    /// ```
    /// use transit_timetable::domain::{Route, StationId};
    ///
    /// let ids: Vec<_> = ["A", "B", "C"].iter().map(|s| StationId::new(*s).unwrap()).collect();
    /// let route = Route::through("1", &ids).unwrap();
    /// assert_eq!(route.station_count(), 3);
    /// assert!(!route.is_fully_resolved());
    /// ```
    pub fn through(code: impl Into<String>, stations: &[StationId]) -> Result<Self, ValidationError> {
        let segments = stations
            .windows(2)
            .map(|w| Segment::unresolved(w[0].clone(), w[1].clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(code, segments)
    }

    /// Returns this route with a headsign shown on its trips.
    pub fn with_headsign(mut self, headsign: impl Into<String>) -> Self {
        self.headsign = Some(headsign.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn headsign(&self) -> Option<&str> {
        self.headsign.as_deref()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Stations in travel order.
    pub fn stations(&self) -> impl Iterator<Item = &StationId> + '_ {
        std::iter::once(self.origin()).chain(self.segments.iter().map(Segment::end))
    }

    pub fn station_count(&self) -> usize {
        self.segments.len() + 1
    }

    /// First station of the route.
    pub fn origin(&self) -> &StationId {
        // Safe: a route always has at least one segment
        self.segments[0].begin()
    }

    /// Last station of the route.
    pub fn terminal(&self) -> &StationId {
        // Safe: a route always has at least one segment
        self.segments[self.segments.len() - 1].end()
    }

    /// True once every segment has a length.
    pub fn is_fully_resolved(&self) -> bool {
        self.segments.iter().all(|s| s.length_m.is_some())
    }

    /// Sum of all segment lengths, if every one is resolved.
    pub fn total_length_m(&self) -> Option<f64> {
        self.segments.iter().map(Segment::length_m).sum()
    }

    /// Returns the route with segment lengths replaced.
    ///
    /// `lengths` must have one entry per segment.
    pub fn with_lengths(self, lengths: &[f64]) -> Result<Self, ValidationError> {
        if lengths.len() != self.segments.len() {
            return Err(ValidationError::Route {
                route: self.code,
                reason: "one length is needed per segment",
            });
        }
        let segments = self
            .segments
            .into_iter()
            .zip(lengths)
            .map(|(seg, &len)| seg.with_length(len))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments, ..self })
    }

    /// Returns the route with unresolved lengths filled in from `lookup`.
    ///
    /// Segments the lookup doesn't know stay unresolved; already-resolved
    /// lengths are kept.
    pub fn resolve_lengths<F>(self, lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&StationId, &StationId) -> Option<f64>,
    {
        let segments = self
            .segments
            .into_iter()
            .map(|seg| match (seg.length_m, lookup(&seg.begin, &seg.end)) {
                (None, Some(len)) => seg.with_length(len),
                _ => Ok(seg),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments, ..self })
    }
}

/// A group of routes shown to riders as one service.
///
/// Every line has an inbound route; bidirectional lines also have an
/// outbound route.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: LineId,
    name: String,
    vehicle_type: VehicleType,
    inbound: Route,
    outbound: Option<Route>,
}

impl Line {
    /// Create a unidirectional line.
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        vehicle_type: VehicleType,
        inbound: Route,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            vehicle_type,
            inbound,
            outbound: None,
        }
    }

    /// Returns this line with an outbound route.
    pub fn with_outbound(mut self, outbound: Route) -> Self {
        self.outbound = Some(outbound);
        self
    }

    pub fn id(&self) -> &LineId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    pub fn inbound(&self) -> &Route {
        &self.inbound
    }

    pub fn outbound(&self) -> Option<&Route> {
        self.outbound.as_ref()
    }

    /// The route run in the given direction, if any.
    pub fn route(&self, direction: Direction) -> Option<&Route> {
        match direction {
            Direction::Inbound => Some(&self.inbound),
            Direction::Outbound => self.outbound.as_ref(),
        }
    }

    pub fn is_bidirectional(&self) -> bool {
        self.outbound.is_some()
    }
}
