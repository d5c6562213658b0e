//! Timing a single trip along a route.

use chrono::Duration;
use tracing::trace;

use crate::domain::{Route, RouteError, Segment, ServiceTime, Speed, Stop};

use super::resolver::DwellTimeResolver;

/// Walks a route from a start time, producing timed stops.
///
/// Travel time over a segment is its length divided by the speed, rounded
/// to the nearest second (halves round up). The origin stop departs at the
/// start time with no dwell; every later stop dwells for whatever the
/// resolver gives for its arrival time.
#[derive(Debug, Clone, Copy)]
pub struct TripFactory<'a> {
    speed: Speed,
    resolver: &'a DwellTimeResolver,
}

impl<'a> TripFactory<'a> {
    pub fn new(speed: Speed, resolver: &'a DwellTimeResolver) -> Self {
        Self { speed, resolver }
    }

    /// Travel time over one segment.
    pub fn travel_time(&self, route: &Route, segment: &Segment) -> Result<Duration, RouteError> {
        let length = segment.length_m().ok_or_else(|| RouteError::MissingLength {
            route: route.code().to_string(),
            begin: segment.begin().clone(),
            end: segment.end().clone(),
        })?;

        let secs = self.speed.seconds_to_cover(length).round();
        if !secs.is_finite() || secs > f64::from(u32::MAX) {
            return Err(out_of_range(route, segment));
        }
        Ok(Duration::seconds(secs as i64))
    }

    /// Sum of travel times over the whole route, ignoring dwells.
    ///
    /// No trip along the route can be shorter than this.
    pub fn running_time(&self, route: &Route) -> Result<Duration, RouteError> {
        route
            .segments()
            .iter()
            .try_fold(Duration::zero(), |acc, seg| {
                Ok(acc + self.travel_time(route, seg)?)
            })
    }

    /// Time a trip along `route` departing its origin at `start`.
    ///
    /// Returns one stop per station, in route order.
    pub fn build_stops(&self, route: &Route, start: ServiceTime) -> Result<Vec<Stop>, RouteError> {
        let mut stops = Vec::with_capacity(route.station_count());
        stops.push(Stop::new_unchecked(route.origin().clone(), start, start));

        let mut departure = start;
        for segment in route.segments() {
            let travel = self.travel_time(route, segment)?;
            let arrival = departure
                .checked_add(travel)
                .ok_or_else(|| out_of_range(route, segment))?;
            let dwell = self.resolver.resolve(segment.end(), arrival);
            departure = arrival
                .checked_add(dwell)
                .ok_or_else(|| out_of_range(route, segment))?;

            trace!(
                station = %segment.end(),
                %arrival,
                %departure,
                dwell_secs = dwell.num_seconds(),
                "timed stop"
            );
            stops.push(Stop::new_unchecked(segment.end().clone(), arrival, departure));
        }

        Ok(stops)
    }
}

fn out_of_range(route: &Route, segment: &Segment) -> RouteError {
    RouteError::TravelTimeOutOfRange {
        route: route.code().to_string(),
        begin: segment.begin().clone(),
        end: segment.end().clone(),
    }
}
