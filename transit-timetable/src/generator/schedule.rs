//! Headway-driven schedule generation.
//!
//! For each direction the generator starts a trip at the window start and
//! then every headway until the window closes, timing each trip with the
//! trip factory. Vehicles are then assigned across both directions.

use tracing::{debug, trace};

use crate::domain::{
    Availability, Direction, Line, Route, RouteError, Schedule, ServiceTime, Speed, StationId,
};

use super::config::{GeneratorConfig, Rotation, WindowBound};
use super::constraints::{InvalidConstraints, OperatingWindow, TransitConstraints};
use super::resolver::DwellTimeResolver;
use super::rotation::{PlannedTrip, assign_blocks, assign_pairs};
use super::trip_factory::TripFactory;

/// Error from schedule generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// Constraints don't fit the line being generated
    #[error(transparent)]
    InvalidConstraints(#[from] InvalidConstraints),

    /// Not even one whole trip fits in the window
    #[error("no {direction} trip fits in window {window}: one trip takes {trip_duration_secs}s")]
    EmptyGeneration {
        direction: Direction,
        window: OperatingWindow,
        trip_duration_secs: i64,
    },

    /// The window and headway would produce more trips than allowed
    #[error("{direction} window would produce {projected} trips, more than the limit of {limit}")]
    TooManyTrips {
        direction: Direction,
        projected: usize,
        limit: usize,
    },

    /// Paired rotation needs vehicles to turn where inbound trips end
    #[error("inbound terminal {inbound_terminal} is not the outbound origin {outbound_origin}")]
    NoSharedTerminal {
        inbound_terminal: StationId,
        outbound_origin: StationId,
    },

    /// A paired vehicle can't make its outbound trip in time
    #[error(
        "pairing {pairing}: outbound departure {outbound_departure} is less than \
         {min_layover_secs}s after inbound departure {inbound_departure}"
    )]
    LayoverViolation {
        pairing: usize,
        inbound_departure: ServiceTime,
        outbound_departure: ServiceTime,
        min_layover_secs: i64,
    },

    /// Route geometry couldn't be used
    #[error("route dependency failed: {0}")]
    Dependency(#[from] RouteError),
}

/// Request to generate the schedule of one line.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// The line, with every route segment length resolved.
    pub line: Line,

    /// Windows, headway and layover.
    pub constraints: TransitConstraints,

    /// Average vehicle speed along the line.
    pub speed: Speed,

    /// Dates the schedule runs on.
    pub availability: Availability,

    /// Free-text description carried into the schedule.
    pub description: String,
}

impl ScheduleRequest {
    /// Create a new schedule request.
    pub fn new(
        line: Line,
        constraints: TransitConstraints,
        speed: Speed,
        availability: Availability,
        description: impl Into<String>,
    ) -> Self {
        Self {
            line,
            constraints,
            speed,
            availability,
            description: description.into(),
        }
    }

    /// Validate the request.
    ///
    /// Every direction the line runs needs an operating window, and every
    /// window needs a direction to run in.
    pub fn validate(&self) -> Result<(), GenerationError> {
        match (self.line.is_bidirectional(), self.constraints.is_bidirectional()) {
            (true, false) => Err(InvalidConstraints::new(
                "line runs in both directions but no outbound window was given",
            )
            .into()),
            (false, true) => Err(InvalidConstraints::new(
                "outbound window given for a line with no outbound route",
            )
            .into()),
            _ => Ok(()),
        }
    }
}

/// Timetable generator.
pub struct ScheduleGenerator<'a> {
    resolver: &'a DwellTimeResolver,
    config: &'a GeneratorConfig,
}

impl<'a> ScheduleGenerator<'a> {
    /// Create a new generator.
    pub fn new(resolver: &'a DwellTimeResolver, config: &'a GeneratorConfig) -> Self {
        Self { resolver, config }
    }

    /// Generate the schedule for a line.
    ///
    /// The same request always produces the same schedule.
    pub fn generate(&self, request: &ScheduleRequest) -> Result<Schedule, GenerationError> {
        request.validate()?;

        let factory = TripFactory::new(request.speed, self.resolver);
        let constraints = &request.constraints;

        debug!(
            line = %request.line.id(),
            speed = %request.speed,
            headway_secs = constraints.headway().num_seconds(),
            min_layover_secs = constraints.min_layover().num_seconds(),
            "generating schedule"
        );

        let mut inbound = Vec::new();
        let mut outbound = Vec::new();
        for direction in [Direction::Inbound, Direction::Outbound] {
            let (Some(route), Some(window)) =
                (request.line.route(direction), constraints.window(direction))
            else {
                continue;
            };
            let planned = self.plan_direction(&factory, route, direction, window, constraints)?;
            match direction {
                Direction::Inbound => inbound = planned,
                Direction::Outbound => outbound = planned,
            }
        }

        let min_layover = constraints.min_layover();
        let (inbound, outbound) = match self.config.rotation {
            Rotation::Blocks => assign_blocks(inbound, outbound, min_layover),
            Rotation::Paired => assign_pairs(inbound, outbound, min_layover)?,
        };

        let schedule = Schedule::new(
            request.line.id().clone(),
            request.availability.clone(),
            request.description.clone(),
            inbound,
            outbound,
        );

        debug!(
            line = %schedule.line(),
            trips = schedule.trip_count(),
            vehicles = schedule.vehicle_count(),
            "schedule generated"
        );

        Ok(schedule)
    }

    /// Time every trip of one direction.
    fn plan_direction(
        &self,
        factory: &TripFactory<'_>,
        route: &Route,
        direction: Direction,
        window: OperatingWindow,
        constraints: &TransitConstraints,
    ) -> Result<Vec<PlannedTrip>, GenerationError> {
        let headway = constraints.headway();
        let projected = self.projected_trips(factory, route, window, constraints)?;
        if projected > self.config.max_trips_per_direction {
            return Err(GenerationError::TooManyTrips {
                direction,
                projected,
                limit: self.config.max_trips_per_direction,
            });
        }

        let headsign = route.headsign().map(str::to_string);
        let mut trips: Vec<PlannedTrip> = Vec::with_capacity(projected);
        let mut start = window.start();

        loop {
            let planned = PlannedTrip {
                direction,
                headsign: headsign.clone(),
                stops: factory.build_stops(route, start)?,
            };

            if trips.is_empty() {
                let duration = planned.last_arrival().signed_duration_since(start);
                if duration > window.length() {
                    return Err(GenerationError::EmptyGeneration {
                        direction,
                        window,
                        trip_duration_secs: duration.num_seconds(),
                    });
                }
            }

            if self.config.window_bound == WindowBound::LastArrival
                && planned.last_arrival() > window.end()
            {
                break;
            }

            trace!(
                %direction,
                departure = %start,
                arrival = %planned.last_arrival(),
                "planned trip"
            );
            trips.push(planned);

            match start.checked_add(headway) {
                Some(next) if next <= window.end() => start = next,
                _ => break,
            }
        }

        debug!(
            %direction,
            window = %window,
            trips = trips.len(),
            "direction planned"
        );

        Ok(trips)
    }

    /// Upper bound on the trips a direction can produce.
    ///
    /// Computed from the clock alone so oversized requests are rejected
    /// before any trip is timed.
    fn projected_trips(
        &self,
        factory: &TripFactory<'_>,
        route: &Route,
        window: OperatingWindow,
        constraints: &TransitConstraints,
    ) -> Result<usize, GenerationError> {
        let span = match self.config.window_bound {
            WindowBound::LastDeparture => window.length(),
            WindowBound::LastArrival => window.length() - factory.running_time(route)?,
        };
        if span < chrono::Duration::zero() {
            return Ok(0);
        }
        let steps = span.num_seconds() / constraints.headway().num_seconds();
        Ok(usize::try_from(steps).map_or(usize::MAX, |n| n.saturating_add(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dwell, LineId, Stop, StopIndex, VehicleType};
    use crate::generator::HailPolicy;
    use chrono::{Duration, NaiveDate};

    fn t(s: &str) -> ServiceTime {
        ServiceTime::parse(s).unwrap()
    }

    fn id(s: &str) -> StationId {
        StationId::new(s).unwrap()
    }

    fn route(code: &str, names: &[&str], lengths: &[f64]) -> Route {
        let ids: Vec<_> = names.iter().map(|s| id(s)).collect();
        Route::through(code, &ids).unwrap().with_lengths(lengths).unwrap()
    }

    fn availability() -> Availability {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        Availability::working_days(d(1), d(31)).unwrap()
    }

    fn one_way_line(lengths: &[f64]) -> Line {
        let names: Vec<String> = (0..=lengths.len()).map(|i| format!("S{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        Line::new(
            LineId::new("1").unwrap(),
            "One",
            VehicleType::Bus,
            route("1-in", &names, lengths),
        )
    }

    fn two_way_line() -> Line {
        Line::new(
            LineId::new("2").unwrap(),
            "Two",
            VehicleType::Tram,
            route("2-in", &["A", "B", "C"], &[600.0, 600.0]).with_headsign("C"),
        )
        .with_outbound(route("2-out", &["C", "B", "A"], &[600.0, 600.0]).with_headsign("A"))
    }

    fn inbound_only(start: &str, end: &str, headway_mins: i64) -> TransitConstraints {
        TransitConstraints::inbound_only(
            t(start),
            t(end),
            Duration::minutes(headway_mins),
            Duration::zero(),
        )
        .unwrap()
    }

    fn both_ways(headway_mins: i64, layover_mins: i64) -> TransitConstraints {
        TransitConstraints::new(
            t("06:00"),
            t("08:00"),
            t("06:30"),
            t("08:30"),
            Duration::minutes(headway_mins),
            Duration::minutes(layover_mins),
        )
        .unwrap()
    }

    fn request(line: Line, constraints: TransitConstraints) -> ScheduleRequest {
        ScheduleRequest::new(
            line,
            constraints,
            Speed::from_mps(10.0).unwrap(),
            availability(),
            "test service",
        )
    }

    fn generate(request: &ScheduleRequest) -> Result<Schedule, GenerationError> {
        let resolver = DwellTimeResolver::default();
        let config = GeneratorConfig::default();
        ScheduleGenerator::new(&resolver, &config).generate(request)
    }

    #[test]
    fn generator_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScheduleRequest>();
        assert_send_sync::<ScheduleGenerator<'static>>();
        assert_send_sync::<Schedule>();
        assert_send_sync::<GenerationError>();
    }

    #[test]
    fn seven_trips_in_an_hour() {
        let req = request(one_way_line(&[600.0]), inbound_only("06:00", "07:00", 10));
        let schedule = generate(&req).unwrap();

        let trips = schedule.trips(Direction::Inbound);
        assert_eq!(trips.len(), 7);
        assert!(schedule.trips(Direction::Outbound).is_empty());

        let departures: Vec<_> = trips.iter().map(|t| t.first_departure()).collect();
        let expected: Vec<_> = ["06:00", "06:10", "06:20", "06:30", "06:40", "06:50", "07:00"]
            .iter()
            .map(|s| t(s))
            .collect();
        assert_eq!(departures, expected);

        for trip in trips {
            assert_eq!(trip.stops().len(), 2);
            let stops: &[Stop] = trip.stops();
            assert_eq!(
                stops[1].arrival(),
                stops[0].departure().checked_add(Duration::seconds(60)).unwrap()
            );
        }
    }

    #[test]
    fn schedule_carries_request_metadata() {
        let req = request(one_way_line(&[600.0]), inbound_only("06:00", "07:00", 10));
        let schedule = generate(&req).unwrap();
        assert_eq!(schedule.line().as_str(), "1");
        assert_eq!(schedule.description(), "test service");
        assert_eq!(schedule.availability(), &availability());
    }

    #[test]
    fn headway_is_exact() {
        let req = request(two_way_line(), both_ways(7, 2));
        let schedule = generate(&req).unwrap();
        for direction in [Direction::Inbound, Direction::Outbound] {
            let trips = schedule.trips(direction);
            assert!(trips.len() > 1);
            for pair in trips.windows(2) {
                assert_eq!(
                    pair[1]
                        .first_departure()
                        .signed_duration_since(pair[0].first_departure()),
                    Duration::minutes(7)
                );
            }
        }
    }

    #[test]
    fn generation_is_idempotent() {
        let resolver = DwellTimeResolver::new(Duration::seconds(20), HailPolicy::Expected)
            .unwrap()
            .with_station(id("B"), vec![Dwell::all_day_hail(Duration::seconds(40), 0.3).unwrap()])
            .unwrap();
        let config = GeneratorConfig::default();
        let generator = ScheduleGenerator::new(&resolver, &config);
        let req = request(two_way_line(), both_ways(5, 3));

        assert_eq!(generator.generate(&req).unwrap(), generator.generate(&req).unwrap());
    }

    #[test]
    fn headsigns_come_from_routes() {
        let schedule = generate(&request(two_way_line(), both_ways(10, 0))).unwrap();
        assert!(schedule
            .trips(Direction::Inbound)
            .iter()
            .all(|t| t.headsign() == Some("C")));
        assert!(schedule
            .trips(Direction::Outbound)
            .iter()
            .all(|t| t.headsign() == Some("A")));
    }

    #[test]
    fn window_shorter_than_trip_is_empty() {
        // 6000 m at 10 m/s takes 10 minutes
        let req = request(one_way_line(&[6000.0]), inbound_only("06:00", "06:05", 1));
        assert_eq!(
            generate(&req),
            Err(GenerationError::EmptyGeneration {
                direction: Direction::Inbound,
                window: req.constraints.window(Direction::Inbound).unwrap(),
                trip_duration_secs: 600,
            })
        );
    }

    #[test]
    fn window_exactly_one_trip_long() {
        let req = request(one_way_line(&[6000.0]), inbound_only("06:00", "06:10", 5));
        let schedule = generate(&req).unwrap();
        assert_eq!(schedule.trips(Direction::Inbound).len(), 3);
    }

    #[test]
    fn last_arrival_bound() {
        let resolver = DwellTimeResolver::default();
        let config = GeneratorConfig {
            window_bound: WindowBound::LastArrival,
            ..GeneratorConfig::default()
        };
        let req = request(one_way_line(&[6000.0]), inbound_only("06:00", "07:00", 10));
        let schedule = ScheduleGenerator::new(&resolver, &config).generate(&req).unwrap();

        let trips = schedule.trips(Direction::Inbound);
        assert_eq!(trips.len(), 6);
        assert!(trips.iter().all(|trip| trip.last_arrival() <= t("07:00")));
    }

    #[test]
    fn default_bound_counts_departures() {
        let req = request(one_way_line(&[600.0]), inbound_only("06:00", "07:00", 10));
        let schedule = generate(&req).unwrap();

        let trips = schedule.trips(Direction::Inbound);
        let last = &trips[trips.len() - 1];
        assert_eq!(last.first_departure(), t("07:00"));
        assert_eq!(last.last_arrival(), t("07:01"));
    }

    #[test]
    fn too_many_trips() {
        let resolver = DwellTimeResolver::default();
        let config = GeneratorConfig {
            max_trips_per_direction: 10,
            ..GeneratorConfig::default()
        };
        let req = request(one_way_line(&[600.0]), inbound_only("06:00", "07:00", 5));
        assert_eq!(
            ScheduleGenerator::new(&resolver, &config).generate(&req),
            Err(GenerationError::TooManyTrips {
                direction: Direction::Inbound,
                projected: 13,
                limit: 10,
            })
        );
    }

    #[test]
    fn trip_limit_is_inclusive() {
        let resolver = DwellTimeResolver::default();
        let config = GeneratorConfig {
            max_trips_per_direction: 13,
            ..GeneratorConfig::default()
        };
        let req = request(one_way_line(&[600.0]), inbound_only("06:00", "07:00", 5));
        let schedule = ScheduleGenerator::new(&resolver, &config).generate(&req).unwrap();
        assert_eq!(schedule.trip_count(), 13);
    }

    #[test]
    fn missing_length_is_a_dependency_error() {
        let ids = [id("A"), id("B")];
        let line = Line::new(
            LineId::new("3").unwrap(),
            "Three",
            VehicleType::Bus,
            Route::through("3-in", &ids).unwrap(),
        );
        let err = generate(&request(line, inbound_only("06:00", "07:00", 10))).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Dependency(RouteError::MissingLength { .. })
        ));
        assert_eq!(
            err.to_string(),
            "route dependency failed: route 3-in: length of segment A -> B is unresolved"
        );
    }

    #[test]
    fn bidirectional_line_needs_outbound_window() {
        let err = generate(&request(two_way_line(), inbound_only("06:00", "07:00", 10)))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid constraints: line runs in both directions but no outbound window was given"
        );
    }

    #[test]
    fn outbound_window_needs_outbound_route() {
        let err = generate(&request(one_way_line(&[600.0]), both_ways(10, 0))).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidConstraints(_)));
    }

    #[test]
    fn blocks_share_vehicles_across_directions() {
        // Each trip takes 2 minutes; outbound starts 30 minutes after inbound
        let schedule = generate(&request(two_way_line(), both_ways(10, 5))).unwrap();
        let inbound = schedule.trips(Direction::Inbound);
        let outbound = schedule.trips(Direction::Outbound);

        // The 06:00 inbound vehicle is back at C well before 06:30
        assert_eq!(outbound[0].vehicle(), inbound[0].vehicle());
        assert!(schedule.vehicle_count() < schedule.trip_count());
    }

    #[test]
    fn paired_rotation() {
        let resolver = DwellTimeResolver::default();
        let config = GeneratorConfig {
            rotation: Rotation::Paired,
            ..GeneratorConfig::default()
        };
        let schedule = ScheduleGenerator::new(&resolver, &config)
            .generate(&request(two_way_line(), both_ways(10, 5)))
            .unwrap();

        for (i, o) in schedule
            .trips(Direction::Inbound)
            .iter()
            .zip(schedule.trips(Direction::Outbound))
        {
            assert_eq!(i.vehicle(), o.vehicle());
        }
    }

    #[test]
    fn paired_rotation_reports_tight_layover() {
        let resolver = DwellTimeResolver::default();
        let config = GeneratorConfig {
            rotation: Rotation::Paired,
            ..GeneratorConfig::default()
        };
        let constraints = TransitConstraints::new(
            t("06:00"),
            t("07:00"),
            t("06:03"),
            t("07:03"),
            Duration::minutes(10),
            Duration::minutes(5),
        )
        .unwrap();
        let err = ScheduleGenerator::new(&resolver, &config)
            .generate(&request(two_way_line(), constraints))
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::LayoverViolation {
                pairing: 1,
                inbound_departure: t("06:02"),
                outbound_departure: t("06:03"),
                min_layover_secs: 300,
            }
        );
    }

    #[test]
    fn dwell_is_applied_at_intermediate_stops() {
        let resolver = DwellTimeResolver::default()
            .with_station(
                id("B"),
                vec![Dwell::regular(t("06:00"), t("07:00"), Duration::seconds(30)).unwrap()],
            )
            .unwrap();
        let config = GeneratorConfig::default();
        let schedule = ScheduleGenerator::new(&resolver, &config)
            .generate(&request(two_way_line(), both_ways(30, 0)))
            .unwrap();

        let first = &schedule.trips(Direction::Inbound)[0];
        assert_eq!(first.stops()[1].dwell(), Duration::seconds(30));
        assert_eq!(first.travel_time(StopIndex(2)), Some(Duration::seconds(60)));
        assert_eq!(first.last_arrival(), t("06:02:30"));
    }

    #[test]
    fn error_display() {
        let err = GenerationError::TooManyTrips {
            direction: Direction::Outbound,
            projected: 2000,
            limit: 1000,
        };
        assert_eq!(
            err.to_string(),
            "outbound window would produce 2000 trips, more than the limit of 1000"
        );

        let err = GenerationError::NoSharedTerminal {
            inbound_terminal: id("C"),
            outbound_origin: id("D"),
        };
        assert_eq!(
            err.to_string(),
            "inbound terminal C is not the outbound origin D"
        );

        let err = GenerationError::LayoverViolation {
            pairing: 3,
            inbound_departure: t("06:20"),
            outbound_departure: t("06:22"),
            min_layover_secs: 300,
        };
        assert_eq!(
            err.to_string(),
            "pairing 3: outbound departure 06:22:00 is less than 300s after inbound departure 06:20:00"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{LineId, VehicleType};
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn line(lengths: &[f64]) -> Line {
        let ids: Vec<_> = (0..=lengths.len())
            .map(|i| StationId::new(format!("S{i}")).unwrap())
            .collect();
        let inbound = Route::through("in", &ids).unwrap().with_lengths(lengths).unwrap();
        let reversed: Vec<_> = ids.iter().rev().cloned().collect();
        let back: Vec<f64> = lengths.iter().rev().copied().collect();
        let outbound = Route::through("out", &reversed).unwrap().with_lengths(&back).unwrap();
        Line::new(LineId::new("p").unwrap(), "Prop", VehicleType::Bus, inbound).with_outbound(outbound)
    }

    proptest! {
        /// Trips are well-formed, evenly spaced and start inside their window
        #[test]
        fn generated_trips_are_consistent(
            lengths in proptest::collection::vec(0.0f64..3_000.0, 1..6),
            speed in 3.0f64..25.0,
            in_start in 18_000u32..30_000,
            out_offset in 0u32..3_600,
            window_len in 3_600u32..14_400,
            headway_secs in 60i64..1_800,
            layover_secs in 0i64..900,
            default_dwell in 0i64..60,
        ) {
            let in_start = ServiceTime::from_seconds(in_start);
            let out_start = ServiceTime::from_seconds(in_start.seconds() + out_offset);
            let constraints = TransitConstraints::new(
                in_start,
                ServiceTime::from_seconds(in_start.seconds() + window_len),
                out_start,
                ServiceTime::from_seconds(out_start.seconds() + window_len),
                Duration::seconds(headway_secs),
                Duration::seconds(layover_secs),
            )
            .unwrap();
            let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
            let request = ScheduleRequest::new(
                line(&lengths),
                constraints.clone(),
                Speed::from_mps(speed).unwrap(),
                Availability::every_day(d(1), d(7)).unwrap(),
                "prop",
            );
            let resolver = DwellTimeResolver::new(
                Duration::seconds(default_dwell),
                crate::generator::HailPolicy::Expected,
            )
            .unwrap();
            let config = GeneratorConfig::default();
            let generator = ScheduleGenerator::new(&resolver, &config);

            // Windows are at least an hour; 15 km at 3 m/s plus dwells can exceed that
            let schedule = match generator.generate(&request) {
                Ok(s) => s,
                Err(GenerationError::EmptyGeneration { .. }) => return Ok(()),
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            };

            let factory = TripFactory::new(request.speed, &resolver);
            for direction in [Direction::Inbound, Direction::Outbound] {
                let window = constraints.window(direction).unwrap();
                let route = request.line.route(direction).unwrap();
                let trips = schedule.trips(direction);
                prop_assert!(!trips.is_empty());
                prop_assert_eq!(trips[0].first_departure(), window.start());

                for trip in trips {
                    prop_assert!(trip.first_departure() <= window.end());
                    prop_assert_eq!(trip.stops().len(), lengths.len() + 1);
                    for (i, stop) in trip.stops().iter().enumerate() {
                        prop_assert!(stop.arrival() <= stop.departure());
                        if i > 0 {
                            let prev = &trip.stops()[i - 1];
                            prop_assert!(prev.departure() <= stop.arrival());
                            let segment = &route.segments()[i - 1];
                            prop_assert_eq!(
                                stop.arrival().signed_duration_since(prev.departure()),
                                factory.travel_time(route, segment).unwrap()
                            );
                        }
                    }
                }

                for pair in trips.windows(2) {
                    prop_assert_eq!(
                        pair[1].first_departure().signed_duration_since(pair[0].first_departure()),
                        Duration::seconds(headway_secs)
                    );
                }

                // The next candidate would fall outside the window
                let last = trips[trips.len() - 1].first_departure();
                prop_assert!(
                    last.checked_add(Duration::seconds(headway_secs)).unwrap() > window.end()
                );
            }

            prop_assert_eq!(&generator.generate(&request).unwrap(), &schedule);
        }
    }
}
