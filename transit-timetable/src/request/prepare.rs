//! Turning a deserialised request into validated core types.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Duration, Weekday};
use tracing::debug;

use crate::domain::{
    Availability, Dwell, Line, LineId, Location, Route, ServiceTime, Speed, Station, StationId,
    ValidationError, VehicleType,
};
use crate::geometry::{DistanceLookup, DistanceTable, Fallback, StraightLine};
use crate::generator::{DwellTimeResolver, ScheduleRequest, TransitConstraints};

use super::directory::StationDirectory;
use super::dto::{
    AvailabilitySpec, DwellKindSpec, DwellSpec, GenerationRequest, RouteSpec, WindowSpec,
};
use super::error::RequestError;

/// A request resolved against its stations and ready to generate.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub stations: StationDirectory,
    pub schedule: ScheduleRequest,
    pub resolver: DwellTimeResolver,
}

impl GenerationRequest {
    /// Validate every field and build the core types.
    pub fn prepare(&self) -> Result<PreparedRequest, RequestError> {
        let stations = StationDirectory::new(
            self.stations
                .iter()
                .map(|s| {
                    let vehicle_types = s
                        .vehicle_types
                        .iter()
                        .map(|v| VehicleType::from_str(v))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Station::new(
                        StationId::new(s.id.as_str()).map_err(ValidationError::from)?,
                        s.name.as_str(),
                        Location::new(s.lat, s.lon)?,
                        vehicle_types,
                    )?)
                })
                .collect::<Result<Vec<_>, RequestError>>()?,
        )?;

        let line = self.build_line(&stations)?;
        let speed = Speed::new(self.speed.value, self.speed.unit.into())?;
        let constraints = self.build_constraints()?;
        let availability = build_availability(&self.availability)?;
        let resolver = self.build_resolver(&stations)?;

        debug!(
            line = %line.id(),
            stations = stations.len(),
            bidirectional = line.is_bidirectional(),
            "request prepared"
        );

        Ok(PreparedRequest {
            stations,
            schedule: ScheduleRequest::new(
                line,
                constraints,
                speed,
                availability,
                self.description.as_str(),
            ),
            resolver,
        })
    }

    fn build_line(&self, stations: &StationDirectory) -> Result<Line, RequestError> {
        let spec = &self.line;
        let vehicle_type = VehicleType::from_str(&spec.vehicle_type)?;

        let mut table = DistanceTable::new();
        for d in &self.distances {
            table.add(
                stations.resolve(&d.from)?.id().clone(),
                stations.resolve(&d.to)?.id().clone(),
                d.metres,
            );
        }
        let estimate = StraightLine::new(if self.estimate_missing_distances {
            stations.locations().collect::<Vec<_>>()
        } else {
            Vec::new()
        });
        let lookup = Fallback::new(&table, &estimate);

        let inbound = build_route(&spec.inbound, vehicle_type, stations, &lookup)?;
        let id = LineId::new(spec.id.as_str()).map_err(ValidationError::from)?;
        let line = Line::new(id, spec.name.as_str(), vehicle_type, inbound);
        match &spec.outbound {
            Some(outbound) => Ok(line.with_outbound(build_route(
                outbound,
                vehicle_type,
                stations,
                &lookup,
            )?)),
            None => Ok(line),
        }
    }

    fn build_constraints(&self) -> Result<TransitConstraints, RequestError> {
        let headway = either_unit(
            self.headway_mins,
            self.headway_secs,
            "headway_mins",
            "headway_secs",
        )?
        .ok_or(RequestError::MissingField("headway_mins or headway_secs"))?;
        let min_layover = either_unit(
            self.min_layover_mins,
            self.min_layover_secs,
            "min_layover_mins",
            "min_layover_secs",
        )?
        .unwrap_or_else(Duration::zero);
        let (in_start, in_end) = parse_window(&self.inbound, "inbound.start", "inbound.end")?;

        let constraints = match &self.outbound {
            Some(outbound) => {
                let (out_start, out_end) =
                    parse_window(outbound, "outbound.start", "outbound.end")?;
                TransitConstraints::new(in_start, in_end, out_start, out_end, headway, min_layover)?
            }
            None => TransitConstraints::inbound_only(in_start, in_end, headway, min_layover)?,
        };
        Ok(constraints)
    }

    fn build_resolver(&self, stations: &StationDirectory) -> Result<DwellTimeResolver, RequestError> {
        let default_dwell = seconds(self.default_dwell_secs, "default_dwell_secs")?;
        let mut resolver = DwellTimeResolver::new(default_dwell, self.hail_policy.into())?;

        // Group rules by station so overlap checks see a station's full set
        let mut by_station: BTreeMap<StationId, Vec<Dwell>> = BTreeMap::new();
        for spec in &self.dwells {
            let station = stations.resolve(&spec.station)?.id().clone();
            let dwell = build_dwell(spec, &station)?;
            by_station.entry(station).or_default().push(dwell);
        }
        for (station, dwells) in by_station {
            resolver.add_station(station, dwells)?;
        }
        Ok(resolver)
    }
}

fn build_route(
    spec: &RouteSpec,
    vehicle_type: VehicleType,
    stations: &StationDirectory,
    lookup: &impl DistanceLookup,
) -> Result<Route, RequestError> {
    let ids = spec
        .stations
        .iter()
        .map(|raw| Ok(stations.resolve_for(raw, vehicle_type)?.id().clone()))
        .collect::<Result<Vec<_>, RequestError>>()?;

    let mut route = Route::through(spec.code.as_str(), &ids)?;
    if let Some(lengths) = &spec.lengths_m {
        route = route.with_lengths(lengths)?;
    }
    let route = route.resolve_lengths(|from, to| lookup.distance_m(from, to))?;

    let headsign = match &spec.headsign {
        Some(h) => h.clone(),
        None => stations.name(route.terminal()).to_string(),
    };
    Ok(route.with_headsign(headsign))
}

fn build_dwell(spec: &DwellSpec, station: &StationId) -> Result<Dwell, RequestError> {
    let duration = seconds(spec.duration_secs, "duration_secs")?;
    let (from, to) = match (&spec.from, &spec.to) {
        (Some(from), Some(to)) => (
            ServiceTime::parse(from).map_err(RequestError::time("dwell.from"))?,
            ServiceTime::parse(to).map_err(RequestError::time("dwell.to"))?,
        ),
        (None, None) => (ServiceTime::MIDNIGHT, ServiceTime::END_OF_DAY),
        _ => {
            return Err(RequestError::PartialDwellWindow {
                station: station.clone(),
            });
        }
    };

    let dwell = match spec.kind {
        DwellKindSpec::Regular => Dwell::regular(from, to, duration)?,
        DwellKindSpec::EquallyLikely => Dwell::equally_likely(from, to, duration)?,
        DwellKindSpec::Hail => {
            let probability = spec.probability.ok_or_else(|| RequestError::MissingProbability {
                station: station.clone(),
            })?;
            Dwell::hail(from, to, duration, probability)?
        }
    };
    Ok(dwell)
}

fn build_availability(spec: &AvailabilitySpec) -> Result<Availability, RequestError> {
    let mut builder = Availability::builder()
        .from(spec.from)
        .to(spec.to)
        .exception_dates(spec.exceptions.iter().copied());
    for day in &spec.weekdays {
        builder = match day.to_ascii_lowercase().as_str() {
            "working_days" => builder.working_days(),
            "weekend_days" => builder.weekend_days(),
            "every_day" => builder.every_day(),
            other => builder.on(
                Weekday::from_str(other).map_err(|_| RequestError::UnknownWeekday(day.clone()))?,
            ),
        };
    }
    Ok(builder.build()?)
}

fn parse_window(
    spec: &WindowSpec,
    start_field: &'static str,
    end_field: &'static str,
) -> Result<(ServiceTime, ServiceTime), RequestError> {
    let start = ServiceTime::parse(&spec.start).map_err(RequestError::time(start_field))?;
    let end = ServiceTime::parse(&spec.end).map_err(RequestError::time(end_field))?;
    Ok((start, end))
}

/// A duration that may be given in minutes or in seconds, but not both.
fn either_unit(
    mins: Option<i64>,
    secs: Option<i64>,
    mins_field: &'static str,
    secs_field: &'static str,
) -> Result<Option<Duration>, RequestError> {
    match (mins, secs) {
        (Some(_), Some(_)) => Err(RequestError::ConflictingFields {
            first: mins_field,
            second: secs_field,
        }),
        (Some(m), None) => minutes(m, mins_field).map(Some),
        (None, Some(s)) => seconds(s, secs_field).map(Some),
        (None, None) => Ok(None),
    }
}

fn minutes(value: i64, field: &'static str) -> Result<Duration, RequestError> {
    Duration::try_minutes(value).ok_or(RequestError::DurationOutOfRange { field })
}

fn seconds(value: i64, field: &'static str) -> Result<Duration, RequestError> {
    Duration::try_seconds(value).ok_or(RequestError::DurationOutOfRange { field })
}
