//! Alternate (diversion) stop card.

use crate::error::PlanIssue;
use crate::legs::aggregate_legs;
use crate::models::{
    AircraftPerformance, Coordinate, FuelComponents, PerformanceEnvelope, StopCard, Waypoint,
    WaypointRole, WindVector,
};
use crate::passengers::max_passengers;
use crate::policy::FuelPolicy;
use crate::spatial::Geodesy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Looks up coordinates for named locations that are not on the route.
pub trait LocationDirectory {
    fn resolve(&self, name: &str) -> Option<Coordinate>;
}

/// Directory with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectory;

impl LocationDirectory for NoDirectory {
    fn resolve(&self, _name: &str) -> Option<Coordinate> {
        None
    }
}

impl LocationDirectory for HashMap<String, Coordinate> {
    fn resolve(&self, name: &str) -> Option<Coordinate> {
        let wanted = name.trim();
        self.get(wanted).copied().or_else(|| {
            self.iter()
                .find(|(key, _)| key.trim().eq_ignore_ascii_case(wanted))
                .map(|(_, coordinate)| *coordinate)
        })
    }
}

/// A location named by the user or given with explicit coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlternateLocation {
    Named(String),
    Fixed {
        name: String,
        #[serde(flatten)]
        coordinate: Coordinate,
    },
}

impl AlternateLocation {
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Fixed { name, .. } => name,
        }
    }
}

/// How the diversion route is described.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AlternateRequest {
    /// Divert from a named point on the primary route
    SplitPoint {
        split_point: String,
        destination: AlternateLocation,
    },
    /// Explicit from/to pair
    Explicit {
        from: AlternateLocation,
        to: AlternateLocation,
    },
}

impl AlternateRequest {
    pub fn split_point(split_point: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::SplitPoint {
            split_point: split_point.into(),
            destination: AlternateLocation::Named(destination.into()),
        }
    }

    /// Start and end of the diversion, and whether the start must lie on the
    /// primary route.
    fn endpoints(&self) -> (AlternateLocation, &AlternateLocation, bool) {
        match self {
            Self::SplitPoint {
                split_point,
                destination,
            } => (AlternateLocation::Named(split_point.clone()), destination, true),
            Self::Explicit { from, to } => (from.clone(), to, false),
        }
    }
}

/// Everything the splicer needs from the primary plan.
pub struct AlternateContext<'a, G, D> {
    pub geodesy: &'a G,
    pub directory: &'a D,
    pub primary_route: &'a [Waypoint],
    pub envelope: PerformanceEnvelope,
    pub wind: Option<WindVector>,
    pub aircraft: &'a AircraftPerformance,
    pub policy: &'a FuelPolicy,
}

fn resolve_location<D: LocationDirectory>(
    location: &AlternateLocation,
    primary_route: &[Waypoint],
    directory: Option<&D>,
) -> Option<Coordinate> {
    match location {
        AlternateLocation::Fixed { coordinate, .. } => {
            Some(*coordinate).filter(Coordinate::is_finite)
        }
        AlternateLocation::Named(name) => {
            let wanted = name.trim();
            primary_route
                .iter()
                .find(|wp| wp.name.trim().eq_ignore_ascii_case(wanted))
                .map(|wp| wp.coordinate)
                .or_else(|| directory.and_then(|d| d.resolve(wanted)))
                .filter(Coordinate::is_finite)
        }
    }
}

/// Build the single alternate card for `request`, or explain why not.
pub fn build_alternate_card<G: Geodesy, D: LocationDirectory>(
    ctx: &AlternateContext<'_, G, D>,
    request: &AlternateRequest,
    index: usize,
) -> Result<StopCard, PlanIssue> {
    let (from, to, from_on_route) = request.endpoints();

    let from_directory = (!from_on_route).then_some(ctx.directory);
    let Some(from_coord) = resolve_location(&from, ctx.primary_route, from_directory) else {
        tracing::warn!(location = from.name(), "alternate split point not found");
        return Err(PlanIssue::unresolved(from.name(), "alternate route"));
    };
    let Some(to_coord) = resolve_location(to, ctx.primary_route, Some(ctx.directory)) else {
        tracing::warn!(location = to.name(), "alternate destination not found");
        return Err(PlanIssue::unresolved(to.name(), "alternate route"));
    };

    let route = [
        Waypoint::new(from.name(), from_coord.lat, from_coord.lon, WaypointRole::Departure),
        Waypoint::new(to.name(), to_coord.lat, to_coord.lon, WaypointRole::Destination),
    ];
    let legs = aggregate_legs(ctx.geodesy, &route, ctx.envelope, ctx.wind);
    let Some(leg) = legs.legs.first() else {
        return Err(PlanIssue::missing("alternate route has no legs"));
    };

    let trip_lb = legs.total_trip_fuel();
    let mut components = FuelComponents {
        trip_lb,
        contingency_lb: ctx.policy.contingency_for(trip_lb),
        reserve_lb: ctx.policy.reserve_fuel_lb,
        ..Default::default()
    };
    components.refresh_display();
    let total_fuel_lb = components.total();

    tracing::info!(
        from = from.name(),
        to = to.name(),
        distance_nm = leg.distance_nm,
        total_fuel_lb,
        "alternate card built"
    );

    Ok(StopCard {
        index,
        stop_name: format!("{} -> {}", from.name(), to.name()),
        total_distance_nm: legs.total_distance_nm(),
        total_time_hours: legs.total_time_hours(),
        total_fuel_lb,
        max_passengers: Some(max_passengers(ctx.aircraft, ctx.policy, total_fuel_lb)),
        fuel_components: components,
        deck_fuel_lb: 0.0,
        deck_time_min: 0.0,
        ground_speed_kt: Some(leg.ground_speed_kt),
        headwind_kt: Some(leg.headwind_kt),
        is_departure: false,
        is_destination: false,
        is_alternate: true,
        refuel: false,
    })
}
