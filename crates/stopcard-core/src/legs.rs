//! Groups route waypoints into legs between landing stops.

use crate::models::{PerformanceEnvelope, Waypoint, WindVector};
use crate::spatial::Geodesy;
use crate::wind::{segment_performance, SegmentPerformance};
use serde::{Deserialize, Serialize};

/// A waypoint where the aircraft lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingStop {
    /// Index into the full waypoint list
    pub waypoint_index: usize,
    pub name: String,
    pub refuel: bool,
}

/// Flight between two adjacent landing stops.
///
/// `ground_speed_kt` and `headwind_kt` are the plain arithmetic mean of the
/// segment values, not weighted by segment distance. A leg with one long and
/// one short segment therefore gives the short one equal say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    pub from_stop: String,
    pub to_stop: String,
    pub distance_nm: f64,
    pub time_hours: f64,
    pub fuel_lb: f64,
    pub ground_speed_kt: f64,
    pub headwind_kt: f64,
    pub segment_count: usize,
}

/// Landing stops and the legs joining them, in route order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteLegs {
    pub stops: Vec<LandingStop>,
    pub legs: Vec<Leg>,
}

impl RouteLegs {
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn total_trip_fuel(&self) -> f64 {
        self.legs.iter().map(|leg| leg.fuel_lb).sum()
    }

    pub fn total_distance_nm(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_nm).sum()
    }

    pub fn total_time_hours(&self) -> f64 {
        self.legs.iter().map(|leg| leg.time_hours).sum()
    }
}

/// Indices of the waypoints the aircraft lands at.
///
/// A route with no landing stops at all still gets its first and last
/// waypoints treated as departure and destination, so a hand-drawn route of
/// navigation points produces a usable plan.
pub fn landing_stop_indices(waypoints: &[Waypoint]) -> Vec<usize> {
    let indices: Vec<usize> = waypoints
        .iter()
        .enumerate()
        .filter(|(_, wp)| wp.is_landing())
        .map(|(idx, _)| idx)
        .collect();

    if indices.is_empty() && waypoints.len() >= 2 {
        tracing::warn!(
            waypoints = waypoints.len(),
            "route has no landing stops, treating first and last waypoints as stops"
        );
        return vec![0, waypoints.len() - 1];
    }
    indices
}

/// Build per-leg totals for a route.
pub fn aggregate_legs<G: Geodesy>(
    geodesy: &G,
    waypoints: &[Waypoint],
    envelope: PerformanceEnvelope,
    wind: Option<WindVector>,
) -> RouteLegs {
    let stop_indices = landing_stop_indices(waypoints);
    let stops: Vec<LandingStop> = stop_indices
        .iter()
        .map(|&idx| LandingStop {
            waypoint_index: idx,
            name: waypoints[idx].name.clone(),
            refuel: waypoints[idx].refuel,
        })
        .collect();

    let legs = stop_indices
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            let segments: Vec<SegmentPerformance> = waypoints[start..=end]
                .windows(2)
                .map(|seg| {
                    segment_performance(
                        geodesy,
                        seg[0].coordinate,
                        seg[1].coordinate,
                        envelope,
                        wind,
                    )
                })
                .collect();
            build_leg(&waypoints[start], &waypoints[end], &segments)
        })
        .collect();

    RouteLegs { stops, legs }
}

fn build_leg(from: &Waypoint, to: &Waypoint, segments: &[SegmentPerformance]) -> Leg {
    let count = segments.len();
    let mean = |value: fn(&SegmentPerformance) -> f64| {
        if count == 0 {
            0.0
        } else {
            segments.iter().map(value).sum::<f64>() / count as f64
        }
    };

    Leg {
        from_stop: from.name.clone(),
        to_stop: to.name.clone(),
        distance_nm: segments.iter().map(|s| s.distance_nm).sum(),
        time_hours: segments.iter().map(|s| s.time_hours).sum(),
        fuel_lb: segments.iter().map(|s| s.fuel_lb).sum(),
        ground_speed_kt: mean(|s: &SegmentPerformance| s.ground_speed_kt),
        headwind_kt: mean(|s: &SegmentPerformance| s.headwind_kt),
        segment_count: count,
    }
}
