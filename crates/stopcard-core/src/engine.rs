//! Stop-card engine: runs the whole calculation for one set of inputs.
//!
//! The engine keeps no state between calls. Every problem it meets is logged
//! and recorded on the plan; nothing is returned as an error.

use crate::accumulator::build_stop_cards;
use crate::alternate::{
    build_alternate_card, AlternateContext, AlternateRequest, LocationDirectory, NoDirectory,
};
use crate::error::PlanIssue;
use crate::legs::aggregate_legs;
use crate::models::{
    AircraftPerformance, StopCard, StopCardPlan, Waypoint, WeatherSegment, WindVector,
};
use crate::policy::{evaluate_auxiliary_fuel, FuelPolicy};
use crate::spatial::{Geodesy, Haversine};
use crate::weather::{apply_weather_fuel, WeatherFuelSettings};
use serde::{Deserialize, Serialize};

/// Everything one calculation depends on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightInputs {
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub aircraft: Option<AircraftPerformance>,
    #[serde(default)]
    pub wind: Option<WindVector>,
    #[serde(default)]
    pub policy: FuelPolicy,
    #[serde(default)]
    pub weather: Vec<WeatherSegment>,
    #[serde(default)]
    pub weather_fuel: WeatherFuelSettings,
    #[serde(default)]
    pub alternate: Option<AlternateRequest>,
}

/// Stop-card calculator with its geodesy and location lookup injected.
#[derive(Debug, Clone, Default)]
pub struct StopCardEngine<G = Haversine, D = NoDirectory> {
    geodesy: G,
    directory: D,
}

impl StopCardEngine {
    /// Haversine geodesy and no location directory.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: Geodesy, D: LocationDirectory> StopCardEngine<G, D> {
    pub fn with_parts(geodesy: G, directory: D) -> Self {
        Self {
            geodesy,
            directory,
        }
    }

    /// Swap the location directory used to resolve alternate destinations.
    pub fn with_directory<D2: LocationDirectory>(self, directory: D2) -> StopCardEngine<G, D2> {
        StopCardEngine {
            geodesy: self.geodesy,
            directory,
        }
    }

    /// Compute the stop cards for `inputs`.
    pub fn compute(&self, inputs: &FlightInputs) -> StopCardPlan {
        self.compute_detailed(inputs).0
    }

    /// Compute the stop cards and also return the absorbed issues as values.
    pub fn compute_detailed(&self, inputs: &FlightInputs) -> (StopCardPlan, Vec<PlanIssue>) {
        let mut issues = Vec::new();
        let cards = self.build_cards(inputs, &mut issues);

        tracing::info!(
            cards = cards.len(),
            issues = issues.len(),
            "stop cards computed"
        );
        let plan = StopCardPlan {
            cards,
            issues: issues.iter().map(ToString::to_string).collect(),
        };
        (plan, issues)
    }

    fn build_cards(
        &self,
        inputs: &FlightInputs,
        issues: &mut Vec<PlanIssue>,
    ) -> Vec<StopCard> {
        if inputs.waypoints.len() < 2 {
            return missing(
                issues,
                format!(
                    "route needs at least two waypoints, got {}",
                    inputs.waypoints.len()
                ),
            );
        }
        let Some(aircraft) = inputs.aircraft.as_ref() else {
            return missing(issues, "no aircraft selected");
        };
        let Some(envelope) = aircraft.envelope() else {
            return missing(
                issues,
                format!(
                    "aircraft '{}' has no usable cruise speed or fuel burn",
                    aircraft.registration
                ),
            );
        };

        let (policy, policy_issues) = inputs.policy.sanitized();
        issues.extend(policy_issues);

        let route = aggregate_legs(&self.geodesy, &inputs.waypoints, envelope, inputs.wind);
        if route.is_empty() {
            return missing(
                issues,
                format!(
                    "route needs at least two landing stops, got {}",
                    route.stops.len()
                ),
            );
        }

        let aux = evaluate_auxiliary_fuel(&policy, route.stops.len(), route.total_trip_fuel());
        tracing::debug!(
            legs = route.legs.len(),
            total_trip_lb = aux.total_trip_fuel_lb,
            contingency_lb = aux.contingency_fuel_lb,
            deck_lb = aux.deck_fuel_lb,
            total_required_lb = aux.total_fuel_required_lb,
            "auxiliary fuel"
        );

        let mut cards = build_stop_cards(&route, &aux, &policy, aircraft);
        issues.extend(apply_weather_fuel(
            &mut cards,
            &inputs.weather,
            &inputs.weather_fuel,
            aircraft,
            &policy,
        ));

        if let Some(request) = &inputs.alternate {
            let ctx = AlternateContext {
                geodesy: &self.geodesy,
                directory: &self.directory,
                primary_route: &inputs.waypoints,
                envelope,
                wind: inputs.wind,
                aircraft,
                policy: &policy,
            };
            match build_alternate_card(&ctx, request, cards.len()) {
                Ok(card) => cards.push(card),
                Err(issue) => issues.push(issue),
            }
        }

        cards
    }
}

fn missing(issues: &mut Vec<PlanIssue>, reason: impl Into<String>) -> Vec<StopCard> {
    let issue = PlanIssue::missing(reason);
    tracing::warn!(%issue, "no stop cards produced");
    issues.push(issue);
    Vec::new()
}
