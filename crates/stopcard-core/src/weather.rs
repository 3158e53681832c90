//! Weather-driven ARA and approach fuel overlay.
//!
//! Offshore rigs with an approach-hazard ranking need fuel for an airborne
//! radar approach (ARA); onshore airports with the airport-hazard ranking
//! need approach fuel instead. The fuel is added to the matched stop's card
//! only; every other card keeps its base total. Route distance and time are
//! never touched.

use crate::error::PlanIssue;
use crate::models::{AircraftPerformance, StopCard, WeatherSegment};
use crate::passengers::max_passengers;
use crate::policy::{coerce_value, FuelPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Amounts and ranking classes that drive the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherFuelSettings {
    #[serde(default = "default_weather_fuel")]
    pub default_ara_fuel_lb: f64,
    #[serde(default = "default_weather_fuel")]
    pub default_approach_fuel_lb: f64,
    /// Rankings that call for ARA fuel at a rig
    #[serde(default = "default_ara_rankings")]
    pub ara_ranking_classes: Vec<u8>,
    /// Rankings that call for approach fuel at an airport
    #[serde(default = "default_approach_rankings")]
    pub approach_ranking_classes: Vec<u8>,
    /// User-entered amounts per location; these win over the defaults
    #[serde(default)]
    pub overrides: HashMap<String, f64>,
}

fn default_weather_fuel() -> f64 {
    200.0
}

fn default_ara_rankings() -> Vec<u8> {
    vec![8]
}

fn default_approach_rankings() -> Vec<u8> {
    vec![5]
}

impl Default for WeatherFuelSettings {
    fn default() -> Self {
        Self {
            default_ara_fuel_lb: default_weather_fuel(),
            default_approach_fuel_lb: default_weather_fuel(),
            ara_ranking_classes: default_ara_rankings(),
            approach_ranking_classes: default_approach_rankings(),
            overrides: HashMap::new(),
        }
    }
}

impl WeatherFuelSettings {
    /// Record a user override for one location.
    pub fn set_override(&mut self, location: &str, fuel_lb: f64) {
        self.overrides.insert(location_key(location), fuel_lb);
    }

    fn override_for(&self, location: &str) -> Option<f64> {
        let key = location_key(location);
        self.overrides
            .iter()
            .find(|(name, _)| location_key(name) == key)
            .map(|(_, fuel)| *fuel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherFuelKind {
    Ara,
    Approach,
}

/// Weather fuel owed for arriving at one landing stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationWeatherFuel {
    pub location: String,
    pub stop_index: usize,
    pub kind: WeatherFuelKind,
    pub fuel_lb: f64,
    pub overridden: bool,
}

fn location_key(name: &str) -> String {
    name.trim().to_uppercase()
}

fn classify(segment: &WeatherSegment, settings: &WeatherFuelSettings) -> Option<WeatherFuelKind> {
    if segment.is_rig && settings.ara_ranking_classes.contains(&segment.ranking_class) {
        Some(WeatherFuelKind::Ara)
    } else if !segment.is_rig && settings.approach_ranking_classes.contains(&segment.ranking_class) {
        Some(WeatherFuelKind::Approach)
    } else {
        None
    }
}

/// Weather fuel owed at each matching landing stop.
pub fn weather_requirements(
    cards: &[StopCard],
    segments: &[WeatherSegment],
    settings: &WeatherFuelSettings,
) -> (Vec<LocationWeatherFuel>, Vec<PlanIssue>) {
    let mut requirements = Vec::new();
    let mut issues = Vec::new();

    for segment in segments {
        let key = location_key(&segment.location);
        let Some(card) = cards
            .iter()
            .find(|card| !card.is_alternate && location_key(&card.stop_name) == key)
        else {
            tracing::debug!(location = %segment.location, "weather segment matches no stop");
            issues.push(PlanIssue::unresolved(&segment.location, "weather fuel"));
            continue;
        };
        let Some(kind) = classify(segment, settings) else {
            continue;
        };
        if requirements
            .iter()
            .any(|req: &LocationWeatherFuel| req.stop_index == card.index)
        {
            continue;
        }

        let (raw, field, overridden) = match (settings.override_for(&segment.location), kind) {
            (Some(fuel), _) => (fuel, "weather_fuel_override", true),
            (None, WeatherFuelKind::Ara) => (settings.default_ara_fuel_lb, "default_ara_fuel", false),
            (None, WeatherFuelKind::Approach) => {
                (settings.default_approach_fuel_lb, "default_approach_fuel", false)
            }
        };
        let (fuel_lb, issue) = coerce_value(field, raw);
        issues.extend(issue);

        requirements.push(LocationWeatherFuel {
            location: card.stop_name.clone(),
            stop_index: card.index,
            kind,
            fuel_lb,
            overridden,
        });
    }

    (requirements, issues)
}

/// Overlay weather fuel on a set of base stop cards.
///
/// Only the matched stop's card is augmented. Weather components are rebuilt
/// from zero on every call, so applying the same inputs twice leaves the cards
/// unchanged.
pub fn apply_weather_fuel(
    cards: &mut [StopCard],
    segments: &[WeatherSegment],
    settings: &WeatherFuelSettings,
    aircraft: &AircraftPerformance,
    policy: &FuelPolicy,
) -> Vec<PlanIssue> {
    let (requirements, issues) = weather_requirements(cards, segments, settings);

    for card in cards.iter_mut().filter(|card| !card.is_alternate) {
        let (ara_lb, approach_lb) = requirements
            .iter()
            .filter(|req| req.stop_index == card.index)
            .fold((0.0, 0.0), |(ara, approach), req| match req.kind {
                WeatherFuelKind::Ara => (ara + req.fuel_lb, approach),
                WeatherFuelKind::Approach => (ara, approach + req.fuel_lb),
            });

        let components = &mut card.fuel_components;
        if components.ara_lb == ara_lb && components.approach_lb == approach_lb {
            continue;
        }
        components.ara_lb = ara_lb;
        components.approach_lb = approach_lb;
        components.refresh_display();
        card.total_fuel_lb = components.total();
        if !card.is_destination {
            card.max_passengers = Some(max_passengers(aircraft, policy, card.total_fuel_lb));
        }
    }

    for req in &requirements {
        tracing::info!(
            location = %req.location,
            stop_index = req.stop_index,
            kind = ?req.kind,
            fuel_lb = req.fuel_lb,
            overridden = req.overridden,
            "weather fuel applied"
        );
    }

    issues
}
