//! Fuel policy, settings edits and the auxiliary fuel evaluator.

use crate::error::PlanIssue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator fuel policy. All weights in lb, deck time in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPolicy {
    pub passenger_weight_lb: f64,
    pub taxi_fuel_lb: f64,
    pub contingency_fuel_percent: f64,
    pub reserve_fuel_lb: f64,
    pub deck_time_per_stop_min: f64,
    pub deck_fuel_flow_lb_per_hr: f64,
    /// Freight carried for the whole flight, deducted from payload
    #[serde(default)]
    pub cargo_weight_lb: f64,
}

impl Default for FuelPolicy {
    fn default() -> Self {
        Self {
            passenger_weight_lb: 220.0,
            taxi_fuel_lb: 50.0,
            contingency_fuel_percent: 10.0,
            reserve_fuel_lb: 600.0,
            deck_time_per_stop_min: 5.0,
            deck_fuel_flow_lb_per_hr: 400.0,
            cargo_weight_lb: 0.0,
        }
    }
}

/// One editable policy setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyField {
    PassengerWeight,
    TaxiFuel,
    ContingencyPercent,
    ReserveFuel,
    DeckTimePerStop,
    DeckFuelFlow,
    CargoWeight,
}

impl PolicyField {
    pub const ALL: [PolicyField; 7] = [
        Self::PassengerWeight,
        Self::TaxiFuel,
        Self::ContingencyPercent,
        Self::ReserveFuel,
        Self::DeckTimePerStop,
        Self::DeckFuelFlow,
        Self::CargoWeight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::PassengerWeight => "passenger_weight",
            Self::TaxiFuel => "taxi_fuel",
            Self::ContingencyPercent => "contingency_percent",
            Self::ReserveFuel => "reserve_fuel",
            Self::DeckTimePerStop => "deck_time_per_stop",
            Self::DeckFuelFlow => "deck_fuel_flow",
            Self::CargoWeight => "cargo_weight",
        }
    }

    /// The policy slot this field writes. Every update goes through here.
    fn slot(self, policy: &mut FuelPolicy) -> &mut f64 {
        match self {
            Self::PassengerWeight => &mut policy.passenger_weight_lb,
            Self::TaxiFuel => &mut policy.taxi_fuel_lb,
            Self::ContingencyPercent => &mut policy.contingency_fuel_percent,
            Self::ReserveFuel => &mut policy.reserve_fuel_lb,
            Self::DeckTimePerStop => &mut policy.deck_time_per_stop_min,
            Self::DeckFuelFlow => &mut policy.deck_fuel_flow_lb_per_hr,
            Self::CargoWeight => &mut policy.cargo_weight_lb,
        }
    }
}

impl fmt::Display for PolicyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|field| field.name() == wanted)
            .ok_or_else(|| format!("unknown policy field '{value}'"))
    }
}

/// A single settings change from the policy editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyEdit {
    pub field: PolicyField,
    pub value: f64,
}

impl PolicyEdit {
    /// Build an edit from raw editor text. Unparseable numbers become NaN and
    /// are coerced when applied.
    pub fn parse(field: &str, raw: &str) -> Result<Self, String> {
        let field = field.parse()?;
        let value = raw.trim().parse().unwrap_or(f64::NAN);
        Ok(Self { field, value })
    }
}

/// Replace NaN, infinite and negative values with 0, logging the change.
pub fn coerce_value(field: &'static str, value: f64) -> (f64, Option<PlanIssue>) {
    if value.is_finite() && value >= 0.0 {
        return (value, None);
    }
    tracing::warn!(field, value, "invalid fuel setting, using 0");
    (0.0, Some(PlanIssue::InvalidPolicyValue { field, value }))
}

impl FuelPolicy {
    /// Apply one editor change. The field's update runs exactly once.
    pub fn apply(&mut self, edit: PolicyEdit) -> Option<PlanIssue> {
        let (value, issue) = coerce_value(edit.field.name(), edit.value);
        *edit.field.slot(self) = value;
        tracing::debug!(field = %edit.field, value, "fuel policy updated");
        issue
    }

    /// Copy of this policy with every invalid field coerced to 0.
    pub fn sanitized(&self) -> (FuelPolicy, Vec<PlanIssue>) {
        let mut clean = self.clone();
        let mut issues = Vec::new();
        for field in PolicyField::ALL {
            let slot = field.slot(&mut clean);
            let (value, issue) = coerce_value(field.name(), *slot);
            *slot = value;
            issues.extend(issue);
        }
        (clean, issues)
    }

    /// Deck time and deck fuel for a number of intermediate landings.
    pub fn deck_allowance(&self, intermediate_stops: usize) -> (f64, f64) {
        let hours = intermediate_stops as f64 * self.deck_time_per_stop_min / 60.0;
        (hours, (hours * self.deck_fuel_flow_lb_per_hr).round())
    }

    pub fn contingency_for(&self, trip_fuel_lb: f64) -> f64 {
        (trip_fuel_lb * self.contingency_fuel_percent / 100.0).round()
    }
}

/// Whole-route fuel figures derived from the policy and leg totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryFuel {
    pub intermediate_stops: usize,
    pub deck_time_hours: f64,
    pub deck_fuel_lb: f64,
    pub contingency_fuel_lb: f64,
    pub taxi_fuel_lb: f64,
    pub reserve_fuel_lb: f64,
    pub total_trip_fuel_lb: f64,
    pub total_fuel_required_lb: f64,
}

/// Taxi, contingency and deck fuel for a whole route.
pub fn evaluate_auxiliary_fuel(
    policy: &FuelPolicy,
    landing_stop_count: usize,
    total_trip_fuel_lb: f64,
) -> AuxiliaryFuel {
    let intermediate_stops = landing_stop_count.saturating_sub(2);
    let (deck_time_hours, deck_fuel_lb) = policy.deck_allowance(intermediate_stops);
    let contingency_fuel_lb = policy.contingency_for(total_trip_fuel_lb);

    AuxiliaryFuel {
        intermediate_stops,
        deck_time_hours,
        deck_fuel_lb,
        contingency_fuel_lb,
        taxi_fuel_lb: policy.taxi_fuel_lb,
        reserve_fuel_lb: policy.reserve_fuel_lb,
        total_trip_fuel_lb,
        total_fuel_required_lb: policy.taxi_fuel_lb
            + total_trip_fuel_lb
            + contingency_fuel_lb
            + policy.reserve_fuel_lb
            + deck_fuel_lb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_auxiliary_fuel() {
        let aux = evaluate_auxiliary_fuel(&FuelPolicy::default(), 3, 900.0);
        assert_eq!(aux.intermediate_stops, 1);
        assert_eq!(aux.deck_fuel_lb, 33.0);
        assert_eq!(aux.contingency_fuel_lb, 90.0);
        assert_eq!(aux.total_fuel_required_lb, 1673.0);
    }

    #[test]
    fn two_stop_route_has_no_deck_fuel() {
        let aux = evaluate_auxiliary_fuel(&FuelPolicy::default(), 2, 450.0);
        assert_eq!(aux.intermediate_stops, 0);
        assert_eq!(aux.deck_fuel_lb, 0.0);
        assert_eq!(aux.deck_time_hours, 0.0);
    }

    #[test]
    fn sanitized_coerces_invalid_fields_to_zero() {
        let policy = FuelPolicy {
            taxi_fuel_lb: f64::NAN,
            reserve_fuel_lb: -10.0,
            deck_fuel_flow_lb_per_hr: f64::INFINITY,
            ..FuelPolicy::default()
        };
        let (clean, issues) = policy.sanitized();

        assert_eq!(clean.taxi_fuel_lb, 0.0);
        assert_eq!(clean.reserve_fuel_lb, 0.0);
        assert_eq!(clean.deck_fuel_flow_lb_per_hr, 0.0);
        assert_eq!(clean.passenger_weight_lb, 220.0);
        assert_eq!(issues.len(), 3);
        assert!(matches!(
            issues[1],
            PlanIssue::InvalidPolicyValue { field: "reserve_fuel", .. }
        ));
    }

    #[test]
    fn apply_updates_only_the_named_field() {
        let mut policy = FuelPolicy::default();
        let issue = policy.apply(PolicyEdit {
            field: PolicyField::ReserveFuel,
            value: 450.0,
        });
        assert!(issue.is_none());
        assert_eq!(policy.reserve_fuel_lb, 450.0);
        assert_eq!(
            FuelPolicy {
                reserve_fuel_lb: 600.0,
                ..policy.clone()
            },
            FuelPolicy::default()
        );
    }

    #[test]
    fn apply_coerces_garbage_editor_input() {
        let mut policy = FuelPolicy::default();
        let edit = PolicyEdit::parse("Deck Fuel Flow", "lots").unwrap();
        assert_eq!(edit.field, PolicyField::DeckFuelFlow);

        let issue = policy.apply(edit);
        assert!(issue.is_some());
        assert_eq!(policy.deck_fuel_flow_lb_per_hr, 0.0);
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(PolicyEdit::parse("fuel_colour", "1").is_err());
    }

    #[test]
    fn every_field_round_trips_through_its_name() {
        for field in PolicyField::ALL {
            assert_eq!(field.name().parse::<PolicyField>(), Ok(field));
        }
    }
}
