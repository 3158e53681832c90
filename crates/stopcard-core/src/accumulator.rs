//! Per-stop fuel requirements along a route.
//!
//! Every landing stop gets the fuel required to finish the flight from there:
//! the trip fuel of the legs still ahead, contingency prorated by how much of
//! the trip remains, deck fuel for the landings still ahead and the fixed
//! reserve. Taxi fuel is only carried at departure.
//!
//! A stop flagged `refuel` ends the fuel horizon of every stop before it:
//! those stops only need to reach the refuel stop. Without refuel stops the
//! horizon is always the final destination.

use crate::legs::RouteLegs;
use crate::models::{AircraftPerformance, FuelComponents, StopCard};
use crate::passengers::max_passengers;
use crate::policy::{AuxiliaryFuel, FuelPolicy};

/// Fuel requirement for one landing stop, before passengers are worked out.
#[derive(Debug, Clone, PartialEq)]
pub struct StopFuel {
    pub components: FuelComponents,
    pub deck_time_hours: f64,
}

impl StopFuel {
    pub fn total(&self) -> f64 {
        self.components.base_total()
    }
}

/// Index of the furthest stop that `from` must reach without refuelling.
fn fuel_horizon(route: &RouteLegs, from: usize) -> usize {
    let last = route.stops.len().saturating_sub(1);
    route
        .stops
        .iter()
        .enumerate()
        .skip(from + 1)
        .find(|(idx, stop)| stop.refuel && *idx < last)
        .map(|(idx, _)| idx)
        .unwrap_or(last)
}

/// Fuel required on departure from each landing stop, in route order.
pub fn accumulate_stop_fuel(
    route: &RouteLegs,
    aux: &AuxiliaryFuel,
    policy: &FuelPolicy,
) -> Vec<StopFuel> {
    let total_legs = route.legs.len();
    if total_legs == 0 {
        return Vec::new();
    }

    let total_trip = aux.total_trip_fuel_lb;
    let mut result: Vec<StopFuel> = Vec::with_capacity(total_legs + 1);

    for stop in 0..=total_legs {
        let fuel = if stop == total_legs {
            let previous = result.last().map(StopFuel::total).unwrap_or(f64::INFINITY);
            destination_fuel(aux, previous)
        } else {
            let horizon = fuel_horizon(route, stop);
            let remaining_trip: f64 = route.legs[stop..horizon].iter().map(|leg| leg.fuel_lb).sum();
            let remaining_intermediate = horizon.saturating_sub(stop + 1);

            let (deck_time_hours, deck_lb, contingency_lb) =
                if stop == 0 && horizon == total_legs {
                    (aux.deck_time_hours, aux.deck_fuel_lb, aux.contingency_fuel_lb)
                } else {
                    let (hours, deck) = policy.deck_allowance(remaining_intermediate);
                    (hours, deck, prorated_contingency(aux, remaining_trip))
                };

            let mut components = FuelComponents {
                trip_lb: remaining_trip,
                contingency_lb,
                taxi_lb: if stop == 0 { aux.taxi_fuel_lb } else { 0.0 },
                deck_lb,
                reserve_lb: aux.reserve_fuel_lb,
                ..Default::default()
            };
            components.refresh_display();
            StopFuel {
                components,
                deck_time_hours,
            }
        };

        tracing::debug!(
            stop,
            total_fuel_lb = fuel.total(),
            trip_lb = fuel.components.trip_lb,
            total_trip_lb = total_trip,
            "stop fuel"
        );
        result.push(fuel);
    }

    result
}

/// Contingency still owed for `remaining_trip_lb` of flying.
fn prorated_contingency(aux: &AuxiliaryFuel, remaining_trip_lb: f64) -> f64 {
    if aux.total_trip_fuel_lb > 0.0 {
        (aux.contingency_fuel_lb * remaining_trip_lb / aux.total_trip_fuel_lb).round()
    } else {
        0.0
    }
}

/// Landing fuel at the final destination: reserve plus the unused contingency.
///
/// The contingency is capped so the destination never needs more than the
/// stop before it.
fn destination_fuel(aux: &AuxiliaryFuel, previous_total_lb: f64) -> StopFuel {
    let headroom = (previous_total_lb - aux.reserve_fuel_lb).max(0.0);
    let mut components = FuelComponents {
        contingency_lb: aux.contingency_fuel_lb.min(headroom),
        reserve_lb: aux.reserve_fuel_lb,
        ..Default::default()
    };
    components.refresh_display();
    StopFuel {
        components,
        deck_time_hours: 0.0,
    }
}

/// Turn the per-stop fuel into stop cards, adding distances and passengers.
pub fn build_stop_cards(
    route: &RouteLegs,
    aux: &AuxiliaryFuel,
    policy: &FuelPolicy,
    aircraft: &AircraftPerformance,
) -> Vec<StopCard> {
    let fuel = accumulate_stop_fuel(route, aux, policy);
    let total_legs = route.legs.len();

    fuel.into_iter()
        .zip(route.stops.iter())
        .enumerate()
        .map(|(idx, (stop_fuel, stop))| {
            let ahead = &route.legs[idx..];
            let onward = route.legs.get(idx);
            let is_destination = idx == total_legs;
            let total_fuel_lb = stop_fuel.total();

            StopCard {
                index: idx,
                stop_name: stop.name.clone(),
                total_distance_nm: ahead.iter().map(|leg| leg.distance_nm).sum(),
                total_time_hours: ahead.iter().map(|leg| leg.time_hours).sum(),
                total_fuel_lb,
                max_passengers: if is_destination {
                    None
                } else {
                    Some(max_passengers(aircraft, policy, total_fuel_lb))
                },
                deck_fuel_lb: stop_fuel.components.deck_lb,
                deck_time_min: stop_fuel.deck_time_hours * 60.0,
                fuel_components: stop_fuel.components,
                ground_speed_kt: onward.map(|leg| leg.ground_speed_kt),
                headwind_kt: onward.map(|leg| leg.headwind_kt),
                is_departure: idx == 0,
                is_destination,
                is_alternate: false,
                refuel: stop.refuel && idx != 0 && !is_destination,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legs::{LandingStop, Leg};
    use crate::policy::evaluate_auxiliary_fuel;

    fn route(leg_fuel: &[f64]) -> RouteLegs {
        let stops = (0..=leg_fuel.len())
            .map(|idx| LandingStop {
                waypoint_index: idx,
                name: format!("S{idx}"),
                refuel: false,
            })
            .collect();
        let legs = leg_fuel
            .iter()
            .enumerate()
            .map(|(idx, &fuel)| Leg {
                from_stop: format!("S{idx}"),
                to_stop: format!("S{}", idx + 1),
                distance_nm: fuel / 900.0 * 140.0,
                time_hours: fuel / 900.0,
                fuel_lb: fuel,
                ground_speed_kt: 140.0,
                headwind_kt: 0.0,
                segment_count: 1,
            })
            .collect();
        RouteLegs { stops, legs }
    }

    fn totals(route: &RouteLegs, policy: &FuelPolicy) -> Vec<f64> {
        let aux = evaluate_auxiliary_fuel(policy, route.stops.len(), route.total_trip_fuel());
        accumulate_stop_fuel(route, &aux, policy)
            .iter()
            .map(StopFuel::total)
            .collect()
    }

    #[test]
    fn three_stop_scenario() {
        let policy = FuelPolicy::default();
        assert_eq!(totals(&route(&[450.0, 450.0]), &policy), vec![1673.0, 1095.0, 690.0]);
    }

    #[test]
    fn intermediate_stops_carry_remaining_deck_fuel() {
        let policy = FuelPolicy::default();
        let route = route(&[300.0, 300.0, 300.0]);
        let aux = evaluate_auxiliary_fuel(&policy, 4, 900.0);
        let fuel = accumulate_stop_fuel(&route, &aux, &policy);

        // Departure: two deck stops ahead, round(10/60*400) = 67.
        assert_eq!(fuel[0].components.deck_lb, 67.0);
        // First stop: one deck stop still ahead.
        assert_eq!(fuel[1].components.deck_lb, 33.0);
        assert_eq!(fuel[1].components.contingency_lb, 60.0);
        assert_eq!(fuel[1].components.taxi_lb, 0.0);
        // Last intermediate stop: none ahead.
        assert_eq!(fuel[2].components.deck_lb, 0.0);
        assert_eq!(fuel[2].total(), 300.0 + 30.0 + 600.0);
    }

    #[test]
    fn destination_never_needs_more_than_previous_stop() {
        // Tiny final leg: the full contingency would exceed what the last
        // intermediate stop needs.
        let policy = FuelPolicy::default();
        let totals = totals(&route(&[1000.0, 1000.0, 10.0]), &policy);
        for pair in totals.windows(2) {
            assert!(pair[0] >= pair[1], "{totals:?}");
        }
        let destination = *totals.last().unwrap();
        assert!(destination <= policy.reserve_fuel_lb + 201.0);
    }

    #[test]
    fn zero_trip_fuel_prorates_to_zero() {
        let policy = FuelPolicy::default();
        let totals = totals(&route(&[0.0, 0.0]), &policy);
        // Departure still carries taxi and one stop of deck fuel.
        assert_eq!(totals, vec![683.0, 600.0, 600.0]);
    }

    #[test]
    fn refuel_stop_limits_the_horizon() {
        let policy = FuelPolicy::default();
        let mut route = route(&[400.0, 400.0, 400.0]);
        route.stops[2].refuel = true;
        let aux = evaluate_auxiliary_fuel(&policy, route.stops.len(), route.total_trip_fuel());
        let fuel = accumulate_stop_fuel(&route, &aux, &policy);

        // Departure only needs to reach S2: 800 trip, 80 contingency, one deck stop.
        assert_eq!(fuel[0].components.trip_lb, 800.0);
        assert_eq!(fuel[0].components.contingency_lb, 80.0);
        assert_eq!(fuel[0].components.deck_lb, 33.0);
        assert_eq!(fuel[0].components.taxi_lb, 50.0);
        // S1 reaches the refuel stop directly.
        assert_eq!(fuel[1].components.trip_lb, 400.0);
        assert_eq!(fuel[1].components.deck_lb, 0.0);
        // S2 refuels for the last leg.
        assert_eq!(fuel[2].components.trip_lb, 400.0);
    }
}
