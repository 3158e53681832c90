//! Onward passenger capacity from weight limits and fuel on board.

use crate::models::AircraftPerformance;
use crate::policy::FuelPolicy;

/// Weight left for passengers once fuel, empty weight and cargo are loaded.
///
/// When the aircraft publishes a structural payload limit the result is
/// capped by it as well.
pub fn available_payload(
    aircraft: &AircraftPerformance,
    policy: &FuelPolicy,
    fuel_on_board_lb: f64,
) -> f64 {
    let by_takeoff_weight = aircraft.max_takeoff_weight_lb
        - aircraft.operating_empty_weight_lb
        - fuel_on_board_lb
        - policy.cargo_weight_lb;

    match aircraft.max_payload_lb {
        Some(limit) if limit.is_finite() => by_takeoff_weight.min(limit - policy.cargo_weight_lb),
        _ => by_takeoff_weight,
    }
}

/// Maximum number of passengers that can be carried with `fuel_on_board_lb`.
///
/// Always within `[0, max_passenger_seats]`.
pub fn max_passengers(
    aircraft: &AircraftPerformance,
    policy: &FuelPolicy,
    fuel_on_board_lb: f64,
) -> u32 {
    let passenger_weight = policy.passenger_weight_lb;
    if !passenger_weight.is_finite() || passenger_weight <= 0.0 {
        tracing::debug!(passenger_weight, "no usable passenger weight, capacity is 0");
        return 0;
    }

    let payload = available_payload(aircraft, policy, fuel_on_board_lb);
    if !payload.is_finite() || payload <= 0.0 {
        return 0;
    }

    let seats = (payload / passenger_weight).floor();
    if seats >= aircraft.max_passenger_seats as f64 {
        aircraft.max_passenger_seats
    } else {
        seats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aircraft() -> AircraftPerformance {
        AircraftPerformance {
            registration: "G-OFSH".to_string(),
            cruise_speed_kt: Some(140.0),
            fuel_burn_lb_per_hr: Some(900.0),
            max_takeoff_weight_lb: 6_000.0,
            operating_empty_weight_lb: 0.0,
            max_payload_lb: None,
            max_passenger_seats: 19,
        }
    }

    #[test]
    fn capacity_is_payload_over_passenger_weight() {
        // 6000 - 1673 = 4327 lb -> 19.67 passengers
        assert_eq!(max_passengers(&aircraft(), &FuelPolicy::default(), 1673.0), 19);
        // 6000 - 3000 = 3000 lb -> 13.6 passengers
        assert_eq!(max_passengers(&aircraft(), &FuelPolicy::default(), 3000.0), 13);
    }

    #[test]
    fn capacity_never_exceeds_seats() {
        assert_eq!(max_passengers(&aircraft(), &FuelPolicy::default(), 0.0), 19);
    }

    #[test]
    fn fuel_above_takeoff_weight_means_no_passengers() {
        assert_eq!(max_passengers(&aircraft(), &FuelPolicy::default(), 7_000.0), 0);
        assert_eq!(max_passengers(&aircraft(), &FuelPolicy::default(), f64::NAN), 0);
    }

    #[test]
    fn zero_passenger_weight_short_circuits() {
        let policy = FuelPolicy {
            passenger_weight_lb: 0.0,
            ..FuelPolicy::default()
        };
        assert_eq!(max_passengers(&aircraft(), &policy, 1000.0), 0);
    }

    #[test]
    fn payload_limit_and_cargo_reduce_capacity() {
        let mut limited = aircraft();
        limited.max_payload_lb = Some(2_200.0);
        assert_eq!(max_passengers(&limited, &FuelPolicy::default(), 1000.0), 10);

        let policy = FuelPolicy {
            cargo_weight_lb: 440.0,
            ..FuelPolicy::default()
        };
        assert_eq!(max_passengers(&limited, &policy, 1000.0), 8);
    }

    #[test]
    fn capacity_grows_as_fuel_falls() {
        let mut previous = 0;
        for fuel in (0..=6_000).rev().step_by(250) {
            let count = max_passengers(&aircraft(), &FuelPolicy::default(), fuel as f64);
            assert!(count >= previous, "capacity dropped at {fuel} lb");
            previous = count;
        }
    }
}
