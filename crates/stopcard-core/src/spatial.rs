//! Great-circle math for route legs.

use crate::models::Coordinate;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const METERS_PER_NM: f64 = 1_852.0;

/// Distance and bearing capability used by the leg calculations.
///
/// The engine never reaches for a global geodesy helper; callers pass an
/// implementation in, and tests can substitute one with fixed distances.
pub trait Geodesy {
    /// Great-circle distance in nautical miles.
    fn distance_nm(&self, from: Coordinate, to: Coordinate) -> f64;

    /// Initial true course from `from` to `to`, degrees in `[0, 360)`.
    fn bearing_deg(&self, from: Coordinate, to: Coordinate) -> f64;
}

/// Spherical-earth geodesy using the haversine formula.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl Geodesy for Haversine {
    fn distance_nm(&self, from: Coordinate, to: Coordinate) -> f64 {
        haversine_distance(from, to) / METERS_PER_NM
    }

    fn bearing_deg(&self, from: Coordinate, to: Coordinate) -> f64 {
        normalize_degrees(initial_bearing(from, to).to_degrees())
    }
}

impl<G: Geodesy + ?Sized> Geodesy for &G {
    fn distance_nm(&self, from: Coordinate, to: Coordinate) -> f64 {
        (**self).distance_nm(from, to)
    }

    fn bearing_deg(&self, from: Coordinate, to: Coordinate) -> f64 {
        (**self).bearing_deg(from, to)
    }
}

/// Great-circle distance in meters.
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let (phi1, phi2) = (from.lat.to_radians(), to.lat.to_radians());
    let half_dphi = (to.lat - from.lat).to_radians() / 2.0;
    let half_dlambda = (to.lon - from.lon).to_radians() / 2.0;
    let a = half_dphi.sin().powi(2) + phi1.cos() * phi2.cos() * half_dlambda.sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Initial bearing in radians, 0 = north, π/2 = east.
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> f64 {
    let (phi1, phi2) = (from.lat.to_radians(), to.lat.to_radians());
    let dlambda = (to.lon - from.lon).to_radians();
    let east = dlambda.sin() * phi2.cos();
    let north = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    east.atan2(north)
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // ~60nm between these points (1 degree latitude)
        let nm = Haversine.distance_nm(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((nm - 60.04).abs() < 0.1, "got {nm}");
    }

    #[test]
    fn test_haversine_antipodes() {
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_haversine_same_point() {
        let point = Coordinate::new(58.87, 5.63);
        assert!(Haversine.distance_nm(point, point) < 1e-9);
    }

    #[test]
    fn bearing_is_normalized() {
        let origin = Coordinate::new(58.0, 5.0);
        let east = Haversine.bearing_deg(origin, Coordinate::new(58.0, 6.0));
        let west = Haversine.bearing_deg(origin, Coordinate::new(58.0, 4.0));
        let north = Haversine.bearing_deg(origin, Coordinate::new(59.0, 5.0));

        assert!((east - 90.0).abs() < 1.0, "east was {east}");
        assert!((west - 270.0).abs() < 1.0, "west was {west}");
        assert!(north.abs() < 1e-6, "north was {north}");
    }

    #[test]
    fn normalize_wraps_negative_angles() {
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize_degrees(720.0)).abs() < 1e-9);
    }
}
