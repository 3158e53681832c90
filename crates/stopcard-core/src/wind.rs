//! Per-segment distance, time and fuel with wind correction.

use crate::models::{Coordinate, PerformanceEnvelope, WindVector};
use crate::spatial::Geodesy;
use serde::{Deserialize, Serialize};

/// Result of flying one waypoint-to-waypoint segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentPerformance {
    pub distance_nm: f64,
    pub time_hours: f64,
    pub fuel_lb: f64,
    pub ground_speed_kt: f64,
    /// Positive into the aircraft, negative for a tailwind
    pub headwind_kt: f64,
}

/// Ground speed and headwind for a single course.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindCorrection {
    pub ground_speed_kt: f64,
    pub headwind_kt: f64,
    /// False when still-air values were substituted
    pub applied: bool,
}

impl WindCorrection {
    fn still_air(cruise_speed_kt: f64) -> Self {
        Self {
            ground_speed_kt: cruise_speed_kt,
            headwind_kt: 0.0,
            applied: false,
        }
    }
}

/// Split a wind into (headwind, crosswind) relative to a course.
pub fn wind_components(wind: WindVector, course_deg: f64) -> (f64, f64) {
    let relative = (wind.direction_deg - course_deg).to_radians();
    (
        wind.speed_kt * relative.cos(),
        wind.speed_kt * relative.sin(),
    )
}

/// Solve the wind triangle for a course.
///
/// Falls back to still air whenever the correction cannot be solved: no wind,
/// non-finite inputs, a crosswind the aircraft cannot hold, or a headwind that
/// stops it.
pub fn correct_for_wind(
    cruise_speed_kt: f64,
    wind: Option<WindVector>,
    course_deg: f64,
) -> WindCorrection {
    let Some(wind) = wind else {
        return WindCorrection::still_air(cruise_speed_kt);
    };
    if !wind.speed_kt.is_finite() || !wind.direction_deg.is_finite() || !course_deg.is_finite() {
        tracing::debug!(?wind, course_deg, "wind correction unavailable, using still air");
        return WindCorrection::still_air(cruise_speed_kt);
    }

    let (headwind, crosswind) = wind_components(wind, course_deg);
    if crosswind.abs() >= cruise_speed_kt {
        tracing::warn!(crosswind, cruise_speed_kt, "crosswind exceeds cruise speed, using still air");
        return WindCorrection::still_air(cruise_speed_kt);
    }

    let along_track = (cruise_speed_kt * cruise_speed_kt - crosswind * crosswind).sqrt();
    let ground_speed = along_track - headwind;
    if !ground_speed.is_finite() || ground_speed <= 0.0 {
        tracing::warn!(headwind, cruise_speed_kt, "headwind exceeds cruise speed, using still air");
        return WindCorrection::still_air(cruise_speed_kt);
    }

    WindCorrection {
        ground_speed_kt: ground_speed,
        headwind_kt: headwind,
        applied: true,
    }
}

/// Distance, time, fuel and ground speed between two coordinates.
pub fn segment_performance<G: Geodesy>(
    geodesy: &G,
    from: Coordinate,
    to: Coordinate,
    envelope: PerformanceEnvelope,
    wind: Option<WindVector>,
) -> SegmentPerformance {
    let distance_nm = geodesy.distance_nm(from, to);
    if !distance_nm.is_finite() || distance_nm <= 0.0 {
        return SegmentPerformance {
            ground_speed_kt: envelope.cruise_speed_kt,
            ..Default::default()
        };
    }

    let course = geodesy.bearing_deg(from, to);
    let correction = correct_for_wind(envelope.cruise_speed_kt, wind, course);
    let time_hours = distance_nm / correction.ground_speed_kt;

    SegmentPerformance {
        distance_nm,
        time_hours,
        fuel_lb: time_hours * envelope.fuel_burn_lb_per_hr,
        ground_speed_kt: correction.ground_speed_kt,
        headwind_kt: correction.headwind_kt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        distance_nm: f64,
        bearing_deg: f64,
    }

    impl Geodesy for Fixed {
        fn distance_nm(&self, _: Coordinate, _: Coordinate) -> f64 {
            self.distance_nm
        }

        fn bearing_deg(&self, _: Coordinate, _: Coordinate) -> f64 {
            self.bearing_deg
        }
    }

    fn envelope() -> PerformanceEnvelope {
        PerformanceEnvelope {
            cruise_speed_kt: 140.0,
            fuel_burn_lb_per_hr: 900.0,
        }
    }

    #[test]
    fn still_air_segment_matches_cruise() {
        let geodesy = Fixed {
            distance_nm: 70.0,
            bearing_deg: 90.0,
        };
        let seg = segment_performance(
            &geodesy,
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            envelope(),
            None,
        );
        assert_eq!(seg.time_hours, 0.5);
        assert_eq!(seg.fuel_lb, 450.0);
        assert_eq!(seg.ground_speed_kt, 140.0);
        assert_eq!(seg.headwind_kt, 0.0);
    }

    #[test]
    fn direct_headwind_slows_the_aircraft() {
        // Course east, wind from the east.
        let correction = correct_for_wind(140.0, Some(WindVector::new(20.0, 90.0)), 90.0);
        assert!(correction.applied);
        assert!((correction.headwind_kt - 20.0).abs() < 1e-9);
        assert!((correction.ground_speed_kt - 120.0).abs() < 1e-9);
    }

    #[test]
    fn tailwind_is_negative_headwind() {
        let correction = correct_for_wind(140.0, Some(WindVector::new(20.0, 270.0)), 90.0);
        assert!((correction.headwind_kt + 20.0).abs() < 1e-9);
        assert!((correction.ground_speed_kt - 160.0).abs() < 1e-9);
    }

    #[test]
    fn pure_crosswind_reduces_ground_speed_slightly() {
        let correction = correct_for_wind(140.0, Some(WindVector::new(30.0, 0.0)), 90.0);
        assert!(correction.headwind_kt.abs() < 1e-9);
        assert!(correction.ground_speed_kt < 140.0);
        assert!(correction.ground_speed_kt > 130.0);
    }

    #[test]
    fn impossible_wind_falls_back_to_still_air() {
        let correction = correct_for_wind(100.0, Some(WindVector::new(150.0, 90.0)), 90.0);
        assert!(!correction.applied);
        assert_eq!(correction.ground_speed_kt, 100.0);
        assert_eq!(correction.headwind_kt, 0.0);

        let nan = correct_for_wind(100.0, Some(WindVector::new(f64::NAN, 90.0)), 90.0);
        assert!(!nan.applied);
    }

    #[test]
    fn zero_distance_segment_burns_nothing() {
        let geodesy = Fixed {
            distance_nm: 0.0,
            bearing_deg: 0.0,
        };
        let point = Coordinate::new(58.0, 2.0);
        let seg = segment_performance(&geodesy, point, point, envelope(), Some(WindVector::new(25.0, 0.0)));
        assert_eq!(seg.time_hours, 0.0);
        assert_eq!(seg.fuel_lb, 0.0);
    }
}
