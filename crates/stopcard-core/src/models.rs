//! Core data models for the stop-card engine.

use serde::{Deserialize, Serialize};

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// What the aircraft does at a waypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointRole {
    Departure,
    /// Intermediate landing
    Stop,
    Destination,
    /// Routing point only, the aircraft does not land
    #[default]
    NavigationWaypoint,
}

impl WaypointRole {
    pub fn is_landing(self) -> bool {
        !matches!(self, Self::NavigationWaypoint)
    }
}

/// A point on the planned route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub role: WaypointRole,
    /// Fuel is taken on at this stop
    #[serde(default)]
    pub refuel: bool,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64, role: WaypointRole) -> Self {
        let name = name.into();
        Self {
            id: name.to_lowercase(),
            name,
            coordinate: Coordinate::new(lat, lon),
            role,
            refuel: false,
        }
    }

    /// Mark this waypoint as a refuel stop.
    pub fn with_refuel(mut self) -> Self {
        self.refuel = true;
        self
    }

    pub fn is_landing(&self) -> bool {
        self.role.is_landing()
    }
}

/// Aircraft performance record as supplied by the aircraft directory.
///
/// Cruise speed and fuel burn are optional on the wire because directory
/// records are sometimes incomplete; an aircraft without both is unusable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftPerformance {
    #[serde(default)]
    pub registration: String,
    #[serde(default)]
    pub cruise_speed_kt: Option<f64>,
    #[serde(default)]
    pub fuel_burn_lb_per_hr: Option<f64>,
    pub max_takeoff_weight_lb: f64,
    /// Basic operating weight including crew
    #[serde(default)]
    pub operating_empty_weight_lb: f64,
    #[serde(default)]
    pub max_payload_lb: Option<f64>,
    pub max_passenger_seats: u32,
}

/// Validated cruise figures extracted from an [`AircraftPerformance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceEnvelope {
    pub cruise_speed_kt: f64,
    pub fuel_burn_lb_per_hr: f64,
}

impl AircraftPerformance {
    /// Cruise speed and fuel burn, if both are present and positive.
    pub fn envelope(&self) -> Option<PerformanceEnvelope> {
        let cruise = self.cruise_speed_kt.filter(|v| v.is_finite() && *v > 0.0)?;
        let burn = self
            .fuel_burn_lb_per_hr
            .filter(|v| v.is_finite() && *v > 0.0)?;
        Some(PerformanceEnvelope {
            cruise_speed_kt: cruise,
            fuel_burn_lb_per_hr: burn,
        })
    }
}

/// Uniform wind applied to every leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    pub speed_kt: f64,
    /// Direction the wind blows from, degrees true
    pub direction_deg: f64,
}

impl WindVector {
    pub fn calm() -> Self {
        Self::default()
    }

    pub fn new(speed_kt: f64, direction_deg: f64) -> Self {
        Self {
            speed_kt,
            direction_deg,
        }
    }
}

/// Weather classification for one location, from the weather service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSegment {
    pub location: String,
    #[serde(default)]
    pub is_rig: bool,
    pub ranking_class: u8,
}

/// Per-component fuel breakdown carried by a stop card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelComponents {
    pub trip_lb: f64,
    pub contingency_lb: f64,
    pub taxi_lb: f64,
    pub deck_lb: f64,
    pub reserve_lb: f64,
    #[serde(default)]
    pub ara_lb: f64,
    #[serde(default)]
    pub approach_lb: f64,
    /// Human-readable breakdown, e.g. `Trip:900 Cont:90 Taxi:50 Deck:33 Res:600`
    pub display: String,
}

impl FuelComponents {
    /// Fuel before any weather overlay.
    pub fn base_total(&self) -> f64 {
        self.trip_lb + self.contingency_lb + self.taxi_lb + self.deck_lb + self.reserve_lb
    }

    pub fn weather_total(&self) -> f64 {
        self.ara_lb + self.approach_lb
    }

    pub fn total(&self) -> f64 {
        self.base_total() + self.weather_total()
    }

    /// Rebuild the display string from the numeric fields.
    pub fn refresh_display(&mut self) {
        let mut parts = vec![format!("Trip:{:.0}", self.trip_lb)];
        parts.push(format!("Cont:{:.0}", self.contingency_lb));
        if self.taxi_lb > 0.0 {
            parts.push(format!("Taxi:{:.0}", self.taxi_lb));
        }
        if self.deck_lb > 0.0 {
            parts.push(format!("Deck:{:.0}", self.deck_lb));
        }
        parts.push(format!("Res:{:.0}", self.reserve_lb));
        if self.ara_lb > 0.0 {
            parts.push(format!("ARA:{:.0}", self.ara_lb));
        }
        if self.approach_lb > 0.0 {
            parts.push(format!("Appr:{:.0}", self.approach_lb));
        }
        self.display = parts.join(" ");
    }
}

/// Fuel and passenger figures for one landing stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopCard {
    pub index: usize,
    pub stop_name: String,
    /// Distance still to fly from this stop, nm
    pub total_distance_nm: f64,
    /// Time still to fly from this stop, hours
    pub total_time_hours: f64,
    /// Fuel required on departure from this stop, lb
    pub total_fuel_lb: f64,
    /// `None` at the final destination
    pub max_passengers: Option<u32>,
    pub fuel_components: FuelComponents,
    pub deck_fuel_lb: f64,
    pub deck_time_min: f64,
    /// Ground speed of the leg departing this stop
    #[serde(default)]
    pub ground_speed_kt: Option<f64>,
    /// Headwind component of the leg departing this stop (negative = tailwind)
    #[serde(default)]
    pub headwind_kt: Option<f64>,
    pub is_departure: bool,
    pub is_destination: bool,
    #[serde(default)]
    pub is_alternate: bool,
    #[serde(default)]
    pub refuel: bool,
}

impl StopCard {
    pub fn passengers_label(&self) -> String {
        match self.max_passengers {
            Some(count) => count.to_string(),
            None => "Final stop".to_string(),
        }
    }
}

/// Output of one engine invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopCardPlan {
    pub cards: Vec<StopCard>,
    /// Problems absorbed while computing, rendered as messages
    pub issues: Vec<String>,
}

impl StopCardPlan {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn departure(&self) -> Option<&StopCard> {
        self.cards.iter().find(|card| card.is_departure)
    }

    pub fn destination(&self) -> Option<&StopCard> {
        self.cards.iter().find(|card| card.is_destination)
    }

    pub fn alternate(&self) -> Option<&StopCard> {
        self.cards.iter().find(|card| card.is_alternate)
    }
}
