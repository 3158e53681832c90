pub mod accumulator;
pub mod alternate;
pub mod engine;
pub mod error;
pub mod legs;
pub mod models;
pub mod passengers;
pub mod policy;
pub mod spatial;
pub mod watch;
pub mod weather;
pub mod wind;

pub use accumulator::{accumulate_stop_fuel, build_stop_cards, StopFuel};
pub use alternate::{
    build_alternate_card, AlternateContext, AlternateLocation, AlternateRequest,
    LocationDirectory, NoDirectory,
};
pub use engine::{FlightInputs, StopCardEngine};
pub use error::PlanIssue;
pub use legs::{aggregate_legs, landing_stop_indices, LandingStop, Leg, RouteLegs};
pub use models::{
    AircraftPerformance, Coordinate, FuelComponents, PerformanceEnvelope, StopCard, StopCardPlan,
    Waypoint, WaypointRole, WeatherSegment, WindVector,
};
pub use passengers::{available_payload, max_passengers};
pub use policy::{evaluate_auxiliary_fuel, AuxiliaryFuel, FuelPolicy, PolicyEdit, PolicyField};
pub use spatial::{haversine_distance, Geodesy, Haversine};
pub use watch::{plan_watch, PlanPublisher, PlanReader};
pub use weather::{
    apply_weather_fuel, weather_requirements, LocationWeatherFuel, WeatherFuelKind,
    WeatherFuelSettings,
};
pub use wind::{correct_for_wind, segment_performance, SegmentPerformance, WindCorrection};
