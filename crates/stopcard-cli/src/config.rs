//! CLI configuration from environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use stopcard_core::WeatherFuelSettings;

/// How the plan is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected table or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Replaces the default ARA fuel when set
    pub ara_fuel_lb: Option<f64>,
    /// Replaces the default approach fuel when set
    pub approach_fuel_lb: Option<f64>,
    pub format: OutputFormat,
    /// Emit logs as JSON lines instead of text
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            ara_fuel_lb: env::var("STOPCARD_ARA_FUEL_LB")
                .ok()
                .and_then(|s| s.parse().ok()),
            approach_fuel_lb: env::var("STOPCARD_APPROACH_FUEL_LB")
                .ok()
                .and_then(|s| s.parse().ok()),
            format: env::var("STOPCARD_FORMAT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            log_json: env::var("STOPCARD_LOG_JSON")
                .map(|s| matches!(s.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Apply the configured weather-fuel defaults on top of `settings`.
    pub fn apply_weather_defaults(&self, settings: &mut WeatherFuelSettings) {
        if let Some(fuel) = self.ara_fuel_lb {
            settings.default_ara_fuel_lb = fuel;
        }
        if let Some(fuel) = self.approach_fuel_lb {
            settings.default_approach_fuel_lb = fuel;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(" table ".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn weather_defaults_only_replace_configured_values() {
        let config = Config {
            ara_fuel_lb: Some(300.0),
            ..Default::default()
        };
        let mut settings = WeatherFuelSettings::default();
        config.apply_weather_defaults(&mut settings);
        assert_eq!(settings.default_ara_fuel_lb, 300.0);
        assert_eq!(settings.default_approach_fuel_lb, 200.0);
    }
}
