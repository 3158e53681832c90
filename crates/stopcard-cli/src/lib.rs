//! Stop-card CLI - reads a flight description and prints its stop cards.
//!
//! This crate provides:
//! - config: environment-driven settings for the `stopcards` binary
//! - input loading and command-line overrides
//! - table and JSON rendering of a computed plan

pub mod config;

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use stopcard_core::{AlternateRequest, FlightInputs, PlanIssue, PolicyEdit, StopCard, StopCardPlan};

pub use config::{Config, OutputFormat};

/// Read a `FlightInputs` JSON document from disk.
pub fn load_inputs(path: &Path) -> anyhow::Result<FlightInputs> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read flight file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse flight file {}", path.display()))
}

/// Parse a `field=value` policy override.
pub fn parse_policy_edit(raw: &str) -> anyhow::Result<PolicyEdit> {
    let (field, value) = raw
        .split_once('=')
        .with_context(|| format!("policy override '{raw}' must look like field=value"))?;
    PolicyEdit::parse(field, value).map_err(anyhow::Error::msg)
}

/// Command-line changes layered over the input file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub policy_edits: Vec<PolicyEdit>,
    pub alternate_split: Option<String>,
    pub alternate_to: Option<String>,
}

impl Overrides {
    /// Apply to `inputs`, returning issues raised by invalid edits.
    pub fn apply(&self, inputs: &mut FlightInputs, config: &Config) -> Vec<PlanIssue> {
        config.apply_weather_defaults(&mut inputs.weather_fuel);

        let issues = self
            .policy_edits
            .iter()
            .filter_map(|edit| inputs.policy.apply(*edit))
            .collect();

        if let (Some(split), Some(to)) = (&self.alternate_split, &self.alternate_to) {
            inputs.alternate = Some(AlternateRequest::split_point(split.as_str(), to.as_str()));
        }
        issues
    }
}

/// JSON output document.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub plan: &'a StopCardPlan,
}

impl<'a> Report<'a> {
    pub fn new(plan: &'a StopCardPlan) -> Self {
        Self {
            generated_at: Utc::now(),
            plan,
        }
    }
}

fn format_hours(hours: f64) -> String {
    let minutes = (hours * 60.0).round().max(0.0) as u64;
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.0}")).unwrap_or_else(|| "-".to_string())
}

fn card_row(card: &StopCard) -> String {
    let mut name = card.stop_name.clone();
    if card.refuel {
        name.push_str(" (R)");
    }
    if card.is_alternate {
        name = format!("ALT {name}");
    }
    format!(
        "{:>2}  {:<24} {:>7.1} {:>6} {:>7.0} {:>10} {:>5} {:>5}  {}",
        card.index,
        name,
        card.total_distance_nm,
        format_hours(card.total_time_hours),
        card.total_fuel_lb,
        card.passengers_label(),
        format_optional(card.ground_speed_kt),
        format_optional(card.headwind_kt),
        card.fuel_components.display,
    )
}

/// Render the plan as a fixed-width text table, issues listed underneath.
pub fn render_table(plan: &StopCardPlan) -> String {
    let mut lines = vec![format!(
        "{:>2}  {:<24} {:>7} {:>6} {:>7} {:>10} {:>5} {:>5}  {}",
        "#", "Stop", "Dist nm", "Time", "Fuel lb", "Pax", "GS", "HW", "Breakdown"
    )];
    if plan.is_empty() {
        lines.push("(no stop cards)".to_string());
    }
    lines.extend(plan.cards.iter().map(card_row));
    for issue in &plan.issues {
        lines.push(format!("warning: {issue}"));
    }
    lines.join("\n")
}
