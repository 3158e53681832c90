//! Compute offshore stop cards for a flight described in a JSON file.

use std::path::PathBuf;

use clap::Parser;
use stopcard_cli::{load_inputs, parse_policy_edit, render_table, Config, OutputFormat, Overrides, Report};
use stopcard_core::{PolicyEdit, StopCardEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Print fuel and passenger stop cards for a helicopter route
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Flight description (waypoints, aircraft, wind, policy, weather)
    #[arg(long)]
    input: PathBuf,

    /// Output format: table or json (default from STOPCARD_FORMAT)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Divert from this point on the route
    #[arg(long, requires = "alternate_to")]
    alternate_split: Option<String>,

    /// Alternate destination
    #[arg(long, requires = "alternate_split")]
    alternate_to: Option<String>,

    /// Policy override, e.g. --set reserve_fuel=500 (repeatable)
    #[arg(long = "set", value_parser = parse_policy_edit)]
    policy_edits: Vec<PolicyEdit>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env();

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("stopcard=info".parse()?);
    if config.log_json {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    let mut inputs = load_inputs(&args.input)?;
    tracing::info!(
        input = %args.input.display(),
        waypoints = inputs.waypoints.len(),
        "flight loaded"
    );

    let overrides = Overrides {
        policy_edits: args.policy_edits,
        alternate_split: args.alternate_split,
        alternate_to: args.alternate_to,
    };
    let mut issues: Vec<String> = overrides
        .apply(&mut inputs, &config)
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut plan = StopCardEngine::new().compute(&inputs);
    issues.append(&mut plan.issues);
    plan.issues = issues;

    match args.format.unwrap_or(config.format) {
        OutputFormat::Table => println!("{}", render_table(&plan)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&Report::new(&plan))?),
    }

    Ok(())
}
