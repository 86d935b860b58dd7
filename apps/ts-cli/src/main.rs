use clap::{Parser, Subcommand};
use serde_json::json;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use ts_state::{
    CoolProp, PairRegistry, Property, PropertyPair, Quantity, State, StateError, Substance,
    UnitProfile, saturation_dome,
};

#[derive(Parser)]
#[command(name = "ts-cli")]
#[command(about = "ThermoState CLI - thermodynamic states of pure substances", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a state from two properties and print every property
    State {
        /// Substance name (case-insensitive), e.g. water
        substance: String,
        /// Input properties as PROP=QUANTITY, e.g. "T=400 K" "p=1 atm"
        #[arg(num_args = 0..)]
        inputs: Vec<String>,
        /// Display profile: SI, EE or None
        #[arg(short, long)]
        units: Option<String>,
        /// Label for the state
        #[arg(short, long)]
        label: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List allowed and unsupported property pairs and the property symbols
    Pairs,
    /// Print the saturated liquid and vapour lines of a substance
    Dome {
        /// Substance name (case-insensitive)
        substance: String,
        /// Number of temperatures between the minimum and critical temperature
        #[arg(short, long, default_value_t = 20)]
        points: usize,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error("Invalid input '{0}': expected PROP=QUANTITY, e.g. \"T=400 K\"")]
    Input(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::State {
            substance,
            inputs,
            units,
            label,
            json,
        } => cmd_state(&substance, &inputs, units.as_deref(), label.as_deref(), json),
        Commands::Pairs => cmd_pairs(),
        Commands::Dome {
            substance,
            points,
            json,
        } => cmd_dome(&substance, points, json),
    }
}

fn parse_input(text: &str) -> CliResult<(Property, Quantity)> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| CliError::Input(text.to_string()))?;
    let property: Property = name.trim().parse()?;
    let quantity: Quantity = value.parse().map_err(StateError::from)?;
    Ok((property, quantity))
}

fn cmd_state(
    substance: &str,
    inputs: &[String],
    units: Option<&str>,
    label: Option<&str>,
    json: bool,
) -> CliResult<()> {
    let mut builder = State::builder(substance);
    if let Some(tag) = units {
        builder = builder.units(UnitProfile::parse_optional(tag)?);
    }
    if let Some(label) = label {
        builder = builder.label(label);
    }
    for text in inputs {
        let (property, quantity) = parse_input(text)?;
        debug!(%property, %quantity, "input");
        builder = builder.with(property, quantity);
    }
    let state = builder.build()?;

    if json {
        let out = json!({
            "substance": state.substance(),
            "label": state.label(),
            "units": state.units(),
            "properties": state.properties().ok(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{state}");
    }
    Ok(())
}

fn pair_names(pairs: impl Iterator<Item = PropertyPair>) -> String {
    let mut names: Vec<String> = pairs.map(|p| p.to_string()).collect();
    names.sort();
    names.join(" ")
}

fn cmd_pairs() -> CliResult<()> {
    let registry = PairRegistry::coolprop();
    println!("Allowed pairs:");
    println!("  {}", pair_names(registry.allowed()));
    println!("Unsupported pairs:");
    println!("  {}", pair_names(registry.unsupported()));
    println!("Properties:");
    for property in Property::ALL {
        println!("  {:<3} {}", property.symbol(), property.description());
    }
    println!("Substances:");
    println!("  {}", Substance::allowed_names());
    Ok(())
}

fn cmd_dome(substance: &str, points: usize, json: bool) -> CliResult<()> {
    let dome = saturation_dome::<CoolProp>(substance, points)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dome)?);
        return Ok(());
    }

    println!(
        "{:>10} {:>14} {:>12} {:>12} {:>12} {:>12}",
        "T [K]", "p [Pa]", "v_f [m3/kg]", "v_g [m3/kg]", "s_f [J/kgK]", "s_g [J/kgK]"
    );
    for (liquid, vapor) in dome.liquid.iter().zip(&dome.vapor) {
        println!(
            "{:>10.3} {:>14.2} {:>12.6e} {:>12.6e} {:>12.2} {:>12.2}",
            liquid.t, liquid.p, liquid.v, vapor.v, liquid.s, vapor.s
        );
    }
    Ok(())
}
