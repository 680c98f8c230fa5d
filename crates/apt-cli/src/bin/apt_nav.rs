//! apt-nav - query taxi routes, approaches and nearest facilities from a catalog.

use anyhow::{anyhow, Context, Result};
use apt_cli::output::{describe_distance, render_approach, render_route};
use apt_cli::{load_catalog, Config};
use apt_core::geometry::{bearing_deg, meters_to_feet};
use apt_core::{AirportRegistry, Position};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Facility catalog (JSON). Defaults to $APT_CATALOG
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct PointArgs {
    /// East coordinate in meters
    #[arg(long, allow_hyphen_values = true)]
    x: f64,
    /// North coordinate in meters
    #[arg(long, allow_hyphen_values = true)]
    y: f64,
    /// Elevation in meters
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    z: f64,
}

impl From<PointArgs> for Position {
    fn from(args: PointArgs) -> Self {
        Position::new(args.x, args.y, args.z)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List airports in the catalog
    Airports,
    /// Nearest airport and runway to a position
    Nearest {
        #[command(flatten)]
        at: PointArgs,
    },
    /// Print the instrument approach for a runway
    Approach {
        #[arg(long)]
        airport: String,
        #[arg(long)]
        runway: String,
    },
    /// Taxi route from a position to a runway threshold
    TaxiRunway {
        #[arg(long)]
        airport: String,
        #[arg(long)]
        runway: String,
        #[command(flatten)]
        from: PointArgs,
    },
    /// Taxi route from a position to a parking stand
    TaxiParking {
        #[arg(long)]
        airport: String,
        #[arg(long)]
        parking: String,
        #[command(flatten)]
        from: PointArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("apt_cli=info".parse()?)
                .add_directive("apt_core=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let catalog_path = args
        .catalog
        .clone()
        .or_else(|| config.catalog_path.clone())
        .context("no catalog given (use --catalog or APT_CATALOG)")?;
    let airports = load_catalog(&catalog_path, config.glideslope_deg)
        .with_context(|| format!("loading {}", catalog_path.display()))?;
    let rules = config.rules.clone();
    let registry = AirportRegistry::global(move || AirportRegistry::with_rules(airports, rules));

    run(registry, &args)
}

fn run(registry: &AirportRegistry, args: &Args) -> Result<()> {
    match &args.command {
        Command::Airports => {
            if args.json {
                let list: Vec<_> = registry
                    .airports()
                    .iter()
                    .map(|a| {
                        json!({
                            "code": a.code,
                            "name": a.name,
                            "elevation_m": a.elevation(),
                            "runways": a.runways.iter().map(|r| r.designator()).collect::<Vec<_>>(),
                            "parkings": a.parkings.len(),
                            "taxiways": a.taxiways.len(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for airport in registry.airports() {
                    println!(
                        "{:<6} {:<28} elev {:>5.0} ft, {} runways, {} stands, {} taxiway segments",
                        airport.code,
                        airport.name,
                        meters_to_feet(airport.elevation()),
                        airport.runways.len(),
                        airport.parkings.len(),
                        airport.taxiways.len()
                    );
                }
            }
        }
        Command::Nearest { at } => {
            let position = Position::from(*at);
            let airport = registry.find_nearest_airport(&position);
            let runway = registry.find_nearest_runway(&position);
            if args.json {
                let value = json!({
                    "airport": airport.map(|a| json!({
                        "code": a.code,
                        "name": a.name,
                        "distance_m": a.distance_to(&position),
                        "inside": a.contains_position(&position),
                    })),
                    "runway": runway.map(|(a, r)| json!({
                        "airport": a.code,
                        "designator": r.designator(),
                        "reciprocal": r.reciprocal_number(),
                        "distance_m": r.threshold.distance_to(&position),
                        "bearing_deg": bearing_deg(&position, &r.threshold),
                        "elevation_ft": r.elevation_ft(),
                    })),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }
            match airport {
                Some(airport) => println!(
                    "Nearest airport: {} ({}), {}",
                    airport.name,
                    airport.code,
                    describe_distance(airport.distance_to(&position))
                ),
                None => println!("Nearest airport: not found"),
            }
            match runway {
                Some((airport, runway)) => println!(
                    "Nearest runway: {} at {}, {} bearing {:03.0}, elevation {:.0} feet, opposite end {}",
                    runway.designator(),
                    airport.code,
                    describe_distance(runway.threshold.distance_to(&position)),
                    bearing_deg(&position, &runway.threshold),
                    runway.elevation_ft(),
                    runway.reciprocal_number()
                ),
                None => println!("Nearest runway: not found"),
            }
        }
        Command::Approach { airport, runway } => {
            let airport = registry
                .airport_by_code(airport)
                .ok_or_else(|| anyhow!("unknown airport '{airport}'"))?;
            let runway = airport
                .runway_by_name(runway)
                .ok_or_else(|| anyhow!("unknown runway '{runway}' at {}", airport.code))?;
            let procedure = runway
                .approach
                .as_ref()
                .ok_or_else(|| anyhow!("runway {} has no approach", runway.name))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(procedure)?);
            } else {
                print!("{}", render_approach(procedure));
            }
        }
        Command::TaxiRunway {
            airport,
            runway,
            from,
        } => {
            let airport = registry
                .airport_by_code(airport)
                .ok_or_else(|| anyhow!("unknown airport '{airport}'"))?;
            let runway = airport
                .runway_by_name(runway)
                .ok_or_else(|| anyhow!("unknown runway '{runway}' at {}", airport.code))?;
            let route = registry.taxi_route_to_runway(airport, &Position::from(*from), runway);
            print_route(args.json, &format!("Taxi to runway {}", runway.designator()), &route)?;
        }
        Command::TaxiParking {
            airport,
            parking,
            from,
        } => {
            let airport = registry
                .airport_by_code(airport)
                .ok_or_else(|| anyhow!("unknown airport '{airport}'"))?;
            let parking = airport
                .parking_by_name(parking)
                .ok_or_else(|| anyhow!("unknown parking '{parking}' at {}", airport.code))?;
            let route = registry.taxi_route_to_parking(airport, &Position::from(*from), parking);
            print_route(args.json, &format!("Taxi to {}", parking.name), &route)?;
        }
    }
    Ok(())
}

fn print_route(as_json: bool, label: &str, route: &[Position]) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(route)?);
    } else {
        print!("{}", render_route(label, route));
    }
    Ok(())
}
