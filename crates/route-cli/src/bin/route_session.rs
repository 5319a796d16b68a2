//! Replay drawing sessions and measure legs from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use route_cli::{load_script, render, replay, Config, LogFormat, OutputFormat};
use route_core::{distance, Coordinate, DrawingStore};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON script of drawing events and print the route
    Replay {
        /// Path to the script
        script: PathBuf,

        /// Output format (defaults to ROUTE_OUTPUT, then text)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Log failing events and continue instead of aborting
        #[arg(long)]
        keep_going: bool,

        /// Vertices required to import a polygon (never below 3)
        #[arg(long)]
        min_polygon_points: Option<usize>,
    },
    /// Great-circle distance between two coordinates, in meters
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env();
    init_tracing(config.log_format);

    match args.command {
        Command::Replay {
            script,
            format,
            keep_going,
            min_polygon_points,
        } => {
            if let Some(min) = min_polygon_points {
                config.min_polygon_points = min;
            }
            let events = load_script(&script)?;
            tracing::debug!("Loaded {} events from {}", events.len(), script.display());

            let mut store = DrawingStore::with_rules(config.rules());
            replay(&mut store, &events, keep_going)?;
            print!("{}", render(&store, format.unwrap_or(config.output))?);
        }
        Command::Distance {
            lat1,
            lng1,
            lat2,
            lng2,
        } => {
            let meters = distance(Coordinate::new(lat1, lng1), Coordinate::new(lat2, lng2));
            println!("{:.2} m", meters);
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("route_cli=info,route_core=info"));

    let (pretty, json) = match format {
        LogFormat::Pretty => (Some(fmt::layer().with_writer(std::io::stderr)), None),
        LogFormat::Json => (None, Some(fmt::layer().json().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}
