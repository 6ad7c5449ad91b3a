//! Treasure Scene CLI - command-line host for the scene engine
//!
//! Projects coordinates, places venue lists and runs a frame-stepped camera
//! simulation without a renderer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod logging;

use commands::common::parse_geo_point;
use error::CliError;
use treasure_scene::GeoPoint;

#[derive(Debug, Parser)]
#[command(name = "treasure-scene", version, about = "Treasure-hunt scene engine host")]
struct Cli {
    /// Engine configuration file (INI)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Project a single point into scene space
    Project {
        /// Reference location as LAT,LNG
        #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
        reference: GeoPoint,

        /// Point to project as LAT,LNG
        #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
        point: GeoPoint,
    },

    /// Place every venue from a JSON file
    Place {
        /// Reference location as LAT,LNG
        #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
        reference: GeoPoint,

        /// JSON array of venues: [{"id": "...", "geo": {"lat": .., "lng": ..}}]
        #[arg(long)]
        venues: PathBuf,
    },

    /// Simulate focusing the camera on a venue, frame by frame
    Simulate {
        /// Reference location as LAT,LNG
        #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
        reference: GeoPoint,

        /// JSON array of venues
        #[arg(long)]
        venues: PathBuf,

        /// Id of the venue to focus
        #[arg(long)]
        focus: String,

        /// Simulated frame rate
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Print every Nth frame
        #[arg(long, default_value_t = 6)]
        sample_every: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = commands::common::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Project { reference, point } => commands::project::run(&config, reference, point),
        Commands::Place { reference, venues } => commands::place::run(&config, reference, &venues),
        Commands::Simulate {
            reference,
            venues,
            focus,
            fps,
            sample_every,
        } => commands::simulate::run(
            config,
            commands::simulate::SimulateArgs {
                reference,
                venues,
                focus,
                fps,
                sample_every,
            },
        ),
    }
}
