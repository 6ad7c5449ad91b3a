//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;
use treasure_scene::{ConfigError, GeoPoint};

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The engine configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The venue file could not be read.
    #[error("Failed to read venues from {path}: {source}")]
    VenueRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The venue file is not a JSON venue list.
    #[error("Failed to parse venues from {path}: {source}")]
    VenueParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The requested venue is not in the list.
    #[error("Unknown venue '{0}'")]
    UnknownVenue(String),

    /// A point could not be projected.
    #[error("Cannot project {point} relative to {reference}")]
    Unprojectable { point: GeoPoint, reference: GeoPoint },
}
