//! Project command - convert one coordinate into scene space.

use treasure_scene::{EngineConfig, GeoPoint, Projection};

use crate::error::CliError;

/// Run the project command.
pub fn run(config: &EngineConfig, reference: GeoPoint, point: GeoPoint) -> Result<(), CliError> {
    let projection = Projection::new(config.projection.clone());
    let position = projection
        .project(point, reference)
        .ok_or(CliError::Unprojectable { point, reference })?;

    let border = config.projection.safe_border;
    let clamped = position.x.abs() >= border || position.z.abs() >= border;

    println!("Reference: {}", reference);
    println!("Point:     {}", point);
    println!("Scene:     {}", position);
    if clamped {
        println!("           (clamped to safe border ±{})", border);
    }
    Ok(())
}
