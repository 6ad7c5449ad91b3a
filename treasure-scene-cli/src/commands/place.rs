//! Place command - resolve scene positions for a venue list.

use std::path::Path;

use treasure_scene::{EngineConfig, GeoPoint, PlacementResolver, PlacementSource};

use super::common::load_venues;
use crate::error::CliError;

/// Run the place command.
pub fn run(config: &EngineConfig, reference: GeoPoint, venues: &Path) -> Result<(), CliError> {
    let entities = load_venues(venues)?;
    let resolver = PlacementResolver::new(config.projection.clone(), config.placement.clone());
    let placements = resolver.resolve_placements(&entities, reference);

    println!("Reference: {}", reference);
    println!("Venues:    {}", entities.len());
    println!();

    // Input order, skipping duplicate ids the resolver dropped
    let mut printed = std::collections::HashSet::new();
    for entity in &entities {
        if !printed.insert(entity.id.as_str()) {
            continue;
        }
        if let Some(placement) = placements.get(&entity.id) {
            let source = match placement.source {
                PlacementSource::Projected => "projected",
                PlacementSource::Fallback => "spiral",
            };
            println!("  {:<24} {}  [{}]", entity.id, placement.position, source);
        }
    }
    Ok(())
}
