//! Venue placement in scene space.
//!
//! Venues with usable coordinates are projected relative to the reference
//! location. Venues without them are laid out on a golden-angle spiral keyed
//! by their index in the input list, so the same list always produces the
//! same layout and fallback pins rarely overlap.

use std::collections::HashMap;
use std::f32::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::geo::{GeoPoint, Projection, ProjectionConfig, ScenePosition};

/// Default distance of the first fallback position from the origin.
///
/// Keeps fallback venues off the reference location itself.
pub const DEFAULT_FALLBACK_BASE_RADIUS: f32 = 3.0;

/// Default spiral growth per square root of the entity index.
pub const DEFAULT_FALLBACK_RADIUS_STEP: f32 = 1.5;

/// The golden angle in radians, `π(3 − √5)`.
pub fn golden_angle() -> f32 {
    PI * (3.0 - 5.0_f32.sqrt())
}

/// A venue supplied by the host's data provider.
///
/// The engine only reads `id` and `geo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique venue identifier.
    pub id: String,

    /// Venue location, if known.
    #[serde(default)]
    pub geo: Option<GeoPoint>,
}

impl Entity {
    /// Create a new entity.
    pub fn new(id: impl Into<String>, geo: Option<GeoPoint>) -> Self {
        Self { id: id.into(), geo }
    }
}

/// How a placement was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementSource {
    /// Projected from the venue's own coordinates.
    Projected,
    /// Laid out on the fallback spiral.
    Fallback,
}

/// A resolved scene position for a venue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: ScenePosition,
    pub source: PlacementSource,
}

/// Configuration for the fallback spiral.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    /// Radius of the spiral at index 0.
    pub base_radius: f32,

    /// Radius added per square root of the index.
    pub radius_step: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            base_radius: DEFAULT_FALLBACK_BASE_RADIUS,
            radius_step: DEFAULT_FALLBACK_RADIUS_STEP,
        }
    }
}

/// Maps venues to scene positions.
#[derive(Debug, Clone, Default)]
pub struct PlacementResolver {
    projection: Projection,
    config: PlacementConfig,
}

impl PlacementResolver {
    /// Create a resolver with the given projection and spiral configuration.
    pub fn new(projection: ProjectionConfig, config: PlacementConfig) -> Self {
        Self {
            projection: Projection::new(projection),
            config,
        }
    }

    /// Resolve a scene position for every entity, keyed by entity id.
    ///
    /// See [`PlacementResolver::resolve_placements`].
    pub fn resolve_positions(
        &self,
        entities: &[Entity],
        reference: GeoPoint,
    ) -> HashMap<String, ScenePosition> {
        self.resolve_placements(entities, reference)
            .into_iter()
            .map(|(id, placement)| (id, placement.position))
            .collect()
    }

    /// Resolve placements for every entity, keyed by entity id.
    ///
    /// If two entities share an id, the first one in the list wins.
    pub fn resolve_placements(
        &self,
        entities: &[Entity],
        reference: GeoPoint,
    ) -> HashMap<String, Placement> {
        let mut placements = HashMap::with_capacity(entities.len());
        let mut fallback_count = 0usize;

        for (index, entity) in entities.iter().enumerate() {
            if placements.contains_key(&entity.id) {
                warn!(id = %entity.id, index, "Duplicate entity id, keeping first placement");
                continue;
            }

            let placement = match self.project_entity(entity, reference) {
                Some(position) => Placement {
                    position,
                    source: PlacementSource::Projected,
                },
                None => {
                    fallback_count += 1;
                    Placement {
                        position: self.fallback_position(index),
                        source: PlacementSource::Fallback,
                    }
                }
            };

            placements.insert(entity.id.clone(), placement);
        }

        debug!(
            total = placements.len(),
            fallback = fallback_count,
            "Resolved entity placements"
        );

        placements
    }

    /// Position on the fallback spiral for the entity at `index`.
    pub fn fallback_position(&self, index: usize) -> ScenePosition {
        let i = index as f32;
        let angle = i * golden_angle();
        let radius = self.config.base_radius + self.config.radius_step * i.sqrt();

        ScenePosition::new(radius * angle.cos(), radius * angle.sin())
            .clamped(self.projection.config().safe_border)
    }

    fn project_entity(&self, entity: &Entity, reference: GeoPoint) -> Option<ScenePosition> {
        let geo = entity.geo?;
        let position = self.projection.project(geo, reference)?;

        // Only the reference itself may sit on the origin
        if position.is_origin() && geo != reference {
            return None;
        }

        Some(position)
    }
}

/// Resolve positions with the default projection and spiral configuration.
pub fn resolve_positions(
    entities: &[Entity],
    reference: GeoPoint,
) -> HashMap<String, ScenePosition> {
    PlacementResolver::default().resolve_positions(entities, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: GeoPoint = GeoPoint::new(3.1390, 101.6869);

    fn unlocated(count: usize) -> Vec<Entity> {
        (0..count)
            .map(|i| Entity::new(format!("venue-{i}"), None))
            .collect()
    }

    #[test]
    fn test_golden_angle_value() {
        assert!((golden_angle() - 2.399_963).abs() < 1e-5);
    }

    #[test]
    fn test_located_entity_is_projected() {
        let entities = vec![Entity::new("cafe", Some(GeoPoint::new(3.1500, 101.7000)))];
        let placements = PlacementResolver::default().resolve_placements(&entities, REFERENCE);

        let cafe = placements["cafe"];
        assert_eq!(cafe.source, PlacementSource::Projected);
        assert_eq!(
            Some(cafe.position),
            crate::geo::project(GeoPoint::new(3.1500, 101.7000), REFERENCE)
        );
    }

    #[test]
    fn test_entity_at_reference_stays_at_origin() {
        let entities = vec![Entity::new("home", Some(REFERENCE))];
        let placements = PlacementResolver::default().resolve_placements(&entities, REFERENCE);

        assert_eq!(placements["home"].source, PlacementSource::Projected);
        assert_eq!(placements["home"].position, ScenePosition::ORIGIN);
    }

    #[test]
    fn test_collapse_to_origin_falls_back() {
        // A scale this coarse underflows every offset to zero
        let resolver = PlacementResolver::new(
            ProjectionConfig {
                meters_per_unit: 1e300,
                ..ProjectionConfig::default()
            },
            PlacementConfig::default(),
        );
        let entities = vec![
            Entity::new("home", Some(REFERENCE)),
            Entity::new("cafe", Some(GeoPoint::new(3.1500, 101.7000))),
        ];
        let placements = resolver.resolve_placements(&entities, REFERENCE);

        assert_eq!(placements["home"].source, PlacementSource::Projected);
        assert_eq!(placements["home"].position, ScenePosition::ORIGIN);
        assert_eq!(placements["cafe"].source, PlacementSource::Fallback);
        assert_eq!(placements["cafe"].position, resolver.fallback_position(1));
    }

    #[test]
    fn test_invalid_geo_falls_back() {
        let entities = vec![
            Entity::new("a", Some(GeoPoint::new(f64::NAN, 101.0))),
            Entity::new("b", None),
        ];
        let resolver = PlacementResolver::default();
        let placements = resolver.resolve_placements(&entities, REFERENCE);

        assert_eq!(placements["a"].source, PlacementSource::Fallback);
        assert_eq!(placements["a"].position, resolver.fallback_position(0));
        assert_eq!(placements["b"].source, PlacementSource::Fallback);
        assert_eq!(placements["b"].position, resolver.fallback_position(1));
    }

    #[test]
    fn test_invalid_reference_falls_back_for_all() {
        let entities = vec![Entity::new("cafe", Some(GeoPoint::new(3.15, 101.7)))];
        let placements = PlacementResolver::default()
            .resolve_placements(&entities, GeoPoint::new(f64::NAN, f64::NAN));
        assert_eq!(placements["cafe"].source, PlacementSource::Fallback);
    }

    #[test]
    fn test_fallback_uses_list_index() {
        // Index is the position in the input list, not among fallbacks
        let entities = vec![
            Entity::new("located", Some(GeoPoint::new(3.15, 101.7))),
            Entity::new("unlocated", None),
        ];
        let resolver = PlacementResolver::default();
        let positions = resolver.resolve_positions(&entities, REFERENCE);
        assert_eq!(positions["unlocated"], resolver.fallback_position(1));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let entities = unlocated(12);
        let first = resolve_positions(&entities, REFERENCE);
        let second = resolve_positions(&entities, REFERENCE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_positions_pairwise_distinct() {
        let entities = unlocated(40);
        let positions: Vec<ScenePosition> =
            resolve_positions(&entities, REFERENCE).into_values().collect();
        assert_eq!(positions.len(), 40);

        for (i, a) in positions.iter().enumerate() {
            for b in positions.iter().skip(i + 1) {
                assert!(a.distance_to(b) > 0.1, "{a} and {b} overlap");
            }
        }
    }

    #[test]
    fn test_fallback_never_at_origin() {
        let resolver = PlacementResolver::default();
        let first = resolver.fallback_position(0);
        assert!((first.distance_to(&ScenePosition::ORIGIN) - DEFAULT_FALLBACK_BASE_RADIUS).abs() < 1e-5);
    }

    #[test]
    fn test_fallback_clamped_to_border() {
        let resolver = PlacementResolver::new(
            ProjectionConfig {
                meters_per_unit: 100.0,
                safe_border: 4.0,
            },
            PlacementConfig::default(),
        );
        for index in 0..50 {
            let pos = resolver.fallback_position(index);
            assert!(pos.x.abs() <= 4.0 && pos.z.abs() <= 4.0);
        }
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let entities = vec![
            Entity::new("dup", Some(GeoPoint::new(3.15, 101.7))),
            Entity::new("dup", None),
        ];
        let placements = PlacementResolver::default().resolve_placements(&entities, REFERENCE);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements["dup"].source, PlacementSource::Projected);
    }

    #[test]
    fn test_entity_from_json_without_geo() {
        let entity: Entity = serde_json::from_str(r#"{"id": "stall-7"}"#).unwrap();
        assert_eq!(entity, Entity::new("stall-7", None));

        let entity: Entity =
            serde_json::from_str(r#"{"id": "stall-8", "geo": {"lat": 3.1, "lng": 101.6}}"#).unwrap();
        assert_eq!(entity.geo, Some(GeoPoint::new(3.1, 101.6)));
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_fallback_radius_grows_with_index(index in 0usize..500) {
                let resolver = PlacementResolver::new(
                    ProjectionConfig { meters_per_unit: 100.0, safe_border: 1_000.0 },
                    PlacementConfig::default(),
                );
                let here = resolver.fallback_position(index).distance_to(&ScenePosition::ORIGIN);
                let next = resolver.fallback_position(index + 1).distance_to(&ScenePosition::ORIGIN);
                prop_assert!(next > here);
            }

            #[test]
            fn test_all_entities_receive_a_position(count in 0usize..60, located_every in 1usize..5) {
                let entities: Vec<Entity> = (0..count)
                    .map(|i| {
                        let geo = (i % located_every == 0)
                            .then(|| GeoPoint::new(3.139 + i as f64 * 0.0005, 101.6869));
                        Entity::new(format!("v{i}"), geo)
                    })
                    .collect();
                let positions = resolve_positions(&entities, REFERENCE);
                prop_assert_eq!(positions.len(), count);
                for pos in positions.values() {
                    prop_assert!(pos.x.abs() <= 22.0 && pos.z.abs() <= 22.0);
                }
            }
        }
    }
}
