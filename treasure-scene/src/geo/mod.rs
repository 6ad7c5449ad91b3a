//! Geo to scene projection
//!
//! Converts geographic coordinates (latitude/longitude) into the bounded
//! scene coordinate space used by the treasure-hunt map.
//!
//! The projection is an equirectangular approximation around a reference
//! point (usually the user's location), which is accurate to well under a
//! percent over the few kilometres a scene covers.

mod types;

pub use types::{GeoPoint, ScenePosition};

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Default number of real-world meters per scene unit.
pub const DEFAULT_METERS_PER_UNIT: f64 = 100.0;

/// Default maximum absolute scene coordinate on either axis.
///
/// Matches the half-extent of the ground surface the host renders.
pub const DEFAULT_SAFE_BORDER: f32 = 22.0;

/// Configuration for geo to scene projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Real-world meters represented by one scene unit.
    pub meters_per_unit: f64,

    /// Maximum absolute scene coordinate; projected points are clamped to it.
    pub safe_border: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            meters_per_unit: DEFAULT_METERS_PER_UNIT,
            safe_border: DEFAULT_SAFE_BORDER,
        }
    }
}

/// A configured geo to scene projection.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    config: ProjectionConfig,
}

impl Projection {
    /// Create a projection with the given configuration.
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Get the projection configuration.
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Projects `point` into scene space relative to `reference`.
    ///
    /// Latitude offsets become north-south meters directly; longitude
    /// offsets are scaled by the cosine of the mean latitude first. North
    /// maps to negative `z`. Both axes are clamped to the safe border.
    ///
    /// # Returns
    ///
    /// `None` if either point has a non-finite latitude or longitude.
    pub fn project(&self, point: GeoPoint, reference: GeoPoint) -> Option<ScenePosition> {
        if !point.is_valid() || !reference.is_valid() {
            return None;
        }

        let d_lat = (point.lat - reference.lat).to_radians();
        let d_lng = (point.lng - reference.lng).to_radians();
        let mean_lat = (point.lat / 2.0 + reference.lat / 2.0).to_radians();

        let north_m = d_lat * EARTH_RADIUS_METERS;
        let east_m = d_lng * mean_lat.cos() * EARTH_RADIUS_METERS;

        let x = (east_m / self.config.meters_per_unit) as f32;
        let z = (-north_m / self.config.meters_per_unit) as f32;

        // inf * 0 on absurd inputs; clamping cannot rescue NaN
        if x.is_nan() || z.is_nan() {
            return None;
        }

        Some(ScenePosition::new(x, z).clamped(self.config.safe_border))
    }
}

/// Projects `point` relative to `reference` with the default configuration.
///
/// See [`Projection::project`].
#[inline]
pub fn project(point: GeoPoint, reference: GeoPoint) -> Option<ScenePosition> {
    Projection::default().project(point, reference)
}
