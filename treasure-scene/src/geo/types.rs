//! Geographic and scene coordinate types.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
///
/// Valid only when both components are finite. Invalid points are still
/// representable so that upstream data can be passed through untouched;
/// [`crate::geo::project`] rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (positive north)
    pub lat: f64,
    /// Longitude in degrees (positive east)
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both latitude and longitude are finite numbers.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// A position on the scene's ground plane, in scene units.
///
/// `x` grows eastward and `z` grows southward, so north is "up" when the
/// scene is viewed from above. The vertical axis is implicitly zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenePosition {
    pub x: f32,
    pub z: f32,
}

impl ScenePosition {
    /// The scene origin, where the reference location projects.
    pub const ORIGIN: ScenePosition = ScenePosition { x: 0.0, z: 0.0 };

    /// Create a new scene position.
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Clamp both axes symmetrically to `±|border|`.
    ///
    /// Never panics: a negative border is taken by magnitude and a NaN
    /// border leaves the position unchanged.
    #[inline]
    pub fn clamped(self, border: f32) -> Self {
        let border = border.abs();
        Self {
            x: self.x.max(-border).min(border),
            z: self.z.max(-border).min(border),
        }
    }

    /// Whether this position is exactly the scene origin.
    #[inline]
    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.z == 0.0
    }

    /// Planar distance to another position.
    pub fn distance_to(&self, other: &ScenePosition) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Lift this position onto the ground plane as a 3D point.
    #[inline]
    pub fn to_ground(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }
}

impl fmt::Display for ScenePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.3}, z: {:.3})", self.x, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validity() {
        assert!(GeoPoint::new(3.139, 101.6869).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 1.0).is_valid());
        assert!(!GeoPoint::new(1.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_geo_point_from_json() {
        let point: GeoPoint = serde_json::from_str(r#"{"lat": 3.15, "lng": 101.7}"#).unwrap();
        assert_eq!(point, GeoPoint::new(3.15, 101.7));
    }

    #[test]
    fn test_scene_position_clamped() {
        let pos = ScenePosition::new(40.0, -55.5).clamped(22.0);
        assert_eq!(pos, ScenePosition::new(22.0, -22.0));

        let inside = ScenePosition::new(3.0, -4.0).clamped(22.0);
        assert_eq!(inside, ScenePosition::new(3.0, -4.0));
    }

    #[test]
    fn test_scene_position_clamped_with_unusable_border() {
        let pos = ScenePosition::new(40.0, -55.5);
        assert_eq!(pos.clamped(-22.0), ScenePosition::new(22.0, -22.0));
        assert_eq!(pos.clamped(f32::NAN), pos);
    }

    #[test]
    fn test_scene_position_to_ground() {
        let ground = ScenePosition::new(1.5, -2.0).to_ground();
        assert_eq!(ground, Vec3::new(1.5, 0.0, -2.0));
    }

    #[test]
    fn test_distance_to() {
        let a = ScenePosition::new(0.0, 0.0);
        let b = ScenePosition::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
    }
}
