//! Camera pose value type.

use std::fmt;

use glam::Vec3;

/// Where the camera eye is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in scene space.
    pub position: Vec3,
    /// Look-at point in scene space.
    pub target: Vec3,
}

impl CameraPose {
    /// The default overview pose: above and to the south-east of the origin,
    /// looking at the origin.
    pub const HOME: CameraPose = CameraPose {
        position: Vec3::new(12.0, 10.0, 12.0),
        target: Vec3::ZERO,
    };

    /// Create a new pose.
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Interpolate position and target independently.
    ///
    /// `t = 0.0` yields `self`, `t = 1.0` yields `end`.
    #[inline]
    pub fn lerp(&self, end: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(end.position, t),
            target: self.target.lerp(end.target, t),
        }
    }

    /// Distance from the eye to the look-at point.
    pub fn view_distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Whether both components are within `epsilon` of `other` on every axis.
    pub fn abs_diff_eq(&self, other: &CameraPose, epsilon: f32) -> bool {
        self.position.abs_diff_eq(other.position, epsilon)
            && self.target.abs_diff_eq(other.target, epsilon)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::HOME
    }
}

impl fmt::Display for CameraPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "eye ({:.2}, {:.2}, {:.2}) -> target ({:.2}, {:.2}, {:.2})",
            self.position.x,
            self.position.y,
            self.position.z,
            self.target.x,
            self.target.y,
            self.target.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_pose() {
        let home = CameraPose::HOME;
        assert_eq!(home.position, Vec3::new(12.0, 10.0, 12.0));
        assert_eq!(home.target, Vec3::ZERO);
        assert_eq!(CameraPose::default(), home);
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let start = CameraPose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
        let end = CameraPose::new(Vec3::new(10.0, 4.0, -2.0), Vec3::new(2.0, 2.0, 0.0));

        assert_eq!(start.lerp(&end, 0.0), start);
        assert_eq!(start.lerp(&end, 1.0), end);

        let mid = start.lerp(&end, 0.5);
        assert_eq!(mid.position, Vec3::new(5.0, 2.0, -1.0));
        assert_eq!(mid.target, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_abs_diff_eq() {
        let a = CameraPose::HOME;
        let b = CameraPose::new(Vec3::new(12.0005, 10.0, 12.0), Vec3::ZERO);
        assert!(a.abs_diff_eq(&b, 1e-3));
        assert!(!a.abs_diff_eq(&b, 1e-4));
    }
}
