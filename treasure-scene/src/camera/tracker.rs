//! Pose tracking against the host's live camera.
//!
//! The host renderer owns the authoritative camera. The tracker copies it
//! into a [`CameraPose`] snapshot on every tick, animating or not, so the
//! next transition always starts from what the user actually sees, even if
//! the previous one was cut short or the camera was moved by hand.

use glam::Vec3;
use tracing::debug;

use super::pose::CameraPose;

/// Squared distance below which a camera counts as sitting on the origin.
const ORIGIN_EPSILON_SQ: f32 = 1e-8;

/// The host's authoritative camera.
///
/// Implemented by whatever the renderer uses to hold its camera and orbit
/// controls. The engine reads it every tick and writes to it only while a
/// transition is running.
pub trait CameraRig {
    /// Current eye position and look-at target.
    fn pose(&self) -> CameraPose;

    /// Move the camera to `pose`.
    fn apply_pose(&mut self, pose: CameraPose);
}

impl<R: CameraRig + ?Sized> CameraRig for Box<R> {
    fn pose(&self) -> CameraPose {
        (**self).pose()
    }

    fn apply_pose(&mut self, pose: CameraPose) {
        (**self).apply_pose(pose)
    }
}

/// An in-memory camera rig.
///
/// Starts at the origin like a freshly constructed scene camera. Useful for
/// tests and headless hosts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedCamera {
    pose: CameraPose,
}

impl SimulatedCamera {
    /// Create a camera already positioned at `pose`.
    pub fn at(pose: CameraPose) -> Self {
        Self { pose }
    }

    /// Move the camera directly, as orbit controls would.
    pub fn move_to(&mut self, pose: CameraPose) {
        self.pose = pose;
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self {
            pose: CameraPose::new(Vec3::ZERO, Vec3::ZERO),
        }
    }
}

impl CameraRig for SimulatedCamera {
    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn apply_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }
}

/// Keeps the last observed camera pose.
#[derive(Debug, Clone)]
pub struct PoseTracker {
    tracked: CameraPose,
    home: CameraPose,
    has_ticked: bool,
}

impl PoseTracker {
    /// Create a tracker whose snapshot starts at `home`.
    pub fn new(home: CameraPose) -> Self {
        Self {
            tracked: home,
            home,
            has_ticked: false,
        }
    }

    /// Copy the rig's current pose into the snapshot.
    ///
    /// On the first call, a rig still sitting on the origin is snapped to
    /// the home pose first so later transitions never normalize a zero
    /// direction.
    pub fn tick<R: CameraRig + ?Sized>(&mut self, rig: &mut R) {
        if !self.has_ticked {
            self.has_ticked = true;
            if rig.pose().position.length_squared() < ORIGIN_EPSILON_SQ {
                debug!(home = %self.home, "Camera uninitialized, snapping to home pose");
                rig.apply_pose(self.home);
            }
        }

        self.tracked = rig.pose();
    }

    /// The last observed pose.
    pub fn tracked_pose(&self) -> CameraPose {
        self.tracked
    }

    /// Whether [`PoseTracker::tick`] has run at least once.
    pub fn has_ticked(&self) -> bool {
        self.has_ticked
    }
}

impl Default for PoseTracker {
    fn default() -> Self {
        Self::new(CameraPose::HOME)
    }
}
