//! Camera tracking, choreography and interaction arbitration.
//!
//! - [`PoseTracker`] copies the host camera into a snapshot every tick
//! - [`Choreographer`] computes overview and focus poses and eases between them
//! - [`InteractionArbiter`] tells manual navigation apart from animation side effects
//!
//! The host camera is reached only through the [`CameraRig`] trait.

mod arbiter;
mod choreographer;
mod pose;
mod tracker;

pub use arbiter::{
    DebounceTimer, InteractionArbiter, InteractionConfig, DEFAULT_INTERACTION_DEBOUNCE,
    DEFAULT_SETTLE_AFTER_ANIMATION,
};
pub use choreographer::{
    ease_in_out_quad, focus_pose_for, AdvanceOutcome, AnimationJob, CameraConfig,
    Choreographer, TransitionKind, TransitionRejected, DEFAULT_DEGENERATE_EPSILON,
    DEFAULT_FOCUS_OFFSET, DEFAULT_LABEL_HEIGHT, DEFAULT_MIN_CAMERA_HEIGHT,
    DEFAULT_MIN_ZOOM_DISTANCE, DEFAULT_TRANSITION_DURATION, DEFAULT_ZOOM_FRACTION,
};
pub use pose::CameraPose;
pub use tracker::{CameraRig, PoseTracker, SimulatedCamera};
