//! Camera transitions between the overview and venue-focused poses.
//!
//! # State Machine
//!
//! ```text
//!          reset_to_overview / focus_on          progress >= 1.0
//!   Idle ------------------------------> Animating ---------------> Idle
//!                                           |
//!                     requests while here   |  dropped, not queued
//!                                           v
//! ```
//!
//! Requests are staged and picked up by the next [`Choreographer::advance`],
//! which is where the [`AnimationJob`] is created. A staged request already
//! counts as animating, so at most one job exists at any time and nothing
//! cancels a running job.
//!
//! Focusing closes the zoom gate; only an overview reset or an explicit
//! reopen (for example after manual navigation) lets the next focus through.

use std::time::{Duration, Instant};

use glam::Vec3;
use thiserror::Error;
use tracing::{debug, trace};

use super::pose::CameraPose;
use super::tracker::CameraRig;
use crate::geo::ScenePosition;

/// Default duration of every camera transition.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(1000);

/// Default fraction of the current camera distance kept when focusing.
pub const DEFAULT_ZOOM_FRACTION: f32 = 0.65;

/// Default minimum distance between a focused venue and the camera.
pub const DEFAULT_MIN_ZOOM_DISTANCE: f32 = 8.0;

/// Default lowest height the camera may be placed at when focusing.
pub const DEFAULT_MIN_CAMERA_HEIGHT: f32 = 2.0;

/// Default height of a venue's label above the ground.
///
/// The focus pose looks at the label rather than the venue's base.
pub const DEFAULT_LABEL_HEIGHT: f32 = 1.5;

/// Default length below which the camera-to-venue offset is degenerate.
pub const DEFAULT_DEGENERATE_EPSILON: f32 = 1e-3;

/// Default direction used when the camera sits on top of the venue.
pub const DEFAULT_FOCUS_OFFSET: Vec3 = Vec3::new(0.0, 0.6, 0.8);

/// Configuration for camera transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Overview pose used by [`Choreographer::reset_to_overview`].
    pub home: CameraPose,

    /// Duration of every transition.
    pub transition_duration: Duration,

    /// Fraction of the current camera distance kept when focusing, in `(0, 1]`.
    pub zoom_fraction: f32,

    /// Minimum focus distance.
    pub min_zoom_distance: f32,

    /// Minimum camera height for a focus pose.
    pub min_camera_height: f32,

    /// Height above the venue the focus pose looks at.
    pub label_height: f32,

    /// Offset length below which [`CameraConfig::default_focus_offset`] is used.
    pub degenerate_epsilon: f32,

    /// Direction from the venue to the camera when the current direction is
    /// degenerate. Need not be normalized.
    pub default_focus_offset: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            home: CameraPose::HOME,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            zoom_fraction: DEFAULT_ZOOM_FRACTION,
            min_zoom_distance: DEFAULT_MIN_ZOOM_DISTANCE,
            min_camera_height: DEFAULT_MIN_CAMERA_HEIGHT,
            label_height: DEFAULT_LABEL_HEIGHT,
            degenerate_epsilon: DEFAULT_DEGENERATE_EPSILON,
            default_focus_offset: DEFAULT_FOCUS_OFFSET,
        }
    }
}

/// Why a transition request was dropped.
///
/// Neither case is a failure: the request is simply a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionRejected {
    /// Another transition is staged or running.
    #[error("A camera transition is already in progress")]
    AnimationInProgress,

    /// The zoom gate is closed; a focus has already been used.
    #[error("Zoom gate is closed")]
    ZoomGateClosed,
}

/// Which kind of transition a job performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Back to the home pose.
    Overview,
    /// Toward a venue.
    Focus,
}

/// One running transition.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationJob {
    pub kind: TransitionKind,
    pub start_pose: CameraPose,
    pub end_pose: CameraPose,
    pub start_time: Instant,
    pub duration: Duration,
}

impl AnimationJob {
    /// Linear progress at `now`, clamped to `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Eased pose at `now`.
    pub fn pose_at(&self, now: Instant) -> CameraPose {
        let eased = ease_in_out_quad(self.progress(now));
        self.start_pose.lerp(&self.end_pose, eased)
    }
}

/// Quadratic ease-in for the first half, quadratic ease-out for the second.
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Focus pose for a venue, seen from `camera`.
///
/// Keeps the viewing angle of the current camera, moves a
/// [`CameraConfig::zoom_fraction`] of the way in (never closer than
/// [`CameraConfig::min_zoom_distance`]), keeps the eye above
/// [`CameraConfig::min_camera_height`], and looks at the venue's label.
pub fn focus_pose_for(entity: ScenePosition, camera: Vec3, config: &CameraConfig) -> CameraPose {
    let ground = entity.to_ground();
    let offset = camera - ground;
    let current_distance = offset.length();

    let direction = if current_distance < config.degenerate_epsilon {
        config
            .default_focus_offset
            .try_normalize()
            .unwrap_or(Vec3::Y)
    } else {
        offset / current_distance
    };

    let distance = config
        .min_zoom_distance
        .max(current_distance * config.zoom_fraction);

    let mut position = ground + direction * distance;
    position.y = position.y.max(config.min_camera_height);

    CameraPose {
        position,
        target: ground + Vec3::Y * config.label_height,
    }
}

/// What happened during one [`Choreographer::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// A staged transition began this tick.
    pub started: Option<TransitionKind>,
    /// The running transition reached its end pose this tick.
    pub completed: Option<TransitionKind>,
}

#[derive(Debug, Clone)]
enum ChoreographyState {
    Idle,
    Staged {
        kind: TransitionKind,
        end_pose: CameraPose,
    },
    Animating(AnimationJob),
}

/// Drives eased camera transitions and owns the zoom gate.
#[derive(Debug, Clone)]
pub struct Choreographer {
    config: CameraConfig,
    state: ChoreographyState,
    zoom_gate_open: bool,
}

impl Choreographer {
    /// Create an idle choreographer with an open zoom gate.
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            state: ChoreographyState::Idle,
            zoom_gate_open: true,
        }
    }

    /// Get the camera configuration.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Stage a transition back to the home pose and reopen the zoom gate.
    pub fn reset_to_overview(&mut self) -> Result<(), TransitionRejected> {
        self.ensure_idle()?;

        self.stage(TransitionKind::Overview, self.config.home);
        self.open_zoom_gate();
        Ok(())
    }

    /// Stage a transition that frames the venue at `entity`, starting from
    /// the `tracked` camera pose, and close the zoom gate.
    pub fn focus_on(
        &mut self,
        entity: ScenePosition,
        tracked: &CameraPose,
    ) -> Result<(), TransitionRejected> {
        self.ensure_idle()?;
        if !self.zoom_gate_open {
            debug!(%entity, "Focus ignored, zoom gate closed");
            return Err(TransitionRejected::ZoomGateClosed);
        }

        let end_pose = focus_pose_for(entity, tracked.position, &self.config);
        self.stage(TransitionKind::Focus, end_pose);
        self.zoom_gate_open = false;
        debug!(%entity, "Zoom gate closed");
        Ok(())
    }

    /// Advance the transition to `now` and apply the eased pose to `rig`.
    ///
    /// A staged request becomes a job starting at `now` from `tracked`.
    pub fn advance<R: CameraRig + ?Sized>(
        &mut self,
        now: Instant,
        tracked: &CameraPose,
        rig: &mut R,
    ) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();

        if let ChoreographyState::Staged { kind, end_pose } = self.state {
            debug!(?kind, from = %tracked, to = %end_pose, "Camera transition started");
            self.state = ChoreographyState::Animating(AnimationJob {
                kind,
                start_pose: *tracked,
                end_pose,
                start_time: now,
                duration: self.config.transition_duration,
            });
            outcome.started = Some(kind);
        }

        if let ChoreographyState::Animating(job) = &self.state {
            let progress = job.progress(now);
            rig.apply_pose(job.pose_at(now));
            trace!(progress, "Camera transition step");

            if progress >= 1.0 {
                debug!(kind = ?job.kind, "Camera transition complete");
                outcome.completed = Some(job.kind);
                self.state = ChoreographyState::Idle;
            }
        }

        outcome
    }

    /// Whether a transition is staged or running.
    pub fn is_animating(&self) -> bool {
        !matches!(self.state, ChoreographyState::Idle)
    }

    /// The running job, if any. Staged requests have no job yet.
    pub fn current_job(&self) -> Option<&AnimationJob> {
        match &self.state {
            ChoreographyState::Animating(job) => Some(job),
            _ => None,
        }
    }

    /// Whether the next focus request will be accepted by the gate.
    pub fn zoom_gate_open(&self) -> bool {
        self.zoom_gate_open
    }

    /// Reopen the zoom gate.
    pub fn open_zoom_gate(&mut self) {
        if !self.zoom_gate_open {
            debug!("Zoom gate reopened");
        }
        self.zoom_gate_open = true;
    }

    fn ensure_idle(&self) -> Result<(), TransitionRejected> {
        if self.is_animating() {
            debug!("Transition request dropped, animation in progress");
            return Err(TransitionRejected::AnimationInProgress);
        }
        Ok(())
    }

    fn stage(&mut self, kind: TransitionKind, end_pose: CameraPose) {
        self.state = ChoreographyState::Staged { kind, end_pose };
    }
}

impl Default for Choreographer {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
