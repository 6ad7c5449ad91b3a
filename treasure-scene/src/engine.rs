//! The scene engine: the object a host holds to drive the treasure-hunt map.
//!
//! `SceneEngine` wires the placement resolver, pose tracker, choreographer
//! and interaction arbiter together behind one explicit interface. All state
//! changes happen inside [`SceneEngine::tick`] or in calls that only stage
//! work for the next tick; there are no callbacks and no shared globals.
//!
//! # Tick order
//!
//! 1. A staged transition becomes a job starting at `now`
//! 2. The running job writes its eased pose onto the camera rig
//! 3. The pose tracker copies the rig into the tracked pose
//! 4. The arbiter's debounce timer is checked; a detected manual
//!    interaction reopens the zoom gate

use std::collections::HashMap;
use std::time::Instant;

use crate::camera::{
    AnimationJob, CameraPose, CameraRig, Choreographer, InteractionArbiter, PoseTracker,
    TransitionKind, TransitionRejected,
};
use crate::config::EngineConfig;
use crate::geo::{GeoPoint, ScenePosition};
use crate::placement::{Entity, Placement, PlacementResolver};

/// Something the host may want to react to, reported by [`SceneEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A staged transition began moving the camera.
    TransitionStarted(TransitionKind),
    /// A transition reached its end pose.
    AnimationCompleted(TransitionKind),
    /// The user navigated manually; the zoom gate has been reopened.
    ManualInteractionDetected,
}

/// Geo projection and camera choreography for one scene session.
pub struct SceneEngine<R: CameraRig> {
    config: EngineConfig,
    resolver: PlacementResolver,
    tracker: PoseTracker,
    choreographer: Choreographer,
    arbiter: InteractionArbiter,
    rig: R,
}

impl<R: CameraRig> SceneEngine<R> {
    /// Create an engine driving `rig`.
    ///
    /// The tracked pose starts at the configured home pose; the rig itself
    /// is left alone until the first tick.
    pub fn new(config: EngineConfig, rig: R) -> Self {
        let resolver = PlacementResolver::new(config.projection.clone(), config.placement.clone());
        let tracker = PoseTracker::new(config.camera.home);
        let choreographer = Choreographer::new(config.camera.clone());
        let arbiter = InteractionArbiter::new(config.interaction.clone());

        Self {
            config,
            resolver,
            tracker,
            choreographer,
            arbiter,
            rig,
        }
    }

    /// Resolve scene positions for `entities` around `reference`.
    pub fn resolve_positions(
        &self,
        entities: &[Entity],
        reference: GeoPoint,
    ) -> HashMap<String, ScenePosition> {
        self.resolver.resolve_positions(entities, reference)
    }

    /// Resolve placements, including whether each was projected or laid out.
    pub fn resolve_placements(
        &self,
        entities: &[Entity],
        reference: GeoPoint,
    ) -> HashMap<String, Placement> {
        self.resolver.resolve_placements(entities, reference)
    }

    /// Stage a transition back to the overview pose and reopen the zoom gate.
    ///
    /// Dropped while another transition is staged or running.
    pub fn reset_to_overview(&mut self) -> Result<(), TransitionRejected> {
        self.choreographer.reset_to_overview()
    }

    /// Stage a transition framing the venue at `position`.
    ///
    /// Dropped while another transition is staged or running, or while the
    /// zoom gate is closed. On success the zoom gate closes.
    pub fn focus_on(&mut self, position: ScenePosition) -> Result<(), TransitionRejected> {
        let tracked = self.tracker.tracked_pose();
        self.choreographer.focus_on(position, &tracked)
    }

    /// Report that the host's navigation controls changed the camera.
    pub fn notify_manual_change(&mut self, now: Instant) {
        let animating = self.choreographer.is_animating();
        self.arbiter.on_manual_change(now, animating);
    }

    /// Advance the engine to `now`. Call once per rendered frame.
    pub fn tick(&mut self, now: Instant) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        let tracked = self.tracker.tracked_pose();
        let outcome = self.choreographer.advance(now, &tracked, &mut self.rig);
        if let Some(kind) = outcome.started {
            events.push(EngineEvent::TransitionStarted(kind));
        }
        if let Some(kind) = outcome.completed {
            self.arbiter.on_animation_finished(now);
            events.push(EngineEvent::AnimationCompleted(kind));
        }

        self.tracker.tick(&mut self.rig);

        if self.arbiter.poll(now, self.choreographer.is_animating()) {
            self.choreographer.open_zoom_gate();
            events.push(EngineEvent::ManualInteractionDetected);
        }

        events
    }

    /// Whether a transition is staged or running.
    pub fn is_animating(&self) -> bool {
        self.choreographer.is_animating()
    }

    /// Whether the next focus request will be accepted.
    pub fn zoom_gate_open(&self) -> bool {
        self.choreographer.zoom_gate_open()
    }

    /// Reopen the zoom gate directly.
    pub fn open_zoom_gate(&mut self) {
        self.choreographer.open_zoom_gate();
    }

    /// The camera pose observed on the last tick.
    pub fn tracked_pose(&self) -> CameraPose {
        self.tracker.tracked_pose()
    }

    /// The running transition, if any.
    pub fn current_job(&self) -> Option<&AnimationJob> {
        self.choreographer.current_job()
    }

    /// The camera rig.
    pub fn rig(&self) -> &R {
        &self.rig
    }

    /// Mutable access to the camera rig, e.g. for orbit controls.
    pub fn rig_mut(&mut self) -> &mut R {
        &mut self.rig
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consume the engine, returning the rig.
    pub fn into_rig(self) -> R {
        self.rig
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::camera::SimulatedCamera;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn engine() -> SceneEngine<SimulatedCamera> {
        SceneEngine::new(EngineConfig::default(), SimulatedCamera::default())
    }

    #[test]
    fn test_new_engine_state() {
        let engine = engine();
        assert!(!engine.is_animating());
        assert!(engine.zoom_gate_open());
        assert_eq!(engine.tracked_pose(), CameraPose::HOME);
    }

    #[test]
    fn test_first_tick_snaps_rig_home() {
        let mut engine = engine();
        let events = engine.tick(Instant::now());
        assert!(events.is_empty());
        assert_eq!(engine.rig().pose(), CameraPose::HOME);
    }

    #[test]
    fn test_focus_reports_start_and_completion() {
        let mut engine = engine();
        let t0 = Instant::now();
        engine.tick(t0);

        engine.focus_on(ScenePosition::new(4.0, -6.0)).unwrap();
        assert!(engine.is_animating());

        let events = engine.tick(t0 + ms(16));
        assert_eq!(events, vec![EngineEvent::TransitionStarted(TransitionKind::Focus)]);

        let events = engine.tick(t0 + ms(1016));
        assert_eq!(events, vec![EngineEvent::AnimationCompleted(TransitionKind::Focus)]);
        assert!(!engine.is_animating());
    }

    #[test]
    fn test_manual_interaction_reopens_gate() {
        let mut engine = engine();
        let t0 = Instant::now();
        engine.tick(t0);
        engine.focus_on(ScenePosition::new(4.0, -6.0)).unwrap();
        engine.tick(t0);
        engine.tick(t0 + ms(1000));
        assert!(!engine.zoom_gate_open());

        engine.notify_manual_change(t0 + ms(1400));
        assert!(engine.tick(t0 + ms(1500)).is_empty());

        let events = engine.tick(t0 + ms(1600));
        assert_eq!(events, vec![EngineEvent::ManualInteractionDetected]);
        assert!(engine.zoom_gate_open());
    }

    #[test]
    fn test_unvalidated_config_resolves_without_panic() {
        let mut config = EngineConfig::default();
        config.projection.safe_border = -1.0;
        assert!(config.validate().is_err());

        let engine = SceneEngine::new(config, SimulatedCamera::default());
        let venues = vec![
            Entity::new("near", Some(GeoPoint::new(3.1500, 101.7000))),
            Entity::new("unlocated", None),
        ];
        let positions = engine.resolve_positions(&venues, GeoPoint::new(3.1390, 101.6869));

        assert_eq!(positions.len(), 2);
        for pos in positions.values() {
            assert!(pos.x.abs() <= 1.0 && pos.z.abs() <= 1.0);
        }
    }

    #[test]
    fn test_manual_change_during_animation_ignored() {
        let mut engine = engine();
        let t0 = Instant::now();
        engine.tick(t0);
        engine.focus_on(ScenePosition::new(4.0, -6.0)).unwrap();
        engine.tick(t0);

        engine.notify_manual_change(t0 + ms(100));
        for step in 1..=20 {
            let events = engine.tick(t0 + ms(100 * step));
            assert!(!events.contains(&EngineEvent::ManualInteractionDetected));
        }
        assert!(!engine.zoom_gate_open());
    }
}
