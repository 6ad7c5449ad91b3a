//! Simulate command - frame-stepped camera choreography without a renderer.
//!
//! Walks the engine through the full focus cycle on a synthetic timeline:
//! focus a venue, show that a second focus is ignored, simulate the user
//! dragging the camera, then focus again once the gate has reopened.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;
use treasure_scene::camera::{CameraPose, SimulatedCamera};
use treasure_scene::{EngineConfig, EngineEvent, GeoPoint, SceneEngine, ScenePosition, Vec3};

use super::common::load_venues;
use crate::error::CliError;

/// Upper bound on frames spent waiting for any one phase.
const MAX_PHASE_FRAMES: u32 = 10_000;

/// Arguments for the simulate command.
pub struct SimulateArgs {
    pub reference: GeoPoint,
    pub venues: PathBuf,
    pub focus: String,
    pub fps: u32,
    pub sample_every: u32,
}

/// Synthetic frame clock.
struct FrameClock {
    now: Instant,
    frame: Duration,
    frames: u32,
}

impl FrameClock {
    fn new(fps: u32) -> Self {
        Self {
            now: Instant::now(),
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            frames: 0,
        }
    }

    fn advance(&mut self) -> Instant {
        self.now += self.frame;
        self.frames += 1;
        self.now
    }

    fn skip(&mut self, duration: Duration) -> Instant {
        self.now += duration;
        self.now
    }

    fn elapsed_ms(&self, since: Instant) -> u128 {
        self.now.saturating_duration_since(since).as_millis()
    }
}

/// Run the simulate command.
pub fn run(config: EngineConfig, args: SimulateArgs) -> Result<(), CliError> {
    let entities = load_venues(&args.venues)?;
    let settle = config.interaction.settle_after_animation;

    let mut engine = SceneEngine::new(config, SimulatedCamera::default());
    let positions = engine.resolve_positions(&entities, args.reference);
    let target = *positions
        .get(&args.focus)
        .ok_or_else(|| CliError::UnknownVenue(args.focus.clone()))?;

    let mut clock = FrameClock::new(args.fps);
    let origin = clock.now;
    let sample_every = args.sample_every.max(1);

    engine.tick(clock.now);
    println!("Start:  {}", engine.tracked_pose());
    println!("Focus:  '{}' at {}", args.focus, target);
    println!();

    // 1. First focus is free
    focus(&mut engine, target);
    run_until_idle(&mut engine, &mut clock, origin, sample_every);

    // 2. Gate is closed now
    match engine.focus_on(target) {
        Ok(()) => println!("Second focus accepted (unexpected)"),
        Err(e) => println!("Second focus ignored: {}", e),
    }

    // 3. User drags the camera once the controls have settled
    clock.skip(settle + clock.frame);
    let dragged = drag(engine.tracked_pose());
    engine.rig_mut().move_to(dragged);
    engine.notify_manual_change(clock.now);
    println!(
        "[{:>5} ms] Camera dragged to {}",
        clock.elapsed_ms(origin),
        dragged
    );

    let mut reopened = false;
    for _ in 0..MAX_PHASE_FRAMES {
        let now = clock.advance();
        if engine.tick(now).contains(&EngineEvent::ManualInteractionDetected) {
            println!(
                "[{:>5} ms] Manual interaction detected, zoom gate reopened",
                clock.elapsed_ms(origin)
            );
            reopened = true;
            break;
        }
    }
    if !reopened {
        println!("Zoom gate never reopened");
        return Ok(());
    }

    // 4. Focus again from the dragged pose
    focus(&mut engine, target);
    run_until_idle(&mut engine, &mut clock, origin, sample_every);

    println!();
    println!("Final:  {}", engine.tracked_pose());
    info!(frames = clock.frames, "Simulation finished");
    Ok(())
}

fn focus(engine: &mut SceneEngine<SimulatedCamera>, target: ScenePosition) {
    match engine.focus_on(target) {
        Ok(()) => println!("Focus requested on {}", target),
        Err(e) => println!("Focus ignored: {}", e),
    }
}

fn run_until_idle(
    engine: &mut SceneEngine<SimulatedCamera>,
    clock: &mut FrameClock,
    origin: Instant,
    sample_every: u32,
) {
    for frame in 0..MAX_PHASE_FRAMES {
        let now = clock.advance();
        let events = engine.tick(now);

        for event in &events {
            println!("[{:>5} ms] {:?}", clock.elapsed_ms(origin), event);
        }
        if frame % sample_every == 0 && engine.is_animating() {
            println!(
                "[{:>5} ms]   {}",
                clock.elapsed_ms(origin),
                engine.tracked_pose()
            );
        }
        if !engine.is_animating() {
            return;
        }
    }
}

/// Orbit the camera a little around its target, as a small drag would.
fn drag(pose: CameraPose) -> CameraPose {
    let offset = pose.position - pose.target;
    let (sin, cos) = 0.35_f32.sin_cos();
    let rotated = Vec3::new(
        offset.x * cos - offset.z * sin,
        offset.y,
        offset.x * sin + offset.z * cos,
    );
    CameraPose::new(pose.target + rotated, pose.target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_advances_by_frame() {
        let mut clock = FrameClock::new(50);
        let start = clock.now;
        clock.advance();
        clock.advance();
        assert_eq!(clock.frames, 2);
        assert_eq!(clock.elapsed_ms(start), 40);
    }

    #[test]
    fn test_frame_clock_zero_fps() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.frame, Duration::from_secs(1));
    }

    #[test]
    fn test_drag_keeps_distance_and_target() {
        let pose = CameraPose::HOME;
        let dragged = drag(pose);
        assert_eq!(dragged.target, pose.target);
        assert!((dragged.view_distance() - pose.view_distance()).abs() < 1e-4);
        assert!(dragged.position != pose.position);
    }

    #[test]
    fn test_simulation_runs_full_cycle() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "cafe", "geo": {{"lat": 3.1500, "lng": 101.7000}}}}]"#
        )
        .unwrap();

        let args = SimulateArgs {
            reference: GeoPoint::new(3.1390, 101.6869),
            venues: file.path().to_path_buf(),
            focus: "cafe".to_string(),
            fps: 60,
            sample_every: 30,
        };
        assert!(run(EngineConfig::default(), args).is_ok());
    }

    #[test]
    fn test_simulation_unknown_venue() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "cafe"}}]"#).unwrap();

        let args = SimulateArgs {
            reference: GeoPoint::new(3.1390, 101.6869),
            venues: file.path().to_path_buf(),
            focus: "bakery".to_string(),
            fps: 60,
            sample_every: 30,
        };
        assert!(matches!(
            run(EngineConfig::default(), args),
            Err(CliError::UnknownVenue(_))
        ));
    }
}
