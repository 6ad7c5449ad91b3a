//! Treasure Scene - geo projection and camera choreography for the treasure-hunt map
//!
//! This library converts real-world venue coordinates into a bounded virtual
//! scene, lays out venues that have no coordinates, and drives smooth camera
//! transitions between an overview pose and a venue-focused pose.
//!
//! # Architecture
//!
//! ```text
//! Entity list ──► PlacementResolver ──► ScenePosition map ──► host renderer
//!                   (uses geo::project)
//!
//! host UI ──► SceneEngine::focus_on / reset_to_overview   (stage a transition)
//! host loop ──► SceneEngine::tick(now)
//!                 1. start staged AnimationJob
//!                 2. Choreographer writes eased pose onto the CameraRig
//!                 3. PoseTracker copies the CameraRig into TrackedPose
//!                 4. InteractionArbiter polls its debounce timer
//! orbit controls ──► SceneEngine::notify_manual_change(now)
//! ```
//!
//! Rendering, data fetching and geolocation belong to the host. The engine
//! only consumes venues and a reference point.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use treasure_scene::camera::SimulatedCamera;
//! use treasure_scene::{EngineConfig, Entity, GeoPoint, SceneEngine};
//!
//! let reference = GeoPoint::new(3.1390, 101.6869);
//! let venues = vec![Entity::new("cafe", Some(GeoPoint::new(3.1400, 101.6880)))];
//!
//! let mut engine = SceneEngine::new(EngineConfig::default(), SimulatedCamera::default());
//! let positions = engine.resolve_positions(&venues, reference);
//!
//! let start = Instant::now();
//! engine.tick(start);
//! engine.focus_on(positions["cafe"]).unwrap();
//! engine.tick(start + Duration::from_millis(16));
//! assert!(engine.is_animating());
//! assert!(!engine.zoom_gate_open());
//! ```

pub mod camera;
pub mod config;
pub mod engine;
pub mod geo;
pub mod placement;

pub use glam::Vec3;

pub use camera::{CameraPose, CameraRig, TransitionKind, TransitionRejected};
pub use config::{ConfigError, EngineConfig};
pub use engine::{EngineEvent, SceneEngine};
pub use geo::{project, GeoPoint, Projection, ScenePosition};
pub use placement::{resolve_positions, Entity, Placement, PlacementResolver, PlacementSource};

/// Version of the treasure-scene library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
