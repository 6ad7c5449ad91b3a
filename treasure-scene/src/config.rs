//! Engine configuration.
//!
//! `EngineConfig` gathers the per-component configs. Every value has a
//! default; an INI file only needs the keys it wants to change.
//!
//! # File Format
//!
//! ```ini
//! [projection]
//! meters_per_unit = 100
//! safe_border = 22
//!
//! [placement]
//! fallback_base_radius = 3.0
//! fallback_radius_step = 1.5
//!
//! [camera]
//! transition_ms = 1000
//! zoom_fraction = 0.65
//! min_zoom_distance = 8
//! min_camera_height = 2
//! label_height = 1.5
//! home_position = 12, 10, 12
//! home_target = 0, 0, 0
//! default_focus_offset = 0, 0.6, 0.8
//! degenerate_epsilon = 0.001
//!
//! [interaction]
//! settle_ms = 300
//! debounce_ms = 200
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use glam::Vec3;
use ini::{Ini, Properties};
use thiserror::Error;

use crate::camera::{CameraConfig, InteractionConfig};
use crate::geo::ProjectionConfig;
use crate::placement::PlacementConfig;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid INI.
    #[error("Invalid INI: {0}")]
    Parse(String),

    /// A key holds a value that cannot be used.
    #[error("Invalid value '{value}' for {section}.{key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Complete configuration for a [`crate::SceneEngine`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub projection: ProjectionConfig,
    pub placement: PlacementConfig,
    pub camera: CameraConfig,
    pub interaction: InteractionConfig,
}

impl EngineConfig {
    /// Load configuration from an INI file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ini_str(&contents)
    }

    /// Parse configuration from INI text, starting from defaults.
    pub fn from_ini_str(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("projection")) {
            let s = Section::new("projection", section);
            s.read("meters_per_unit", &mut config.projection.meters_per_unit)?;
            s.read("safe_border", &mut config.projection.safe_border)?;
        }

        if let Some(section) = ini.section(Some("placement")) {
            let s = Section::new("placement", section);
            s.read("fallback_base_radius", &mut config.placement.base_radius)?;
            s.read("fallback_radius_step", &mut config.placement.radius_step)?;
        }

        if let Some(section) = ini.section(Some("camera")) {
            let s = Section::new("camera", section);
            s.read_millis("transition_ms", &mut config.camera.transition_duration)?;
            s.read("zoom_fraction", &mut config.camera.zoom_fraction)?;
            s.read("min_zoom_distance", &mut config.camera.min_zoom_distance)?;
            s.read("min_camera_height", &mut config.camera.min_camera_height)?;
            s.read("label_height", &mut config.camera.label_height)?;
            s.read_vec3("home_position", &mut config.camera.home.position)?;
            s.read_vec3("home_target", &mut config.camera.home.target)?;
            s.read_vec3("default_focus_offset", &mut config.camera.default_focus_offset)?;
            s.read("degenerate_epsilon", &mut config.camera.degenerate_epsilon)?;
        }

        if let Some(section) = ini.section(Some("interaction")) {
            let s = Section::new("interaction", section);
            s.read_millis("settle_ms", &mut config.interaction.settle_after_animation)?;
            s.read_millis("debounce_ms", &mut config.interaction.debounce)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |section: &'static str,
                       key: &'static str,
                       value: String,
                       reason: &'static str|
         -> Result<(), ConfigError> {
            Err(ConfigError::InvalidValue {
                section,
                key,
                value,
                reason,
            })
        };

        let p = &self.projection;
        if !(p.meters_per_unit.is_finite() && p.meters_per_unit > 0.0) {
            return invalid(
                "projection",
                "meters_per_unit",
                p.meters_per_unit.to_string(),
                "must be a positive number",
            );
        }
        if !(p.safe_border.is_finite() && p.safe_border > 0.0) {
            return invalid(
                "projection",
                "safe_border",
                p.safe_border.to_string(),
                "must be a positive number",
            );
        }

        let pl = &self.placement;
        if !(pl.base_radius.is_finite() && pl.base_radius >= 0.0) {
            return invalid(
                "placement",
                "fallback_base_radius",
                pl.base_radius.to_string(),
                "must not be negative",
            );
        }
        if !(pl.radius_step.is_finite() && pl.radius_step > 0.0) {
            return invalid(
                "placement",
                "fallback_radius_step",
                pl.radius_step.to_string(),
                "must be a positive number",
            );
        }

        let c = &self.camera;
        if c.transition_duration.is_zero() {
            return invalid("camera", "transition_ms", "0".to_string(), "must be positive");
        }
        if !(c.zoom_fraction > 0.0 && c.zoom_fraction <= 1.0) {
            return invalid(
                "camera",
                "zoom_fraction",
                c.zoom_fraction.to_string(),
                "must be in (0, 1]",
            );
        }
        if !(c.min_zoom_distance.is_finite() && c.min_zoom_distance > 0.0) {
            return invalid(
                "camera",
                "min_zoom_distance",
                c.min_zoom_distance.to_string(),
                "must be a positive number",
            );
        }
        if !c.min_camera_height.is_finite() {
            return invalid(
                "camera",
                "min_camera_height",
                c.min_camera_height.to_string(),
                "must be finite",
            );
        }
        if !c.label_height.is_finite() {
            return invalid(
                "camera",
                "label_height",
                c.label_height.to_string(),
                "must be finite",
            );
        }
        if !c.home.position.is_finite() || !c.home.target.is_finite() {
            return invalid(
                "camera",
                "home_position",
                c.home.to_string(),
                "must be finite",
            );
        }
        if c.default_focus_offset.try_normalize().is_none() {
            return invalid(
                "camera",
                "default_focus_offset",
                format!("{:?}", c.default_focus_offset),
                "must be a non-zero direction",
            );
        }
        if !(c.degenerate_epsilon.is_finite() && c.degenerate_epsilon > 0.0) {
            return invalid(
                "camera",
                "degenerate_epsilon",
                c.degenerate_epsilon.to_string(),
                "must be a positive number",
            );
        }

        let i = &self.interaction;
        if i.debounce.is_zero() {
            return invalid("interaction", "debounce_ms", "0".to_string(), "must be positive");
        }

        Ok(())
    }
}

/// Typed access to one INI section.
struct Section<'a> {
    name: &'static str,
    properties: &'a Properties,
}

impl<'a> Section<'a> {
    fn new(name: &'static str, properties: &'a Properties) -> Self {
        Self { name, properties }
    }

    fn read<T: FromStr>(&self, key: &'static str, slot: &mut T) -> Result<(), ConfigError> {
        if let Some(raw) = self.properties.get(key) {
            *slot = raw.trim().parse().map_err(|_| self.invalid(key, raw, "not a number"))?;
        }
        Ok(())
    }

    fn read_millis(&self, key: &'static str, slot: &mut Duration) -> Result<(), ConfigError> {
        if let Some(raw) = self.properties.get(key) {
            let millis: u64 = raw
                .trim()
                .parse()
                .map_err(|_| self.invalid(key, raw, "expected milliseconds"))?;
            *slot = Duration::from_millis(millis);
        }
        Ok(())
    }

    fn read_vec3(&self, key: &'static str, slot: &mut Vec3) -> Result<(), ConfigError> {
        if let Some(raw) = self.properties.get(key) {
            let parts: Vec<f32> = raw
                .split(',')
                .map(|part| part.trim().parse::<f32>())
                .collect::<Result<_, _>>()
                .map_err(|_| self.invalid(key, raw, "expected x, y, z"))?;
            match parts.as_slice() {
                [x, y, z] => *slot = Vec3::new(*x, *y, *z),
                _ => return Err(self.invalid(key, raw, "expected x, y, z")),
            }
        }
        Ok(())
    }

    fn invalid(&self, key: &'static str, raw: &str, reason: &'static str) -> ConfigError {
        ConfigError::InvalidValue {
            section: self.name,
            key,
            value: raw.to_string(),
            reason,
        }
    }
}
