//! Tunable scene constants.
//!
//! Every field has a compiled-in default; a JSON or YAML file may override
//! any subset of them.

use aviator_common::Color;
use aviator_scene::{AmbientLight, HemisphereLight};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported config format: {0:?} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 1.0,
            far: 10_000.0,
            position: Vec3::new(0.0, 100.0, 200.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub enabled: bool,
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Color::from_hex(0xf7d9aa),
            near: 100.0,
            far: 950.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub ambient: AmbientLight,
    pub hemisphere: HemisphereLight,
    pub sun_color: Color,
    pub sun_intensity: f32,
    pub sun_position: Vec3,
    /// Half width and height of the orthographic shadow volume.
    pub shadow_extent: f32,
    pub shadow_near: f32,
    pub shadow_far: f32,
    pub shadow_map_size: u32,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Color::from_hex(0xdc8874),
                intensity: 0.5,
            },
            hemisphere: HemisphereLight {
                sky_color: Color::from_hex(0xaaaaaa),
                ground_color: Color::BLACK,
                intensity: 0.9,
            },
            sun_color: Color::WHITE,
            sun_intensity: 0.9,
            sun_position: Vec3::new(150.0, 350.0, 350.0),
            shadow_extent: 400.0,
            shadow_near: 1.0,
            shadow_far: 1000.0,
            shadow_map_size: 2048,
        }
    }
}

/// Where the entities sit when the scene is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub sea_y: f32,
    pub sky_y: f32,
    pub airplane_y: f32,
    pub airplane_scale: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            sea_y: -600.0,
            sky_y: -600.0,
            airplane_y: 100.0,
            airplane_scale: 0.25,
        }
    }
}

/// Per-frame motion constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Sea rotation about Z per frame, radians.
    pub sea_spin: f32,
    pub sky_spin: f32,
    pub propeller_spin: f32,
    /// Fraction of the remaining vertical distance covered per frame.
    pub easing: f32,
    /// Airplane X range mapped from pointer x in [-1, 1].
    pub x_range: [f32; 2],
    /// Airplane Y range mapped from pointer y in [-1, 1].
    pub y_range: [f32; 2],
    pub roll_factor: f32,
    pub pitch_factor: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            sea_spin: 0.005,
            sky_spin: 0.01,
            propeller_spin: 0.3,
            easing: 0.1,
            x_range: [-100.0, 100.0],
            y_range: [25.0, 175.0],
            roll_factor: 0.0128,
            pitch_factor: 0.0064,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the procedural sea and sky.
    pub seed: u64,
    pub camera: CameraConfig,
    pub fog: FogConfig,
    pub lights: LightsConfig,
    pub placement: PlacementConfig,
    pub motion: MotionConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            camera: CameraConfig::default(),
            fog: FogConfig::default(),
            lights: LightsConfig::default(),
            placement: PlacementConfig::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config file. The format follows the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        let config: Self = match ext.as_str() {
            "json" => serde_json::from_str(&text)?,
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(ext)),
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), seed = config.seed, "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let c = &self.camera;
        if !(c.fov_degrees > 0.0 && c.fov_degrees < 180.0) {
            return invalid(format!("camera.fov_degrees {} not in (0, 180)", c.fov_degrees));
        }
        if c.near <= 0.0 || c.near >= c.far {
            return invalid(format!("camera near {} / far {} out of order", c.near, c.far));
        }
        if self.fog.enabled && self.fog.near >= self.fog.far {
            return invalid(format!(
                "fog near {} / far {} out of order",
                self.fog.near, self.fog.far
            ));
        }

        let l = &self.lights;
        if l.shadow_map_size == 0 {
            return invalid("lights.shadow_map_size must be positive".into());
        }
        if l.shadow_near >= l.shadow_far {
            return invalid(format!(
                "shadow near {} / far {} out of order",
                l.shadow_near, l.shadow_far
            ));
        }
        if l.shadow_extent <= 0.0 {
            return invalid("lights.shadow_extent must be positive".into());
        }

        let m = &self.motion;
        if !(m.easing > 0.0 && m.easing <= 1.0) {
            return invalid(format!("motion.easing {} not in (0, 1]", m.easing));
        }
        if self.placement.airplane_scale <= 0.0 {
            return invalid("placement.airplane_scale must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.camera.position, Vec3::new(0.0, 100.0, 200.0));
        assert_eq!(config.lights.shadow_map_size, 2048);
        assert_eq!(config.fog.color, Color::from_hex(0xf7d9aa));
    }

    #[test]
    fn json_round_trip() {
        let mut config = GameConfig::default();
        config.seed = 7;
        config.motion.easing = 0.25;
        let json = serde_json::to_string_pretty(&config).unwrap();
        let file = write_temp(".json", &json);
        assert_eq!(GameConfig::from_path(file.path()).unwrap(), config);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let file = write_temp(".yaml", "seed: 9\ncamera:\n  fov_degrees: 75.0\n");
        let config = GameConfig::from_path(file.path()).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert_eq!(config.camera.far, 10_000.0);
        assert_eq!(config.placement, PlacementConfig::default());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".toml", "seed = 1");
        assert!(matches!(
            GameConfig::from_path(file.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = GameConfig::default();
        config.camera.near = 20_000.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.camera.fov_degrees = 180.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.motion.easing = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.lights.shadow_map_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_file_fails_validation() {
        let file = write_temp(".json", r#"{"fog": {"near": 500.0, "far": 100.0}}"#);
        assert!(matches!(
            GameConfig::from_path(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }
}
