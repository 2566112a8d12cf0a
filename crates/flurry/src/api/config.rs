//! Scene configuration, loadable from JSON.
//!
//! The core only consumes `particle_count`, `seed`, `pointer_scale` and
//! `camera`. The material, renderer and controls sections are passed through
//! to the host, which owns those resources.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 7.0],
        }
    }
}

/// Point material the host builds for the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub size: f32,
    pub opacity: f32,
    pub transparent: bool,
    /// Use the field's color buffer instead of `color`.
    pub vertex_colors: bool,
    pub size_attenuation: bool,
    /// Flat color as 0xRRGGBB, used when `vertex_colors` is off.
    pub color: u32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            size: 0.04,
            opacity: 0.9,
            transparent: true,
            vertex_colors: true,
            size_attenuation: true,
            color: 0xffffff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub antialias: bool,
    pub alpha: bool,
    /// Upper bound on the device pixel ratio.
    pub max_pixel_ratio: f32,
    pub clear_color: u32,
    pub clear_alpha: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            alpha: true,
            max_pixel_ratio: 2.0,
            clear_color: 0x000000,
            clear_alpha: 0.0,
        }
    }
}

/// Orbit controls the host may attach to the camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub seed: u64,
    /// Client pixels per unit of pointer offset.
    pub pointer_scale: f32,
    pub camera: CameraConfig,
    pub material: MaterialConfig,
    pub renderer: RendererConfig,
    /// `None` when the scene has no orbit controls.
    pub controls: Option<ControlsConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            seed: 42,
            pointer_scale: 50.0,
            camera: CameraConfig::default(),
            material: MaterialConfig::default(),
            renderer: RendererConfig::default(),
            controls: None,
        }
    }
}

impl SceneConfig {
    /// Full-screen cloud: 15k colored particles, pointer-reactive.
    pub fn wave_cloud() -> Self {
        Self {
            particle_count: 15_000,
            ..Self::default()
        }
    }

    /// White pulsing sphere with damped orbit controls.
    pub fn pulse_sphere() -> Self {
        Self {
            particle_count: 2000,
            camera: CameraConfig {
                position: [0.0, 0.0, 6.0],
                ..CameraConfig::default()
            },
            material: MaterialConfig {
                size: 0.015,
                vertex_colors: false,
                ..MaterialConfig::default()
            },
            controls: Some(ControlsConfig::default()),
            ..Self::default()
        }
    }

    /// Parse and validate. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay a partial JSON document on `self`.
    pub fn merge_json(&self, json: &str) -> Result<Self, FieldError> {
        let mut base = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(json)?;
        merge(&mut base, patch);
        let config: Self = serde_json::from_value(base)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, FieldError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        let cam = &self.camera;
        if !(cam.fov_deg > 0.0 && cam.fov_deg < 180.0) {
            return Err(FieldError::InvalidConfig(format!(
                "camera fov must be in (0, 180), got {}",
                cam.fov_deg
            )));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(FieldError::InvalidConfig(format!(
                "camera planes need 0 < near < far, got near={} far={}",
                cam.near, cam.far
            )));
        }
        if !(0.0..=1.0).contains(&self.material.opacity) {
            return Err(FieldError::InvalidConfig(format!(
                "material opacity must be in [0, 1], got {}",
                self.material.opacity
            )));
        }
        if !(self.pointer_scale > 0.0) {
            return Err(FieldError::InvalidConfig(format!(
                "pointer scale must be positive, got {}",
                self.pointer_scale
            )));
        }
        Ok(())
    }
}

fn merge(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                merge(base.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (base, patch) => *base = patch,
    }
}
