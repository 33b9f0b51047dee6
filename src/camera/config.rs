//! Camera configuration
//!
//! All tunables live in one owned value passed at construction. Only the
//! fields that genuinely change during play (fov, height bounds, pitch
//! bounds, calculated default height) have runtime setters on the controller.

use serde::{Deserialize, Serialize};

use super::controller;

/// Tunable camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Movement speed in world units per reference tick at full intent deflection
    pub speed: f32,
    /// Whether world-bound clamping is enabled at all
    pub clamp_bounds: bool,
    /// Escape hatch: bypass bound clamping without touching `clamp_bounds`
    /// (angle normalization still applies)
    pub clamp_disable: bool,
    /// Maximum camera height above the ground plane
    pub max_height: f32,
    /// Minimum camera height above the ground plane
    pub min_height: f32,
    /// Lowest allowed pitch in degrees (most negative = steepest look-down)
    pub min_v_ang: f32,
    /// Highest allowed pitch in degrees
    pub max_v_ang: f32,
    /// Horizontal field of view in degrees
    pub fov: f32,
    /// World bound along X, set by `init`
    pub limit_x: f32,
    /// World bound along Z, set by `init`
    pub limit_y: f32,
    /// Derived default camera height, recomputed by the map loader
    pub calculated_default: f32,
    /// Maximum number of cached visible quads
    pub max_quad_cache_items: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: 15.0 / controller::UPDATE_FPS,
            clamp_bounds: true,
            clamp_disable: false,
            max_height: 20.0,
            min_height: 7.0,
            min_v_ang: -80.0,
            max_v_ang: -20.0,
            fov: 45.0,
            limit_x: 0.0,
            limit_y: 0.0,
            calculated_default: controller::DEFAULT_HEIGHT,
            max_quad_cache_items: 250,
        }
    }
}

impl CameraConfig {
    /// Create a config with default tunables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the height band.
    #[must_use]
    pub fn with_height_bounds(mut self, min_height: f32, max_height: f32) -> Self {
        self.min_height = min_height;
        self.max_height = max_height;
        self
    }

    /// Set the pitch band in degrees.
    #[must_use]
    pub fn with_v_ang_bounds(mut self, min_v_ang: f32, max_v_ang: f32) -> Self {
        self.min_v_ang = min_v_ang;
        self.max_v_ang = max_v_ang;
        self
    }

    /// Set the horizontal field of view in degrees.
    #[must_use]
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Enable or disable world-bound clamping.
    #[must_use]
    pub fn with_clamp_bounds(mut self, clamp_bounds: bool) -> Self {
        self.clamp_bounds = clamp_bounds;
        self
    }

    /// Set the visible-quad cache capacity.
    #[must_use]
    pub fn with_max_quad_cache_items(mut self, max: usize) -> Self {
        self.max_quad_cache_items = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clamped() {
        let config = CameraConfig::default();
        assert!(config.clamp_bounds);
        assert!(!config.clamp_disable);
        assert!(config.min_height < config.max_height);
        assert!(config.min_v_ang < config.max_v_ang);
    }

    #[test]
    fn test_builder_chain() {
        let config = CameraConfig::new()
            .with_speed(0.5)
            .with_height_bounds(5.0, 30.0)
            .with_fov(60.0);
        assert_eq!(config.speed, 0.5);
        assert_eq!(config.min_height, 5.0);
        assert_eq!(config.max_height, 30.0);
        assert_eq!(config.fov, 60.0);
    }
}
