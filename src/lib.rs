//! An RTS game camera controller built in Rust
//!
//! This crate provides:
//! - A stateful camera controller with smooth pose transitions
//! - Decaying camera shake for impact feedback
//! - World-bound and angle clamping per camera state
//! - A bounded cache for the view frustum's ground footprint ("visible quad")
//! - Save/load of camera pose and configuration via serde

pub mod camera;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::camera::{
        CameraConfig, CameraController, CameraError, CameraSnapshot, CameraState, Quad2,
        ShakeEffect, VisibleQuadCache,
    };
    pub use glam::{Vec2, Vec3};
}
