//! Game camera module
//!
//! Contains the camera controller, its configuration and state policies,
//! the shake effect, and the visible-quad computation and cache.

pub mod angles;
mod cache;
mod config;
mod controller;
mod persistence;
mod quad;
mod shake;
mod state;

pub use cache::{QuadKey, VisibleQuadCache};
pub use config::CameraConfig;
pub use controller::CameraController;
pub use persistence::{CameraError, CameraSnapshot};
pub use quad::Quad2;
pub use shake::ShakeEffect;
pub use state::CameraState;
