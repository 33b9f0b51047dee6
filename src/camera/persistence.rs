//! Camera persistence
//!
//! The camera saves its pose and config into a structured-document node
//! (a `serde_json::Value` object owned by the save/load layer), and can also
//! snapshot to RON or JSON files directly. Loading performs no range
//! validation: out-of-range persisted values are silently repaired by the
//! clamp pass of the first `update()` after loading.

use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::config::CameraConfig;
use super::controller::CameraController;
use super::state::CameraState;

/// Key of the camera's child node inside a session save document.
const GAME_CAMERA_NODE: &str = "gameCamera";

/// Serializable camera state: everything needed to restore the pose
/// mid-transition plus the active config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSnapshot {
    /// Camera position
    pub pos: Vec3,
    /// Transition destination position
    pub dest_pos: Vec3,
    /// Yaw in degrees
    pub h_ang: f32,
    /// Pitch in degrees
    pub v_ang: f32,
    /// Transition destination angles (x pitch, y yaw)
    pub dest_ang: Vec2,
    /// Operating state
    pub state: CameraState,
    /// Active configuration
    pub config: CameraConfig,
}

impl CameraSnapshot {
    /// Save the snapshot to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), CameraError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| CameraError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| CameraError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a snapshot from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, CameraError> {
        let content = fs::read_to_string(path).map_err(|e| CameraError::IoError(e.to_string()))?;
        let snapshot: CameraSnapshot =
            ron::from_str(&content).map_err(|e| CameraError::DeserializeError(e.to_string()))?;
        Ok(snapshot)
    }

    /// Save the snapshot to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), CameraError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| CameraError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| CameraError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CameraError> {
        let content = fs::read_to_string(path).map_err(|e| CameraError::IoError(e.to_string()))?;
        let snapshot: CameraSnapshot = serde_json::from_str(&content)
            .map_err(|e| CameraError::DeserializeError(e.to_string()))?;
        Ok(snapshot)
    }
}

impl CameraController {
    /// Capture the current pose, state, and config.
    #[must_use]
    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            pos: self.pos(),
            dest_pos: self.dest_pos(),
            h_ang: self.h_ang(),
            v_ang: self.v_ang(),
            dest_ang: self.dest_ang(),
            state: self.state(),
            config: self.config().clone(),
        }
    }

    /// Restore pose, state, and config from a snapshot.
    ///
    /// No range validation happens here; the first `update()` clamps any
    /// out-of-range values back into the configured bounds.
    pub fn restore(&mut self, snapshot: CameraSnapshot) {
        self.restore_config(snapshot.config);
        self.restore_state(snapshot.state);
        self.restore_pose(
            snapshot.pos,
            snapshot.dest_pos,
            snapshot.h_ang,
            snapshot.v_ang,
            snapshot.dest_ang,
        );
    }

    /// Serialize the camera into a document node (a JSON object).
    ///
    /// # Errors
    ///
    /// Returns an error if `node` is not an object or serialization fails
    pub fn save(&self, node: &mut serde_json::Value) -> Result<(), CameraError> {
        let fields = serde_json::to_value(self.snapshot())
            .map_err(|e| CameraError::SerializeError(e.to_string()))?;
        let target = node
            .as_object_mut()
            .ok_or_else(|| CameraError::BadNode("camera node is not an object".to_string()))?;
        match fields {
            serde_json::Value::Object(map) => {
                target.extend(map);
                Ok(())
            }
            _ => Err(CameraError::SerializeError(
                "snapshot did not serialize to an object".to_string(),
            )),
        }
    }

    /// Restore the camera from a document node written by [`Self::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the node does not deserialize into a snapshot
    pub fn load(&mut self, node: &serde_json::Value) -> Result<(), CameraError> {
        let snapshot: CameraSnapshot = serde_json::from_value(node.clone())
            .map_err(|e| CameraError::DeserializeError(e.to_string()))?;
        self.restore(snapshot);
        log::debug!("camera loaded at {:?}", self.pos());
        Ok(())
    }

    /// Write the camera's node into a session save document root.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not an object or serialization fails
    pub fn save_game(&self, root: &mut serde_json::Value) -> Result<(), CameraError> {
        let mut node = serde_json::Value::Object(serde_json::Map::new());
        self.save(&mut node)?;
        let root = root
            .as_object_mut()
            .ok_or_else(|| CameraError::BadNode("save root is not an object".to_string()))?;
        root.insert(GAME_CAMERA_NODE.to_string(), node);
        Ok(())
    }

    /// Restore the camera from its node in a session save document root.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera node is missing or malformed
    pub fn load_game(&mut self, root: &serde_json::Value) -> Result<(), CameraError> {
        let node = root
            .get(GAME_CAMERA_NODE)
            .ok_or_else(|| CameraError::BadNode(format!("missing node '{GAME_CAMERA_NODE}'")))?;
        self.load(node)
    }
}

/// Errors that can occur during camera persistence
#[derive(Debug, Clone)]
pub enum CameraError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
    /// Document node missing or of the wrong shape
    BadNode(String),
}

impl std::fmt::Display for CameraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
            Self::BadNode(e) => write!(f, "Bad document node: {e}"),
        }
    }
}

impl std::error::Error for CameraError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::controller;

    fn camera() -> CameraController {
        let mut camera = CameraController::new(CameraConfig::default());
        camera.init(64, 64);
        camera
    }

    #[test]
    fn test_snapshot_roundtrip_through_node() {
        let mut original = camera();
        original.set_pos(Vec3::new(12.0, 15.0, 30.0));
        original.set_h_ang(91.0);
        original.set_v_ang(-45.0);
        original.set_state(CameraState::Free);

        let mut node = serde_json::json!({});
        original.save(&mut node).unwrap();

        let mut restored = camera();
        restored.load(&node).unwrap();
        assert_eq!(restored.pos(), original.pos());
        assert_eq!(restored.h_ang(), original.h_ang());
        assert_eq!(restored.v_ang(), original.v_ang());
        assert_eq!(restored.state(), CameraState::Free);
    }

    #[test]
    fn test_save_game_writes_child_node() {
        let camera = camera();
        let mut root = serde_json::json!({});
        camera.save_game(&mut root).unwrap();
        assert!(root.get("gameCamera").is_some());
        assert!(root["gameCamera"].get("pos").is_some());
    }

    #[test]
    fn test_load_game_roundtrip() {
        let mut original = camera();
        original.center_xz(10.0, 12.0);
        let mut root = serde_json::json!({});
        original.save_game(&mut root).unwrap();

        let mut restored = camera();
        restored.load_game(&root).unwrap();
        assert_eq!(restored.pos(), original.pos());
        assert_eq!(restored.dest_pos(), original.dest_pos());
    }

    #[test]
    fn test_load_game_missing_node_errors() {
        let mut restored = camera();
        let root = serde_json::json!({ "world": {} });
        assert!(restored.load_game(&root).is_err());
    }

    #[test]
    fn test_save_into_non_object_errors() {
        let camera = camera();
        let mut node = serde_json::json!([1, 2, 3]);
        assert!(camera.save(&mut node).is_err());
    }

    #[test]
    fn test_loaded_out_of_range_values_are_repaired() {
        let mut original = camera();
        original.set_state(CameraState::Free);
        original.set_pos(Vec3::new(-100.0, 500.0, 900.0));
        original.set_v_ang(-170.0);
        let mut root = serde_json::json!({});
        original.save_game(&mut root).unwrap();

        let mut restored = camera();
        restored.load_game(&root).unwrap();
        // Back to the clamped gameplay state; the next update repairs silently
        restored.reset_camera();
        restored.update(1.0 / controller::UPDATE_FPS);
        let config = restored.config().clone();
        assert!(restored.pos().x >= 0.0 && restored.pos().x <= config.limit_x);
        assert!(restored.pos().y <= config.max_height);
        assert!(restored.v_ang() >= config.min_v_ang);
    }

    #[test]
    fn test_snapshot_ron_string_roundtrip() {
        let snapshot = camera().snapshot();
        let ron_str =
            ron::ser::to_string_pretty(&snapshot, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: CameraSnapshot = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_snapshot_file_roundtrip() {
        let snapshot = camera().snapshot();
        let dir = std::env::temp_dir();
        let ron_path = dir.join("rts_camera_snapshot_test.ron");
        let json_path = dir.join("rts_camera_snapshot_test.json");

        snapshot.save_ron(&ron_path).unwrap();
        assert_eq!(CameraSnapshot::load_ron(&ron_path).unwrap(), snapshot);

        snapshot.save_json(&json_path).unwrap();
        assert_eq!(CameraSnapshot::load_json(&json_path).unwrap(), snapshot);

        let _ = fs::remove_file(ron_path);
        let _ = fs::remove_file(json_path);
    }
}
