//! Camera state and per-state movement/clamp policy
//!
//! The camera behaves differently depending on what is driving it: normal
//! play, a free-fly debug/cinematic camera, or unit-follow mode. The policy
//! for each state lives here on the enum rather than as scattered flag checks.

use serde::{Deserialize, Serialize};

/// Operating state of the camera.
///
/// Transitions are unconditional (any state to any state) and take effect on
/// the next `update()` tick. The initial state is `Game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraState {
    /// Normal gameplay camera: player-driven, clamped to the world bounds.
    #[default]
    Game,
    /// Free-fly camera: player-driven, ignores world bounds (angles are
    /// still normalized and pitch-clamped).
    Free,
    /// Unit-follow camera: ignores player move/rotate intents; an external
    /// follower drives it through `set_pos`/`transition_vh`.
    Unit,
}

impl CameraState {
    /// Whether player move intents translate the camera in this state.
    #[must_use]
    #[inline]
    pub fn allows_free_translation(self) -> bool {
        matches!(self, CameraState::Game | CameraState::Free)
    }

    /// Whether the player rotate intent spins the camera in this state.
    #[must_use]
    #[inline]
    pub fn allows_free_rotation(self) -> bool {
        matches!(self, CameraState::Game | CameraState::Free)
    }

    /// Whether world-bound position clamping applies in this state.
    #[must_use]
    #[inline]
    pub fn clamps_bounds(self) -> bool {
        matches!(self, CameraState::Game | CameraState::Unit)
    }

    /// State name for logging.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CameraState::Game => "Game",
            CameraState::Free => "Free",
            CameraState::Unit => "Unit",
        }
    }
}
