//! Camera controller
//!
//! Owns the camera pose (position, yaw/pitch, shake offset), the active
//! [`CameraState`], and the visible-quad cache. The main loop calls
//! [`CameraController::update`] once per tick; the input layer writes
//! move/rotate/zoom intents before it, and the renderer reads the pose and
//! [`CameraController::compute_visible_quad`] after it.
//!
//! Within one tick the order is fixed: shake decay, then angle/position
//! transitions, then intent integration, then clamping, so clamping always
//! sees the post-transition state. The shake offset is an additive visual
//! offset and is exempt from position clamps.

use glam::{Vec2, Vec3};

use super::angles;
use super::cache::{QuadKey, VisibleQuadCache};
use super::config::CameraConfig;
use super::quad::Quad2;
use super::shake::ShakeEffect;
use super::state::CameraState;

/// Reference tick rate; `update(1.0 / UPDATE_FPS)` advances exactly one tick.
pub const UPDATE_FPS: f32 = 40.0;

/// Default pitch in degrees (looking down at the battlefield).
pub const STARTING_V_ANG: f32 = -60.0;
/// Default yaw in degrees.
pub const STARTING_H_ANG: f32 = 43.0;
/// Per-tick approach fraction for pitch transitions.
pub const V_TRANSITION_MULT: f32 = 0.125;
/// Per-tick approach fraction for yaw transitions.
pub const H_TRANSITION_MULT: f32 = 0.125;
/// Default camera height above the ground plane.
pub const DEFAULT_HEIGHT: f32 = 20.0;
/// Z offset applied when centering on a ground point, so the point lands in
/// the middle of a tilted view rather than at its near edge.
pub const CENTER_OFFSET_Z: f32 = 8.0;
/// Reference distance for the distance-attenuated shake scaling.
pub const SHAKE_DIST: f32 = 100.0;

/// Per-tick approach fraction for position transitions.
const POS_TRANSITION_MULT: f32 = 1.0 / 32.0;
/// Remaining deltas below this snap straight to the destination.
const SNAP_EPSILON: f32 = 0.01;

/// The game camera: pose, transitions, shake, clamping, visible-quad cache.
#[derive(Debug, Clone)]
pub struct CameraController {
    pos: Vec3,
    dest_pos: Vec3,
    /// Yaw in degrees, measured in the ground plane from -Z
    h_ang: f32,
    /// Pitch in degrees, negative looks down
    v_ang: f32,
    last_h_ang: f32,
    last_v_ang: f32,
    /// Transition target: `x` is pitch, `y` is yaw
    dest_ang: Vec2,

    /// Yaw spin intent in `[-1, 1]`, written by the input layer each frame
    rotate: f32,
    /// Per-axis move intent, written by the input layer each frame
    move_intent: Vec3,

    shake: ShakeEffect,
    state: CameraState,
    config: CameraConfig,
    cache: VisibleQuadCache,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl CameraController {
    /// Create a controller from a config, at the default pose.
    #[must_use]
    pub fn new(config: CameraConfig) -> Self {
        let cache = VisibleQuadCache::new(config.max_quad_cache_items);
        let mut controller = Self {
            pos: Vec3::ZERO,
            dest_pos: Vec3::ZERO,
            h_ang: STARTING_H_ANG,
            v_ang: STARTING_V_ANG,
            last_h_ang: STARTING_H_ANG,
            last_v_ang: STARTING_V_ANG,
            dest_ang: Vec2::new(STARTING_V_ANG, STARTING_H_ANG),
            rotate: 0.0,
            move_intent: Vec3::ZERO,
            shake: ShakeEffect::new(),
            state: CameraState::default(),
            config,
            cache,
        };
        controller.reset_position();
        controller
    }

    /// Set the world bounds (in world units) and reset to the default pose.
    /// Called once per map load.
    pub fn init(&mut self, limit_x: i32, limit_y: i32) {
        self.config.limit_x = limit_x as f32;
        self.config.limit_y = limit_y as f32;
        log::info!("camera world bounds set to {limit_x}x{limit_y}");
        self.reset_position();
    }

    // -------------------------------------------------------------------------
    // Getters
    // -------------------------------------------------------------------------

    /// Camera position in world space.
    #[must_use]
    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    /// Position the camera is gliding toward.
    #[must_use]
    #[inline]
    pub fn dest_pos(&self) -> Vec3 {
        self.dest_pos
    }

    /// Yaw in degrees.
    #[must_use]
    #[inline]
    pub fn h_ang(&self) -> f32 {
        self.h_ang
    }

    /// Pitch in degrees.
    #[must_use]
    #[inline]
    pub fn v_ang(&self) -> f32 {
        self.v_ang
    }

    /// Horizontal field of view in degrees.
    #[must_use]
    #[inline]
    pub fn fov(&self) -> f32 {
        self.config.fov
    }

    /// Current shake offset; `(0, 0)` when no shake is active.
    #[must_use]
    #[inline]
    pub fn shake_offset(&self) -> Vec2 {
        self.shake.offset()
    }

    /// Current shake intensity.
    #[must_use]
    #[inline]
    pub fn shake_intensity(&self) -> f32 {
        self.shake.intensity()
    }

    /// Active camera state.
    #[must_use]
    #[inline]
    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Current configuration.
    #[must_use]
    #[inline]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Maximum camera height.
    #[must_use]
    #[inline]
    pub fn max_height(&self) -> f32 {
        self.config.max_height
    }

    /// Derived default camera height.
    #[must_use]
    #[inline]
    pub fn calculated_default(&self) -> f32 {
        self.config.calculated_default
    }

    /// Whether any move intent is set.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.move_intent != Vec3::ZERO
    }

    /// Whether the angles changed during the last `update` (the visible-quad
    /// cache key is stale when this is true).
    #[must_use]
    pub fn angles_changed(&self) -> bool {
        self.h_ang != self.last_h_ang || self.v_ang != self.last_v_ang
    }

    /// Debug string naming the active movement intents, e.g. `"forward+left"`.
    #[must_use]
    pub fn movement_key(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.move_intent.z > 0.0 {
            parts.push("forward");
        } else if self.move_intent.z < 0.0 {
            parts.push("back");
        }
        if self.move_intent.x > 0.0 {
            parts.push("right");
        } else if self.move_intent.x < 0.0 {
            parts.push("left");
        }
        if self.move_intent.y > 0.0 {
            parts.push("up");
        } else if self.move_intent.y < 0.0 {
            parts.push("down");
        }
        if self.rotate > 0.0 {
            parts.push("rotate-right");
        } else if self.rotate < 0.0 {
            parts.push("rotate-left");
        }
        parts.join("+")
    }

    // -------------------------------------------------------------------------
    // Setters (input layer and config source)
    // -------------------------------------------------------------------------

    /// Set the X move intent.
    #[inline]
    pub fn set_move_x(&mut self, f: f32) {
        self.move_intent.x = f;
    }

    /// Set the Y (height) move intent.
    #[inline]
    pub fn set_move_y(&mut self, f: f32) {
        self.move_intent.y = f;
    }

    /// Set the Z move intent.
    #[inline]
    pub fn set_move_z(&mut self, f: f32) {
        self.move_intent.z = f;
    }

    /// Set the yaw spin intent.
    #[inline]
    pub fn set_rotate(&mut self, rotate: f32) {
        self.rotate = rotate;
    }

    /// Clear all move intents.
    pub fn stop_move(&mut self) {
        self.move_intent = Vec3::ZERO;
    }

    /// Freeze: make the current pose the destination of all transitions.
    pub fn stop(&mut self) {
        self.dest_pos = self.pos;
        self.dest_ang = Vec2::new(self.v_ang, self.h_ang);
    }

    /// Teleport position and destination.
    pub fn set_pos(&mut self, pos: Vec3) {
        self.pos = pos;
        self.dest_pos = pos;
    }

    /// Teleport in the ground plane, keeping the current height.
    pub fn set_pos_xz(&mut self, pos: Vec2) {
        self.pos.x = pos.x;
        self.pos.z = pos.y;
        self.dest_pos.x = pos.x;
        self.dest_pos.z = pos.y;
    }

    /// Set yaw directly (no transition).
    #[inline]
    pub fn set_h_ang(&mut self, value: f32) {
        self.h_ang = value;
    }

    /// Set pitch directly (no transition).
    #[inline]
    pub fn set_v_ang(&mut self, value: f32) {
        self.v_ang = value;
    }

    /// Set the horizontal field of view in degrees.
    #[inline]
    pub fn set_fov(&mut self, value: f32) {
        self.config.fov = value;
    }

    /// Set the maximum camera height.
    #[inline]
    pub fn set_max_height(&mut self, value: f32) {
        self.config.max_height = value;
    }

    /// Set the lowest allowed pitch.
    #[inline]
    pub fn set_min_v_ang(&mut self, value: f32) {
        self.config.min_v_ang = value;
    }

    /// Set the highest allowed pitch.
    #[inline]
    pub fn set_max_v_ang(&mut self, value: f32) {
        self.config.max_v_ang = value;
    }

    /// Set the derived default height, raising `max_height` to keep the
    /// default reachable.
    pub fn set_calculated_default(&mut self, value: f32) {
        self.config.calculated_default = value;
        if self.config.max_height > 0.0 && self.config.max_height < value {
            self.set_max_height(value);
        }
    }

    /// Escape hatch for cinematics: bypass world-bound clamping without
    /// touching the config flag. Angle normalization still applies.
    pub fn set_clamp_disabled(&mut self, value: bool) {
        self.config.clamp_disable = value;
    }

    /// Switch the operating state. Takes effect on the next `update` tick;
    /// pending player intents are dropped so the new state starts clean.
    pub fn set_state(&mut self, state: CameraState) {
        if state != self.state {
            log::debug!("camera state {} -> {}", self.state.name(), state.name());
            self.state = state;
            self.stop_move();
            self.rotate = 0.0;
        }
    }

    /// Back to the normal gameplay camera.
    pub fn reset_camera(&mut self) {
        self.set_state(CameraState::Game);
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Arm a decaying shake for `duration` ticks.
    ///
    /// With `distance_affected`, the start intensity is attenuated by how far
    /// the camera sits from its calculated default height, so a zoomed-out
    /// camera shakes less. `unit_vector` is the impulse direction; offsets
    /// are sampled in its perpendicular plane, and a zero vector yields no
    /// shake at all.
    pub fn shake(
        &mut self,
        duration: u32,
        start_intensity: f32,
        distance_affected: bool,
        unit_vector: Vec3,
    ) {
        let intensity = if distance_affected {
            let height_offset = (self.pos.y - self.config.calculated_default).abs();
            start_intensity * (SHAKE_DIST / (SHAKE_DIST + height_offset))
        } else {
            start_intensity
        };
        self.shake.arm(duration, intensity, unit_vector);
    }

    /// Glide the destination angles by a relative amount.
    pub fn transition_vh(&mut self, v: f32, h: f32) {
        self.dest_ang.x += v;
        self.dest_ang.y += h;
    }

    /// Glide the destination angles to an absolute pitch/yaw pair.
    pub fn rotate_to_vh(&mut self, v: f32, h: f32) {
        self.dest_ang.x = v;
        self.dest_ang.y = h;
    }

    /// Center the camera over a ground point, immediately. The Z offset
    /// keeps the point in the middle of the tilted view.
    pub fn center_xz(&mut self, x: f32, z: f32) {
        self.dest_pos.x = x;
        self.pos.x = x;
        self.dest_pos.z = z + CENTER_OFFSET_Z;
        self.pos.z = z + CENTER_OFFSET_Z;
    }

    /// Move the destination along the view direction.
    pub fn zoom(&mut self, dist: f32) {
        let h = self.h_ang.to_radians();
        let v = self.v_ang.to_radians();
        let flat = dist * v.cos();
        self.dest_pos += Vec3::new(h.sin() * flat, dist * v.sin(), -h.cos() * flat);
    }

    /// Move in the ground plane along the current yaw.
    ///
    /// `response` blends how much of the offset is applied to the position
    /// immediately: `1.0` is an instant move, `0.0` leaves the glide entirely
    /// to the per-tick transition.
    pub fn move_forward_h(&mut self, dist: f32, response: f32) {
        let h = self.h_ang.to_radians();
        let offset = Vec3::new(h.sin() * dist, 0.0, -h.cos() * dist);
        self.dest_pos += offset;
        self.pos.x += offset.x * response;
        self.pos.z += offset.z * response;
    }

    /// Strafe in the ground plane, perpendicular to the current yaw.
    pub fn move_side_h(&mut self, dist: f32, response: f32) {
        let h = (self.h_ang + 90.0).to_radians();
        let offset = Vec3::new(h.sin() * dist, 0.0, -h.cos() * dist);
        self.dest_pos += offset;
        self.pos.x += offset.x * response;
        self.pos.z += offset.z * response;
    }

    // -------------------------------------------------------------------------
    // Per-tick update
    // -------------------------------------------------------------------------

    /// Advance the camera by `dt` seconds (one tick at `1.0 / UPDATE_FPS`).
    ///
    /// Fixed order: shake decay, angle transitions, position transitions,
    /// intent integration, clamping, last-angle bookkeeping.
    pub fn update(&mut self, dt: f32) {
        let ticks = dt * UPDATE_FPS;

        self.shake.tick();
        self.advance_angles(ticks);
        self.advance_position(ticks);
        self.integrate_intents(ticks);

        if self.bounds_clamping_active() {
            if self.state == CameraState::Unit {
                // The follower drives the height in unit mode
                self.clamp_pos_xz(0.0, self.config.limit_x, 0.0, self.config.limit_y);
            } else {
                self.clamp_pos_xyz(
                    0.0,
                    self.config.limit_x,
                    self.config.min_height,
                    self.config.max_height,
                    0.0,
                    self.config.limit_y,
                );
            }
        }
        self.clamp_ang();

        self.last_h_ang = self.h_ang;
        self.last_v_ang = self.v_ang;
    }

    /// Exponentially approach the destination angles, snapping inside epsilon.
    fn advance_angles(&mut self, ticks: f32) {
        let dv = self.dest_ang.x - self.v_ang;
        if dv.abs() <= SNAP_EPSILON {
            self.v_ang = self.dest_ang.x;
        } else {
            self.v_ang += dv * transition_step(V_TRANSITION_MULT, ticks);
        }

        // Yaw goes the short way around the circle
        let dh = angles::shortest_arc_deg(self.h_ang, self.dest_ang.y);
        if dh.abs() <= SNAP_EPSILON {
            self.h_ang = self.dest_ang.y;
        } else {
            self.h_ang += dh * transition_step(H_TRANSITION_MULT, ticks);
        }
    }

    /// Per-axis exponential approach of the position toward its destination.
    fn advance_position(&mut self, ticks: f32) {
        let step = transition_step(POS_TRANSITION_MULT, ticks);
        for axis in 0..3 {
            let delta = self.dest_pos[axis] - self.pos[axis];
            if delta.abs() <= SNAP_EPSILON {
                self.pos[axis] = self.dest_pos[axis];
            } else {
                self.pos[axis] += delta * step;
            }
        }
    }

    /// Fold the externally written move/rotate intents into the destinations.
    fn integrate_intents(&mut self, ticks: f32) {
        let speed = self.config.speed;

        if self.state.allows_free_rotation() && self.rotate != 0.0 {
            self.rotate_hv(speed * 5.0 * self.rotate * ticks, 0.0);
        }

        if !self.state.allows_free_translation() {
            return;
        }
        let intent = self.move_intent;
        if intent.y != 0.0 {
            self.move_up(speed * intent.y * ticks);
            // Tilt with height changes while inside the height band, so
            // raising the camera also flattens the view
            let inside_band = if intent.y > 0.0 {
                self.pos.y < self.config.max_height
            } else {
                self.pos.y > self.config.min_height
            };
            if self.config.clamp_bounds && inside_band {
                self.rotate_hv(0.0, -speed * 1.7 * intent.y * ticks);
            }
        }
        if intent.z != 0.0 {
            self.move_forward_h(speed * intent.z * ticks, 0.9);
        }
        if intent.x != 0.0 {
            self.move_side_h(speed * intent.x * ticks, 0.9);
        }
    }

    /// Apply a yaw/pitch delta to both the live angles and the destinations.
    fn rotate_hv(&mut self, h: f32, v: f32) {
        self.h_ang += h;
        self.dest_ang.y += h;
        self.v_ang += v;
        self.dest_ang.x += v;
    }

    /// Raise or lower the destination height.
    fn move_up(&mut self, dist: f32) {
        self.dest_pos.y += dist;
    }

    // -------------------------------------------------------------------------
    // Clamping
    // -------------------------------------------------------------------------

    fn bounds_clamping_active(&self) -> bool {
        self.config.clamp_bounds && !self.config.clamp_disable && self.state.clamps_bounds()
    }

    /// Clamp position and destination to a box. Idempotent; inverted ranges
    /// leave the value untouched on that axis.
    fn clamp_pos_xyz(&mut self, x1: f32, x2: f32, y1: f32, y2: f32, z1: f32, z2: f32) {
        for p in [&mut self.pos, &mut self.dest_pos] {
            p.x = clamp_axis(p.x, x1, x2);
            p.y = clamp_axis(p.y, y1, y2);
            p.z = clamp_axis(p.z, z1, z2);
        }
    }

    /// Ground-plane-only clamp, used in unit-follow mode where the follower
    /// manages the height itself.
    fn clamp_pos_xz(&mut self, x1: f32, x2: f32, z1: f32, z2: f32) {
        for p in [&mut self.pos, &mut self.dest_pos] {
            p.x = clamp_axis(p.x, x1, x2);
            p.z = clamp_axis(p.z, z1, z2);
        }
    }

    /// Clamp pitch to the configured band (when bound clamping is active)
    /// and normalize yaw to the canonical range. Idempotent.
    fn clamp_ang(&mut self) {
        if self.bounds_clamping_active() {
            self.v_ang = clamp_axis(self.v_ang, self.config.min_v_ang, self.config.max_v_ang);
            self.dest_ang.x = clamp_axis(self.dest_ang.x, self.config.min_v_ang, self.config.max_v_ang);
        }
        self.h_ang = angles::normalize_deg(self.h_ang);
        self.dest_ang.y = angles::normalize_deg(self.dest_ang.y);
    }

    /// Restore the default pose over the world center.
    pub fn reset_position(&mut self) {
        self.pos = Vec3::new(
            self.config.limit_x * 0.5,
            self.config.calculated_default,
            self.config.limit_y * 0.5,
        );
        self.dest_pos = self.pos;
        self.h_ang = STARTING_H_ANG;
        self.v_ang = STARTING_V_ANG;
        self.last_h_ang = self.h_ang;
        self.last_v_ang = self.v_ang;
        self.dest_ang = Vec2::new(STARTING_V_ANG, STARTING_H_ANG);
    }

    // -------------------------------------------------------------------------
    // Visible quad
    // -------------------------------------------------------------------------

    /// Ground footprint of the current view frustum, memoized by exact pose.
    ///
    /// A repeated call with an unchanged pose returns the cached quad (the
    /// common idle-camera case skips even the map lookup); any pose change
    /// recomputes and inserts, evicting when the cache is over budget.
    pub fn compute_visible_quad(&mut self) -> Quad2 {
        let key = QuadKey::new(self.h_ang, self.v_ang, self.pos);
        if let Some(quad) = self.cache.get(&key) {
            return quad;
        }
        let quad = Quad2::frustum_footprint(self.pos, self.h_ang, self.v_ang, self.config.fov);
        self.cache.insert(key, quad);
        quad
    }

    /// Number of cached visible quads.
    #[must_use]
    pub fn quad_cache_len(&self) -> usize {
        self.cache.len()
    }

    // pub(super) accessors for the persistence module
    pub(super) fn restore_pose(
        &mut self,
        pos: Vec3,
        dest_pos: Vec3,
        h_ang: f32,
        v_ang: f32,
        dest_ang: Vec2,
    ) {
        self.pos = pos;
        self.dest_pos = dest_pos;
        self.h_ang = h_ang;
        self.v_ang = v_ang;
        self.last_h_ang = h_ang;
        self.last_v_ang = v_ang;
        self.dest_ang = dest_ang;
    }

    pub(super) fn restore_config(&mut self, config: CameraConfig) {
        self.cache.set_capacity(config.max_quad_cache_items);
        self.config = config;
    }

    pub(super) fn restore_state(&mut self, state: CameraState) {
        self.state = state;
    }

    pub(super) fn dest_ang(&self) -> Vec2 {
        self.dest_ang
    }
}

/// One exponential approach step: the fraction of the remaining delta to
/// cover after `ticks` ticks at a per-tick fraction of `mult`.
fn transition_step(mult: f32, ticks: f32) -> f32 {
    (1.0 - (1.0 - mult).powf(ticks)).clamp(0.0, 1.0)
}

/// Clamp that tolerates inverted ranges (returns the value unchanged).
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        value
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f32 = 1.0 / UPDATE_FPS;

    fn camera() -> CameraController {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut camera = CameraController::new(CameraConfig::default());
        camera.init(64, 64);
        camera
    }

    #[test]
    fn test_default_pose() {
        let camera = camera();
        assert_eq!(camera.h_ang(), STARTING_H_ANG);
        assert_eq!(camera.v_ang(), STARTING_V_ANG);
        assert_eq!(camera.pos().y, DEFAULT_HEIGHT);
        assert_eq!(camera.state(), CameraState::Game);
    }

    #[test]
    fn test_update_is_stable_at_rest() {
        let mut camera = camera();
        let pos = camera.pos();
        let (h, v) = (camera.h_ang(), camera.v_ang());
        for _ in 0..10 {
            camera.update(TICK);
        }
        assert_eq!(camera.pos(), pos);
        assert_eq!(camera.h_ang(), h);
        assert_eq!(camera.v_ang(), v);
        assert!(!camera.angles_changed());
    }

    #[test]
    fn test_transition_converges_without_overshoot() {
        let mut camera = camera();
        camera.rotate_to_vh(-30.0, 120.0);
        let mut last_dv = (camera.v_ang() - -30.0).abs();
        for _ in 0..300 {
            camera.update(TICK);
            let dv = (camera.v_ang() - -30.0).abs();
            assert!(dv <= last_dv + 1e-4, "pitch overshot: {dv} > {last_dv}");
            last_dv = dv;
        }
        assert!((camera.v_ang() - -30.0).abs() < SNAP_EPSILON);
        assert!((camera.h_ang() - 120.0).abs() < SNAP_EPSILON);
    }

    #[test]
    fn test_yaw_transition_takes_shortest_arc() {
        let mut camera = camera();
        camera.set_h_ang(170.0);
        camera.stop();
        camera.rotate_to_vh(STARTING_V_ANG, -170.0);
        camera.update(TICK);
        // Moving +20 degrees through the wrap, not -340
        assert!(camera.h_ang() > 170.0 || camera.h_ang() <= -170.0);
    }

    #[test]
    fn test_relative_transition() {
        let mut camera = camera();
        camera.transition_vh(5.0, -10.0);
        for _ in 0..300 {
            camera.update(TICK);
        }
        assert!((camera.v_ang() - (STARTING_V_ANG + 5.0)).abs() < 0.05);
        assert!((camera.h_ang() - (STARTING_H_ANG - 10.0)).abs() < 0.05);
    }

    #[test]
    fn test_shake_decays_to_exact_zero() {
        let mut camera = camera();
        camera.shake(30, 100.0, false, Vec3::X);
        assert!(camera.shake_intensity() > 0.0);
        for _ in 0..30 {
            camera.update(TICK);
        }
        assert_eq!(camera.shake_intensity(), 0.0);
        assert_eq!(camera.shake_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_distance_affected_shake_is_attenuated() {
        let mut camera = camera();
        camera.set_pos(Vec3::new(32.0, DEFAULT_HEIGHT, 32.0));
        camera.shake(30, 100.0, false, Vec3::X);
        let full = camera.shake_intensity();
        camera.set_pos(Vec3::new(32.0, DEFAULT_HEIGHT + 50.0, 32.0));
        camera.shake(30, 100.0, true, Vec3::X);
        assert!(camera.shake_intensity() < full);
    }

    #[test]
    fn test_max_height_clamp() {
        let mut camera = camera();
        camera.set_max_height(8.0);
        camera.set_pos(Vec3::new(5.0, 5.0, 5.0));
        camera.update(TICK);
        assert!(camera.pos().y <= 8.0);
        assert!(camera.pos().y >= camera.config().min_height);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let mut camera = camera();
        camera.set_pos(Vec3::new(10.0, 10.0, 10.0));
        camera.update(TICK);
        let once = camera.pos();
        camera.update(TICK);
        assert_eq!(camera.pos(), once);
    }

    #[test]
    fn test_world_bounds_clamp() {
        let mut camera = camera();
        camera.set_pos(Vec3::new(-50.0, 10.0, 500.0));
        camera.update(TICK);
        assert!(camera.pos().x >= 0.0);
        assert!(camera.pos().z <= 64.0);
    }

    #[test]
    fn test_free_state_bypasses_bounds() {
        let mut camera = camera();
        camera.set_state(CameraState::Free);
        camera.set_pos(Vec3::new(-50.0, 100.0, 500.0));
        camera.update(TICK);
        assert_eq!(camera.pos(), Vec3::new(-50.0, 100.0, 500.0));
    }

    #[test]
    fn test_clamp_disable_escape_hatch() {
        let mut camera = camera();
        camera.set_clamp_disabled(true);
        camera.set_pos(Vec3::new(-50.0, 100.0, 500.0));
        camera.set_h_ang(725.0);
        camera.update(TICK);
        // Bounds bypassed, yaw still normalized
        assert_eq!(camera.pos(), Vec3::new(-50.0, 100.0, 500.0));
        assert!(camera.h_ang() > -180.0 && camera.h_ang() <= 180.0);
    }

    #[test]
    fn test_pitch_clamped_to_band() {
        let mut camera = camera();
        camera.set_v_ang(-5.0);
        camera.update(TICK);
        assert!(camera.v_ang() <= camera.config().max_v_ang);
        camera.set_v_ang(-170.0);
        camera.update(TICK);
        assert!(camera.v_ang() >= camera.config().min_v_ang);
    }

    #[test]
    fn test_unit_state_ignores_player_intents() {
        let mut camera = camera();
        camera.set_state(CameraState::Unit);
        camera.set_move_x(1.0);
        camera.set_move_z(1.0);
        camera.set_rotate(1.0);
        let pos = camera.pos();
        let h = camera.h_ang();
        for _ in 0..20 {
            camera.update(TICK);
        }
        assert_eq!(camera.pos(), pos);
        assert_eq!(camera.h_ang(), h);
    }

    #[test]
    fn test_state_change_drops_intents() {
        let mut camera = camera();
        camera.set_move_x(1.0);
        camera.set_rotate(1.0);
        camera.set_state(CameraState::Unit);
        assert!(!camera.is_moving());
        camera.reset_camera();
        assert_eq!(camera.state(), CameraState::Game);
    }

    #[test]
    fn test_move_intent_translates() {
        let mut camera = camera();
        camera.set_move_z(1.0);
        for _ in 0..10 {
            camera.update(TICK);
        }
        assert_ne!(camera.pos().x, 32.0);
        assert_ne!(camera.pos().z, 32.0);
        camera.stop_move();
        assert!(!camera.is_moving());
    }

    #[test]
    fn test_move_forward_h_immediate_response() {
        let mut camera = camera();
        camera.set_h_ang(0.0);
        camera.stop();
        let before = camera.pos();
        camera.move_forward_h(2.0, 1.0);
        let moved = camera.pos() - before;
        // Yaw 0 faces -Z
        assert!((moved.z - -2.0).abs() < 1e-5);
        assert!(moved.x.abs() < 1e-5);
    }

    #[test]
    fn test_zoom_moves_along_view_direction() {
        let mut camera = camera();
        let before = camera.dest_pos();
        camera.zoom(2.0);
        // Looking down: zooming in lowers the destination
        assert!(camera.dest_pos().y < before.y);
    }

    #[test]
    fn test_center_xz() {
        let mut camera = camera();
        camera.center_xz(10.0, 20.0);
        assert_eq!(camera.pos().x, 10.0);
        assert_eq!(camera.pos().z, 20.0 + CENTER_OFFSET_Z);
        assert_eq!(camera.dest_pos().x, 10.0);
    }

    #[test]
    fn test_visible_quad_repeat_is_identical_and_cached() {
        let mut camera = camera();
        camera.update(TICK);
        let first = camera.compute_visible_quad();
        let len_after_first = camera.quad_cache_len();
        let second = camera.compute_visible_quad();
        assert_eq!(first, second);
        assert_eq!(camera.quad_cache_len(), len_after_first);
    }

    #[test]
    fn test_visible_quad_cache_bounded() {
        let mut camera = CameraController::new(
            CameraConfig::default().with_max_quad_cache_items(8),
        );
        camera.init(64, 64);
        camera.set_clamp_disabled(true);
        for i in 0..100 {
            camera.set_h_ang(i as f32);
            let _ = camera.compute_visible_quad();
            assert!(camera.quad_cache_len() <= 8);
        }
    }

    #[test]
    fn test_set_pos_xz_keeps_height() {
        let mut camera = camera();
        camera.set_pos_xz(Vec2::new(12.0, 34.0));
        assert_eq!(camera.pos(), Vec3::new(12.0, DEFAULT_HEIGHT, 34.0));
        assert_eq!(camera.dest_pos(), camera.pos());
    }

    #[test]
    fn test_descending_flattens_the_view() {
        let mut camera = camera();
        camera.set_move_y(-1.0);
        for _ in 0..10 {
            camera.update(TICK);
        }
        assert!(camera.dest_pos().y < DEFAULT_HEIGHT);
        // Descending tilts the pitch upward (less steep look-down)
        assert!(camera.v_ang() > STARTING_V_ANG);
    }

    #[test]
    fn test_movement_key() {
        let mut camera = camera();
        assert_eq!(camera.movement_key(), "");
        camera.set_move_z(1.0);
        camera.set_move_x(-1.0);
        camera.set_rotate(1.0);
        assert_eq!(camera.movement_key(), "forward+left+rotate-right");
    }

    #[test]
    fn test_calculated_default_raises_max_height() {
        let mut camera = camera();
        camera.set_max_height(10.0);
        camera.set_calculated_default(25.0);
        assert_eq!(camera.max_height(), 25.0);
    }

    // The end-to-end acceptance scenario
    #[test]
    fn test_scenario() {
        let mut camera = camera();
        camera.set_pos(Vec3::new(0.0, 10.0, 0.0));
        camera.set_h_ang(0.0);
        camera.set_v_ang(STARTING_V_ANG);
        camera.stop();

        camera.shake(30, 100.0, false, Vec3::X);
        for _ in 0..30 {
            camera.update(TICK);
        }
        assert_eq!(camera.shake_offset(), Vec2::ZERO);

        camera.set_max_height(8.0);
        camera.set_pos(Vec3::new(5.0, 5.0, 5.0));
        camera.update(TICK);
        assert!(camera.pos().y <= 8.0);

        let first = camera.compute_visible_quad();
        let len = camera.quad_cache_len();
        let second = camera.compute_visible_quad();
        assert_eq!(first, second);
        assert_eq!(camera.quad_cache_len(), len);
    }
}
