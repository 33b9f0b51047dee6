//! Visible quad: the view frustum's footprint on the ground plane
//!
//! The renderer culls terrain against the convex quadrilateral where the
//! camera frustum meets the ground (y = 0). The projection ray-casts the
//! four frustum corner directions onto the plane; rays that never descend
//! (camera pitched at or above the horizon) are cut off at a fixed range so
//! the footprint stays finite.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Vertical-to-horizontal frustum ratio used for footprint corners.
const INV_ASPECT: f32 = 3.0 / 4.0;

/// Ground distance at which non-descending corner rays are cut off.
const MAX_VISIBLE_RANGE: f32 = 500.0;

/// Rays steeper than this (in direction-Y per unit length) count as descending.
const DESCENT_EPSILON: f32 = 1e-4;

/// Convex quadrilateral on the ground plane.
///
/// Corners are ordered near-left, near-right, far-right, far-left as seen
/// from the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quad2 {
    pub points: [Vec2; 4],
}

impl Quad2 {
    /// Build a quad from four corners.
    #[must_use]
    pub fn new(points: [Vec2; 4]) -> Self {
        Self { points }
    }

    /// A zero-area quad collapsed onto one point.
    #[must_use]
    pub fn degenerate_at(point: Vec2) -> Self {
        Self {
            points: [point; 4],
        }
    }

    /// Absolute area by the shoelace formula.
    #[must_use]
    pub fn area(&self) -> f32 {
        let p = &self.points;
        let twice = (0..4).fold(0.0, |acc, i| {
            let a = p[i];
            let b = p[(i + 1) % 4];
            acc + a.x * b.y - b.x * a.y
        });
        twice.abs() * 0.5
    }

    /// Whether the quad has (near) zero area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.area() < f32::EPSILON
    }

    /// Project the frustum footprint for a camera pose.
    ///
    /// `h_ang`/`v_ang` are yaw/pitch in degrees (yaw measured from -Z in the
    /// ground plane, negative pitch looks down), `fov` is the horizontal
    /// field of view in degrees. A camera pitched straight up or down has no
    /// usable basis in the ground plane and yields a zero-area quad at the
    /// camera's ground position.
    #[must_use]
    pub fn frustum_footprint(pos: Vec3, h_ang: f32, v_ang: f32, fov: f32) -> Self {
        let (h, v) = (h_ang.to_radians(), v_ang.to_radians());
        let forward = Vec3::new(h.sin() * v.cos(), v.sin(), -h.cos() * v.cos());

        let right = forward.cross(Vec3::Y);
        if right.length_squared() < f32::EPSILON {
            // Pole: forward is (anti)parallel to world up
            return Self::degenerate_at(Vec2::new(pos.x, pos.z));
        }
        let right = right.normalize();
        let up = right.cross(forward);

        let tan_h = (fov.to_radians() * 0.5).tan();
        let tan_v = tan_h * INV_ASPECT;

        // near-left, near-right, far-right, far-left
        let corners = [
            (-tan_h, -tan_v),
            (tan_h, -tan_v),
            (tan_h, tan_v),
            (-tan_h, tan_v),
        ];
        let points = corners.map(|(sx, sy)| {
            let dir = forward + right * sx + up * sy;
            ground_hit(pos, dir)
        });
        Self { points }
    }
}

/// Intersect a corner ray with the ground plane, cutting off rays that do
/// not descend. A camera at or below the plane maps to its own footprint.
fn ground_hit(pos: Vec3, dir: Vec3) -> Vec2 {
    if dir.y < -DESCENT_EPSILON {
        let t = (-pos.y / dir.y).max(0.0);
        let hit = pos + dir * t;
        Vec2::new(hit.x, hit.z)
    } else {
        let capped = pos + dir.normalize_or_zero() * MAX_VISIBLE_RANGE;
        Vec2::new(capped.x, capped.z)
    }
}
