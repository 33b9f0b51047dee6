//! Angle helpers in the degree domain
//!
//! The camera stores yaw and pitch in degrees. These helpers keep the yaw in
//! a canonical range so it never grows unbounded across many rotations, and
//! compute shortest-arc deltas so transitions never take the long way around.

/// Normalize an angle in degrees to the canonical range `(-180, 180]`.
///
/// Idempotent: normalizing an already-canonical angle returns it unchanged.
#[must_use]
pub fn normalize_deg(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Signed shortest-arc delta from `from` to `to`, in degrees.
///
/// The result lies in `(-180, 180]`; adding it to `from` reaches `to`
/// (modulo 360) without crossing more than half a turn.
#[must_use]
pub fn shortest_arc_deg(from: f32, to: f32) -> f32 {
    normalize_deg(to - from)
}
