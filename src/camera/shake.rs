//! Camera shake effect
//!
//! A shake is an armed impulse that decays linearly over a fixed number of
//! ticks. Each tick samples a fresh pseudo-random offset in the plane
//! perpendicular to the impulse axis, scaled by the remaining intensity.
//! When the shake expires the offset is exactly the zero vector.

use glam::{Vec2, Vec3};

/// Decaying positional shake applied on top of the camera pose.
#[derive(Debug, Clone)]
pub struct ShakeEffect {
    /// Ticks left until the shake is fully decayed
    ticks_remaining: u32,
    /// Intensity lost per tick (linear decay)
    decrement: f32,
    /// Current intensity; `decrement * ticks_remaining` by construction
    intensity: f32,
    /// Normalized impulse axis; offsets are sampled in its perpendicular plane
    axis: Vec3,
    /// Current sampled offset
    offset: Vec2,
    rng: XorShift32,
}

impl Default for ShakeEffect {
    fn default() -> Self {
        Self {
            ticks_remaining: 0,
            decrement: 0.0,
            intensity: 0.0,
            axis: Vec3::ZERO,
            offset: Vec2::ZERO,
            rng: XorShift32::new(0x2545_F491),
        }
    }
}

impl ShakeEffect {
    /// Create an idle shake (zero offset, zero intensity).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a shake that decays to zero over `duration` ticks.
    ///
    /// A zero duration, a non-positive intensity, or a zero-length axis
    /// leaves the effect idle. The axis is normalized here; callers pass any
    /// impulse direction (e.g. from an explosion toward the camera).
    pub fn arm(&mut self, duration: u32, intensity: f32, axis: Vec3) {
        let axis = axis.normalize_or_zero();
        if duration == 0 || intensity <= 0.0 || axis == Vec3::ZERO {
            self.clear();
            return;
        }
        self.ticks_remaining = duration;
        self.decrement = intensity / duration as f32;
        self.intensity = intensity;
        self.axis = axis;
        self.sample();
    }

    /// Advance the decay by one tick and resample the offset.
    pub fn tick(&mut self) {
        if self.ticks_remaining == 0 {
            return;
        }
        self.ticks_remaining -= 1;
        if self.ticks_remaining == 0 {
            self.clear();
        } else {
            // Derive intensity from the tick count so it hits exactly zero
            // instead of accumulating subtraction error.
            self.intensity = self.decrement * self.ticks_remaining as f32;
            self.sample();
        }
    }

    /// Reset to the idle state.
    pub fn clear(&mut self) {
        self.ticks_remaining = 0;
        self.decrement = 0.0;
        self.intensity = 0.0;
        self.axis = Vec3::ZERO;
        self.offset = Vec2::ZERO;
    }

    /// Current shake offset; exactly `(0, 0)` when idle.
    #[must_use]
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Current shake intensity; exactly `0` when idle.
    #[must_use]
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Whether a shake is currently active.
    #[must_use]
    #[inline]
    pub fn is_active(&self) -> bool {
        self.ticks_remaining > 0
    }

    /// Sample a fresh offset in the plane perpendicular to the axis.
    fn sample(&mut self) {
        // Build an orthonormal basis of the perpendicular plane. Fall back
        // to the X axis when the impulse is (anti)parallel to world up.
        let reference = if self.axis.y.abs() > 0.99 {
            Vec3::X
        } else {
            Vec3::Y
        };
        let u = self.axis.cross(reference).normalize_or_zero();
        let w = self.axis.cross(u);
        let jolt = u * self.rng.next_symmetric() + w * self.rng.next_symmetric();
        let jolt = jolt * self.intensity;
        self.offset = Vec2::new(jolt.x, jolt.y);
    }
}

/// Simple pseudo-random generator (deterministic for testing)
#[derive(Debug, Clone)]
struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Uniform in `[-1, 1)`.
    fn next_symmetric(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32) * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_shake_has_zero_offset() {
        let shake = ShakeEffect::new();
        assert_eq!(shake.offset(), Vec2::ZERO);
        assert_eq!(shake.intensity(), 0.0);
        assert!(!shake.is_active());
    }

    #[test]
    fn test_decay_terminates_exactly() {
        let mut shake = ShakeEffect::new();
        shake.arm(30, 100.0, Vec3::X);
        for _ in 0..30 {
            assert!(shake.is_active());
            shake.tick();
        }
        assert!(!shake.is_active());
        assert_eq!(shake.intensity(), 0.0);
        assert_eq!(shake.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_intensity_decreases_monotonically() {
        let mut shake = ShakeEffect::new();
        shake.arm(10, 50.0, Vec3::new(0.0, 0.0, 1.0));
        let mut last = shake.intensity();
        for _ in 0..10 {
            shake.tick();
            assert!(shake.intensity() < last);
            last = shake.intensity();
        }
    }

    #[test]
    fn test_offset_bounded_by_intensity() {
        let mut shake = ShakeEffect::new();
        shake.arm(20, 5.0, Vec3::X);
        for _ in 0..19 {
            // Two unit basis samples in [-1, 1) scaled by intensity
            assert!(shake.offset().length() <= 2.0 * shake.intensity() + f32::EPSILON);
            shake.tick();
        }
    }

    #[test]
    fn test_zero_axis_is_noop() {
        let mut shake = ShakeEffect::new();
        shake.arm(30, 100.0, Vec3::ZERO);
        assert!(!shake.is_active());
        assert_eq!(shake.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_zero_duration_is_noop() {
        let mut shake = ShakeEffect::new();
        shake.arm(0, 100.0, Vec3::X);
        assert!(!shake.is_active());
        assert_eq!(shake.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_vertical_axis_still_samples() {
        let mut shake = ShakeEffect::new();
        shake.arm(10, 10.0, Vec3::Y);
        assert!(shake.is_active());
        // The fallback basis keeps the offset finite
        assert!(shake.offset().is_finite());
    }

    #[test]
    fn test_rearm_replaces_running_shake() {
        let mut shake = ShakeEffect::new();
        shake.arm(100, 10.0, Vec3::X);
        shake.tick();
        shake.arm(5, 80.0, Vec3::Z);
        assert_eq!(shake.intensity(), 80.0);
        for _ in 0..5 {
            shake.tick();
        }
        assert_eq!(shake.offset(), Vec2::ZERO);
    }
}
