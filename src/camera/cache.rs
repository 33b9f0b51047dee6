//! Bounded cache for computed visible quads
//!
//! The camera pose is often identical for many consecutive frames (idle
//! camera, paused game), so the frustum footprint is memoized. Lookups are
//! exact: keys compare the raw bit patterns of the pose floats, so any
//! drift — even from clamping — is a miss that simply recomputes.
//!
//! The original design kept a three-level `angle -> angle -> position` map;
//! here the three levels collapse into one composite key in a flat
//! `FxHashMap`, which makes the exact-match and eviction contract explicit.

use glam::Vec3;
use rustc_hash::FxHashMap;

use super::quad::Quad2;

/// Composite cache key: bit patterns of `(h_ang, v_ang, position)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadKey {
    h_bits: u32,
    v_bits: u32,
    pos_bits: [u32; 3],
}

impl QuadKey {
    /// Build a key from a camera pose.
    #[must_use]
    pub fn new(h_ang: f32, v_ang: f32, pos: Vec3) -> Self {
        Self {
            h_bits: h_ang.to_bits(),
            v_bits: v_ang.to_bits(),
            pos_bits: [pos.x.to_bits(), pos.y.to_bits(), pos.z.to_bits()],
        }
    }
}

/// Bounded memo of frustum footprints keyed by exact camera pose.
///
/// Eviction policy: when an insert would push the entry count past the
/// capacity, the whole map is cleared. Correctness never depends on what is
/// evicted — a future miss recomputes — only on the bound being respected.
/// The most recent entry is additionally kept aside so the common
/// pose-unchanged frame skips even the map lookup.
#[derive(Debug, Clone)]
pub struct VisibleQuadCache {
    entries: FxHashMap<QuadKey, Quad2>,
    capacity: usize,
    last: Option<(QuadKey, Quad2)>,
    hits: u64,
    misses: u64,
}

impl VisibleQuadCache {
    /// Create a cache holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity,
            last: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a quad for an exact pose key.
    #[must_use]
    pub fn get(&mut self, key: &QuadKey) -> Option<Quad2> {
        if let Some((last_key, quad)) = self.last
            && last_key == *key
        {
            self.hits += 1;
            return Some(quad);
        }
        match self.entries.get(key) {
            Some(&quad) => {
                self.hits += 1;
                self.last = Some((*key, quad));
                Some(quad)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a freshly computed quad, evicting if over budget.
    pub fn insert(&mut self, key: QuadKey, quad: Quad2) {
        if self.capacity == 0 {
            self.last = Some((key, quad));
            return;
        }
        if self.entries.len() >= self.capacity {
            log::debug!(
                "visible-quad cache full ({} entries), clearing",
                self.entries.len()
            );
            self.entries.clear();
        }
        self.entries.insert(key, quad);
        self.last = Some((key, quad));
    }

    /// Number of cached entries (excluding the last-pose fast path).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured maximum entry count.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity; shrinking clears existing entries.
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity < self.entries.len() {
            self.entries.clear();
        }
        self.capacity = capacity;
    }

    /// Drop all cached quads.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.last = None;
    }

    /// `(hits, misses)` counters for debugging.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
