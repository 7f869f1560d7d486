// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Yaw estimation from the two-channel quadrature encoder and the reference marker.
//!
//! Both channels interrupt on both edges. Each edge moves the count by one step in the direction
//! given by [`quadrature_step`], and the count stays within a single rotation.

/// Direction of one edge, indexed by `(prev_a << 1) | current_b`.
const QUADRATURE_LOOKUP: [i8; 4] = [-1, 1, 1, -1];

/// Decode one edge into a `±1` step.
#[inline]
pub fn quadrature_step(prev_a: bool, current_b: bool) -> i8 {
    QUADRATURE_LOOKUP[(usize::from(prev_a) << 1) | usize::from(current_b)]
}

/// Edge counter for one rotation of the rig.
#[derive(Clone, Debug)]
pub struct Encoder {
    /// Always in `[0, edges)`.
    count: i32,
    edges: i32,
    prev_a: bool,
    current_a: bool,
    reference_seen: bool,
}

impl Encoder {
    /// `initial_a` is the channel A level sampled at start-up.
    pub const fn new(edges_per_rotation: i32, initial_a: bool) -> Self {
        Self {
            count: 0,
            edges: edges_per_rotation,
            prev_a: initial_a,
            current_a: initial_a,
            reference_seen: false,
        }
    }

    /// Quadrature interrupt body: `a` and `b` are the channel levels read after the edge.
    pub fn on_quadrature_edge(&mut self, a: bool, b: bool) {
        self.prev_a = self.current_a;
        self.current_a = a;
        let step = i32::from(quadrature_step(self.prev_a, b));
        self.count = (self.count + step).rem_euclid(self.edges);
    }

    /// Reference marker interrupt body. Zeroes the count on every pulse.
    ///
    /// Returns `true` only for the first pulse since start-up.
    pub fn on_reference_pulse(&mut self) -> bool {
        self.count = 0;
        if self.reference_seen {
            return false;
        }
        self.reference_seen = true;
        log::info!("yaw reference found");
        true
    }

    /// Yaw in degrees, wrapped into `(-180, 180]`.
    pub fn angle_degrees(&self) -> f32 {
        let angle = self.count as f32 * 360.0 / self.edges as f32;
        if angle > 180.0 {
            angle - 360.0
        } else {
            angle
        }
    }

    #[inline]
    pub fn count(&self) -> i32 {
        self.count
    }

    #[inline]
    pub fn reference_seen(&self) -> bool {
        self.reference_seen
    }
}
