//! Limb-swing animation derived from accumulated horizontal movement.
//!
//! Purely a function of (speed, time); never feeds back into physics.

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Radians of walk-cycle phase accumulated per meter travelled.
const WALK_CYCLE_RATE: f32 = 3.0;
/// How fast the swing amplitude ramps toward its target, per second.
const SWING_RAMP: f32 = 3.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct AnimatedState {
    walk_time: f32,
    swing: f32,
    prev_walk_time: f32,
    prev_swing: f32,
}

impl AnimatedState {
    /// Advance the walk cycle from the horizontal distance covered this tick.
    pub fn update(&mut self, old_pos: Vec3, new_pos: Vec3, dt: f32) {
        self.prev_walk_time = self.walk_time;
        self.prev_swing = self.swing;

        let dx = new_pos.x - old_pos.x;
        let dz = new_pos.z - old_pos.z;
        let dist = (dx * dx + dz * dz).sqrt();
        self.walk_time += dist * WALK_CYCLE_RATE;

        let target = if dist > 1e-5 { 1.0 } else { 0.0 };
        let max_step = SWING_RAMP * dt;
        self.swing += (target - self.swing).clamp(-max_step, max_step);
        self.swing = self.swing.clamp(0.0, 1.0);
    }

    /// Leg swing angle in radians, blended between the previous and current
    /// tick by `blend`.
    #[must_use]
    pub fn leg_angle(&self, blend: f32) -> f32 {
        let wt = lerp(self.prev_walk_time, self.walk_time, blend);
        let sw = lerp(self.prev_swing, self.swing, blend);
        wt.sin() * sw * FRAC_PI_2
    }

    /// Arm swing angle; opposite phase to the legs.
    #[must_use]
    pub fn arm_angle(&self, blend: f32) -> f32 {
        -self.leg_angle(blend)
    }

    #[must_use]
    pub fn swing(&self) -> f32 {
        self.swing
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
