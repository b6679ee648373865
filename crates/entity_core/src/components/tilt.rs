//! Camera tilt/bob for the locally controlled actor.
//!
//! A small roll kicked by lateral velocity changes and decayed every tick.
//! Remote entities never carry this component.

use glam::Vec3;

/// Roll gained per m/s of lateral velocity change.
const KICK: f32 = 0.35;
/// Fraction of the tilt removed per second.
const DECAY_PER_SEC: f32 = 4.0;
const MAX_TILT_RAD: f32 = 0.09;

#[derive(Clone, Copy, Debug, Default)]
pub struct TiltState {
    tilt: f32,
    prev_tilt: f32,
}

impl TiltState {
    /// Feed this tick's velocity next to the previous tick's.
    pub fn update(&mut self, vel: Vec3, old_vel: Vec3, dt: f32) {
        self.prev_tilt = self.tilt;
        let dv = vel - old_vel;
        let lateral = (dv.x * dv.x + dv.z * dv.z).sqrt();
        self.tilt = (self.tilt + lateral * KICK).min(MAX_TILT_RAD);
        self.tilt -= self.tilt * (DECAY_PER_SEC * dt).min(1.0);
    }

    /// Camera roll in radians, blended between ticks.
    #[must_use]
    pub fn roll(&self, blend: f32) -> f32 {
        self.prev_tilt + (self.tilt - self.prev_tilt) * blend
    }
}
