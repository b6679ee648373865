//! Position/orientation smoothing.
//!
//! `Interp` blends the locally simulated actor between consecutive
//! simulation ticks. `NetInterp` blends remote actors toward targets that
//! arrive asynchronously and at a lower rate than the render loop, with
//! bounded orientation extrapolation to hide network jitter.

use glam::Vec3;
use net_core::location::{
    FLAG_HEAD_X, FLAG_HEAD_Y, FLAG_POS, FLAG_ROT_X, FLAG_ROT_Z, LocationUpdate, clamp_angle,
};

/// Expected interval between server location updates, in seconds.
pub const UPDATE_INTERVAL: f32 = 0.1;
/// Orientation advances this much faster than position...
const ORI_GAIN: f32 = 1.25;
/// ...but never runs more than one full update interval past the sample.
const MAX_ORI_PROGRESS: f32 = 2.0;

/// One discrete spatial sample: position plus the full set of orientation
/// angles (degrees). Head and body rotate independently for rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InterpState {
    pub pos: Vec3,
    /// Head pitch.
    pub head_x: f32,
    /// Head yaw.
    pub head_y: f32,
    /// Body roll about X.
    pub rot_x: f32,
    /// Body yaw.
    pub rot_y: f32,
    /// Body roll about Z.
    pub rot_z: f32,
}

impl InterpState {
    /// Apply the present fields of `update`. Absolute position overwrites;
    /// relative position adds to the current value. Absent fields are left
    /// unmodified.
    pub fn apply(&mut self, update: &LocationUpdate) {
        if update.has(FLAG_POS) {
            if update.relative_pos {
                self.pos += update.pos;
            } else {
                self.pos = update.pos;
            }
        }
        if update.has(FLAG_HEAD_X) {
            self.head_x = update.head_x;
        }
        if update.has(FLAG_HEAD_Y) {
            self.head_y = update.head_y;
            // Updates carry no separate body yaw; the body turns with the head.
            self.rot_y = update.head_y;
        }
        if update.has(FLAG_ROT_X) {
            self.rot_x = update.rot_x;
        }
        if update.has(FLAG_ROT_Z) {
            self.rot_z = update.rot_z;
        }
    }

    #[must_use]
    fn blend(&self, to: &InterpState, pos_t: f32, ori_t: f32) -> InterpState {
        InterpState {
            pos: self.pos.lerp(to.pos, pos_t),
            head_x: lerp_angle(self.head_x, to.head_x, ori_t),
            head_y: lerp_angle(self.head_y, to.head_y, ori_t),
            rot_x: lerp_angle(self.rot_x, to.rot_x, ori_t),
            rot_y: lerp_angle(self.rot_y, to.rot_y, ori_t),
            rot_z: lerp_angle(self.rot_z, to.rot_z, ori_t),
        }
    }
}

/// Interpolates degrees along the shortest arc; `t` beyond 1 extrapolates.
#[must_use]
pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    let mut d = (b - a) % 360.0;
    if d > 180.0 {
        d -= 360.0;
    }
    if d < -180.0 {
        d += 360.0;
    }
    clamp_angle(a + d * t)
}

/// Tick-to-tick smoothing for the locally simulated actor: physics writes
/// `next`, the render step blends from `prev`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interp {
    pub prev: InterpState,
    pub next: InterpState,
}

impl Interp {
    /// Queue `update` as the new target. With `interpolate` false the state
    /// snaps instantly (teleports, respawns).
    pub fn set_location(&mut self, update: &LocationUpdate, interpolate: bool) {
        self.next.apply(update);
        if !interpolate {
            self.prev = self.next;
        }
    }

    /// Promote the current target to the blend origin at the start of a tick.
    pub fn shift(&mut self) {
        self.prev = self.next;
    }

    /// State at render fraction `t` in `[0, 1)` between the last two ticks.
    #[must_use]
    pub fn blended(&self, t: f32) -> InterpState {
        self.prev.blend(&self.next, t, t)
    }
}

/// Network smoothing for remote actors: last-known sample, next target, and
/// normalized progress between them.
#[derive(Clone, Copy, Debug, Default)]
pub struct NetInterp {
    prev: InterpState,
    next: InterpState,
    progress: f32,
}

impl NetInterp {
    /// Queue a new target. The current blended value becomes the new
    /// last-known sample so no frame is skipped, even when the previous
    /// blend had not finished. Relative position deltas apply to the last
    /// known *target*, not the in-flight blended position.
    pub fn set_location(&mut self, update: &LocationUpdate, interpolate: bool) {
        if interpolate {
            self.prev = self.current();
            self.next.apply(update);
            self.progress = 0.0;
        } else {
            self.next.apply(update);
            self.prev = self.next;
            self.progress = 1.0;
        }
    }

    /// Advance blending by `dt` seconds of render time.
    pub fn advance(&mut self, dt: f32) {
        self.progress = (self.progress + dt / UPDATE_INTERVAL).min(1.0);
    }

    /// Current blended state. Position is clamped to the target;
    /// orientation may extrapolate slightly past it.
    #[must_use]
    pub fn current(&self) -> InterpState {
        let ori_t = (self.progress * ORI_GAIN).min(MAX_ORI_PROGRESS);
        self.prev.blend(&self.next, self.progress, ori_t)
    }

    /// The queued target state (end of the current blend).
    #[must_use]
    pub fn target(&self) -> &InterpState {
        &self.next
    }
}
