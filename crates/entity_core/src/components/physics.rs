//! Gravity/jump/liquid-drag integration for the locally simulated actor.
//!
//! Integration is re-entrant per tick and scales everything by the supplied
//! delta, so variable-length ticks from a fixed-step scheduler are safe.
//! Inputs are sanitized before the collision sweep so a non-finite velocity
//! can never corrupt the bounding box.

use collision_grid::{Aabb, BlockWorld, swept_move, touches_any};
use glam::Vec3;

use super::hacks::Hacks;

/// Positions beyond this magnitude are clamped (world-space sanity bound).
const MAX_POSITION: f32 = 1.0e6;

/// Tuning constants for local-player physics. Owned by the simulation
/// context, passed in each tick.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsParams {
    /// Downward acceleration, m/s^2.
    pub gravity: f32,
    /// Configured jump peak height in blocks; the jump impulse is solved
    /// from this and gravity.
    pub jump_height: f32,
    /// Base horizontal speed, m/s.
    pub base_speed: f32,
    /// How quickly horizontal velocity approaches the intended velocity,
    /// per second.
    pub acceleration: f32,
    /// Fraction of velocity kept per second while submerged.
    pub liquid_drag: f32,
    /// Climb speed on ropes/ladders, m/s.
    pub climb_speed: f32,
    /// Hard clamp on any velocity component, m/s.
    pub max_velocity: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: 32.0,
            jump_height: 1.25,
            base_speed: 4.3,
            acceleration: 10.0,
            liquid_drag: 0.25,
            climb_speed: 2.0,
            max_velocity: 80.0,
        }
    }
}

impl PhysicsParams {
    /// Upward impulse that peaks at exactly `jump_height` under `gravity`.
    #[must_use]
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.gravity * self.jump_height).sqrt()
    }

    /// Peak height reached by `jump_velocity` (inverse of the above).
    #[must_use]
    pub fn jump_peak(&self) -> f32 {
        let v = self.jump_velocity();
        v * v / (2.0 * self.gravity)
    }
}

/// Movement intent for one tick, already resolved from raw input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveIntent {
    /// Forward(+)/backward(-) in -1..=1.
    pub forwards: f32,
    /// Right(+)/left(-) in -1..=1.
    pub strafe: f32,
    pub jump: bool,
    pub fly_up: bool,
    pub fly_down: bool,
}

/// Transient contact state maintained across ticks.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhysicsState {
    pub on_ground: bool,
    pub in_liquid: bool,
    pub climbing: bool,
}

/// Advance one actor by `dt`: input acceleration, gravity or fly/climb/swim
/// vertical motion, drag, sanitization, then the axis-separated collision
/// sweep. Blocked axes zero the matching velocity component.
#[allow(clippy::too_many_arguments)]
pub fn step<W: BlockWorld + ?Sized>(
    world: &W,
    params: &PhysicsParams,
    hacks: &Hacks,
    intent: &MoveIntent,
    st: &mut PhysicsState,
    pos: &mut Vec3,
    vel: &mut Vec3,
    yaw_deg: f32,
    size: Vec3,
    dt: f32,
) {
    sanitize(pos, MAX_POSITION);
    sanitize(vel, params.max_velocity);

    let bb = Aabb::from_feet(*pos, size);
    st.in_liquid = touches_any(world, &bb, |b| world.is_liquid(b));
    st.climbing = touches_any(world, &bb, |b| world.is_climbable(b));

    // Horizontal: approach the intended velocity in the facing frame.
    let mut speed = params.base_speed;
    if hacks.speeding && hacks.can_speed {
        speed *= hacks.speed_multiplier;
    }
    if st.in_liquid {
        speed *= 0.5;
    }
    let (s, c) = yaw_deg.to_radians().sin_cos();
    let fwd = Vec3::new(-s, 0.0, c);
    let right = Vec3::new(c, 0.0, s);
    let mut dir = fwd * intent.forwards + right * intent.strafe;
    if dir.length_squared() > 1.0 {
        dir = dir.normalize();
    }
    let desired = dir * speed;
    let blend = (params.acceleration * dt).min(1.0);
    vel.x += (desired.x - vel.x) * blend;
    vel.z += (desired.z - vel.z) * blend;

    // Vertical.
    if hacks.flying {
        let target = if intent.fly_up {
            speed
        } else if intent.fly_down {
            -speed
        } else {
            0.0
        };
        vel.y += (target - vel.y) * blend;
    } else if st.climbing {
        vel.y = if intent.jump || intent.fly_up {
            params.climb_speed
        } else if intent.fly_down {
            -params.climb_speed
        } else {
            vel.y * 0.3
        };
    } else if st.in_liquid {
        vel.y -= params.gravity * 0.25 * dt;
        if intent.jump {
            vel.y = params.climb_speed;
        }
        let keep = params.liquid_drag.powf(dt);
        vel.y *= keep;
    } else {
        if intent.jump && st.on_ground {
            vel.y = params.jump_velocity();
            st.on_ground = false;
        }
        vel.y -= params.gravity * dt;
    }

    sanitize(vel, params.max_velocity);

    let disp = *vel * dt;
    if hacks.noclip {
        *pos += disp;
        st.on_ground = false;
        return;
    }
    let sweep = swept_move(world, bb, disp);
    *pos += sweep.moved;
    st.on_ground = sweep.blocked[1] && disp.y < 0.0;
    for axis in 0..3 {
        if sweep.blocked[axis] {
            vel[axis] = 0.0;
        }
    }
}

/// Zero non-finite components and clamp magnitude per axis.
fn sanitize(v: &mut Vec3, limit: f32) {
    if !v.x.is_finite() {
        v.x = 0.0;
    }
    if !v.y.is_finite() {
        v.y = 0.0;
    }
    if !v.z.is_finite() {
        v.z = 0.0;
    }
    *v = v.clamp(Vec3::splat(-limit), Vec3::splat(limit));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::IVec3;

    struct FlatWorld;
    impl BlockWorld for FlatWorld {
        fn block_at(&self, cell: IVec3) -> u16 {
            u16::from(cell.y < 0)
        }
        fn is_solid(&self, block: u16) -> bool {
            block == 1
        }
    }

    const SIZE: Vec3 = Vec3::new(0.6, 1.8, 0.6);

    fn settle(st: &mut PhysicsState, pos: &mut Vec3, vel: &mut Vec3) {
        let p = PhysicsParams::default();
        let h = Hacks::default();
        for _ in 0..50 {
            step(
                &FlatWorld,
                &p,
                &h,
                &MoveIntent::default(),
                st,
                pos,
                vel,
                0.0,
                SIZE,
                0.05,
            );
        }
    }

    #[test]
    fn falls_and_lands_on_ground() {
        let mut st = PhysicsState::default();
        let mut pos = Vec3::new(0.5, 5.0, 0.5);
        let mut vel = Vec3::ZERO;
        settle(&mut st, &mut pos, &mut vel);
        assert!(st.on_ground);
        assert_abs_diff_eq!(pos.y, 0.0, epsilon = 0.01);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn jump_peaks_at_configured_height() {
        let p = PhysicsParams::default();
        assert_abs_diff_eq!(p.jump_peak(), p.jump_height, epsilon = 1e-5);

        let mut st = PhysicsState::default();
        let mut pos = Vec3::new(0.5, 5.0, 0.5);
        let mut vel = Vec3::ZERO;
        settle(&mut st, &mut pos, &mut vel);

        let h = Hacks::default();
        let mut intent = MoveIntent {
            jump: true,
            ..MoveIntent::default()
        };
        let mut peak: f32 = 0.0;
        for _ in 0..200 {
            step(
                &FlatWorld, &p, &h, &intent, &mut st, &mut pos, &mut vel, 0.0, SIZE, 0.005,
            );
            intent.jump = false;
            peak = peak.max(pos.y);
            if st.on_ground && peak > 0.0 {
                break;
            }
        }
        // Discrete integration undershoots the analytic peak slightly.
        assert!(peak > p.jump_height * 0.8, "peak {peak}");
        assert!(peak < p.jump_height * 1.1, "peak {peak}");
    }

    #[test]
    fn non_finite_velocity_is_sanitized() {
        let p = PhysicsParams::default();
        let h = Hacks::default();
        let mut st = PhysicsState::default();
        let mut pos = Vec3::new(0.5, 2.0, 0.5);
        let mut vel = Vec3::new(f32::NAN, f32::INFINITY, 1.0e30);
        step(
            &FlatWorld,
            &p,
            &h,
            &MoveIntent::default(),
            &mut st,
            &mut pos,
            &mut vel,
            0.0,
            SIZE,
            0.05,
        );
        assert!(pos.is_finite());
        assert!(vel.is_finite());
        assert!(vel.z.abs() <= p.max_velocity);
    }

    #[test]
    fn noclip_ignores_terrain() {
        let p = PhysicsParams::default();
        let h = Hacks {
            flying: true,
            noclip: true,
            ..Hacks::default()
        };
        let mut st = PhysicsState::default();
        let mut pos = Vec3::new(0.5, 1.0, 0.5);
        let mut vel = Vec3::ZERO;
        let intent = MoveIntent {
            fly_down: true,
            ..MoveIntent::default()
        };
        for _ in 0..100 {
            step(
                &FlatWorld, &p, &h, &intent, &mut st, &mut pos, &mut vel, 0.0, SIZE, 0.05,
            );
        }
        assert!(pos.y < -1.0, "pos.y {}", pos.y);
        assert!(!st.on_ground);
    }

    #[test]
    fn forward_intent_moves_along_facing() {
        let p = PhysicsParams::default();
        let h = Hacks::default();
        let mut st = PhysicsState::default();
        let mut pos = Vec3::new(0.5, 0.001, 0.5);
        let mut vel = Vec3::ZERO;
        let intent = MoveIntent {
            forwards: 1.0,
            ..MoveIntent::default()
        };
        for _ in 0..40 {
            step(
                &FlatWorld, &p, &h, &intent, &mut st, &mut pos, &mut vel, 0.0, SIZE, 0.05,
            );
        }
        // Yaw 0 faces +Z.
        assert!(pos.z > 2.0, "pos.z {}", pos.z);
        assert_abs_diff_eq!(pos.x, 0.5, epsilon = 1e-3);
    }
}
