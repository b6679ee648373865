//! Raw input snapshot and its mapping onto simulation intent.
//!
//! The platform layer fills an `InputState` per frame; the simulation only
//! ever sees the resolved `MoveIntent` and capability toggles, so key
//! bindings stay a client concern.

use entity_core::components::{Hacks, MoveIntent};
use net_core::location::clamp_angle;

/// Held-key snapshot for one frame of local player input.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub jump: bool,
    /// Ascend while flying (usually the jump key doubles for this).
    pub fly_up: bool,
    /// Descend while flying.
    pub fly_down: bool,
}

impl InputState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Resolve held keys into a movement intent for this tick.
    #[must_use]
    pub fn movement_intent(&self) -> MoveIntent {
        let axis = |pos: bool, neg: bool| f32::from(pos) - f32::from(neg);
        MoveIntent {
            forwards: axis(self.forward, self.backward),
            strafe: axis(self.strafe_right, self.strafe_left),
            jump: self.jump,
            fly_up: self.fly_up || (self.jump && !self.fly_down),
            fly_down: self.fly_down,
        }
    }
}

/// One-shot key presses that toggle local capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HackKey {
    ToggleFly,
    ToggleNoclip,
    ToggleSpeed,
    ToggleThirdPerson,
}

/// Apply a toggle press. Returns whether the press changed anything; a
/// press against a revoked capability is a silent no-op, matching how
/// servers expect restricted clients to behave.
pub fn handle_key(hacks: &mut Hacks, key: HackKey) -> bool {
    if !hacks.enabled {
        return false;
    }
    let changed = match key {
        HackKey::ToggleFly if hacks.can_fly => {
            hacks.flying = !hacks.flying;
            true
        }
        HackKey::ToggleNoclip if hacks.can_noclip && hacks.can_fly => {
            hacks.noclip = !hacks.noclip;
            // Noclip only makes sense while flying.
            if hacks.noclip {
                hacks.flying = true;
            }
            true
        }
        HackKey::ToggleSpeed if hacks.can_speed => {
            hacks.speeding = !hacks.speeding;
            true
        }
        HackKey::ToggleThirdPerson if hacks.can_third_person => {
            hacks.third_person = !hacks.third_person;
            true
        }
        _ => false,
    };
    hacks.check_consistency();
    changed
}

/// Mouse sensitivity and pitch limits for the look helper.
#[derive(Debug, Clone, Copy)]
pub struct LookConfig {
    pub degrees_per_count: f32,
    pub invert_y: bool,
    /// Pitch limits in signed degrees (straight down is -90).
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            degrees_per_count: 0.15,
            invert_y: false,
            min_pitch: -90.0,
            max_pitch: 90.0,
        }
    }
}

/// Apply a mouse delta to a (yaw, pitch) pair in normalized degrees.
/// Yaw wraps; pitch clamps against the configured limits.
#[must_use]
pub fn apply_mouse_delta(cfg: &LookConfig, yaw: f32, pitch: f32, dx: f32, dy: f32) -> (f32, f32) {
    let yaw = clamp_angle(yaw + dx * cfg.degrees_per_count);
    // Work in signed degrees so the clamp is symmetric around level.
    let mut p = if pitch > 180.0 { pitch - 360.0 } else { pitch };
    p += (if cfg.invert_y { dy } else { -dy }) * cfg.degrees_per_count;
    p = p.clamp(cfg.min_pitch, cfg.max_pitch);
    (yaw, clamp_angle(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn opposed_keys_cancel() {
        let input = InputState {
            forward: true,
            backward: true,
            strafe_left: true,
            ..InputState::default()
        };
        let intent = input.movement_intent();
        assert_eq!(intent.forwards, 0.0);
        assert_eq!(intent.strafe, -1.0);
    }

    #[test]
    fn jump_doubles_as_fly_up() {
        let input = InputState {
            jump: true,
            ..InputState::default()
        };
        assert!(input.movement_intent().fly_up);
    }

    #[test]
    fn noclip_toggle_requires_fly_capability() {
        let mut h = Hacks {
            can_fly: false,
            ..Hacks::default()
        };
        assert!(!handle_key(&mut h, HackKey::ToggleNoclip));
        assert!(!h.noclip);

        let mut h = Hacks::default();
        assert!(handle_key(&mut h, HackKey::ToggleNoclip));
        assert!(h.noclip && h.flying);
    }

    #[test]
    fn toggles_are_ignored_when_disabled() {
        let mut h = Hacks {
            enabled: false,
            ..Hacks::default()
        };
        assert!(!handle_key(&mut h, HackKey::ToggleFly));
        assert!(!h.flying);
    }

    #[test]
    fn pitch_clamps_and_yaw_wraps() {
        let cfg = LookConfig {
            degrees_per_count: 1.0,
            ..LookConfig::default()
        };
        let (yaw, pitch) = apply_mouse_delta(&cfg, 350.0, 0.0, 20.0, 1000.0);
        assert_abs_diff_eq!(yaw, 10.0, epsilon = 1e-4);
        // Large downward delta pins the pitch at straight down (270 deg).
        assert_abs_diff_eq!(pitch, 270.0, epsilon = 1e-4);
    }
}
