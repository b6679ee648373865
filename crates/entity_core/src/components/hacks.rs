//! Capability flags for the locally controlled actor.
//!
//! Server restrictions arrive as capability revocations; the active states
//! must be forced off together so the simulation never runs with an ability
//! the server has withdrawn.

#[derive(Clone, Copy, Debug)]
pub struct Hacks {
    /// Master switch; when off, every active state is forced off.
    pub enabled: bool,

    pub can_fly: bool,
    pub can_noclip: bool,
    pub can_speed: bool,
    pub can_respawn: bool,
    pub can_third_person: bool,

    pub flying: bool,
    pub noclip: bool,
    pub speeding: bool,
    pub third_person: bool,

    /// Horizontal speed multiplier applied while `speeding`.
    pub speed_multiplier: f32,
}

impl Default for Hacks {
    fn default() -> Self {
        Self {
            enabled: true,
            can_fly: true,
            can_noclip: true,
            can_speed: true,
            can_respawn: true,
            can_third_person: true,
            flying: false,
            noclip: false,
            speeding: false,
            third_person: false,
            speed_multiplier: 10.0,
        }
    }
}

impl Hacks {
    /// Grant or revoke every capability at once (server rule change).
    pub fn set_all(&mut self, allowed: bool) {
        self.can_fly = allowed;
        self.can_noclip = allowed;
        self.can_speed = allowed;
        self.can_respawn = allowed;
        self.can_third_person = allowed;
        self.check_consistency();
    }

    /// Force active states off wherever the matching capability is missing.
    /// Noclip requires fly: revoking fly turns both off.
    pub fn check_consistency(&mut self) {
        if !self.enabled || !self.can_fly {
            self.flying = false;
            self.noclip = false;
        }
        if !self.enabled || !self.can_noclip {
            self.noclip = false;
        }
        if !self.enabled || !self.can_speed {
            self.speeding = false;
        }
        if !self.enabled || !self.can_third_person {
            self.third_person = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoking_fly_forces_noclip_off() {
        let mut h = Hacks {
            flying: true,
            noclip: true,
            can_fly: false,
            ..Hacks::default()
        };
        h.check_consistency();
        assert!(!h.flying);
        assert!(!h.noclip);
    }

    #[test]
    fn master_switch_clears_active_states() {
        let mut h = Hacks {
            flying: true,
            speeding: true,
            third_person: true,
            enabled: false,
            ..Hacks::default()
        };
        h.check_consistency();
        assert!(!h.flying && !h.speeding && !h.third_person);
    }

    #[test]
    fn set_all_false_revokes_everything() {
        let mut h = Hacks {
            flying: true,
            speeding: true,
            ..Hacks::default()
        };
        h.set_all(false);
        assert!(!h.can_fly && !h.can_speed && !h.can_respawn);
        assert!(!h.flying && !h.speeding);
    }

    #[test]
    fn consistent_state_is_untouched() {
        let mut h = Hacks {
            flying: true,
            noclip: true,
            ..Hacks::default()
        };
        h.check_consistency();
        assert!(h.flying && h.noclip);
    }
}
