//! Per-session simulation context.
//!
//! Everything entity ticks read but do not own: the local player's resolved
//! input, physics tuning, display toggles, and the roster. Passed explicitly
//! so simulation state never hides in globals and tests can build as many
//! independent sessions as they like.

use crate::components::{MoveIntent, PhysicsParams};
use crate::render::{NameMode, ShadowMode};
use crate::tablist::TabList;

pub struct SimContext {
    /// The local player's movement intent for the current tick, written by
    /// the input layer before `tick_all`.
    pub local_intent: MoveIntent,
    pub physics: PhysicsParams,
    pub names: NameMode,
    pub shadows: ShadowMode,
    /// Entity render distance, meters.
    pub draw_distance: f32,
    pub tablist: TabList,
}

impl Default for SimContext {
    fn default() -> Self {
        Self {
            local_intent: MoveIntent::default(),
            physics: PhysicsParams::default(),
            names: NameMode::default(),
            shadows: ShadowMode::default(),
            draw_distance: 512.0,
            tablist: TabList::default(),
        }
    }
}

impl SimContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
