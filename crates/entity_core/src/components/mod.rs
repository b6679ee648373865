//! Motion components composed into entities.
//!
//! Each component is an exclusively-owned sub-object of exactly one entity;
//! nothing here is shared across entities.

pub mod anim;
pub mod hacks;
pub mod interp;
pub mod physics;
pub mod tilt;

pub use anim::AnimatedState;
pub use hacks::Hacks;
pub use interp::{Interp, InterpState, NetInterp, lerp_angle};
pub use physics::{MoveIntent, PhysicsParams, PhysicsState};
pub use tilt::TiltState;
