//! `entity_core`: the entity simulation and reconciliation core.
//!
//! Owns the in-memory representation of every visible actor, advances their
//! physical state each tick, and reconciles server-issued location updates
//! against locally predicted motion. Rendering, windowing, transport, and
//! block storage are external collaborators reached through traits.

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::struct_excessive_bools)]
#![allow(clippy::iter_without_into_iter)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp,
    clippy::must_use_candidate
)]

use std::fmt;

pub mod components;
pub mod context;
pub mod entity;
pub mod model;
pub mod player;
pub mod registry;
pub mod render;
pub mod tablist;

pub use context::SimContext;
pub use entity::{Entity, Variant};
pub use registry::{Registry, RegistryError};

/// Total slot capacity of the entity registry.
pub const MAX_ENTITIES: usize = 256;

/// Slot id reserved for the locally controlled player for the lifetime of a
/// session.
pub const SELF_ID: EntityId = EntityId(255);

/// Small integer entity id. Every `u8` value is addressable: 0..=254 are
/// remote players and mobs, 255 is the local actor, so out-of-range ids are
/// rejected structurally at the transport boundary by the type itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u8);

impl EntityId {
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_self(self) -> bool {
        self.0 == SELF_ID.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
