//! Fixed-capacity entity table indexed by `EntityId`.
//!
//! Slot 255 is reserved for the local player. Iteration is always in
//! ascending id order, so remote entities tick before the local actor and
//! render order is stable frame to frame.

use collision_grid::BlockWorld;
use glam::Vec3;
use net_core::LocationUpdate;
use std::fmt;

use crate::context::SimContext;
use crate::entity::{Entity, Variant};
use crate::render::{EntityRenderer, GfxContext, NameMode, ShadowMode};
use crate::{EntityId, MAX_ENTITIES, SELF_ID};

#[derive(Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Spawn addressed to a slot that is already occupied.
    Occupied(EntityId),
    /// A non-local variant was addressed to the reserved local slot, or the
    /// local variant to a remote slot.
    WrongSlot(EntityId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied(id) => write!(f, "entity slot {id} is already occupied"),
            Self::WrongSlot(id) => write!(f, "variant not allowed in slot {id}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// All live entities for a session.
pub struct Registry {
    slots: Vec<Option<Entity>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            slots: (0..MAX_ENTITIES).map(|_| None).collect(),
        }
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `entity` in slot `id`. A duplicate spawn is rejected rather
    /// than silently replacing the resident; callers must despawn first.
    /// The local variant may only occupy the reserved slot, and vice versa.
    pub fn spawn(&mut self, id: EntityId, entity: Entity) -> Result<&mut Entity, RegistryError> {
        let local_variant = matches!(entity.variant, Variant::Local(_));
        if local_variant != id.is_self() {
            return Err(RegistryError::WrongSlot(id));
        }
        let slot = &mut self.slots[id.index()];
        if slot.is_some() {
            return Err(RegistryError::Occupied(id));
        }
        Ok(slot.insert(entity))
    }

    /// Remove the entity in `id`, releasing its GPU resources first.
    /// Returns whether the slot was occupied.
    pub fn despawn(&mut self, id: EntityId, gfx: &mut dyn GfxContext) -> bool {
        match self.slots[id.index()].take() {
            Some(mut e) => {
                e.despawn(gfx);
                true
            }
            None => false,
        }
    }

    /// Despawn everything, local player included (leaving a world).
    pub fn despawn_all(&mut self, gfx: &mut dyn GfxContext) {
        for slot in &mut self.slots {
            if let Some(mut e) = slot.take() {
                e.despawn(gfx);
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots[id.index()].as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots[id.index()].as_mut()
    }

    /// The local player, if spawned.
    #[must_use]
    pub fn local(&self) -> Option<&Entity> {
        self.get(SELF_ID)
    }

    pub fn local_mut(&mut self) -> Option<&mut Entity> {
        self.get_mut(SELF_ID)
    }

    /// Occupied slots in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (EntityId::new(i as u8), e)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|e| (EntityId::new(i as u8), e)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Route a location update to a slot. A missing slot is logged and
    /// dropped; one bad id must not stop the rest of the stream.
    pub fn apply_location(&mut self, id: EntityId, update: &LocationUpdate, interpolate: bool) {
        match self.get_mut(id) {
            Some(e) => e.set_location(update, interpolate),
            None => log::warn!("location update for empty entity slot {id}"),
        }
    }

    /// Advance every entity by `dt`. Remote entities first, the local
    /// player last, so prediction sees this tick's remote state.
    pub fn tick_all<W: BlockWorld + ?Sized>(&mut self, world: &W, ctx: &SimContext, dt: f32) {
        for (_, e) in self.iter_mut() {
            e.tick(world, ctx, dt);
        }
    }

    /// Id of the occupied slot closest to `from`'s eye position, excluding
    /// `from` itself. Used for auto-targeting and hover name labels.
    #[must_use]
    pub fn find_nearest(&self, from: EntityId) -> Option<EntityId> {
        let eye = self.get(from)?.state.eye_position();
        self.closest_to_point(eye, Some(from))
    }

    /// Id of the entity whose picking bounds are closest to `eye`.
    #[must_use]
    pub fn closest_to_point(&self, eye: Vec3, exclude: Option<EntityId>) -> Option<EntityId> {
        let mut best: Option<(EntityId, f32)> = None;
        for (id, e) in self.iter() {
            if exclude == Some(id) {
                continue;
            }
            let bb = e.state.picking_bounds();
            let d = eye.clamp(bb.min, bb.max).distance_squared(eye);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Ids of entities that cast a shadow under the context's shadow mode:
    /// only the local player unless the mode covers everyone.
    #[must_use]
    pub fn shadow_casters(&self, ctx: &SimContext) -> Vec<EntityId> {
        match ctx.shadows {
            ShadowMode::None => Vec::new(),
            ShadowMode::SnapToBlock | ShadowMode::Circle => self
                .local()
                .is_some()
                .then_some(SELF_ID)
                .into_iter()
                .collect(),
            ShadowMode::CircleAll => self.iter().map(|(id, _)| id).collect(),
        }
    }

    /// Draw visible entities in id order; name labels follow the context's
    /// name mode. Entities whose bounds lie beyond the draw distance from
    /// the local player's eye are skipped (and remote players remember the
    /// verdict in `should_render`). With no local player everything draws.
    pub fn render_all(&mut self, renderer: &mut dyn EntityRenderer, ctx: &SimContext, blend: f32) {
        let eye = self.local().map(|e| e.state.eye_position());
        for (_, e) in self.iter_mut() {
            let visible = eye.is_none_or(|eye| e.should_render(eye, ctx.draw_distance));
            if let Variant::Net(n) = &mut e.variant {
                n.should_render = visible;
            }
            if !visible {
                continue;
            }
            renderer.draw_model(e, blend);
            match ctx.names {
                NameMode::None | NameMode::Hovered => {}
                NameMode::All | NameMode::AllHovered | NameMode::AllUnscaled => {
                    if e.display_name().is_some() {
                        renderer.draw_name(e);
                    }
                }
            }
        }
    }

    /// Device reset notifications, fanned out to every entity.
    pub fn context_lost(&mut self) {
        for (_, e) in self.iter_mut() {
            e.context_lost();
        }
    }

    pub fn context_recreated(&mut self) {
        for (_, e) in self.iter_mut() {
            e.context_recreated();
        }
    }
}
