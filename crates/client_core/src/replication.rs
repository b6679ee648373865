//! Applies decoded net events to the entity registry and roster.
//!
//! The transport thread decodes packets into `NetEvent`s and queues them;
//! the simulation thread drains the queue here once per tick, before
//! `tick_all`. One malformed or mistimed event is logged and dropped, never
//! allowed to stall the rest of the stream.

use entity_core::entity::{Entity, LocalPlayerState, NetPlayerState, Variant};
use entity_core::render::GfxContext;
use entity_core::{EntityId, Registry, SimContext};
use net_core::channel::{NetEvent, Rx};

/// Counters for one drain pass, mostly for log lines and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpStats {
    pub applied: usize,
    pub dropped: usize,
}

/// Drains a net event queue into a registry and context.
pub struct ReplicationPump {
    rx: Rx,
}

impl ReplicationPump {
    #[must_use]
    pub fn new(rx: Rx) -> Self {
        Self { rx }
    }

    /// Apply every queued event. Call once per simulation tick.
    pub fn pump(
        &mut self,
        reg: &mut Registry,
        ctx: &mut SimContext,
        gfx: &mut dyn GfxContext,
    ) -> PumpStats {
        let mut stats = PumpStats::default();
        for ev in self.rx.drain() {
            if apply_event(reg, ctx, gfx, ev) {
                stats.applied += 1;
            } else {
                stats.dropped += 1;
            }
        }
        if stats.dropped > 0 {
            log::warn!("dropped {} of {} net events", stats.dropped, stats.applied + stats.dropped);
        }
        stats
    }
}

fn apply_event(
    reg: &mut Registry,
    ctx: &mut SimContext,
    gfx: &mut dyn GfxContext,
    ev: NetEvent,
) -> bool {
    match ev {
        NetEvent::Spawn {
            id,
            name,
            skin,
            update,
        } => {
            let id = EntityId::new(id);
            if id.is_self() {
                spawn_local(reg, &name, &skin, &update)
            } else {
                let mut e = Entity::new(Variant::Net(NetPlayerState::default()));
                if let Variant::Net(n) = &mut e.variant {
                    n.identity.set_name(&name, &skin);
                }
                e.set_location(&update, false);
                match reg.spawn(id, e) {
                    Ok(_) => true,
                    Err(err) => {
                        log::warn!("spawn rejected: {err}");
                        false
                    }
                }
            }
        }
        NetEvent::Despawn { id } => {
            let id = EntityId::new(id);
            let removed = reg.despawn(id, gfx);
            if !removed {
                log::warn!("despawn for empty entity slot {id}");
            }
            removed
        }
        NetEvent::Location {
            id,
            update,
            interpolate,
        } => {
            let id = EntityId::new(id);
            // A missing slot is logged inside, but the stream keeps going.
            let present = reg.get(id).is_some();
            reg.apply_location(id, &update, interpolate);
            present
        }
        NetEvent::TabSet {
            id,
            player,
            list,
            group,
            rank,
        } => {
            ctx.tablist
                .set(EntityId::new(id), &player, &list, &group, rank);
            true
        }
        NetEvent::TabRemove { id } => ctx.tablist.remove(EntityId::new(id)),
    }
}

/// Spawn (or re-anchor) the local player. The position in the self spawn
/// message becomes the respawn anchor.
fn spawn_local(reg: &mut Registry, name: &str, skin: &str, update: &net_core::LocationUpdate) -> bool {
    if reg.local().is_none() {
        let local = Entity::new(Variant::Local(LocalPlayerState::default()));
        if let Err(err) = reg.spawn(entity_core::SELF_ID, local) {
            log::warn!("local spawn rejected: {err}");
            return false;
        }
    }
    let Some(e) = reg.local_mut() else {
        return false;
    };
    e.set_location(update, false);
    if let Variant::Local(l) = &mut e.variant {
        l.identity.set_name(name, skin);
        l.spawn = e.state.pos;
        l.spawn_rot_y = e.state.rot_y;
        l.spawn_head_x = e.state.head_x;
    }
    true
}
