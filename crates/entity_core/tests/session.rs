//! Whole-session scenarios: a registry, a context, and a stream of ticks.

use collision_grid::BlockWorld;
use entity_core::components::MoveIntent;
use entity_core::entity::{Entity, LocalPlayerState, NetPlayerState, Variant};
use entity_core::render::NullGfx;
use entity_core::{EntityId, Registry, RegistryError, SELF_ID, SimContext};
use glam::{IVec3, Vec3};
use net_core::LocationUpdate;

struct FlatWorld;
impl BlockWorld for FlatWorld {
    fn block_at(&self, cell: IVec3) -> u16 {
        u16::from(cell.y < 0)
    }
    fn is_solid(&self, block: u16) -> bool {
        block == 1
    }
}

fn spawn_local(reg: &mut Registry) {
    let local = Entity::new(Variant::Local(LocalPlayerState::default()));
    reg.spawn(SELF_ID, local).unwrap();
}

#[test]
fn remote_player_approaches_target_monotonically() {
    let mut reg = Registry::new();
    let ctx = SimContext::default();
    let id = EntityId::new(1);
    reg.spawn(id, Entity::new(Variant::Net(NetPlayerState::default())))
        .unwrap();

    reg.apply_location(id, &LocationUpdate::position(Vec3::new(5.0, 0.0, 0.0), false), true);

    // Render at 60 Hz against a 10 Hz update stream.
    let mut last_x = 0.0;
    for _ in 0..30 {
        reg.tick_all(&FlatWorld, &ctx, 1.0 / 60.0);
        let x = reg.get(id).unwrap().state.pos.x;
        assert!(x >= last_x, "x went backwards: {last_x} -> {x}");
        assert!(x <= 5.0 + 1e-4, "overshot: {x}");
        last_x = x;
    }
    assert!((last_x - 5.0).abs() < 1e-3, "never arrived: {last_x}");
}

#[test]
fn stream_of_relative_updates_accumulates() {
    let mut reg = Registry::new();
    let ctx = SimContext::default();
    let id = EntityId::new(2);
    reg.spawn(id, Entity::new(Variant::Net(NetPlayerState::default())))
        .unwrap();

    reg.apply_location(id, &LocationUpdate::position(Vec3::ZERO, false), false);
    for _ in 0..10 {
        reg.apply_location(id, &LocationUpdate::position(Vec3::new(0.5, 0.0, 0.0), true), true);
        for _ in 0..6 {
            reg.tick_all(&FlatWorld, &ctx, 1.0 / 60.0);
        }
    }
    let x = reg.get(id).unwrap().state.pos.x;
    assert!((x - 5.0).abs() < 1e-2, "x {x}");
}

#[test]
fn local_player_walks_under_prediction() {
    let mut reg = Registry::new();
    let mut ctx = SimContext::default();
    spawn_local(&mut reg);
    reg.local_mut().unwrap().state.pos = Vec3::new(0.5, 0.0, 0.5);

    ctx.local_intent = MoveIntent {
        forwards: 1.0,
        ..MoveIntent::default()
    };
    for _ in 0..60 {
        reg.tick_all(&FlatWorld, &ctx, 1.0 / 20.0);
    }
    let local = reg.local().unwrap();
    assert!(local.state.pos.z > 5.0, "z {}", local.state.pos.z);
    assert!(local.state.on_ground);

    // Stopping decays velocity back toward rest.
    ctx.local_intent = MoveIntent::default();
    for _ in 0..60 {
        reg.tick_all(&FlatWorld, &ctx, 1.0 / 20.0);
    }
    let local = reg.local().unwrap();
    assert!(local.state.vel.length() < 0.05, "vel {}", local.state.vel);
}

#[test]
fn despawn_then_respawn_starts_fresh() {
    let mut reg = Registry::new();
    let ctx = SimContext::default();
    let mut gfx = NullGfx::default();
    let id = EntityId::new(3);

    reg.spawn(id, Entity::new(Variant::Net(NetPlayerState::default())))
        .unwrap();
    reg.apply_location(id, &LocationUpdate::position(Vec3::new(9.0, 0.0, 9.0), false), false);
    reg.tick_all(&FlatWorld, &ctx, 0.05);

    assert_eq!(
        reg.spawn(id, Entity::new(Variant::Net(NetPlayerState::default())))
            .unwrap_err(),
        RegistryError::Occupied(id)
    );

    assert!(reg.despawn(id, &mut gfx));
    reg.spawn(id, Entity::new(Variant::Net(NetPlayerState::default())))
        .unwrap();
    // No state leaks from the previous resident of the slot.
    assert_eq!(reg.get(id).unwrap().state.pos, Vec3::ZERO);
}

#[test]
fn roster_survives_entity_churn() {
    let mut reg = Registry::new();
    let mut ctx = SimContext::default();
    let mut gfx = NullGfx::default();
    let id = EntityId::new(10);

    // Roster entry without a spawned entity is fine.
    ctx.tablist.set(id, "carol", "Carol", "ops", 0);
    assert_eq!(ctx.tablist.get(id).unwrap().player, "carol");

    reg.spawn(id, Entity::new(Variant::Net(NetPlayerState::default())))
        .unwrap();
    reg.despawn(id, &mut gfx);
    // Despawning the entity does not remove the roster entry.
    assert_eq!(ctx.tablist.len(), 1);

    assert!(ctx.tablist.set(id, "carol", "Carol", "ops", 3));
    assert_eq!(ctx.tablist.get(id).unwrap().rank, 3);
    assert!(ctx.tablist.remove(id));
    assert!(ctx.tablist.is_empty());
}

#[test]
fn closest_query_tracks_movement() {
    let mut reg = Registry::new();
    let ctx = SimContext::default();
    spawn_local(&mut reg);

    let a = EntityId::new(20);
    let b = EntityId::new(21);
    for id in [a, b] {
        reg.spawn(id, Entity::new(Variant::Net(NetPlayerState::default())))
            .unwrap();
    }
    reg.apply_location(a, &LocationUpdate::position(Vec3::new(3.0, 0.0, 0.0), false), false);
    reg.apply_location(b, &LocationUpdate::position(Vec3::new(8.0, 0.0, 0.0), false), false);
    assert_eq!(reg.find_nearest(SELF_ID), Some(a));

    reg.apply_location(b, &LocationUpdate::position(Vec3::new(1.0, 0.0, 0.0), false), false);
    reg.tick_all(&FlatWorld, &ctx, 0.2);
    assert_eq!(reg.find_nearest(SELF_ID), Some(b));
}
