//! Full client loop: net events in, fixed ticks, blended render state out.

use client_core::input::InputState;
use client_core::{FixedStep, ReplicationPump};
use collision_grid::BlockWorld;
use entity_core::render::NullGfx;
use entity_core::{EntityId, Registry, SimContext};
use glam::{IVec3, Vec3};
use net_core::LocationUpdate;
use net_core::channel::{NetEvent, channel};

struct FlatWorld;
impl BlockWorld for FlatWorld {
    fn block_at(&self, cell: IVec3) -> u16 {
        u16::from(cell.y < 0)
    }
    fn is_solid(&self, block: u16) -> bool {
        block == 1
    }
}

#[test]
fn frame_loop_drives_remote_and_local_players() {
    let (tx, rx) = channel();
    let mut pump = ReplicationPump::new(rx);
    let mut reg = Registry::new();
    let mut ctx = SimContext::default();
    let mut gfx = NullGfx::default();
    let mut clock = FixedStep::new(20.0);
    let mut input = InputState::default();

    assert!(tx.try_send(NetEvent::Spawn {
        id: 255,
        name: "me".into(),
        skin: "me".into(),
        update: LocationUpdate::position(Vec3::new(0.5, 0.0, 0.5), false),
    }));
    assert!(tx.try_send(NetEvent::Spawn {
        id: 1,
        name: "peer".into(),
        skin: "peer".into(),
        update: LocationUpdate::position(Vec3::new(4.0, 0.0, 0.0), false),
    }));

    input.forward = true;

    // Three seconds of 60 Hz frames; the server nudges the peer every 6th
    // frame, roughly its real update cadence.
    let mut frame = 0u32;
    for _ in 0..180 {
        frame += 1;
        if frame % 6 == 0 {
            assert!(tx.try_send(NetEvent::Location {
                id: 1,
                update: LocationUpdate::position(Vec3::new(0.1, 0.0, 0.0), true),
                interpolate: true,
            }));
        }
        let ticks = clock.advance(1.0 / 60.0);
        for _ in 0..ticks {
            pump.pump(&mut reg, &mut ctx, &mut gfx);
            ctx.local_intent = input.movement_intent();
            reg.tick_all(&FlatWorld, &ctx, clock.step());
        }
        let blend = clock.blend();
        assert!((0.0..1.0).contains(&blend));
    }

    let local = reg.local().expect("local spawned");
    assert!(local.state.pos.z > 5.0, "local moved: {}", local.state.pos.z);
    assert!(local.state.on_ground);

    let peer = reg.get(EntityId::new(1)).expect("peer spawned");
    // 30 relative nudges of 0.1 from x = 4.
    assert!(peer.state.pos.x > 5.0, "peer reconciled: {}", peer.state.pos.x);
    assert!(peer.state.pos.x <= 7.0 + 1e-3);

    // Render transform stays finite mid-blend.
    let m = local.transform(clock.blend());
    assert!(m.is_finite());
}
