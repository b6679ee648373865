//! Entity base state plus per-variant behavior.
//!
//! Every actor shares one `EntityState`; what differs between a mob, a
//! remote player, and the locally simulated player lives in `Variant` and is
//! dispatched by matching, not by function-pointer tables. Adding a variant
//! is a compile error everywhere a match forgets it.

use collision_grid::{Aabb, BlockWorld, touches_any};
use glam::{Mat4, Vec3};
use net_core::LocationUpdate;

use crate::components::{
    AnimatedState, Hacks, Interp, InterpState, NetInterp, PhysicsState, TiltState,
};
use crate::context::SimContext;
use crate::model::{self, Model};
use crate::player::PlayerIdentity;
use crate::render::{GfxContext, LightSampler, TexHandle};

/// Spatial and shape state common to every variant.
#[derive(Debug)]
pub struct EntityState {
    pub pos: Vec3,
    pub vel: Vec3,

    /// Head pitch, degrees.
    pub head_x: f32,
    /// Head yaw, degrees.
    pub head_y: f32,
    /// Body roll about X, degrees.
    pub rot_x: f32,
    /// Body yaw, degrees.
    pub rot_y: f32,
    /// Body roll about Z, degrees.
    pub rot_z: f32,

    pub model: &'static Model,
    pub model_scale: Vec3,
    /// Collision box size, already scaled.
    pub size: Vec3,
    /// Render/picking bounds relative to the feet, already scaled.
    pub model_bounds: Aabb,

    pub anim: AnimatedState,
    pub on_ground: bool,
    /// Skip lighting tint when set (held items, some mobs).
    pub no_shade: bool,
    /// Skin texture owned by this entity, if one was uploaded.
    pub skin_tex: Option<TexHandle>,
}

impl Default for EntityState {
    fn default() -> Self {
        let model = model::default_model();
        let mut st = Self {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            head_x: 0.0,
            head_y: 0.0,
            rot_x: 0.0,
            rot_y: 0.0,
            rot_z: 0.0,
            model,
            model_scale: Vec3::ONE,
            size: model.size,
            model_bounds: model.bounds,
            anim: AnimatedState::default(),
            on_ground: false,
            no_shade: false,
            skin_tex: None,
        };
        st.update_model_bounds();
        st
    }
}

impl EntityState {
    /// Swap the model by name. Accepts an optional `|scale` suffix
    /// (`"pig|1.5"`); unknown names fall back to the humanoid.
    pub fn set_model(&mut self, raw: &str) {
        let (name, scale) = match raw.split_once('|') {
            Some((n, s)) => (n, s.trim().parse::<f32>().unwrap_or(1.0)),
            None => (raw, 1.0),
        };
        self.model = model::resolve(name);
        self.model_scale = Vec3::splat(scale.clamp(0.01, 16.0));
        self.update_model_bounds();
    }

    pub fn set_model_scale(&mut self, scale: Vec3) {
        self.model_scale = scale.clamp(Vec3::splat(0.01), Vec3::splat(16.0));
        self.update_model_bounds();
    }

    fn update_model_bounds(&mut self) {
        self.size = self.model.size * self.model_scale;
        self.model_bounds = Aabb {
            min: self.model.bounds.min * self.model_scale,
            max: self.model.bounds.max * self.model_scale,
        };
    }

    #[must_use]
    pub fn eye_height(&self) -> f32 {
        self.model.eye_height * self.model_scale.y
    }

    #[must_use]
    pub fn eye_position(&self) -> Vec3 {
        self.pos + Vec3::new(0.0, self.eye_height(), 0.0)
    }

    /// Collision box at the current position.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_feet(self.pos, self.size)
    }

    /// Render/picking box at the current position.
    #[must_use]
    pub fn picking_bounds(&self) -> Aabb {
        self.model_bounds.offset(self.pos)
    }

    /// Whether any block touching the collision box satisfies `pred`.
    pub fn touches_any<W, F>(&self, world: &W, pred: F) -> bool
    where
        W: BlockWorld + ?Sized,
        F: Fn(u16) -> bool,
    {
        touches_any(world, &self.bounds(), pred)
    }

    /// Whether the collision box overlaps any liquid block.
    pub fn touches_liquid<W: BlockWorld + ?Sized>(&self, world: &W) -> bool {
        touches_any(world, &self.bounds(), |b| world.is_liquid(b))
    }

    /// Whether the collision box overlaps any climbable block.
    pub fn touches_climbable<W: BlockWorld + ?Sized>(&self, world: &W) -> bool {
        touches_any(world, &self.bounds(), |b| world.is_climbable(b))
    }

    fn from_interp(&mut self, s: &InterpState) {
        self.pos = s.pos;
        self.head_x = s.head_x;
        self.head_y = s.head_y;
        self.rot_x = s.rot_x;
        self.rot_y = s.rot_y;
        self.rot_z = s.rot_z;
    }

    fn to_interp(&self) -> InterpState {
        InterpState {
            pos: self.pos,
            head_x: self.head_x,
            head_y: self.head_y,
            rot_x: self.rot_x,
            rot_y: self.rot_y,
            rot_z: self.rot_z,
        }
    }
}

/// Remote player: server-driven targets smoothed by `NetInterp`.
#[derive(Debug, Default)]
pub struct NetPlayerState {
    pub identity: PlayerIdentity,
    pub interp: NetInterp,
    /// Consecutive tick samples, blended by the render step so a fast
    /// renderer sees motion between simulation ticks.
    pub frame: Interp,
    /// Set by the render pass from the distance check.
    pub should_render: bool,
}

/// The locally simulated player: prediction, capabilities, camera effects.
#[derive(Debug)]
pub struct LocalPlayerState {
    pub identity: PlayerIdentity,
    pub interp: Interp,
    pub hacks: Hacks,
    pub tilt: TiltState,
    pub physics: PhysicsState,
    /// Respawn anchor.
    pub spawn: Vec3,
    pub spawn_rot_y: f32,
    pub spawn_head_x: f32,
    pub reach_distance: f32,
    /// Velocity at the end of the previous tick, for the tilt kick.
    pub old_vel: Vec3,
}

impl Default for LocalPlayerState {
    fn default() -> Self {
        Self {
            identity: PlayerIdentity::default(),
            interp: Interp::default(),
            hacks: Hacks::default(),
            tilt: TiltState::default(),
            physics: PhysicsState::default(),
            spawn: Vec3::ZERO,
            spawn_rot_y: 0.0,
            spawn_head_x: 0.0,
            reach_distance: 5.0,
            old_vel: Vec3::ZERO,
        }
    }
}

/// What kind of actor a slot holds.
#[derive(Debug)]
pub enum Variant {
    /// Model-only actor with no identity (mobs, props).
    Generic,
    /// Named actor that is not driven by the network (e.g. scripted NPCs).
    Player(PlayerIdentity),
    /// Remote player reconciled from server location updates.
    Net(NetPlayerState),
    /// The locally controlled and predicted player.
    Local(LocalPlayerState),
}

/// One registry slot: shared state plus the variant payload.
#[derive(Debug)]
pub struct Entity {
    pub state: EntityState,
    pub variant: Variant,
}

impl Entity {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            state: EntityState::default(),
            variant,
        }
    }

    /// Display name, if the variant carries one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match &self.variant {
            Variant::Generic => None,
            Variant::Player(id) => Some(&id.display_name),
            Variant::Net(n) => Some(&n.identity.display_name),
            Variant::Local(l) => Some(&l.identity.display_name),
        }
    }

    /// Route a location update to the variant's smoothing strategy.
    /// Generic and scripted actors have no smoothing and snap directly.
    pub fn set_location(&mut self, update: &LocationUpdate, interpolate: bool) {
        match &mut self.variant {
            Variant::Generic | Variant::Player(_) => {
                let mut s = self.state.to_interp();
                s.apply(update);
                self.state.from_interp(&s);
            }
            Variant::Net(n) => {
                n.interp.set_location(update, interpolate);
                if !interpolate {
                    let cur = n.interp.current();
                    n.frame.prev = cur;
                    n.frame.next = cur;
                    self.state.from_interp(&cur);
                }
            }
            Variant::Local(l) => {
                l.interp.set_location(update, interpolate);
                let next = l.interp.next;
                self.state.from_interp(&next);
            }
        }
    }

    /// Advance this entity by one simulation tick of length `dt` seconds.
    pub fn tick<W: BlockWorld + ?Sized>(&mut self, world: &W, ctx: &SimContext, dt: f32) {
        let old_pos = self.state.pos;
        match &mut self.variant {
            Variant::Generic | Variant::Player(_) => {}
            Variant::Net(n) => {
                n.frame.prev = self.state.to_interp();
                n.interp.advance(dt);
                let cur = n.interp.current();
                n.frame.next = cur;
                self.state.from_interp(&cur);
            }
            Variant::Local(l) => {
                l.interp.shift();
                crate::components::physics::step(
                    world,
                    &ctx.physics,
                    &l.hacks,
                    &ctx.local_intent,
                    &mut l.physics,
                    &mut self.state.pos,
                    &mut self.state.vel,
                    self.state.rot_y,
                    self.state.size,
                    dt,
                );
                self.state.on_ground = l.physics.on_ground;
                l.tilt.update(self.state.vel, l.old_vel, dt);
                l.old_vel = self.state.vel;
                l.interp.next = self.state.to_interp();
            }
        }
        self.state.anim.update(old_pos, self.state.pos, dt);
    }

    /// Teleport the local player back to its spawn anchor with zero
    /// velocity. No-op for other variants.
    pub fn respawn(&mut self) {
        if let Variant::Local(l) = &mut self.variant {
            if !l.hacks.can_respawn {
                return;
            }
            let mut update = LocationUpdate::position_and_orientation(
                l.spawn,
                l.spawn_rot_y,
                l.spawn_head_x,
                false,
            );
            // Zero the roll angles too; a respawn is a full reset.
            update.flags = net_core::location::FLAG_ALL;
            l.interp.set_location(&update, false);
            let next = l.interp.next;
            self.state.from_interp(&next);
            self.state.vel = Vec3::ZERO;
            l.old_vel = Vec3::ZERO;
            l.physics = PhysicsState::default();
        }
    }

    /// State at render fraction `t` between the last two ticks.
    #[must_use]
    pub fn blended(&self, t: f32) -> InterpState {
        match &self.variant {
            Variant::Generic | Variant::Player(_) => self.state.to_interp(),
            Variant::Net(n) => n.frame.blended(t),
            Variant::Local(l) => l.interp.blended(t),
        }
    }

    /// Model-to-world matrix at render fraction `t`.
    #[must_use]
    pub fn transform(&self, t: f32) -> Mat4 {
        let s = self.blended(t);
        Mat4::from_translation(s.pos)
            * Mat4::from_rotation_y(-s.rot_y.to_radians())
            * Mat4::from_rotation_x(-s.rot_x.to_radians())
            * Mat4::from_rotation_z(-s.rot_z.to_radians())
            * Mat4::from_scale(self.state.model_scale)
    }

    /// Lighting tint for the model, sampled at the eye position.
    #[must_use]
    pub fn render_color(&self, light: &dyn LightSampler) -> [u8; 4] {
        if self.state.no_shade {
            [255, 255, 255, 255]
        } else {
            light.sample(self.state.eye_position())
        }
    }

    /// Whether the picking bounds come within `max_dist` of `eye`.
    #[must_use]
    pub fn should_render(&self, eye: Vec3, max_dist: f32) -> bool {
        let bb = self.state.picking_bounds();
        let closest = eye.clamp(bb.min, bb.max);
        closest.distance_squared(eye) <= max_dist * max_dist
    }

    /// Release every GPU resource this entity owns.
    pub fn despawn(&mut self, gfx: &mut dyn GfxContext) {
        if let Some(tex) = self.state.skin_tex.take() {
            gfx.destroy_texture(tex);
        }
        match &mut self.variant {
            Variant::Generic => {}
            Variant::Player(id) => id.release_textures(gfx),
            Variant::Net(n) => n.identity.release_textures(gfx),
            Variant::Local(l) => l.identity.release_textures(gfx),
        }
    }

    /// The graphics device went away: forget every handle without freeing.
    pub fn context_lost(&mut self) {
        self.state.skin_tex = None;
        match &mut self.variant {
            Variant::Generic => {}
            Variant::Player(id) => id.name_tex = None,
            Variant::Net(n) => n.identity.name_tex = None,
            Variant::Local(l) => l.identity.name_tex = None,
        }
    }

    /// A fresh device exists: mark skins for re-fetch.
    pub fn context_recreated(&mut self) {
        match &mut self.variant {
            Variant::Generic => {}
            Variant::Player(id) => id.reset_skin(),
            Variant::Net(n) => n.identity.reset_skin(),
            Variant::Local(l) => l.identity.reset_skin(),
        }
    }
}
