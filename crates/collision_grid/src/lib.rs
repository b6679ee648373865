//! `collision_grid`: axis-separated AABB sweeps against a block grid.
//!
//! The world is queried through the `BlockWorld` trait only; this crate has
//! no block storage of its own. Movement is resolved per axis (Y, then X,
//! then Z) by clamping at the first solid cell along the path, which avoids
//! tunneling and lets callers step flush against faces.

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]

use glam::{IVec3, Vec3};

/// Offset used to keep resolved boxes clear of cell faces and avoid
/// floating point roundoff re-collisions.
pub const ADJUSTMENT: f32 = 0.001;

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of `size` standing on `feet` (centered on X/Z, min Y at the feet).
    #[must_use]
    pub fn from_feet(feet: Vec3, size: Vec3) -> Self {
        let half = Vec3::new(size.x * 0.5, 0.0, size.z * 0.5);
        Self {
            min: feet - half,
            max: feet + half + Vec3::new(0.0, size.y, 0.0),
        }
    }

    #[must_use]
    pub fn offset(self, d: Vec3) -> Self {
        Self {
            min: self.min + d,
            max: self.max + d,
        }
    }

    #[must_use]
    pub fn expand(self, e: Vec3) -> Self {
        Self {
            min: self.min - e,
            max: self.max + e,
        }
    }

    #[must_use]
    pub fn intersects(&self, o: &Aabb) -> bool {
        !(self.max.x < o.min.x
            || self.min.x > o.max.x
            || self.max.y < o.min.y
            || self.min.y > o.max.y
            || self.max.z < o.min.z
            || self.min.z > o.max.z)
    }
}

/// External block-lookup collaborator. Cells are unit cubes addressed by
/// their integer min corner.
pub trait BlockWorld {
    /// Raw block id occupying `cell`.
    fn block_at(&self, cell: IVec3) -> u16;
    /// Whether `block` obstructs movement.
    fn is_solid(&self, block: u16) -> bool;
    /// Whether `block` applies liquid drag (water, lava).
    fn is_liquid(&self, _block: u16) -> bool {
        false
    }
    /// Whether `block` can be climbed (ropes, ladders).
    fn is_climbable(&self, _block: u16) -> bool {
        false
    }

    fn solid_at(&self, cell: IVec3) -> bool {
        self.is_solid(self.block_at(cell))
    }
}

/// Result of a swept move: the displacement actually applied and which axes
/// were clamped by a solid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sweep {
    pub moved: Vec3,
    pub blocked: [bool; 3],
}

/// Sweeps `aabb` by `disp` through the grid, resolving each axis
/// independently (Y first so landing takes priority over sliding).
#[must_use]
pub fn swept_move<W: BlockWorld + ?Sized>(world: &W, aabb: Aabb, disp: Vec3) -> Sweep {
    let mut bb = aabb;
    let mut out = Sweep::default();
    for axis in [1usize, 0, 2] {
        let want = disp[axis];
        if want == 0.0 {
            continue;
        }
        let allowed = sweep_axis(world, &bb, axis, want);
        out.moved[axis] = allowed;
        out.blocked[axis] = allowed != want;
        let mut step = Vec3::ZERO;
        step[axis] = allowed;
        bb = bb.offset(step);
    }
    out
}

/// How far the box may travel along `axis` before hitting a solid cell.
/// Returns `want` unchanged when the path is clear; returns 0 when the box
/// is already flush against (or inside) solid cells.
fn sweep_axis<W: BlockWorld + ?Sized>(world: &W, bb: &Aabb, axis: usize, want: f32) -> f32 {
    let (u, v) = ortho(axis);
    let u0 = cell_floor(bb.min[u] + ADJUSTMENT);
    let u1 = cell_floor(bb.max[u] - ADJUSTMENT).max(u0);
    let v0 = cell_floor(bb.min[v] + ADJUSTMENT);
    let v1 = cell_floor(bb.max[v] - ADJUSTMENT).max(v0);

    if want > 0.0 {
        let face = bb.max[axis];
        let start = cell_floor(face - ADJUSTMENT);
        let end = cell_floor(face + want + ADJUSTMENT);
        for c in start..=end {
            if slab_solid(world, axis, c, u, u0, u1, v, v0, v1) {
                return (c as f32 - face - ADJUSTMENT).clamp(0.0, want);
            }
        }
        want
    } else {
        let face = bb.min[axis];
        let start = cell_floor(face + ADJUSTMENT);
        let end = cell_floor(face + want - ADJUSTMENT);
        for c in (end..=start).rev() {
            if slab_solid(world, axis, c, u, u0, u1, v, v0, v1) {
                return ((c + 1) as f32 - face + ADJUSTMENT).clamp(want, 0.0);
            }
        }
        want
    }
}

#[allow(clippy::too_many_arguments)]
fn slab_solid<W: BlockWorld + ?Sized>(
    world: &W,
    axis: usize,
    c: i32,
    u: usize,
    u0: i32,
    u1: i32,
    v: usize,
    v0: i32,
    v1: i32,
) -> bool {
    let mut cell = IVec3::ZERO;
    cell[axis] = c;
    for cu in u0..=u1 {
        for cv in v0..=v1 {
            cell[u] = cu;
            cell[v] = cv;
            if world.solid_at(cell) {
                return true;
            }
        }
    }
    false
}

/// Reports whether any cell overlapped by `aabb` satisfies `pred`.
/// Pure spatial query; nothing is mutated.
#[must_use]
pub fn touches_any<W, F>(world: &W, aabb: &Aabb, mut pred: F) -> bool
where
    W: BlockWorld + ?Sized,
    F: FnMut(u16) -> bool,
{
    let min = aabb.min.floor().as_ivec3();
    let max = aabb.max.floor().as_ivec3();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            for z in min.z..=max.z {
                if pred(world.block_at(IVec3::new(x, y, z))) {
                    return true;
                }
            }
        }
    }
    false
}

#[inline]
fn ortho(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

#[inline]
fn cell_floor(x: f32) -> i32 {
    x.floor() as i32
}
