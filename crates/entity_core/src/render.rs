//! Render-side contracts.
//!
//! The core never rasterizes anything; the renderer implements these traits
//! and is invoked once per visible entity per frame, in registry id order.

use glam::Vec3;

/// Opaque GPU texture handle owned by an entity (skin, name label).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TexHandle(pub u32);

/// Graphics-device facet: lets entities release owned GPU resources on
/// despawn and on device resets.
pub trait GfxContext {
    fn destroy_texture(&mut self, tex: TexHandle);
}

/// Samples world lighting at a position, as RGBA. Used to tint entity
/// models by the light level at their feet.
pub trait LightSampler {
    fn sample(&self, pos: Vec3) -> [u8; 4];
}

/// Per-entity render hooks. `blend` is the render-step fraction in `[0, 1)`
/// used to interpolate between simulation ticks.
pub trait EntityRenderer {
    fn draw_model(&mut self, entity: &crate::Entity, blend: f32);
    fn draw_name(&mut self, entity: &crate::Entity);
}

/// Name-label display toggle, read by the render hooks (process-wide
/// setting owned by `SimContext`, not by this core's entities).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameMode {
    None,
    Hovered,
    #[default]
    All,
    AllHovered,
    AllUnscaled,
}

/// Shadow display toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShadowMode {
    None,
    SnapToBlock,
    #[default]
    Circle,
    CircleAll,
}

/// Gfx context that discards releases; for headless simulation and tests.
#[derive(Default, Debug)]
pub struct NullGfx {
    pub released: Vec<TexHandle>,
}

impl GfxContext for NullGfx {
    fn destroy_texture(&mut self, tex: TexHandle) {
        self.released.push(tex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_gfx_records_releases() {
        let mut gfx = NullGfx::default();
        gfx.destroy_texture(TexHandle(3));
        gfx.destroy_texture(TexHandle(9));
        assert_eq!(gfx.released, vec![TexHandle(3), TexHandle(9)]);
    }
}
