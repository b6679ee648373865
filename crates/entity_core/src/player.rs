//! Player identity shared by the three player variants.
//!
//! Every player variant embeds this by value; the spatial state lives in
//! the entity base, never here.

use crate::render::{GfxContext, TexHandle};

/// Maximum stored length for display and skin names.
pub const MAX_NAME_LEN: usize = 64;

/// Name, skin, and the GPU handle for the rendered name label.
#[derive(Debug, Default)]
pub struct PlayerIdentity {
    pub display_name: String,
    pub skin_name: String,
    /// Whether the skin texture fetch completed for `skin_name`.
    pub fetched_skin: bool,
    /// Cached name-label texture; rebuilt by the renderer when `None`.
    pub name_tex: Option<TexHandle>,
}

impl PlayerIdentity {
    #[must_use]
    pub fn new(display_name: &str, skin_name: &str) -> Self {
        let mut id = Self::default();
        id.set_name(display_name, skin_name);
        id
    }

    /// Replace both names; drops the cached label so it gets rebuilt.
    pub fn set_name(&mut self, display_name: &str, skin_name: &str) {
        self.display_name = truncate(display_name);
        self.skin_name = truncate(skin_name);
        self.name_tex = None;
    }

    /// Forget the fetched skin so it is requested again.
    pub fn reset_skin(&mut self) {
        self.fetched_skin = false;
    }

    /// Release the owned name-label texture.
    pub fn release_textures(&mut self, gfx: &mut dyn GfxContext) {
        if let Some(tex) = self.name_tex.take() {
            gfx.destroy_texture(tex);
        }
    }
}

fn truncate(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_NAME_LEN));
    for ch in s.chars().take(MAX_NAME_LEN) {
        out.push(ch);
    }
    out
}
