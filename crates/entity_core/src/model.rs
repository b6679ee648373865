//! Fixed table of entity models (cached shape data).
//!
//! A model contributes the collision size, eye height, and render bounds an
//! entity derives its boxes from. Unknown names fall back to the default
//! humanoid so a bad model name can never stop simulation.

use collision_grid::Aabb;
use glam::Vec3;

/// Maximum number of characters in a model name.
pub const MAX_MODEL_NAME: usize = 11;

/// Shape data shared by every entity using the model.
#[derive(Debug, PartialEq)]
pub struct Model {
    pub name: &'static str,
    /// Collision box size at scale 1.
    pub size: Vec3,
    /// Camera/reach eye height above the feet at scale 1.
    pub eye_height: f32,
    /// Render/picking bounds relative to the feet origin at scale 1.
    pub bounds: Aabb,
}

const fn model(name: &'static str, size: Vec3, eye_height: f32, half_x: f32, max_y: f32) -> Model {
    Model {
        name,
        size,
        eye_height,
        bounds: Aabb {
            min: Vec3::new(-half_x, 0.0, -half_x),
            max: Vec3::new(half_x, max_y, half_x),
        },
    }
}

/// Built-in models; index 0 is the default humanoid.
pub static MODELS: &[Model] = &[
    model("humanoid", Vec3::new(0.5375, 1.75625, 0.5375), 1.625, 0.5, 2.0),
    model("chicken", Vec3::new(0.5, 0.75, 0.5), 0.875, 0.5, 1.0),
    model("creeper", Vec3::new(0.5, 1.625, 0.5), 1.375, 0.5, 1.75),
    model("pig", Vec3::new(0.875, 0.875, 0.875), 0.75, 0.6875, 1.0),
    model("sheep", Vec3::new(0.625, 1.25, 0.625), 1.25, 0.5, 1.4375),
    model("skeleton", Vec3::new(0.5, 1.75625, 0.5), 1.625, 0.5, 2.0),
    model("spider", Vec3::new(0.9375, 0.75, 0.9375), 0.5, 0.6875, 0.8125),
    model("zombie", Vec3::new(0.5375, 1.75625, 0.5375), 1.625, 0.5, 2.0),
];

/// The fallback humanoid model.
#[must_use]
pub fn default_model() -> &'static Model {
    &MODELS[0]
}

/// Resolve a model name to its cached shape. Names longer than
/// `MAX_MODEL_NAME` or not in the table fall back to the humanoid.
#[must_use]
pub fn resolve(name: &str) -> &'static Model {
    if name.len() <= MAX_MODEL_NAME
        && let Some(m) = MODELS.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    {
        return m;
    }
    log::debug!("unknown model {name:?}, falling back to humanoid");
    default_model()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names_case_insensitively() {
        assert_eq!(resolve("pig").name, "pig");
        assert_eq!(resolve("Creeper").name, "creeper");
    }

    #[test]
    fn unknown_or_oversized_names_fall_back() {
        assert_eq!(resolve("dragon"), default_model());
        assert_eq!(resolve("averylongmodelname"), default_model());
        assert_eq!(resolve(""), default_model());
    }

    #[test]
    fn bounds_enclose_collision_size() {
        for m in MODELS {
            assert!(m.bounds.max.y >= m.size.y);
            assert!(m.bounds.max.x * 2.0 >= m.size.x);
            assert!(m.eye_height <= m.size.y + 0.25);
        }
    }
}
