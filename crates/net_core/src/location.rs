//! Normalized position/orientation change for one entity.
//!
//! A `LocationUpdate` is built fresh per decoded packet and never mutated
//! afterwards. The flag bitmask records which fields are present; absent
//! fields carry no meaningful value and must not be read downstream.

use glam::Vec3;

/// Position field is present (absolute or relative per `relative_pos`).
pub const FLAG_POS: u8 = 0x01;
/// Head pitch (`head_x`) is present.
pub const FLAG_HEAD_X: u8 = 0x02;
/// Head yaw (`head_y`) is present.
pub const FLAG_HEAD_Y: u8 = 0x04;
/// Body roll about X (`rot_x`) is present.
pub const FLAG_ROT_X: u8 = 0x08;
/// Body roll about Z (`rot_z`) is present.
pub const FLAG_ROT_Z: u8 = 0x10;
/// Both head angles.
pub const FLAG_ORI: u8 = FLAG_HEAD_X | FLAG_HEAD_Y;
/// Every defined flag bit.
pub const FLAG_ALL: u8 = FLAG_POS | FLAG_ORI | FLAG_ROT_X | FLAG_ROT_Z;

/// Clamps `degrees` so it lies within `[0, 360)`. Handles negative input.
#[must_use]
pub fn clamp_angle(degrees: f32) -> f32 {
    let mut d = degrees % 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    // `-1e-7 % 360 + 360` rounds to exactly 360.0 in f32
    if d >= 360.0 { 0.0 } else { d }
}

/// A location update for an entity: a relative or absolute position, an
/// orientation, or both. Angle fields are stored normalized into `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationUpdate {
    pub pos: Vec3,
    pub head_x: f32,
    pub head_y: f32,
    pub rot_x: f32,
    pub rot_z: f32,
    pub flags: u8,
    pub relative_pos: bool,
}

impl LocationUpdate {
    /// An update carrying no fields.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            pos: Vec3::ZERO,
            head_x: 0.0,
            head_y: 0.0,
            rot_x: 0.0,
            rot_z: 0.0,
            flags: 0,
            relative_pos: false,
        }
    }

    /// Orientation-only update (head yaw + head pitch).
    #[must_use]
    pub fn orientation(rot_y: f32, head_x: f32) -> Self {
        let mut u = Self::empty();
        u.flags = FLAG_ORI;
        u.head_y = clamp_angle(rot_y);
        u.head_x = clamp_angle(head_x);
        u
    }

    /// Position-only update. `relative` marks `pos` as a delta against the
    /// receiver's last target rather than an absolute position.
    #[must_use]
    pub fn position(pos: Vec3, relative: bool) -> Self {
        let mut u = Self::empty();
        u.flags = FLAG_POS;
        u.pos = pos;
        u.relative_pos = relative;
        u
    }

    /// Combined position + orientation update.
    #[must_use]
    pub fn position_and_orientation(pos: Vec3, rot_y: f32, head_x: f32, relative: bool) -> Self {
        let mut u = Self::orientation(rot_y, head_x);
        u.flags |= FLAG_POS;
        u.pos = pos;
        u.relative_pos = relative;
        u
    }

    /// Whether every bit in `flag` is present in this update.
    #[inline]
    #[must_use]
    pub fn has(&self, flag: u8) -> bool {
        self.flags & flag == flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_stays_in_range() {
        for x in [-1080.0, -360.0, -359.9, -0.5, 0.0, 0.5, 359.9, 360.0, 720.5, 1e6] {
            let c = clamp_angle(x);
            assert!((0.0..360.0).contains(&c), "clamp({x}) = {c}");
        }
    }

    #[test]
    fn clamp_is_periodic() {
        for x in [-123.4f32, 0.0, 17.25, 359.0] {
            for k in [-2.0f32, -1.0, 1.0, 3.0] {
                let a = clamp_angle(x);
                let b = clamp_angle(x + 360.0 * k);
                assert!((a - b).abs() < 1e-3, "clamp({x}) vs clamp({x} + 360*{k})");
            }
        }
    }

    #[test]
    fn clamp_handles_tiny_negative() {
        let c = clamp_angle(-1e-7);
        assert!((0.0..360.0).contains(&c));
    }

    #[test]
    fn constructors_set_flags() {
        let o = LocationUpdate::orientation(-90.0, 45.0);
        assert_eq!(o.flags, FLAG_ORI);
        assert!((o.head_y - 270.0).abs() < 1e-5);

        let p = LocationUpdate::position(Vec3::new(1.0, 2.0, 3.0), true);
        assert_eq!(p.flags, FLAG_POS);
        assert!(p.relative_pos);

        let b = LocationUpdate::position_and_orientation(Vec3::X, 10.0, 20.0, false);
        assert!(b.has(FLAG_POS) && b.has(FLAG_ORI));
        assert!(!b.has(FLAG_ROT_X));
    }
}
