//! Wire encode/decode for location updates.
//!
//! The encoding is flags-driven: only fields marked present in the bitmask
//! appear on the wire, so an orientation-only update costs 10 bytes. Inner
//! payloads are little-endian.

use crate::location::{
    FLAG_ALL, FLAG_HEAD_X, FLAG_HEAD_Y, FLAG_POS, FLAG_ROT_X, FLAG_ROT_Z, LocationUpdate,
    clamp_angle,
};

/// Types implementing wire encoding write themselves into a byte buffer.
pub trait WireEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types implementing wire decoding reconstruct themselves from a byte slice.
pub trait WireDecode: Sized {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self>;
}

fn take<const N: usize>(inp: &mut &[u8]) -> anyhow::Result<[u8; N]> {
    if inp.len() < N {
        anyhow::bail!("short read");
    }
    let (a, b) = inp.split_at(N);
    *inp = b;
    let mut buf = [0u8; N];
    buf.copy_from_slice(a);
    Ok(buf)
}

fn take_f32(inp: &mut &[u8]) -> anyhow::Result<f32> {
    Ok(f32::from_le_bytes(take::<4>(inp)?))
}

impl WireEncode for LocationUpdate {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.flags);
        out.push(u8::from(self.relative_pos));
        if self.has(FLAG_POS) {
            for c in [self.pos.x, self.pos.y, self.pos.z] {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        if self.has(FLAG_HEAD_X) {
            out.extend_from_slice(&self.head_x.to_le_bytes());
        }
        if self.has(FLAG_HEAD_Y) {
            out.extend_from_slice(&self.head_y.to_le_bytes());
        }
        if self.has(FLAG_ROT_X) {
            out.extend_from_slice(&self.rot_x.to_le_bytes());
        }
        if self.has(FLAG_ROT_Z) {
            out.extend_from_slice(&self.rot_z.to_le_bytes());
        }
    }
}

impl WireDecode for LocationUpdate {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        use anyhow::ensure;
        let flags = take::<1>(inp)?[0];
        ensure!(flags & !FLAG_ALL == 0, "unknown update flags: {flags:#04x}");
        let relative_pos = take::<1>(inp)?[0] != 0;
        let mut u = LocationUpdate::empty();
        u.flags = flags;
        u.relative_pos = relative_pos;
        if u.has(FLAG_POS) {
            u.pos = glam::vec3(take_f32(inp)?, take_f32(inp)?, take_f32(inp)?);
        }
        if u.has(FLAG_HEAD_X) {
            u.head_x = clamp_angle(take_f32(inp)?);
        }
        if u.has(FLAG_HEAD_Y) {
            u.head_y = clamp_angle(take_f32(inp)?);
        }
        if u.has(FLAG_ROT_X) {
            u.rot_x = clamp_angle(take_f32(inp)?);
        }
        if u.has(FLAG_ROT_Z) {
            u.rot_z = clamp_angle(take_f32(inp)?);
        }
        Ok(u)
    }
}
