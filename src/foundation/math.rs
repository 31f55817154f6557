use std::hash::Hasher;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a. Deterministic across runs, unlike `DefaultHasher`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv64 {
    state: u64,
}

impl Default for Fnv64 {
    fn default() -> Self {
        Self { state: FNV_OFFSET }
    }
}

impl Fnv64 {
    /// Hash the bit pattern of `v` with `-0.0` folded into `0.0`.
    pub(crate) fn write_f64(&mut self, v: f64) {
        let v = if v == 0.0 { 0.0 } else { v };
        self.write(&v.to_bits().to_le_bytes());
    }
}

impl Hasher for Fnv64 {
    fn write(&mut self, bytes: &[u8]) {
        self.state = bytes
            .iter()
            .fold(self.state, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME));
    }

    fn finish(&self) -> u64 {
        self.state
    }
}

/// `a * b / 255`, rounded to nearest.
pub(crate) fn mul_div255(a: u8, b: u8) -> u8 {
    ((u32::from(a) * u32::from(b) + 127) / 255) as u8
}

/// Convert premultiplied RGBA8 pixels to straight alpha in place.
pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        match px[3] {
            255 => {}
            0 => px[..3].fill(0),
            a => {
                let a = u16::from(a);
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
