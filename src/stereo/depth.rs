//! Luma depth proxy and the depth-to-parallax mapping.

use crate::foundation::core::ParallaxParams;

/// Depth of one RGB pixel: integer BT.601 luma, `(77r + 150g + 29b) >> 8`.
///
/// Higher values are interpreted as nearer to the viewer.
#[inline]
pub fn estimate_depth(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((77 * r + 150 * g + 29 * b) >> 8) as u8
}

/// Quantize `depth` into one of the `layers_count` bands.
///
/// A single band always maps to layer 0.
#[inline]
pub fn depth_layer(depth: u8, layers_count: u32) -> u32 {
    if layers_count > 1 {
        (u64::from(depth) * u64::from(layers_count) / 255) as u32
    } else {
        0
    }
}

/// Unrounded horizontal shift for a band.
///
/// Bands past `zero_parallax_layer_num` yield a negative shift (reversed direction).
pub fn layer_shift(layer: u32, params: ParallaxParams, width: u32) -> f64 {
    let zero = f64::from(params.zero_parallax_layer_num.max(1));
    params.max_shift(width) * (1.0 - f64::from(layer) / zero)
}

/// Round a shift to whole pixels with `floor(shift + 0.5)`.
///
/// Ties go toward positive infinity for both signs.
#[inline]
pub fn round_shift(shift: f64) -> i64 {
    (shift + 0.5).floor() as i64
}

/// Rounded pixel shift for every possible depth value.
///
/// Built once per run; the per-pixel path is then a table lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftTable {
    shifts: [i64; 256],
}

impl ShiftTable {
    /// Precompute shifts for an image `width` pixels wide.
    pub fn new(params: ParallaxParams, width: u32) -> Self {
        let mut shifts = [0i64; 256];
        for (depth, slot) in shifts.iter_mut().enumerate() {
            let layer = depth_layer(depth as u8, params.layers_count);
            *slot = round_shift(layer_shift(layer, params, width));
        }
        Self { shifts }
    }

    /// Rounded shift for `depth`.
    #[inline]
    pub fn shift(&self, depth: u8) -> i64 {
        self.shifts[usize::from(depth)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stereo/depth.rs"]
mod tests;
