//! Disocclusion repair by 1-D linear interpolation along rows.

use rayon::prelude::*;

use crate::{
    foundation::bands::{row_bands, split_rows_mut},
    raster::buffer::{COVERED, HOLE, VIEW_BPP, ViewBuffer},
};

/// Fill every hole run of `view` across `pool`'s workers.
///
/// Returns the number of pixels filled. Rows that are entirely holes are left untouched.
pub fn fill_holes(view: &mut ViewBuffer, pool: &rayon::ThreadPool) -> usize {
    if view.width() == 0 || view.height() == 0 {
        return 0;
    }

    let stride = view.stride();
    let bands = row_bands(view.height() as usize, pool.current_num_threads());
    let jobs = split_rows_mut(view.data_mut(), stride, &bands);

    pool.install(|| {
        jobs.into_par_iter()
            .map(|band| band.chunks_exact_mut(stride).map(fill_row).sum::<usize>())
            .sum()
    })
}

/// Fill the hole runs of one RGBA8 row in place and return the number of pixels filled.
///
/// Each maximal run of zero-alpha pixels is painted from its nearest covered neighbours: a run
/// bounded on one side only copies that neighbour, a run bounded on both sides is a linear ramp
/// between them (per channel, rounded half up). Filled pixels become covered.
pub fn fill_row(row: &mut [u8]) -> usize {
    let width = row.len() / VIEW_BPP;
    let mut filled = 0;

    let mut x = 0;
    while x < width {
        while x < width && alpha_at(row, x) != HOLE {
            x += 1;
        }
        let start = x;
        while x < width && alpha_at(row, x) == HOLE {
            x += 1;
        }
        let end = x;

        if start == end || (start == 0 && end == width) {
            continue;
        }

        let left = if start > 0 { start - 1 } else { end };
        let right = if end < width { end } else { left };
        let left_px = rgb_at(row, left);
        let right_px = rgb_at(row, right);

        for i in start..end {
            let dst = &mut row[i * VIEW_BPP..(i + 1) * VIEW_BPP];
            if left == right {
                dst[..3].copy_from_slice(&left_px);
            } else {
                let t = (i - left) as f32 / (right - left) as f32;
                for c in 0..3 {
                    let v = f32::from(left_px[c]) * (1.0 - t) + f32::from(right_px[c]) * t;
                    dst[c] = (v + 0.5) as u8;
                }
            }
            dst[3] = COVERED;
        }
        filled += end - start;
    }

    filled
}

fn alpha_at(row: &[u8], x: usize) -> u8 {
    row[x * VIEW_BPP + 3]
}

fn rgb_at(row: &[u8], x: usize) -> [u8; 3] {
    let i = x * VIEW_BPP;
    [row[i], row[i + 1], row[i + 2]]
}

#[cfg(test)]
#[path = "../../tests/unit/stereo/hole_fill.rs"]
mod tests;
