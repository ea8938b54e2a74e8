//! Depth-buffered parallax compositing.
//!
//! Every source pixel is shifted horizontally by a depth-derived amount and written into the
//! destination row with the same `y`. A destination pixel is claimed only by a strictly greater
//! depth than the one already recorded, so in split mode the nearest contributor wins regardless
//! of scan order. Combined mode records one depth per column-within-half for both halves.
//! Shifts never leave the source row, so each worker owns its destination rows exclusively.

use std::ops::Range;

use rayon::prelude::*;

use crate::{
    foundation::{
        bands::{row_bands, split_rows_mut},
        core::ParallaxParams,
        error::StereoResult,
    },
    raster::buffer::{COVERED, DepthBuffer, SOURCE_BPP, SourceImage, VIEW_BPP, ViewBuffer},
    stereo::depth::{ShiftTable, estimate_depth},
};

/// Left and right views of a split run, before hole filling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StereoViews {
    /// Left eye view.
    pub left: ViewBuffer,
    /// Right eye view.
    pub right: ViewBuffer,
}

/// Composite separate left and right views across `pool`'s workers.
///
/// Allocation failure of any buffer aborts before any pixel is written; buffers allocated so far
/// are released on return.
pub fn composite_split(
    src: &SourceImage,
    params: ParallaxParams,
    pool: &rayon::ThreadPool,
) -> StereoResult<StereoViews> {
    let (width, height) = (src.width(), src.height());
    let mut left = ViewBuffer::new(width, height)?;
    let mut right = ViewBuffer::new(width, height)?;
    let mut left_depths = DepthBuffer::new(width, height)?;
    let mut right_depths = DepthBuffer::new(width, height)?;

    if width == 0 || height == 0 {
        return Ok(StereoViews { left, right });
    }

    let table = ShiftTable::new(params, width);
    let bands = row_bands(height as usize, pool.current_num_threads());
    let stride = left.stride();
    let depth_stride = width as usize;

    let jobs: Vec<SplitBand<'_>> = bands
        .iter()
        .cloned()
        .zip(split_rows_mut(left.data_mut(), stride, &bands))
        .zip(split_rows_mut(right.data_mut(), stride, &bands))
        .zip(split_rows_mut(left_depths.data_mut(), depth_stride, &bands))
        .zip(split_rows_mut(right_depths.data_mut(), depth_stride, &bands))
        .map(
            |((((rows, left), right), left_depths), right_depths)| SplitBand {
                rows,
                left,
                right,
                left_depths,
                right_depths,
            },
        )
        .collect();

    pool.install(|| {
        jobs.into_par_iter()
            .for_each(|band| band.composite(src, &table, stride, depth_stride));
    });

    Ok(StereoViews { left, right })
}

/// Composite a single side-by-side frame across `pool`'s workers.
///
/// The left half receives `(x + shift) / 2`, the right half `(x - shift) / 2 + width / 2`. Both
/// halves share one half-width depth buffer addressed by column-within-half, so a claim in one
/// half also raises the bar for the same column of the other half.
pub fn composite_combined(
    src: &SourceImage,
    params: ParallaxParams,
    pool: &rayon::ThreadPool,
) -> StereoResult<ViewBuffer> {
    let (width, height) = (src.width(), src.height());
    let mut pair = ViewBuffer::new(width, height)?;
    // Odd widths give the right half one more column than the left.
    let depth_width = width - width / 2;
    let mut depths = DepthBuffer::new(depth_width, height)?;

    if width == 0 || height == 0 {
        return Ok(pair);
    }

    let table = ShiftTable::new(params, width);
    let bands = row_bands(height as usize, pool.current_num_threads());
    let stride = pair.stride();
    let depth_stride = depth_width as usize;

    let jobs: Vec<CombinedBand<'_>> = bands
        .iter()
        .cloned()
        .zip(split_rows_mut(pair.data_mut(), stride, &bands))
        .zip(split_rows_mut(depths.data_mut(), depth_stride, &bands))
        .map(|((rows, pair), depths)| CombinedBand { rows, pair, depths })
        .collect();

    pool.install(|| {
        jobs.into_par_iter()
            .for_each(|band| band.composite(src, &table, stride, depth_stride));
    });

    Ok(pair)
}

struct SplitBand<'a> {
    rows: Range<usize>,
    left: &'a mut [u8],
    right: &'a mut [u8],
    left_depths: &'a mut [u8],
    right_depths: &'a mut [u8],
}

impl SplitBand<'_> {
    fn composite(
        self,
        src: &SourceImage,
        table: &ShiftTable,
        stride: usize,
        depth_stride: usize,
    ) {
        let rows = self
            .left
            .chunks_exact_mut(stride)
            .zip(self.right.chunks_exact_mut(stride))
            .zip(self.left_depths.chunks_exact_mut(depth_stride))
            .zip(self.right_depths.chunks_exact_mut(depth_stride));
        for (y, (((left, right), left_depths), right_depths)) in self.rows.zip(rows) {
            composite_row_split(src.row(y), table, left, left_depths, right, right_depths);
        }
    }
}

struct CombinedBand<'a> {
    rows: Range<usize>,
    pair: &'a mut [u8],
    depths: &'a mut [u8],
}

impl CombinedBand<'_> {
    fn composite(
        self,
        src: &SourceImage,
        table: &ShiftTable,
        stride: usize,
        depth_stride: usize,
    ) {
        let rows = self
            .pair
            .chunks_exact_mut(stride)
            .zip(self.depths.chunks_exact_mut(depth_stride));
        for (y, (pair, depths)) in self.rows.zip(rows) {
            composite_row_combined(src.row(y), table, pair, depths);
        }
    }
}

/// Composite one source row into one left row and one right row.
///
/// `left_depths.len()` is the row width in pixels.
pub(crate) fn composite_row_split(
    src_row: &[u8],
    table: &ShiftTable,
    left: &mut [u8],
    left_depths: &mut [u8],
    right: &mut [u8],
    right_depths: &mut [u8],
) {
    let width = left_depths.len() as i64;
    for (x, px) in src_row.chunks_exact(SOURCE_BPP).enumerate() {
        let rgb = [px[0], px[1], px[2]];
        let depth = estimate_depth(rgb);
        let shift = table.shift(depth);
        let x = x as i64;

        let left_x = x + shift;
        if (0..width).contains(&left_x) {
            let left_x = left_x as usize;
            claim(left, left_x, &mut left_depths[left_x], depth, rgb);
        }

        let right_x = x - shift;
        if (0..width).contains(&right_x) {
            let right_x = right_x as usize;
            claim(right, right_x, &mut right_depths[right_x], depth, rgb);
        }
    }
}

/// Composite one source row into both halves of a side-by-side row.
///
/// `depths` holds one cell per column-within-half and is shared by both halves.
pub(crate) fn composite_row_combined(
    src_row: &[u8],
    table: &ShiftTable,
    pair: &mut [u8],
    depths: &mut [u8],
) {
    let width = (pair.len() / VIEW_BPP) as i64;
    let half = width / 2;
    for (x, px) in src_row.chunks_exact(SOURCE_BPP).enumerate() {
        let rgb = [px[0], px[1], px[2]];
        let depth = estimate_depth(rgb);
        let shift = table.shift(depth);
        let x = x as i64;

        // Integer division truncates toward zero, so `-1 / 2` lands on column 0.
        let left_x = (x + shift) / 2;
        if (0..half).contains(&left_x) {
            let left_x = left_x as usize;
            claim(pair, left_x, &mut depths[left_x], depth, rgb);
        }

        let right_x = (x - shift) / 2 + half;
        if (half..width).contains(&right_x) {
            let right_x = right_x as usize;
            claim(pair, right_x, &mut depths[right_x - half as usize], depth, rgb);
        }
    }
}

/// Z-test write: claim column `x` when `depth` beats the depth recorded in `cell`.
#[inline]
fn claim(view: &mut [u8], x: usize, cell: &mut u8, depth: u8, rgb: [u8; 3]) {
    if depth <= *cell {
        return;
    }
    *cell = depth;
    let i = x * VIEW_BPP;
    view[i..i + SOURCE_BPP].copy_from_slice(&rgb);
    view[i + 3] = COVERED;
}

#[cfg(test)]
#[path = "../../tests/unit/stereo/compositor.rs"]
mod tests;
