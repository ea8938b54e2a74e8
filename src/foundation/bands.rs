use std::ops::Range;

/// Worker count reported by the OS, never less than 1.
pub fn detected_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
        .max(1)
}

/// Split `height` rows into `bands` contiguous half-open ranges.
///
/// Every band holds `height / bands` rows except the last, which absorbs the remainder. A band
/// count of zero is treated as one. The split is deterministic for a given `(height, bands)`.
pub fn row_bands(height: usize, bands: usize) -> Vec<Range<usize>> {
    let bands = bands.max(1);
    let rows_per_band = height / bands;
    (0..bands)
        .map(|i| {
            let start = i * rows_per_band;
            let end = if i == bands - 1 {
                height
            } else {
                start + rows_per_band
            };
            start..end
        })
        .collect()
}

/// Carve `data` (rows of `row_len` elements) into one exclusive slice per band.
///
/// `bands` must be contiguous and start at row 0, as produced by [`row_bands`].
pub(crate) fn split_rows_mut<'a, T>(
    mut data: &'a mut [T],
    row_len: usize,
    bands: &[Range<usize>],
) -> Vec<&'a mut [T]> {
    let mut out = Vec::with_capacity(bands.len());
    for band in bands {
        let take = (band.end - band.start) * row_len;
        let (head, tail) = std::mem::take(&mut data).split_at_mut(take);
        out.push(head);
        data = tail;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/bands.rs"]
mod tests;
