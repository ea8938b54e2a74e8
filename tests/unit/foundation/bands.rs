use super::*;

#[test]
fn last_band_absorbs_remainder() {
    assert_eq!(row_bands(10, 3), vec![0..3, 3..6, 6..10]);
}

#[test]
fn bands_cover_all_rows_exactly_once() {
    for height in [0usize, 1, 7, 64, 101] {
        for n in [1usize, 2, 3, 8, 16] {
            let bands = row_bands(height, n);
            assert_eq!(bands.len(), n);
            let mut next = 0;
            for b in &bands {
                assert_eq!(b.start, next);
                next = b.end;
            }
            assert_eq!(next, height);
        }
    }
}

#[test]
fn zero_bands_is_treated_as_one() {
    assert_eq!(row_bands(5, 0), vec![0..5]);
}

#[test]
fn fewer_rows_than_bands_leaves_leading_bands_empty() {
    assert_eq!(row_bands(2, 4), vec![0..0, 0..0, 0..0, 0..2]);
}

#[test]
fn detected_parallelism_is_at_least_one() {
    assert!(detected_parallelism() >= 1);
}

#[test]
fn split_rows_mut_matches_bands() {
    let mut data: Vec<u8> = (0..20).collect();
    let bands = row_bands(5, 2);
    let parts = split_rows_mut(&mut data, 4, &bands);
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(parts[1].len(), 12);
    assert_eq!(parts[1][0], 8);
}
