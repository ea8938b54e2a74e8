use super::*;

fn pool(threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .unwrap()
}

fn gray_row(values: &[u8]) -> SourceImage {
    let data = values.iter().flat_map(|&v| [v, v, v]).collect();
    SourceImage::from_raw(values.len() as u32, 1, data).unwrap()
}

#[test]
fn uniform_image_without_parallax_reproduces_input() {
    let src = SourceImage::solid(4, 4, [100, 100, 100]).unwrap();
    let params = ParallaxParams::new(0.0, 10, 5).unwrap();
    let views = composite_split(&src, params, &pool(2)).unwrap();
    for view in [&views.left, &views.right] {
        assert_eq!(view.hole_count(), 0);
        assert!(
            view.data()
                .chunks_exact(4)
                .all(|px| px == [100, 100, 100, 255])
        );
    }
}

#[test]
fn black_pixels_never_claim() {
    let src = SourceImage::solid(5, 2, [0, 0, 0]).unwrap();
    let views = composite_split(&src, ParallaxParams::default(), &pool(1)).unwrap();
    assert_eq!(views.left.hole_count(), 10);
    assert_eq!(views.right.hole_count(), 10);
}

#[test]
fn bright_pixel_lands_at_rounded_shift() {
    let mut values = [0u8; 10];
    values[5] = 255;
    let src = gray_row(&values);
    let params = ParallaxParams::new(50.0, 10, 5).unwrap();
    let shift = ShiftTable::new(params, 10).shift(255);
    assert_eq!(shift, -5);

    let views = composite_split(&src, params, &pool(1)).unwrap();
    assert_eq!(views.left.pixel((5 + shift) as u32, 0), [255, 255, 255, 255]);
    assert_eq!(views.left.hole_count(), 9);
    // 5 - (-5) = 10 falls off the right edge.
    assert_eq!(views.right.hole_count(), 10);
}

#[test]
fn nearer_pixel_wins_when_scanned_last() {
    // x=0 depth 60 shifts by 1, x=1 depth 120 shifts by 0: both land on left column 1.
    let mut values = [0u8; 10];
    values[0] = 60;
    values[1] = 120;
    let src = gray_row(&values);
    let params = ParallaxParams::new(10.0, 10, 5).unwrap();
    let views = composite_split(&src, params, &pool(1)).unwrap();
    assert_eq!(views.left.pixel(1, 0), [120, 120, 120, 255]);
}

#[test]
fn nearer_pixel_wins_when_scanned_first() {
    // x=0 depth 255 shifts by -1, x=1 depth 150 shifts by 0: both land on right column 1.
    let mut values = [0u8; 10];
    values[0] = 255;
    values[1] = 150;
    let src = gray_row(&values);
    let params = ParallaxParams::new(10.0, 10, 5).unwrap();
    let views = composite_split(&src, params, &pool(1)).unwrap();
    assert_eq!(views.right.pixel(1, 0), [255, 255, 255, 255]);
}

#[test]
fn combined_halves_share_depth_cells() {
    // Zero shift: each right-half claim ties the left-half claim on the same cell and loses.
    let src = gray_row(&[10, 20, 30, 40]);
    let params = ParallaxParams::new(0.0, 10, 5).unwrap();
    let pair = composite_combined(&src, params, &pool(1)).unwrap();
    assert_eq!(pair.pixel(0, 0), [20, 20, 20, 255]);
    assert_eq!(pair.pixel(1, 0), [40, 40, 40, 255]);
    assert!(pair.is_hole(2, 0));
    assert!(pair.is_hole(3, 0));
}

#[test]
fn combined_left_half_truncates_toward_zero() {
    let mut values = [0u8; 10];
    values[0] = 255;
    let src = gray_row(&values);
    let params = ParallaxParams::new(10.0, 10, 5).unwrap();
    let pair = composite_combined(&src, params, &pool(1)).unwrap();
    // (0 - 1) / 2 == 0 claims cell 0; (0 + 1) / 2 + 5 == 5 maps to the same cell and loses.
    assert_eq!(pair.pixel(0, 0), [255, 255, 255, 255]);
    assert!(pair.is_hole(5, 0));
    assert_eq!(pair.hole_count(), 9);
}

#[test]
fn combined_right_claim_blocks_later_left_claim() {
    // x=3 (depth 255, shift -1) claims left column 1 and right column 7 (cell 2).
    // x=4 (depth 50, shift 1) then targets left column 2, also cell 2, and loses.
    let mut values = [0u8; 10];
    values[3] = 255;
    values[4] = 50;
    let src = gray_row(&values);
    let params = ParallaxParams::new(10.0, 10, 5).unwrap();
    let pair = composite_combined(&src, params, &pool(1)).unwrap();
    assert_eq!(pair.pixel(1, 0), [255, 255, 255, 255]);
    assert_eq!(pair.pixel(7, 0), [255, 255, 255, 255]);
    assert!(pair.is_hole(2, 0));
    assert_eq!(pair.hole_count(), 8);
}

#[test]
fn combined_odd_width_gives_right_half_the_extra_column() {
    let src = gray_row(&[0, 0, 0, 0, 90]);
    let params = ParallaxParams::new(0.0, 10, 5).unwrap();
    let pair = composite_combined(&src, params, &pool(1)).unwrap();
    // 4 / 2 == 2 misses the left half [0, 2); 4 / 2 + 2 == 4 is the last right column.
    assert_eq!(pair.pixel(4, 0), [90, 90, 90, 255]);
    assert_eq!(pair.hole_count(), 4);
}

#[test]
fn empty_images_composite_to_empty_views() {
    let src = SourceImage::from_raw(0, 3, Vec::new()).unwrap();
    let views = composite_split(&src, ParallaxParams::default(), &pool(2)).unwrap();
    assert!(views.left.data().is_empty());
    let pair = composite_combined(&src, ParallaxParams::default(), &pool(2)).unwrap();
    assert!(pair.data().is_empty());
}

#[test]
fn more_workers_than_rows_still_covers_every_row() {
    let src = SourceImage::solid(3, 2, [50, 60, 70]).unwrap();
    let params = ParallaxParams::new(0.0, 10, 5).unwrap();
    let views = composite_split(&src, params, &pool(8)).unwrap();
    assert_eq!(views.left.hole_count(), 0);
    assert_eq!(views.right.hole_count(), 0);
}
