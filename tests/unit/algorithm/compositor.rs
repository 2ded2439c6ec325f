//! Tests for masked tile compositing

#[cfg(test)]
mod tests {
    use ndarray::Array3;
    use seamquilt::QuiltError;
    use seamquilt::algorithm::compositor::composite;
    use seamquilt::spatial::Rect;
    use seamquilt::spatial::mask::SeamMask;

    // Tests only pixels selected by the mask are overwritten
    // Verified by ignoring the mask
    #[test]
    fn test_mask_selects_tile_pixels() {
        let mut canvas = Array3::<u8>::from_elem((6, 6, 3), 10);
        let tile = Array3::<u8>::from_elem((3, 4, 3), 200);
        let mut mask = SeamMask::use_tile(4, 3);
        mask.keep_canvas(0, 0);
        mask.keep_canvas(3, 2);

        composite(&mut canvas, &tile.view(), Rect::new(1, 2, 4, 3), &mask).unwrap();

        for y in 0..6 {
            for x in 0..6 {
                let inside = (1..5).contains(&x) && (2..5).contains(&y);
                let kept = (x, y) == (1, 2) || (x, y) == (4, 4);
                let expected = if inside && !kept { 200 } else { 10 };
                for c in 0..3 {
                    assert_eq!(canvas[[y, x, c]], expected, "pixel ({x}, {y}) channel {c}");
                }
            }
        }
    }

    // Tests a fully kept mask leaves the canvas unchanged
    // Verified by inverting the mask bit
    #[test]
    fn test_kept_mask_is_noop() {
        let mut canvas = Array3::from_shape_fn((4, 4, 3), |(y, x, c)| (y * 16 + x * 4 + c) as u8);
        let before = canvas.clone();
        let tile = Array3::<u8>::from_elem((4, 4, 3), 255);
        let mut mask = SeamMask::use_tile(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                mask.keep_canvas(x, y);
            }
        }

        composite(&mut canvas, &tile.view(), Rect::new(0, 0, 4, 4), &mask).unwrap();
        assert_eq!(canvas, before);
    }

    // Tests size mismatches are rejected without touching the canvas
    // Verified by compositing the overlapping part anyway
    #[test]
    fn test_mismatched_sizes_error() {
        let mut canvas = Array3::<u8>::zeros((6, 6, 3));
        let tile = Array3::<u8>::ones((3, 3, 3));

        let wrong_mask = SeamMask::use_tile(2, 3);
        let result = composite(&mut canvas, &tile.view(), Rect::new(0, 0, 3, 3), &wrong_mask);
        assert!(matches!(result, Err(QuiltError::Computation { .. })));

        let mask = SeamMask::use_tile(3, 3);
        let outside = composite(&mut canvas, &tile.view(), Rect::new(4, 4, 3, 3), &mask);
        assert!(outside.is_err());
        assert!(canvas.iter().all(|&v| v == 0));
    }
}
