//! Tests for diagnostic raster capture and naming

#[cfg(test)]
mod tests {
    use ndarray::Array3;
    use seamquilt::algorithm::seam::SeamCut;
    use seamquilt::io::debug::{DebugCapture, sibling_path, tile_mosaic, write_debug_rasters};
    use seamquilt::spatial::Rect;
    use seamquilt::spatial::blocks::BlockLibrary;
    use seamquilt::spatial::mask::SeamMask;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn small_library(count_side: usize) -> BlockLibrary {
        // A source holding exactly count_side x count_side blocks of side 2
        let side = count_side * 2;
        let source = Array3::from_shape_fn((side, side, 3), |(y, x, _)| ((y / 2) * 10 + x / 2 + 1) as u8);
        BlockLibrary::extract(&source.view(), 2, 2, false).expect("Failed to extract")
    }

    // Tests sibling names keep the directory and extension
    // Verified by appending the suffix after the extension
    #[test]
    fn test_sibling_path() {
        assert_eq!(
            sibling_path(Path::new("out/result.png"), "_mask"),
            PathBuf::from("out/result_mask.png")
        );
        assert_eq!(
            sibling_path(Path::new("texture.jpg"), "_blocks"),
            PathBuf::from("texture_blocks.jpg")
        );
        assert_eq!(
            sibling_path(Path::new("plain"), "_seams"),
            PathBuf::from("plain_seams.png")
        );
    }

    // Tests the mosaic grid size and gutter
    // Verified by laying tiles out without a gutter
    #[test]
    fn test_tile_mosaic_layout() {
        let library = small_library(2);
        assert_eq!(library.len(), 4);

        let mosaic = tile_mosaic(&library);
        // Two columns and two rows of 2-pixel tiles with a 3-pixel gutter
        assert_eq!(mosaic.dim(), (7, 7, 3));
        assert_eq!(mosaic[[0, 0, 0]], 1);
        assert_eq!(mosaic[[0, 5, 0]], 2);
        assert_eq!(mosaic[[5, 0, 0]], 11);
        assert_eq!(mosaic[[3, 3, 0]], 0, "gutter stays black");
    }

    // Tests recorded masks and seams land at the placement rectangle
    // Verified by recording at the canvas origin
    #[test]
    fn test_record_placement() {
        let mut capture = DebugCapture::new(8, 6);
        let mut mask = SeamMask::use_tile(3, 2);
        mask.keep_canvas(0, 0);
        let cut = SeamCut {
            mask,
            seam: vec![[0, 0], [1, 0]],
            cost: 5,
        };
        capture.record(Rect::new(4, 3, 3, 2), &cut).expect("Failed to record");

        let rasters = capture.into_rasters(&small_library(1));
        assert_eq!(rasters.mask_overlay[[3, 4, 0]], 0);
        assert_eq!(rasters.mask_overlay[[3, 5, 0]], 255);
        assert_eq!(rasters.mask_overlay[[4, 6, 0]], 255);
        assert_eq!(rasters.mask_overlay[[0, 0, 0]], 0);

        assert_eq!(rasters.seam_overlay[[3, 4, 0]], 0);
        assert_eq!(rasters.seam_overlay[[3, 5, 0]], 0);
        assert_eq!(rasters.seam_overlay[[3, 6, 0]], 255);
        assert_eq!(rasters.seam_overlay[[0, 0, 0]], 255);

        assert!(capture_outside_fails());
    }

    fn capture_outside_fails() -> bool {
        let mut capture = DebugCapture::new(4, 4);
        let cut = SeamCut {
            mask: SeamMask::use_tile(3, 3),
            seam: Vec::new(),
            cost: 0,
        };
        capture.record(Rect::new(2, 2, 3, 3), &cut).is_err()
    }

    // Tests every debug raster is written beside the output
    // Verified by writing them into the working directory
    #[test]
    fn test_write_debug_rasters() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let output = dir.path().join("nested").join("quilt.png");
        let rasters = DebugCapture::new(6, 5).into_rasters(&small_library(2));

        let written = write_debug_rasters(&rasters, &output).expect("Failed to write");
        let names: Vec<String> = written
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();
        assert_eq!(names, vec!["quilt_blocks.png", "quilt_mask.png", "quilt_seams.png"]);
        assert!(written.iter().all(|p| p.exists()));
    }
}
