//! Tests for raster decode and encode

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgba, RgbaImage};
    use ndarray::Array3;
    use seamquilt::QuiltError;
    use seamquilt::io::image::{image_from_raster, load_raster, raster_from_image, save_raster};
    use tempfile::TempDir;

    // Tests saved rasters reload unchanged, creating the parent directory
    // Verified by transposing rows and columns on save
    #[test]
    fn test_save_and_load_png() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("deep").join("tile.png");
        let raster = Array3::from_shape_fn((3, 5, 3), |(y, x, c)| (y * 50 + x * 10 + c) as u8);

        save_raster(&raster, &path).expect("Failed to save");
        let loaded = load_raster(&path).expect("Failed to load");
        assert_eq!(loaded, raster);
    }

    // Tests decoded images always become three-channel rasters
    // Verified by keeping the alpha channel
    #[test]
    fn test_alpha_is_dropped() {
        let img = RgbaImage::from_pixel(2, 3, Rgba([10, 20, 30, 40]));
        let raster = raster_from_image(&DynamicImage::ImageRgba8(img));
        assert_eq!(raster.dim(), (3, 2, 3));
        assert_eq!(raster[[2, 1, 2]], 30);
    }

    // Tests single-channel rasters encode as grayscale
    // Verified by encoding them as RGB
    #[test]
    fn test_grayscale_encoding() {
        let raster = Array3::<u8>::from_elem((4, 2, 1), 77);
        let img = image_from_raster(&raster).expect("Failed to encode");
        assert!(matches!(img, DynamicImage::ImageLuma8(_)));
        assert_eq!((img.width(), img.height()), (2, 4));
    }

    // Tests unsupported channel counts are rejected
    // Verified by treating two channels as grayscale
    #[test]
    fn test_unsupported_channels() {
        let raster = Array3::<u8>::zeros((2, 2, 2));
        assert!(matches!(
            image_from_raster(&raster),
            Err(QuiltError::InvalidParameter { parameter: "channels", .. })
        ));
    }

    // Tests a missing file reports its path
    // Verified by dropping the path from the error
    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("absent.png");
        match load_raster(&path) {
            Err(QuiltError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a load error, got {other:?}"),
        }
    }
}
