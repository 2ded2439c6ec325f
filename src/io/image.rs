//! Raster decode and encode through the `image` crate

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use ndarray::Array3;

use crate::io::error::{QuiltError, Result, invalid_parameter};
use crate::spatial::region::Raster;

/// Load an image file as a three-channel RGB raster
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path).map_err(|e| QuiltError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(raster_from_image(&img))
}

/// Convert a decoded image into a three-channel RGB raster
pub fn raster_from_image(img: &DynamicImage) -> Raster {
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let mut raster = Array3::zeros((height, width, 3));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        for (c, &value) in pixel.0.iter().enumerate() {
            if let Some(slot) = raster.get_mut((y as usize, x as usize, c)) {
                *slot = value;
            }
        }
    }

    raster
}

/// Convert a raster with 1, 3 or 4 channels into an image
///
/// # Errors
///
/// Returns an error for any other channel count
pub fn image_from_raster(raster: &Raster) -> Result<DynamicImage> {
    let (height, width, channels) = raster.dim();
    let data: Vec<u8> = raster.as_standard_layout().iter().copied().collect();
    let (width, height) = (width as u32, height as u32);

    let img = match channels {
        1 => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
        _ => None,
    };

    img.ok_or_else(|| {
        invalid_parameter(
            "channels",
            &channels,
            &"rasters must have 1, 3 or 4 channels",
        )
    })
}

/// Save a raster, creating the parent directory when needed
///
/// # Errors
///
/// Returns an error if:
/// - The raster has an unsupported channel count
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_raster(raster: &Raster, path: &Path) -> Result<()> {
    let img = image_from_raster(raster)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| QuiltError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(path).map_err(|e| QuiltError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
