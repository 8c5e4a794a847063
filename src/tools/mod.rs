//! Image-file helpers: load a picture into a binary [`BitMatrix`] and render
//! one back out.

use crate::config::max_image_dim;
use crate::models::BitMatrix;
use crate::utils::binarization::otsu_binarize;
use image::{GenericImageView, GrayImage, Luma};
use log::debug;
use std::path::Path;

/// Load an image file as 8-bit luma, downscaled to `AZTEC_MAX_DIM` if set.
pub fn load_luma<P: AsRef<Path>>(path: P) -> Result<GrayImage, image::ImageError> {
    let img = image::open(path)?;
    let luma = match max_image_dim() {
        Some(max_dim) if img.width().max(img.height()) as usize > max_dim => {
            let (orig_w, orig_h) = img.dimensions();
            let max_dim = max_dim as u32;
            let resized = img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle);
            debug!(
                "tools: resized {orig_w}x{orig_h} to {}x{}",
                resized.width(),
                resized.height()
            );
            resized.to_luma8()
        }
        _ => img.to_luma8(),
    };
    Ok(luma)
}

/// Binarize a luma image with a global Otsu threshold.
pub fn luma_to_bit_matrix(luma: &GrayImage) -> BitMatrix {
    let (width, height) = luma.dimensions();
    otsu_binarize(luma.as_raw(), width as usize, height as usize)
}

/// Load an image file and binarize it.
pub fn load_bit_matrix<P: AsRef<Path>>(path: P) -> Result<BitMatrix, image::ImageError> {
    Ok(luma_to_bit_matrix(&load_luma(path)?))
}

/// Render a matrix as a black-on-white luma image, one pixel per cell.
pub fn bit_matrix_to_luma(matrix: &BitMatrix) -> GrayImage {
    GrayImage::from_fn(matrix.width() as u32, matrix.height() as u32, |x, y| {
        if matrix.get(x as usize, y as usize) {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_round_trip() {
        let mut matrix = BitMatrix::new(5, 3);
        matrix.set(0, 0, true);
        matrix.set(4, 2, true);
        matrix.set(2, 1, true);
        let luma = bit_matrix_to_luma(&matrix);
        assert_eq!(luma.dimensions(), (5, 3));
        assert_eq!(luma.get_pixel(0, 0), &Luma([0]));
        assert_eq!(luma.get_pixel(1, 0), &Luma([255]));
        assert_eq!(luma_to_bit_matrix(&luma), matrix);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_bit_matrix("/nonexistent/aztec.png").is_err());
    }
}
