use crate::error::{AztecError, Result};
use crate::models::{BitMatrix, Point};
use crate::utils::geometry::PerspectiveTransform;
use log::debug;

/// Sample a `dimension` x `dimension` module grid from `image`.
///
/// `transform` maps module space onto the image; each module is read at
/// its center `(x + 0.5, y + 0.5)`. Samples landing one pixel outside the
/// image are pulled back onto the border, anything further out fails.
pub fn sample_grid(
    image: &BitMatrix,
    dimension: usize,
    transform: &PerspectiveTransform,
) -> Result<BitMatrix> {
    if dimension == 0 {
        return Err(AztecError::NotFound);
    }
    let width = image.width() as i32;
    let height = image.height() as i32;
    let mut bits = BitMatrix::new_square(dimension);

    for y in 0..dimension {
        for x in 0..dimension {
            let p = transform.transform(&Point::new(x as f32 + 0.5, y as f32 + 0.5));
            if !p.x.is_finite() || !p.y.is_finite() {
                debug!("sample_grid: module ({x}, {y}) maps to a non-finite point");
                return Err(AztecError::NotFound);
            }
            let px = nudge(p.x as i32, width)?;
            let py = nudge(p.y as i32, height)?;
            if image.get(px, py) {
                bits.set(x, y, true);
            }
        }
    }

    Ok(bits)
}

fn nudge(v: i32, limit: i32) -> Result<usize> {
    if limit <= 0 || v < -1 || v > limit {
        debug!("sample_grid: sample {v} outside 0..{limit}");
        return Err(AztecError::NotFound);
    }
    Ok(v.clamp(0, limit - 1) as usize)
}
