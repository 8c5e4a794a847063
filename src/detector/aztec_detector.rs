//! Bullseye location, orientation and parameter decoding for Aztec symbols.
//!
//! Detection runs in five steps:
//! 1. find the symbol center with the white-rectangle detector
//! 2. walk out along the diagonals to count bullseye rings
//! 3. read the orientation marks and the RS-protected mode message
//! 4. sample the module grid with a perspective transform
//! 5. extrapolate the outer symbol corners

use super::grid_sampler::sample_grid;
use super::white_rectangle::WhiteRectangleDetector;
use crate::error::{AztecError, Result};
use crate::models::{BitMatrix, Point, PointI};
use crate::reed_solomon::{AZTEC_PARAM, ReedSolomonDecoder};
use crate::utils::geometry::{PerspectiveTransform, round};
use log::debug;

/// Orientation marks read clockwise from the corner with three marks
const EXPECTED_CORNER_BITS: [u32; 4] = [0xee0, 0x1dc, 0x83b, 0x707];

/// Geometry and parameters of a located symbol
#[derive(Debug, Clone, PartialEq)]
pub struct AztecDetectorResult {
    /// Sampled module grid, one cell per module
    pub bits: BitMatrix,
    /// Outer symbol corners: top-left, top-right, bottom-right, bottom-left
    /// in the symbol's own orientation
    pub points: [Point; 4],
    /// Compact (5 ring) or full (7 ring) symbol
    pub compact: bool,
    /// Data layers around the bullseye
    pub layers: usize,
    /// Data codewords declared by the mode message
    pub data_blocks: usize,
    /// Symbols fixed while decoding the mode message
    pub errors_corrected: usize,
}

impl AztecDetectorResult {
    /// Side length of the module grid
    pub fn dimension(&self) -> usize {
        symbol_dimension(self.compact, self.layers)
    }
}

/// Bullseye corners just outside the central rings
#[derive(Debug, Clone, Copy)]
struct Bullseye {
    corners: [Point; 4],
    rings: usize,
    compact: bool,
}

/// Decoded mode message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Parameters {
    layers: usize,
    data_blocks: usize,
    shift: usize,
    errors_corrected: usize,
}

/// Locates an Aztec symbol in a binary image
pub struct AztecDetector<'a> {
    image: &'a BitMatrix,
}

impl<'a> AztecDetector<'a> {
    /// Detector over a binarized image
    pub fn new(image: &'a BitMatrix) -> Self {
        Self { image }
    }

    /// Run detection. `mirror` reads the symbol as if the image were flipped.
    pub fn detect(&self, mirror: bool) -> Result<AztecDetectorResult> {
        let center = self.matrix_center();
        let mut bullseye = self.bullseye_corners(center)?;
        if mirror {
            bullseye.corners.swap(0, 2);
        }

        let params = self.extract_parameters(&bullseye)?;
        let shift = params.shift;
        let oriented: [Point; 4] =
            std::array::from_fn(|i| bullseye.corners[(shift + i) % 4]);

        let dimension = symbol_dimension(bullseye.compact, params.layers);
        let bits = self.sample(&oriented, dimension, bullseye.rings)?;
        let points = expand_square(&oriented, 2 * bullseye.rings, dimension);

        debug!(
            "AztecDetector: {} symbol, {} layers, {} data blocks, rotation {}",
            if bullseye.compact { "compact" } else { "full" },
            params.layers,
            params.data_blocks,
            shift
        );

        Ok(AztecDetectorResult {
            bits,
            points,
            compact: bullseye.compact,
            layers: params.layers,
            data_blocks: params.data_blocks,
            errors_corrected: params.errors_corrected,
        })
    }

    fn extract_parameters(&self, bullseye: &Bullseye) -> Result<Parameters> {
        let corners = &bullseye.corners;
        if !corners.iter().all(|p| self.is_valid(p.round())) {
            debug!("AztecDetector: bullseye corner outside the image");
            return Err(AztecError::NotFound);
        }

        let length = 2 * bullseye.rings;
        let sides: [u32; 4] =
            std::array::from_fn(|i| self.sample_line(corners[i], corners[(i + 1) % 4], length));

        let shift = rotation(&sides, length)?;

        let mut parameter_data = 0u64;
        for i in 0..4 {
            let side = sides[(shift + i) % 4] as u64;
            if bullseye.compact {
                // ..XXXXXXX. per side
                parameter_data = (parameter_data << 7) + ((side >> 1) & 0x7f);
            } else {
                // ..XXXXX.XXXXX. per side, skipping the reference grid bit
                parameter_data =
                    (parameter_data << 10) + ((side >> 2) & (0x1f << 5)) + ((side >> 1) & 0x1f);
            }
        }

        let (data, errors_corrected) = corrected_parameter_data(parameter_data, bullseye.compact)?;
        let (layers, data_blocks) = if bullseye.compact {
            // 2 bits layers, 6 bits data blocks
            ((data >> 6) as usize + 1, (data & 0x3f) as usize + 1)
        } else {
            // 5 bits layers, 11 bits data blocks
            ((data >> 11) as usize + 1, (data & 0x7ff) as usize + 1)
        };

        Ok(Parameters {
            layers,
            data_blocks,
            shift,
            errors_corrected,
        })
    }

    /// Find the rings of the bullseye and return the corners of the
    /// orientation-mark square around them, ordered a, b, c, d as
    /// (top-right, bottom-right, bottom-left, top-left) in image space.
    fn bullseye_corners(&self, center: PointI) -> Result<Bullseye> {
        let (mut pin_a, mut pin_b, mut pin_c, mut pin_d) = (center, center, center, center);
        let mut color = true;
        let mut rings = 1;

        while rings < 9 {
            let out_a = self.first_different(pin_a, color, 1, -1);
            let out_b = self.first_different(pin_b, color, 1, 1);
            let out_c = self.first_different(pin_c, color, -1, 1);
            let out_d = self.first_different(pin_d, color, -1, -1);

            if rings > 2 {
                let q = out_d.distance(&out_a) * rings as f32
                    / (pin_d.distance(&pin_a) * (rings + 2) as f32);
                if !(0.75..=1.25).contains(&q)
                    || !self.is_white_or_black_rectangle(out_a, out_b, out_c, out_d)
                {
                    break;
                }
            }

            pin_a = out_a;
            pin_b = out_b;
            pin_c = out_c;
            pin_d = out_d;
            color = !color;
            rings += 1;
        }

        if rings != 5 && rings != 7 {
            debug!("AztecDetector: bullseye stopped at ring {rings}");
            return Err(AztecError::NotFound);
        }

        // Push half a pixel outward onto the border between the rings
        let inner = [
            Point::new(pin_a.x as f32 + 0.5, pin_a.y as f32 - 0.5),
            Point::new(pin_b.x as f32 + 0.5, pin_b.y as f32 + 0.5),
            Point::new(pin_c.x as f32 - 0.5, pin_c.y as f32 + 0.5),
            Point::new(pin_d.x as f32 - 0.5, pin_d.y as f32 - 0.5),
        ];

        Ok(Bullseye {
            corners: expand_square(&inner, 2 * rings - 3, 2 * rings),
            rings,
            compact: rings == 5,
        })
    }

    fn matrix_center(&self) -> PointI {
        let (cx, cy) = (self.image.width() as i32 / 2, self.image.height() as i32 / 2);
        let first = WhiteRectangleDetector::new(self.image)
            .and_then(|d| d.detect())
            .unwrap_or_else(|_| self.corners_around(cx, cy));
        let estimate = average(&first);

        // Re-run from the estimate so the box starts inside the bullseye
        let refined = WhiteRectangleDetector::with_seed(self.image, 15, estimate.x, estimate.y)
            .and_then(|d| d.detect())
            .unwrap_or_else(|_| self.corners_around(estimate.x, estimate.y));
        average(&refined)
    }

    fn corners_around(&self, cx: i32, cy: i32) -> [Point; 4] {
        [
            self.first_different(PointI::new(cx + 7, cy - 7), false, 1, -1).into(),
            self.first_different(PointI::new(cx + 7, cy + 7), false, 1, 1).into(),
            self.first_different(PointI::new(cx - 7, cy + 7), false, -1, 1).into(),
            self.first_different(PointI::new(cx - 7, cy - 7), false, -1, -1).into(),
        ]
    }

    fn sample(&self, oriented: &[Point; 4], dimension: usize, rings: usize) -> Result<BitMatrix> {
        let low = dimension as f32 / 2.0 - rings as f32;
        let high = dimension as f32 / 2.0 + rings as f32;
        let modules = [
            Point::new(low, low),
            Point::new(high, low),
            Point::new(high, high),
            Point::new(low, high),
        ];
        let transform = PerspectiveTransform::from_points(&modules, oriented).ok_or_else(|| {
            debug!("AztecDetector: degenerate bullseye quadrilateral");
            AztecError::NotFound
        })?;
        sample_grid(self.image, dimension, &transform)
    }

    /// Read `size` modules from `p1` toward `p2`, MSB first
    fn sample_line(&self, p1: Point, p2: Point, size: usize) -> u32 {
        let d = p1.distance(&p2);
        let module_size = d / size as f32;
        let dx = module_size * (p2.x - p1.x) / d;
        let dy = module_size * (p2.y - p1.y) / d;
        (0..size).fold(0, |acc, i| {
            let x = round(p1.x + i as f32 * dx);
            let y = round(p1.y + i as f32 * dy);
            (acc << 1) | self.image.get_signed(x, y) as u32
        })
    }

    /// Whether the ring border through these points has a single color.
    /// Points are pulled 3 pixels inward before checking.
    fn is_white_or_black_rectangle(&self, p1: PointI, p2: PointI, p3: PointI, p4: PointI) -> bool {
        const CORR: i32 = 3;
        let max_x = self.image.width() as i32 - 1;
        let max_y = self.image.height() as i32 - 1;

        let p1 = PointI::new((p1.x - CORR).max(0), (p1.y + CORR).min(max_y));
        let p2 = PointI::new((p2.x - CORR).max(0), (p2.y - CORR).max(0));
        let p3 = PointI::new((p3.x + CORR).min(max_x), (p3.y - CORR).min(max_y).max(0));
        let p4 = PointI::new((p4.x + CORR).min(max_x), (p4.y + CORR).min(max_y));

        let c_init = self.color(p4, p1);
        c_init != 0
            && self.color(p1, p2) == c_init
            && self.color(p2, p3) == c_init
            && self.color(p3, p4) == c_init
    }

    /// 1 if the segment is mostly the color of `p1`, -1 if mostly the
    /// other color, 0 if mixed
    fn color(&self, p1: PointI, p2: PointI) -> i32 {
        let d = p1.distance(&p2);
        if d == 0.0 {
            return 0;
        }
        let dx = (p2.x - p1.x) as f32 / d;
        let dy = (p2.y - p1.y) as f32 / d;
        let color_model = self.image.get_signed(p1.x, p1.y);

        let mut px = p1.x as f32;
        let mut py = p1.y as f32;
        let mut error = 0;
        for _ in 0..d.floor() as i32 {
            if self.image.get_signed(round(px), round(py)) != color_model {
                error += 1;
            }
            px += dx;
            py += dy;
        }

        let err_ratio = error as f32 / d;
        if err_ratio > 0.1 && err_ratio < 0.9 {
            return 0;
        }
        if (err_ratio <= 0.1) == color_model { 1 } else { -1 }
    }

    /// Walk from `init` in direction (dx, dy) while pixels equal `color`,
    /// then slide along each axis to the last pixel of that color.
    fn first_different(&self, init: PointI, color: bool, dx: i32, dy: i32) -> PointI {
        let mut x = init.x + dx;
        let mut y = init.y + dy;
        while self.is_valid(PointI::new(x, y)) && self.image.get_signed(x, y) == color {
            x += dx;
            y += dy;
        }
        x -= dx;
        y -= dy;

        while self.is_valid(PointI::new(x, y)) && self.image.get_signed(x, y) == color {
            x += dx;
        }
        x -= dx;

        while self.is_valid(PointI::new(x, y)) && self.image.get_signed(x, y) == color {
            y += dy;
        }
        y -= dy;

        PointI::new(x, y)
    }

    fn is_valid(&self, p: PointI) -> bool {
        p.x >= 0
            && p.y >= 0
            && (p.x as usize) < self.image.width()
            && (p.y as usize) < self.image.height()
    }
}

/// Module grid side length
pub fn symbol_dimension(compact: bool, layers: usize) -> usize {
    if compact {
        4 * layers + 11
    } else {
        4 * layers + 2 * ((2 * layers + 6) / 15) + 15
    }
}

/// Match the 12 orientation bits against the four rotations
fn rotation(sides: &[u32; 4], length: usize) -> Result<usize> {
    let mut corner_bits = 0u32;
    for &side in sides {
        // XX......X where X are orientation marks
        let t = ((side >> (length - 2)) << 1) + (side & 1);
        corner_bits = (corner_bits << 3) + t;
    }
    // Rotate so the three marks of each corner sit together
    corner_bits = ((corner_bits & 1) << 11) + (corner_bits >> 1);

    EXPECTED_CORNER_BITS
        .iter()
        .position(|&expected| (corner_bits ^ expected).count_ones() <= 2)
        .ok_or_else(|| {
            debug!("AztecDetector: orientation bits {corner_bits:#05x} match no rotation");
            AztecError::NotFound
        })
}

/// RS-correct the mode message; returns its data part and the number of
/// symbols fixed
fn corrected_parameter_data(mut parameter_data: u64, compact: bool) -> Result<(u32, usize)> {
    let (num_codewords, num_data_codewords) = if compact { (7, 2) } else { (10, 4) };

    let mut words = vec![0u32; num_codewords];
    for word in words.iter_mut().rev() {
        *word = (parameter_data & 0xf) as u32;
        parameter_data >>= 4;
    }

    let errors_corrected = ReedSolomonDecoder::new(&AZTEC_PARAM)
        .decode(&mut words, num_codewords - num_data_codewords)
        .map_err(|e| {
            debug!("AztecDetector: mode message uncorrectable: {e}");
            AztecError::NotFound
        })?;

    let data = words[..num_data_codewords]
        .iter()
        .fold(0u32, |acc, &w| (acc << 4) + w);
    Ok((data, errors_corrected))
}

/// Scale a square given by its corners about its center so a side of
/// `old_side` modules becomes `new_side` modules
fn expand_square(corners: &[Point; 4], old_side: usize, new_side: usize) -> [Point; 4] {
    let ratio = new_side as f32 / (2.0 * old_side as f32);

    let diagonal = |a: Point, b: Point| {
        let (dx, dy) = (a.x - b.x, a.y - b.y);
        let (cx, cy) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        (
            Point::new(cx + ratio * dx, cy + ratio * dy),
            Point::new(cx - ratio * dx, cy - ratio * dy),
        )
    };

    let (r0, r2) = diagonal(corners[0], corners[2]);
    let (r1, r3) = diagonal(corners[1], corners[3]);
    [r0, r1, r2, r3]
}

fn average(points: &[Point; 4]) -> PointI {
    let sx: f32 = points.iter().map(|p| p.x).sum();
    let sy: f32 = points.iter().map(|p| p.y).sum();
    PointI::new(round(sx / 4.0), round(sy / 4.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPACT: &str = include_str!("../../tests/fixtures/compact_1_layer.txt");
    const FULL_2: &str = include_str!("../../tests/fixtures/full_2_layers.txt");

    fn fixture(text: &str) -> BitMatrix {
        BitMatrix::parse(text, "X", ".").unwrap()
    }

    fn assert_near(p: Point, x: f32, y: f32) {
        assert!(
            (p.x - x).abs() <= 1.0 && (p.y - y).abs() <= 1.0,
            "{p:?} not within 1px of ({x}, {y})"
        );
    }

    #[test]
    fn test_dimension() {
        assert_eq!(symbol_dimension(true, 1), 15);
        assert_eq!(symbol_dimension(true, 4), 27);
        assert_eq!(symbol_dimension(false, 1), 19);
        assert_eq!(symbol_dimension(false, 2), 23);
        assert_eq!(symbol_dimension(false, 5), 37);
        assert_eq!(symbol_dimension(false, 32), 151);
    }

    #[test]
    fn test_rotation_bits() {
        // compact sides carrying only the orientation marks of rotation 0
        let length = 10;
        let sides = [0b11_0000000_0, 0b11_0000000_1, 0b00_0000000_0, 0b00_0000000_1];
        assert_eq!(rotation(&sides, length), Ok(0));
        let rotated = [sides[3], sides[0], sides[1], sides[2]];
        assert_eq!(rotation(&rotated, length), Ok(1));
        assert_eq!(rotation(&[0; 4], length), Err(AztecError::NotFound));
    }

    #[test]
    fn test_parameter_correction() {
        // compact, 1 layer, 5 data blocks: [0, 4, 10, 3, 11, 8, 4]
        let clean: u64 = 0x04a_3b84;
        assert_eq!(corrected_parameter_data(clean, true), Ok((0x04, 0)));
        let damaged = clean ^ 0x0f0_0030;
        assert_eq!(corrected_parameter_data(damaged, true), Ok((0x04, 2)));
        let hopeless = clean ^ 0x777_0000;
        assert_eq!(
            corrected_parameter_data(hopeless, true),
            Err(AztecError::NotFound)
        );
    }

    #[test]
    fn test_expand_square() {
        let inner = [
            Point::new(12.0, 8.0),
            Point::new(12.0, 12.0),
            Point::new(8.0, 12.0),
            Point::new(8.0, 8.0),
        ];
        let outer = expand_square(&inner, 4, 8);
        assert_eq!(outer[0], Point::new(14.0, 6.0));
        assert_eq!(outer[1], Point::new(14.0, 14.0));
        assert_eq!(outer[2], Point::new(6.0, 14.0));
        assert_eq!(outer[3], Point::new(6.0, 6.0));
    }

    #[test]
    fn test_detect_compact() {
        let symbol = fixture(COMPACT);
        let image = symbol.scaled(3, 3);
        let result = AztecDetector::new(&image).detect(false).unwrap();
        assert!(result.compact);
        assert_eq!(result.layers, 1);
        assert_eq!(result.data_blocks, 5);
        assert_eq!(result.errors_corrected, 0);
        assert_eq!(result.dimension(), 15);
        assert_eq!(result.bits, symbol);

        assert_near(result.points[0], 9.0, 9.0);
        assert_near(result.points[1], 54.0, 9.0);
        assert_near(result.points[2], 54.0, 54.0);
        assert_near(result.points[3], 9.0, 54.0);
    }

    #[test]
    fn test_detect_rotated_reports_oriented_corners() {
        let symbol = fixture(COMPACT);
        let image = symbol.rotated_90().scaled(3, 3);
        let result = AztecDetector::new(&image).detect(false).unwrap();
        assert_eq!(result.bits, symbol);
        assert_near(result.points[0], 54.0, 9.0);
        assert_near(result.points[3], 9.0, 9.0);
    }

    #[test]
    fn test_detect_full() {
        let symbol = fixture(FULL_2);
        let image = symbol.scaled(4, 3);
        let result = AztecDetector::new(&image).detect(false).unwrap();
        assert!(!result.compact);
        assert_eq!(result.layers, 2);
        assert_eq!(result.data_blocks, 10);
        assert_eq!(result.bits, symbol);
    }

    #[test]
    fn test_mirror_mode() {
        let symbol = fixture(COMPACT);
        let flipped = symbol.mirrored().scaled(3, 3);
        let detector = AztecDetector::new(&flipped);
        assert_eq!(detector.detect(false), Err(AztecError::NotFound));
        let result = detector.detect(true).unwrap();
        assert_eq!(result.bits, symbol);
    }

    #[test]
    fn test_blank_image() {
        let image = BitMatrix::new(60, 60);
        assert_eq!(
            AztecDetector::new(&image).detect(false),
            Err(AztecError::NotFound)
        );
        let tiny = BitMatrix::new(3, 3);
        assert!(AztecDetector::new(&tiny).detect(false).is_err());
    }
}
