use crate::error::{AztecError, Result};
use crate::models::{BitMatrix, Point};
use crate::utils::geometry::round;
use log::debug;

const INIT_SIZE: i32 = 10;
const CORR: f32 = 1.0;

/// Finds the corners of a dark region surrounded by white.
///
/// Starts from a small seed box and pushes each side outward (right, bottom,
/// left, top) while its border strip still touches a black pixel. A side that
/// has not yet seen black keeps advancing across white. Once the box is stable
/// each corner is found by sweeping diagonals inward from the box corners.
pub struct WhiteRectangleDetector<'a> {
    image: &'a BitMatrix,
    width: i32,
    height: i32,
    left_init: i32,
    right_init: i32,
    down_init: i32,
    up_init: i32,
}

impl<'a> WhiteRectangleDetector<'a> {
    /// Seed box of the default size at the image center
    pub fn new(image: &'a BitMatrix) -> Result<Self> {
        let (x, y) = (image.width() as i32 / 2, image.height() as i32 / 2);
        Self::with_seed(image, INIT_SIZE, x, y)
    }

    /// Seed box of `init_size` centered on `(x, y)`; fails if it leaves the image
    pub fn with_seed(image: &'a BitMatrix, init_size: i32, x: i32, y: i32) -> Result<Self> {
        let half = init_size / 2;
        let detector = Self {
            image,
            width: image.width() as i32,
            height: image.height() as i32,
            left_init: x - half,
            right_init: x + half,
            up_init: y - half,
            down_init: y + half,
        };
        if detector.up_init < 0
            || detector.left_init < 0
            || detector.down_init >= detector.height
            || detector.right_init >= detector.width
        {
            debug!("WhiteRectangleDetector: seed box around ({x}, {y}) leaves the image");
            return Err(AztecError::NotFound);
        }
        Ok(detector)
    }

    /// Returns `[top, left, right, bottom]` corner points, each moved one
    /// pixel toward the region's center.
    pub fn detect(&self) -> Result<[Point; 4]> {
        let mut left = self.left_init;
        let mut right = self.right_init;
        let mut up = self.up_init;
        let mut down = self.down_init;

        let mut found_on_right = false;
        let mut found_on_bottom = false;
        let mut found_on_left = false;
        let mut found_on_top = false;

        let mut black_on_border = true;
        let mut size_exceeded = false;

        while black_on_border {
            black_on_border = false;

            let mut not_white = true;
            while (not_white || !found_on_right) && right < self.width {
                not_white = self.contains_black_point(up, down, right, false);
                if not_white {
                    right += 1;
                    black_on_border = true;
                    found_on_right = true;
                } else if !found_on_right {
                    right += 1;
                }
            }
            if right >= self.width {
                size_exceeded = true;
                break;
            }

            let mut not_white = true;
            while (not_white || !found_on_bottom) && down < self.height {
                not_white = self.contains_black_point(left, right, down, true);
                if not_white {
                    down += 1;
                    black_on_border = true;
                    found_on_bottom = true;
                } else if !found_on_bottom {
                    down += 1;
                }
            }
            if down >= self.height {
                size_exceeded = true;
                break;
            }

            let mut not_white = true;
            while (not_white || !found_on_left) && left >= 0 {
                not_white = self.contains_black_point(up, down, left, false);
                if not_white {
                    left -= 1;
                    black_on_border = true;
                    found_on_left = true;
                } else if !found_on_left {
                    left -= 1;
                }
            }
            if left < 0 {
                size_exceeded = true;
                break;
            }

            let mut not_white = true;
            while (not_white || !found_on_top) && up >= 0 {
                not_white = self.contains_black_point(left, right, up, true);
                if not_white {
                    up -= 1;
                    black_on_border = true;
                    found_on_top = true;
                } else if !found_on_top {
                    up -= 1;
                }
            }
            if up < 0 {
                size_exceeded = true;
                break;
            }
        }

        if size_exceeded {
            debug!("WhiteRectangleDetector: region reaches the image border");
            return Err(AztecError::NotFound);
        }

        let max_size = right - left;
        let (l, r, u, d) = (left as f32, right as f32, up as f32, down as f32);
        let z = self.first_black_on_diagonals(max_size, |i| (l, d - i, l + i, d))?;
        let t = self.first_black_on_diagonals(max_size, |i| (l, u + i, l + i, u))?;
        let x = self.first_black_on_diagonals(max_size, |i| (r, u + i, r - i, u))?;
        let y = self.first_black_on_diagonals(max_size, |i| (r, d - i, r - i, d))?;

        Ok(self.center_edges(y, z, x, t))
    }

    fn first_black_on_diagonals<F>(&self, max_size: i32, segment: F) -> Result<Point>
    where
        F: Fn(f32) -> (f32, f32, f32, f32),
    {
        (1..max_size)
            .find_map(|i| {
                let (a_x, a_y, b_x, b_y) = segment(i as f32);
                self.black_point_on_segment(a_x, a_y, b_x, b_y)
            })
            .ok_or_else(|| {
                debug!("WhiteRectangleDetector: no black point on corner diagonals");
                AztecError::NotFound
            })
    }

    fn black_point_on_segment(&self, a_x: f32, a_y: f32, b_x: f32, b_y: f32) -> Option<Point> {
        let dist = round(Point::new(a_x, a_y).distance(&Point::new(b_x, b_y)));
        if dist <= 0 {
            return None;
        }
        let x_step = (b_x - a_x) / dist as f32;
        let y_step = (b_y - a_y) / dist as f32;

        (0..dist).find_map(|i| {
            let x = round(a_x + i as f32 * x_step);
            let y = round(a_y + i as f32 * y_step);
            self.image
                .get_signed(x, y)
                .then(|| Point::new(x as f32, y as f32))
        })
    }

    /// Move the four found points one pixel toward the center. `y`, `z`, `x`
    /// and `t` come from the bottom-right, bottom-left, top-right and top-left
    /// sweeps.
    fn center_edges(&self, y: Point, z: Point, x: Point, t: Point) -> [Point; 4] {
        if y.x < self.width as f32 / 2.0 {
            [
                Point::new(t.x - CORR, t.y + CORR),
                Point::new(z.x + CORR, z.y + CORR),
                Point::new(x.x - CORR, x.y - CORR),
                Point::new(y.x + CORR, y.y - CORR),
            ]
        } else {
            [
                Point::new(t.x + CORR, t.y + CORR),
                Point::new(z.x + CORR, z.y - CORR),
                Point::new(x.x - CORR, x.y + CORR),
                Point::new(y.x - CORR, y.y - CORR),
            ]
        }
    }

    /// Whether the strip `a..=b` at `fixed` holds a black pixel
    fn contains_black_point(&self, a: i32, b: i32, fixed: i32, horizontal: bool) -> bool {
        if horizontal {
            (a..=b).any(|x| self.image.get_signed(x, fixed))
        } else {
            (a..=b).any(|y| self.image.get_signed(fixed, y))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_image(size: usize, from: usize, to: usize) -> BitMatrix {
        BitMatrix::from_fn(size, size, |x, y| {
            (from..to).contains(&x) && (from..to).contains(&y)
        })
    }

    fn assert_near(p: Point, x: f32, y: f32) {
        assert!(
            (p.x - x).abs() <= 1.0 && (p.y - y).abs() <= 1.0,
            "{p:?} not within 1px of ({x}, {y})"
        );
    }

    #[test]
    fn test_solid_square_corners() {
        let image = square_image(60, 20, 40);
        let corners = WhiteRectangleDetector::new(&image).unwrap().detect().unwrap();
        assert_near(corners[0], 20.0, 20.0);
        assert_near(corners[1], 20.0, 39.0);
        assert_near(corners[2], 39.0, 20.0);
        assert_near(corners[3], 39.0, 39.0);
        assert_eq!(corners[0], Point::new(21.0, 21.0));
        assert_eq!(corners[3], Point::new(38.0, 38.0));
    }

    #[test]
    fn test_hollow_frame_grows_past_white_interior() {
        // 3px ring over 15..45 with a white 18..42 interior around the seed
        let image = BitMatrix::from_fn(60, 60, |x, y| {
            let outer = (15..45).contains(&x) && (15..45).contains(&y);
            let inner = (18..42).contains(&x) && (18..42).contains(&y);
            outer && !inner
        });
        let corners = WhiteRectangleDetector::new(&image).unwrap().detect().unwrap();
        assert_eq!(
            corners,
            [
                Point::new(16.0, 16.0),
                Point::new(16.0, 43.0),
                Point::new(43.0, 16.0),
                Point::new(43.0, 43.0),
            ]
        );
    }

    #[test]
    fn test_custom_seed() {
        let image = square_image(60, 20, 40);
        let corners = WhiteRectangleDetector::with_seed(&image, 15, 30, 30)
            .unwrap()
            .detect()
            .unwrap();
        assert_eq!(
            corners,
            [
                Point::new(21.0, 21.0),
                Point::new(21.0, 38.0),
                Point::new(38.0, 21.0),
                Point::new(38.0, 38.0),
            ]
        );
    }

    #[test]
    fn test_uniform_images_exceed_size() {
        let white = BitMatrix::new(60, 60);
        let detector = WhiteRectangleDetector::new(&white).unwrap();
        assert_eq!(detector.detect(), Err(AztecError::NotFound));

        let black = BitMatrix::from_fn(60, 60, |_, _| true);
        let detector = WhiteRectangleDetector::new(&black).unwrap();
        assert_eq!(detector.detect(), Err(AztecError::NotFound));
    }

    #[test]
    fn test_seed_outside_image() {
        let image = BitMatrix::new(5, 5);
        assert!(WhiteRectangleDetector::new(&image).is_err());
        let image = square_image(60, 20, 40);
        assert!(WhiteRectangleDetector::with_seed(&image, 10, 2, 30).is_err());
        assert!(WhiteRectangleDetector::with_seed(&image, 10, 30, 57).is_err());
    }
}
