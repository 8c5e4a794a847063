use crate::utils::geometry::round;

/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Nearest grid point, rounding half away from zero
    pub fn round(&self) -> PointI {
        PointI::new(round(self.x), round(self.y))
    }
}

/// Integer point for pixel walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointI {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl PointI {
    /// Create a new integer point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another grid point
    pub fn distance(&self, other: &PointI) -> f32 {
        Point::from(*self).distance(&Point::from(*other))
    }
}

impl From<PointI> for Point {
    fn from(p: PointI) -> Self {
        Point::new(p.x as f32, p.y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_round() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert_eq!(Point::new(2.5, -2.5).round(), PointI::new(3, -3));
        assert_eq!(Point::new(1.49, 7.51).round(), PointI::new(1, 8));
        assert!((PointI::new(1, 1).distance(&PointI::new(4, 5)) - 5.0).abs() < 1e-6);
    }
}
