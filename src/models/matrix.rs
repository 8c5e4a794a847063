use rayon::prelude::*;
use std::fmt;

/// Compact bit matrix, one bit per pixel or module. `true` means black.
///
/// Each row starts on a fresh `u32` word so rows can be filled independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    row_size: usize,
    bits: Vec<u32>,
}

impl BitMatrix {
    /// Create a new all-white bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let row_size = width.div_ceil(32);
        Self {
            width,
            height,
            row_size,
            bits: vec![0; row_size * height],
        }
    }

    /// Create a square matrix
    pub fn new_square(dimension: usize) -> Self {
        Self::new(dimension, dimension)
    }

    /// Build a matrix by evaluating `f(x, y)` for every cell, rows in parallel
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> bool + Sync,
    {
        let mut matrix = Self::new(width, height);
        if matrix.row_size == 0 {
            return matrix;
        }
        matrix
            .bits
            .par_chunks_mut(matrix.row_size)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..width {
                    if f(x, y) {
                        row[x / 32] |= 1 << (x % 32);
                    }
                }
            });
        matrix
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-bounds reads are white
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        (self.bits[y * self.row_size + x / 32] >> (x % 32)) & 1 == 1
    }

    /// Same as [`get`](Self::get) for signed coordinates; negatives read as white
    pub fn get_signed(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.get(x as usize, y as usize)
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.row_size + x / 32;
        if value {
            self.bits[index] |= 1 << (x % 32);
        } else {
            self.bits[index] &= !(1 << (x % 32));
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.bits[y * self.row_size + x / 32] ^= 1 << (x % 32);
    }

    /// Number of black cells
    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Parse a textual grid where every cell is written as `set` or `unset`.
    ///
    /// Blank lines are skipped. Returns `None` on an unknown token or ragged rows.
    pub fn parse(text: &str, set: &str, unset: &str) -> Option<Self> {
        if set.is_empty() || unset.is_empty() {
            return None;
        }
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for line in text.lines() {
            let mut rest = line.trim_end_matches('\r');
            if rest.trim().is_empty() {
                continue;
            }
            let mut row = Vec::new();
            while !rest.is_empty() {
                if let Some(tail) = rest.strip_prefix(set) {
                    row.push(true);
                    rest = tail;
                } else if let Some(tail) = rest.strip_prefix(unset) {
                    row.push(false);
                    rest = tail;
                } else if rest.trim().is_empty() {
                    // trailing whitespace trimmed by editors
                    break;
                } else {
                    return None;
                }
            }
            rows.push(row);
        }
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let mut matrix = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, &bit) in row.iter().enumerate() {
                matrix.set(x, y, bit);
            }
        }
        Some(matrix)
    }

    /// Horizontal flip
    pub fn mirrored(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(self.width - 1 - x, y)
        })
    }

    /// Rotate 90 degrees clockwise
    pub fn rotated_90(&self) -> Self {
        Self::from_fn(self.height, self.width, |x, y| {
            self.get(y, self.height - 1 - x)
        })
    }

    /// Render every cell as a `scale`x`scale` block with a white border of
    /// `quiet_zone` cells on each side
    pub fn scaled(&self, scale: usize, quiet_zone: usize) -> Self {
        let scale = scale.max(1);
        let width = (self.width + 2 * quiet_zone) * scale;
        let height = (self.height + 2 * quiet_zone) * scale;
        Self::from_fn(width, height, |x, y| {
            let (mx, my) = (x / scale, y / scale);
            mx >= quiet_zone
                && my >= quiet_zone
                && self.get(mx - quiet_zone, my - quiet_zone)
        })
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str(if self.get(x, y) { "X " } else { "  " })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
