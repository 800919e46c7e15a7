/// Number of coordinate axes the index partitions on.
pub const DIMENSION: usize = 2;

/// Tolerance used when two points agree on the splitting axis and the
/// other axis decides between a chain collision and a right descent.
pub const EPSILON: f64 = 0.000_000_1;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Coordinate on `axis` (0 = x, 1 = y).
    #[must_use]
    pub fn coord(&self, axis: usize) -> f64 {
        match axis % DIMENSION {
            0 => self.x,
            _ => self.y,
        }
    }
}
