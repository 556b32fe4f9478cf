// THEORY:
// A `Contour` is the spatial summary of one connected foreground region: the
// closed chain of boundary pixels around it. Like `Frame`, it is a "dumb" data
// container. It knows how to measure itself (enclosed area, number of distinct
// points) but not how it was found or what it is compared against. Contours are
// snapshots of a single frame and carry no identity across frames.

use serde::Serialize;

/// An integer pixel coordinate on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The closed outer boundary of one connected foreground region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    /// Boundary pixels in tracing order. The start point is not repeated at the end.
    pub points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area of the boundary polygon (absolute shoelace formula).
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice_signed: i64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum();
        twice_signed.abs() as f64 / 2.0
    }

    /// Number of pairwise distinct points on the boundary.
    pub fn distinct_points(&self) -> usize {
        let mut sorted = self.points.clone();
        sorted.sort_unstable();
        sorted.dedup();
        sorted.len()
    }
}
