//! Bresenham line rasterization
//!
//! Fills the gap between two sparse pointer samples with an 8-connected run of
//! grid points. Integer arithmetic only, carried in `i64` so that any pair of
//! `i32` endpoints is valid.

use super::Point;

/// Lazy forward Bresenham walk from `start` to `end` (both inclusive)
#[derive(Debug, Clone)]
pub struct LineIter {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LineIter {
    pub fn new(start: Point, end: Point) -> Self {
        let (x0, y0) = (i64::from(start.x), i64::from(start.y));
        let (x1, y1) = (i64::from(end.x), i64::from(end.y));

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        Self {
            x: x0,
            y: y0,
            end_x: x1,
            end_y: y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for LineIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }

        // x and y never leave the [start, end] box, so they always fit in i32
        let current = Point::new(self.x as i32, self.y as i32);

        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }

        let rem_x = (self.end_x - self.x).unsigned_abs();
        let rem_y = (self.end_y - self.y).unsigned_abs();

        // Each step moves at most one cell per axis
        let lower = usize::try_from(rem_x.max(rem_y) + 1).unwrap_or(usize::MAX);
        let upper = usize::try_from(rem_x + rem_y + 1).ok();
        (lower, upper)
    }
}

impl std::iter::FusedIterator for LineIter {}

/// Rasterize the segment `(x0, y0) -> (x1, y1)` into grid points.
///
/// The result starts at `(x0, y0)`, ends at `(x1, y1)`, and consecutive points
/// are 8-connected. The walk always runs from the lexicographically smaller
/// endpoint, so a segment and its reverse cover exactly the same cells.
pub fn rasterize_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
    let start = Point::new(x0, y0);
    let end = Point::new(x1, y1);

    if start <= end {
        LineIter::new(start, end).collect()
    } else {
        let mut points: Vec<Point> = LineIter::new(end, start).collect();
        points.reverse();
        points
    }
}
