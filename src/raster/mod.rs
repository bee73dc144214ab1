//! Raster module - integer grid geometry for stroke stamping

mod clip;
mod line;

pub use clip::{clip_segment, ClipRect};
pub use line::{rasterize_line, LineIter};

use serde::{Deserialize, Serialize};

/// A point on the pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Snap a pointer offset (CSS pixels, fractional) to the grid cell it falls in
    pub fn from_offset(x: f32, y: f32) -> Self {
        Self {
            x: x.floor() as i32,
            y: y.floor() as i32,
        }
    }

    /// True if `other` is this point or one of its 8 neighbours
    pub fn is_adjacent(&self, other: &Point) -> bool {
        (i64::from(self.x) - i64::from(other.x)).abs() <= 1
            && (i64::from(self.y) - i64::from(other.y)).abs() <= 1
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Line between two consecutive pointer samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Grid points covering the segment, from `start` to `end` inclusive
    pub fn points(&self) -> Vec<Point> {
        rasterize_line(self.start.x, self.start.y, self.end.x, self.end.y)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}
