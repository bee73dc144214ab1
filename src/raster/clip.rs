//! Cohen-Sutherland segment clipping against an inclusive grid rectangle

use super::Point;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Inclusive rectangle on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub min: Point,
    pub max: Point,
}

impl ClipRect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Rectangle of stamp origins whose `brush`x`brush` square can touch a
    /// `width`x`height` surface
    pub fn for_surface(width: u32, height: u32, brush: u32) -> Self {
        let reach = i64::from(brush.max(1)) - 1;
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Self {
            min: Point::new(clamp(-reach), clamp(-reach)),
            max: Point::new(clamp(i64::from(width) - 1), clamp(i64::from(height) - 1)),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.outcode(f64::from(p.x), f64::from(p.y)) == INSIDE
    }

    fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    fn outcode(&self, x: f64, y: f64) -> u8 {
        let mut code = INSIDE;
        if x < f64::from(self.min.x) {
            code |= LEFT;
        } else if x > f64::from(self.max.x) {
            code |= RIGHT;
        }
        if y < f64::from(self.min.y) {
            code |= TOP;
        } else if y > f64::from(self.max.y) {
            code |= BOTTOM;
        }
        code
    }

    fn snap(&self, x: f64, y: f64) -> Point {
        let x = x.round().clamp(f64::from(self.min.x), f64::from(self.max.x));
        let y = y.round().clamp(f64::from(self.min.y), f64::from(self.max.y));
        Point::new(x as i32, y as i32)
    }
}

/// Clip the segment `start`-`end` to `rect`.
///
/// Returns `None` when no part of it lies inside. Endpoints already inside
/// come back unchanged; cut ends are snapped to the nearest grid cell.
pub fn clip_segment(start: Point, end: Point, rect: &ClipRect) -> Option<(Point, Point)> {
    if rect.is_empty() {
        return None;
    }

    let (mut x0, mut y0) = (f64::from(start.x), f64::from(start.y));
    let (mut x1, mut y1) = (f64::from(end.x), f64::from(end.y));
    let mut code0 = rect.outcode(x0, y0);
    let mut code1 = rect.outcode(x1, y1);

    let (min_x, max_x) = (f64::from(rect.min.x), f64::from(rect.max.x));
    let (min_y, max_y) = (f64::from(rect.min.y), f64::from(rect.max.y));

    loop {
        if code0 | code1 == INSIDE {
            break;
        }
        if code0 & code1 != INSIDE {
            return None;
        }

        let out = if code0 != INSIDE { code0 } else { code1 };
        // A set bit guarantees the segment spans that edge, so the divisor is nonzero
        let (x, y) = if out & BOTTOM != 0 {
            (x0 + (x1 - x0) * (max_y - y0) / (y1 - y0), max_y)
        } else if out & TOP != 0 {
            (x0 + (x1 - x0) * (min_y - y0) / (y1 - y0), min_y)
        } else if out & RIGHT != 0 {
            (max_x, y0 + (y1 - y0) * (max_x - x0) / (x1 - x0))
        } else {
            (min_x, y0 + (y1 - y0) * (min_x - x0) / (x1 - x0))
        };

        if out == code0 {
            (x0, y0) = (x, y);
            code0 = rect.outcode(x0, y0);
        } else {
            (x1, y1) = (x, y);
            code1 = rect.outcode(x1, y1);
        }
    }

    Some((rect.snap(x0, y0), rect.snap(x1, y1)))
}
