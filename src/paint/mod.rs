//! Paint module - turns pointer events into stamped strokes
//!
//! The host event loop owns a [`PaintSession`] and a surface and feeds every
//! pointer event through [`handle_pointer_event`]. Between two move samples the
//! gap is filled with [`rasterize_line`], so fast pointer motion still leaves a
//! continuous stroke.

use serde::{Deserialize, Serialize};

use crate::canvas::{Color, RasterSurface};
use crate::raster::{clip_segment, rasterize_line, ClipRect, Point};

/// Side length of the square stamped at every stroke point
pub const DEFAULT_BRUSH_SIZE: u32 = 2;

/// Pointer input as delivered by the host, in surface-local offsets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
}

/// Per-canvas drawing state
#[derive(Debug, Clone)]
pub struct PaintSession {
    previous_point: Option<Point>,
    ink: Color,
    brush_size: u32,
}

impl PaintSession {
    pub fn new(ink: Color, brush_size: u32) -> Self {
        Self {
            previous_point: None,
            ink,
            brush_size: brush_size.max(1),
        }
    }

    pub fn ink(&self) -> Color {
        self.ink
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn previous_point(&self) -> Option<Point> {
        self.previous_point
    }

    /// True between a pointer-down and the matching pointer-up
    pub fn is_drawing(&self) -> bool {
        self.previous_point.is_some()
    }

    pub fn set_color(&mut self, color: Color) {
        tracing::debug!("Ink color set to {}", color);
        self.ink = color;
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.max(1);
    }

    /// Start a stroke. Nothing is stamped until the pointer moves.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.previous_point = Some(Point::from_offset(x, y));
    }

    /// Extend the stroke to the new pointer position.
    ///
    /// Returns the points that were stamped, empty when no stroke is active.
    /// Only the part of the segment whose stamps can touch the surface is
    /// rasterized. Non-finite offsets are ignored.
    pub fn pointer_move<S: RasterSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        x: f32,
        y: f32,
    ) -> Vec<Point> {
        let Some(previous) = self.previous_point else {
            return Vec::new();
        };
        if !x.is_finite() || !y.is_finite() {
            tracing::warn!("Ignoring non-finite pointer offset ({}, {})", x, y);
            return Vec::new();
        }

        let current = Point::from_offset(x, y);
        // The stroke continues from the real position even when it left the surface
        self.previous_point = Some(current);

        let bounds = ClipRect::for_surface(surface.width(), surface.height(), self.brush_size);
        let Some((start, end)) = clip_segment(previous, current, &bounds) else {
            return Vec::new();
        };
        let points = rasterize_line(start.x, start.y, end.x, end.y);

        for p in &points {
            surface.fill_rect(p.x, p.y, self.brush_size, self.brush_size, self.ink);
        }
        points
    }

    pub fn pointer_up(&mut self) {
        self.previous_point = None;
    }
}

impl Default for PaintSession {
    fn default() -> Self {
        Self::new(Color::BLACK, DEFAULT_BRUSH_SIZE)
    }
}

/// Route one pointer event to the session, returning any stamped points
pub fn handle_pointer_event<S: RasterSurface + ?Sized>(
    session: &mut PaintSession,
    surface: &mut S,
    event: PointerEvent,
) -> Vec<Point> {
    match event {
        PointerEvent::Down { x, y } => {
            session.pointer_down(x, y);
            Vec::new()
        }
        PointerEvent::Move { x, y } => session.pointer_move(surface, x, y),
        PointerEvent::Up => {
            session.pointer_up();
            Vec::new()
        }
    }
}
