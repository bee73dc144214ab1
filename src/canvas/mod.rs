//! Canvas module - the drawable raster surface strokes and images land on

mod color;

pub use color::{Color, ColorParseError};

use image::{Rgba, RgbaImage};

/// A raster surface that accepts filled rectangles and whole images at integer coordinates.
///
/// Stroke logic only talks to this trait, so a webview canvas, a GPU texture or the
/// in-memory [`Canvas`] can sit behind it.
pub trait RasterSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill the `w`x`h` rectangle whose top-left corner is `(x, y)`.
    /// Parts outside the surface are dropped.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color);

    /// Composite `image` with its top-left corner at `(x, y)`
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32);
}

/// In-memory RGBA canvas
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background.to_rgba()),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Overwrite every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        let px = color.to_rgba();
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.image.get_pixel_checked(x, y).map(|px| Color::from(*px))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Clip a rectangle to the canvas, returning `(x0, y0, x1, y1)` with exclusive ends
    fn clip(&self, x: i32, y: i32, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(w)).min(i64::from(self.image.width()));
        let y1 = (i64::from(y) + i64::from(h)).min(i64::from(self.image.height()));

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        // All four values are within [0, dimension] here
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl RasterSurface for Canvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };

        let src = color.to_rgba();
        for py in y0..y1 {
            for px in x0..x1 {
                blend_over(self.image.get_pixel_mut(px, py), src);
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, image.width(), image.height()) else {
            return;
        };

        // The clipped box starts at or after (x, y), so source offsets are in range
        for py in y0..y1 {
            let sy = (i64::from(py) - i64::from(y)) as u32;
            for px in x0..x1 {
                let sx = (i64::from(px) - i64::from(x)) as u32;
                blend_over(self.image.get_pixel_mut(px, py), *image.get_pixel(sx, sy));
            }
        }
    }
}

/// Source-over compositing of straight-alpha 8-bit pixels.
///
/// Integer only: `out_a = sa + da * (255 - sa) / 255`, colors mixed with
/// premultiplied weights. An opaque destination stays at exactly 255.
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = u32::from(src[3]);
    match sa {
        0 => return,
        255 => {
            *dst = src;
            return;
        }
        _ => {}
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // Output alpha scaled by 255; never zero since sa > 0
    let out_a = sa * 255 + da * inv;

    for c in 0..3 {
        let mixed = u32::from(src[c]) * sa * 255 + u32::from(dst[c]) * da * inv;
        dst[c] = ((mixed + out_a / 2) / out_a) as u8;
    }
    dst[3] = ((out_a + 127) / 255) as u8;
}
