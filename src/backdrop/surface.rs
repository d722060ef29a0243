//! Drawing-surface seam used by the backdrop animator.
//!
//! Coordinates are logical pixels. A surface decides how those map onto
//! whatever it actually paints (see [`super::raster::PixelSurface`]).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Scales alpha by `opacity`, the equivalent of a global alpha.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: (self.a * opacity).clamp(0.0, 1.0),
            ..self
        }
    }

    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

/// Two-stop linear gradient running from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub from: Rgba,
    pub to: Rgba,
}

pub trait Surface {
    fn viewport(&self) -> Viewport;
    fn resize(&mut self, viewport: Viewport);
    fn clear(&mut self);
    fn fill_gradient(&mut self, gradient: &LinearGradient);
    /// Uniform blur radius applied to every draw until changed. Zero disables it.
    fn set_blur(&mut self, radius: f32);
    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba);
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba, glow: f32);
    fn fill_overlay(&mut self, color: Rgba);
}
