#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use super::surface::{LinearGradient, Point, Rgba, Surface, Viewport};

/// Logical pixels per raster pixel along each axis.
pub const DEFAULT_SCALE: u32 = 8;

/// Share of a glow halo's alpha at the particle edge.
const GLOW_STRENGTH: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Software compositor. Logical coordinates are divided by `scale` and
/// rasterised with source-over blending onto an opaque base colour.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    viewport: Viewport,
    scale: u32,
    cols: usize,
    rows: usize,
    base: [f32; 3],
    pixels: Vec<[f32; 3]>,
    blur: f32,
}

impl PixelSurface {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self::with_scale(viewport, DEFAULT_SCALE)
    }

    #[must_use]
    pub fn with_scale(viewport: Viewport, scale: u32) -> Self {
        let mut surface = Self {
            viewport: Viewport::default(),
            scale: scale.max(1),
            cols: 0,
            rows: 0,
            base: [0.0; 3],
            pixels: Vec::new(),
            blur: 0.0,
        };
        surface.resize(viewport);
        surface
    }

    /// Logical viewport that exactly covers a `cols` x `rows` raster.
    #[must_use]
    pub fn viewport_for_raster(cols: u32, rows: u32, scale: u32) -> Viewport {
        Viewport::new(cols * scale.max(1), rows * scale.max(1))
    }

    pub fn set_base(&mut self, base: Rgb) {
        self.base = [f32::from(base.r), f32::from(base.g), f32::from(base.b)];
    }

    #[must_use]
    pub fn raster_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[must_use]
    pub fn blur(&self) -> f32 {
        self.blur
    }

    #[must_use]
    pub fn pixel(&self, col: usize, row: usize) -> Option<Rgb> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let [r, g, b] = self.pixels[row * self.cols + col];
        Some(Rgb::new(to_channel(r), to_channel(g), to_channel(b)))
    }

    fn scale_f32(&self) -> f32 {
        self.scale as f32
    }

    /// Logical centre of a raster pixel.
    fn centre(&self, col: usize, row: usize) -> Point {
        let s = self.scale_f32();
        Point::new((col as f32 + 0.5) * s, (row as f32 + 0.5) * s)
    }

    /// Raster index range covering `[lo, hi]` in logical units, clipped.
    fn span(&self, lo: f32, hi: f32, limit: usize) -> std::ops::Range<usize> {
        let s = self.scale_f32();
        let start = (lo / s).floor().max(0.0) as usize;
        let end = ((hi / s).ceil().max(0.0) as usize).min(limit);
        start.min(end)..end
    }

    fn blend(&mut self, col: usize, row: usize, color: Rgba, coverage: f32) {
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let px = &mut self.pixels[row * self.cols + col];
        let src = [f32::from(color.r), f32::from(color.g), f32::from(color.b)];
        for (dst, src) in px.iter_mut().zip(src) {
            *dst = src * alpha + *dst * (1.0 - alpha);
        }
    }

    /// Soft-edge half width: half a raster pixel, widened by the active blur.
    fn feather(&self) -> f32 {
        (self.scale_f32() * 0.5).max(self.blur * 0.5)
    }
}

impl Surface for PixelSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cols = viewport.width.div_ceil(self.scale) as usize;
        self.rows = viewport.height.div_ceil(self.scale) as usize;
        self.pixels = vec![self.base; self.cols * self.rows];
    }

    fn clear(&mut self) {
        self.pixels.fill(self.base);
    }

    fn fill_gradient(&mut self, gradient: &LinearGradient) {
        let dx = gradient.end.x - gradient.start.x;
        let dy = gradient.end.y - gradient.start.y;
        let len_sq = dx * dx + dy * dy;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let p = self.centre(col, row);
                let t = if len_sq <= f32::EPSILON {
                    0.0
                } else {
                    (((p.x - gradient.start.x) * dx + (p.y - gradient.start.y) * dy) / len_sq)
                        .clamp(0.0, 1.0)
                };
                self.blend(col, row, lerp_rgba(gradient.from, gradient.to, t), 1.0);
            }
        }
    }

    fn set_blur(&mut self, radius: f32) {
        self.blur = radius.max(0.0);
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        let feather = self.feather();
        let half = (width * 0.5).max(feather);
        let rows = self.span(from.y.min(to.y) - half, from.y.max(to.y) + half, self.rows);
        let cols = self.span(from.x.min(to.x) - half, from.x.max(to.x) + half, self.cols);
        for row in rows {
            for col in cols.clone() {
                let d = distance_to_segment(self.centre(col, row), from, to);
                let coverage = ((half + feather - d) / (2.0 * feather)).clamp(0.0, 1.0);
                self.blend(col, row, color, coverage);
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba, glow: f32) {
        let feather = self.feather();
        let reach = radius + feather + glow.max(0.0);
        let rows = self.span(center.y - reach, center.y + reach, self.rows);
        let cols = self.span(center.x - reach, center.x + reach, self.cols);
        for row in rows {
            for col in cols.clone() {
                let p = self.centre(col, row);
                let d = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
                let body = ((radius + feather - d) / (2.0 * feather)).clamp(0.0, 1.0);
                let halo = if glow > 0.0 && d > radius {
                    (1.0 - (d - radius) / glow).clamp(0.0, 1.0) * GLOW_STRENGTH
                } else {
                    0.0
                };
                self.blend(col, row, color, body.max(halo));
            }
        }
    }

    fn fill_overlay(&mut self, color: Rgba) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.blend(col, row, color, 1.0);
            }
        }
    }
}

fn lerp_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let mix = |x: u8, y: u8| to_channel(f32::from(x) + (f32::from(y) - f32::from(x)) * t);
    Rgba::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), a.a + (b.a - a.a) * t)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq <= f32::EPSILON {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + dx * t, a.y + dy * t);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
