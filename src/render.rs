// Software renderer: RGBA surfaces, blend modes and the few draw calls the scenes need.
// Visual outcomes:
// - `Renderer` owns the frame you finally see and the current draw state.
// - `Canvas` draws into one surface (the frame, or an offscreen target like a light mask).
// - Offscreen drawing is scoped: `with_target` always hands the frame back with default state.

use crate::error::Error;
use crate::texture::create_texture;
use crate::types::{FPoint, FRect, FrameBuffer, Vertex};
use image::{Rgba, RgbaImage};
use std::ops::Range;

/// How a source colour lands on the destination pixel (8-bit, straight alpha).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// dst = src (opaque write, alpha included)
    None,
    /// rgb = src*sa + dst*(1-sa); a = sa + da*(1-sa)
    #[default]
    Blend,
    /// rgb = src*dst + dst*(1-sa); a = da
    Mul,
}

impl BlendMode {
    #[inline]
    pub fn apply(self, src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
        let [sr, sg, sb, sa] = src.0.map(u32::from);
        let [dr, dg, db, da] = dst.0.map(u32::from);
        let inv = 255 - sa;
        match self {
            BlendMode::None => src,
            BlendMode::Blend => Rgba([
                div255(sr * sa + dr * inv),
                div255(sg * sa + dg * inv),
                div255(sb * sa + db * inv),
                (sa + u32::from(div255(da * inv))).min(255) as u8,
            ]),
            BlendMode::Mul => Rgba([
                div255(dr * (sr + inv)),
                div255(dg * (sg + inv)),
                div255(db * (sb + inv)),
                da as u8,
            ]),
        }
    }
}

/// x / 255, rounded, saturated to a byte.
#[inline]
fn div255(x: u32) -> u8 {
    ((x + 127) / 255).min(255) as u8
}

/// Colour + blend mode used by fill/point/geometry calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    pub color: Rgba<u8>,
    pub blend: BlendMode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self { color: Rgba([0, 0, 0, 255]), blend: BlendMode::Blend }
    }
}

/// A drawing view over one surface.
pub struct Canvas<'a> {
    surface: &'a mut RgbaImage,
    state: &'a mut DrawState,
}

impl<'a> Canvas<'a> {
    pub fn new(surface: &'a mut RgbaImage, state: &'a mut DrawState) -> Self {
        Self { surface, state }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn set_draw_color(&mut self, color: Rgba<u8>) {
        self.state.color = color;
    }

    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.state.blend = blend;
    }

    #[cfg(test)]
    pub fn blend_mode(&self) -> BlendMode {
        self.state.blend
    }

    /// Overwrite every pixel with the draw colour (blend mode ignored).
    pub fn clear(&mut self) {
        let color = self.state.color;
        for px in self.surface.pixels_mut() {
            *px = color;
        }
    }

    /// Fill the pixels whose centres fall inside `rect`, clipped to the surface.
    pub fn fill_rect(&mut self, rect: FRect) {
        let xs = span(rect.x, rect.w, self.width());
        let ys = span(rect.y, rect.h, self.height());
        let DrawState { color, blend } = *self.state;
        for y in ys {
            for x in xs.clone() {
                self.blend_pixel(x, y, color, blend);
            }
        }
    }

    /// Plot single pixels; points off the surface are skipped.
    pub fn draw_points(&mut self, points: &[FPoint]) {
        let DrawState { color, blend } = *self.state;
        for p in points {
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let (x, y) = (p.x as u32, p.y as u32);
            if x < self.width() && y < self.height() {
                self.blend_pixel(x, y, color, blend);
            }
        }
    }

    /// Blit `texture` into `dest` (whole surface when `None`) with nearest-neighbour scaling.
    pub fn copy(&mut self, texture: &RgbaImage, dest: Option<FRect>, blend: BlendMode) {
        let (tw, th) = texture.dimensions();
        if tw == 0 || th == 0 {
            return;
        }
        let dest = dest.unwrap_or(FRect::new(0.0, 0.0, self.width() as f32, self.height() as f32));
        if dest.w <= 0.0 || dest.h <= 0.0 {
            return;
        }
        let sx = tw as f32 / dest.w;
        let sy = th as f32 / dest.h;
        let xs = span(dest.x, dest.w, self.width());
        let ys = span(dest.y, dest.h, self.height());
        for y in ys {
            let ty = (((y as f32 + 0.5 - dest.y) * sy) as u32).min(th - 1);
            for x in xs.clone() {
                let tx = (((x as f32 + 0.5 - dest.x) * sx) as u32).min(tw - 1);
                let src = *texture.get_pixel(tx, ty);
                self.blend_pixel(x, y, src, blend);
            }
        }
    }

    /// Draw an indexed triangle list; vertex colours are interpolated across each face.
    /// Triangles referencing missing vertices are skipped.
    pub fn render_geometry(&mut self, vertices: &[Vertex], indices: &[usize]) {
        let blend = self.state.blend;
        for tri in indices.chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) =
                (vertices.get(tri[0]), vertices.get(tri[1]), vertices.get(tri[2]))
            else {
                continue;
            };
            self.fill_triangle(a, b, c, blend);
        }
    }

    fn fill_triangle(&mut self, a: &Vertex, b: &Vertex, c: &Vertex, blend: BlendMode) {
        let area = edge(a.position, b.position, c.position);
        if area.abs() <= f32::EPSILON {
            return;
        }

        let min_x = a.position.x.min(b.position.x).min(c.position.x);
        let max_x = a.position.x.max(b.position.x).max(c.position.x);
        let min_y = a.position.y.min(b.position.y).min(c.position.y);
        let max_y = a.position.y.max(b.position.y).max(c.position.y);
        let xs = span(min_x.floor(), max_x.ceil() - min_x.floor(), self.width());
        let ys = span(min_y.floor(), max_y.ceil() - min_y.floor(), self.height());

        for y in ys {
            for x in xs.clone() {
                let p = FPoint::new(x as f32 + 0.5, y as f32 + 0.5);
                // Normalized barycentrics; dividing by the signed area makes winding irrelevant.
                let wa = edge(b.position, c.position, p) / area;
                let wb = edge(c.position, a.position, p) / area;
                let wc = edge(a.position, b.position, p) / area;
                if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                    continue;
                }
                let color = Rgba(std::array::from_fn(|i| {
                    let v = wa * f32::from(a.color[i])
                        + wb * f32::from(b.color[i])
                        + wc * f32::from(c.color[i]);
                    v.round().clamp(0.0, 255.0) as u8
                }));
                self.blend_pixel(x, y, color, blend);
            }
        }
    }

    #[inline]
    fn blend_pixel(&mut self, x: u32, y: u32, src: Rgba<u8>, blend: BlendMode) {
        let dst = self.surface.get_pixel_mut(x, y);
        *dst = blend.apply(src, *dst);
    }
}

/// Twice the signed area of (a, b, p).
#[inline]
fn edge(a: FPoint, b: FPoint, p: FPoint) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Pixel indices covered by [start, start + len), clipped to [0, limit).
fn span(start: f32, len: f32, limit: u32) -> Range<u32> {
    let lo = start.round().clamp(0.0, limit as f32) as u32;
    let hi = (start + len).round().clamp(0.0, limit as f32) as u32;
    lo..hi.max(lo)
}

/// Owns the frame surface and the draw state shared by every canvas.
pub struct Renderer {
    frame: RgbaImage,
    state: DrawState,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        Ok(Self { frame: create_texture(width, height)?, state: DrawState::default() })
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Draw into the frame with the current state.
    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(&mut self.frame, &mut self.state)
    }

    /// Draw into an offscreen `target`. The state is reset before the closure
    /// runs and again after it returns, so the frame always gets default state back.
    pub fn with_target<R>(
        &mut self,
        target: &mut RgbaImage,
        draw: impl FnOnce(&mut Canvas<'_>) -> R,
    ) -> R {
        self.reset_state();
        let out = {
            let mut canvas = Canvas::new(target, &mut self.state);
            draw(&mut canvas)
        };
        self.reset_state();
        out
    }

    /// Default target (the frame) and default blend mode.
    pub fn reset_state(&mut self) {
        self.state = DrawState::default();
    }

    #[cfg(test)]
    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut RgbaImage {
        &mut self.frame
    }

    /// Pack the frame as 0x00RRGGBB words for the window.
    pub fn present_into(&self, fb: &mut FrameBuffer) {
        let (w, h) = (self.width() as usize, self.height() as usize);
        if fb.width != w || fb.height != h {
            *fb = FrameBuffer::new(w, h);
        }
        for (out, px) in fb.pixels.iter_mut().zip(self.frame.pixels()) {
            let [r, g, b, _] = px.0.map(u32::from);
            *out = (r << 16) | (g << 8) | b;
        }
    }
}
