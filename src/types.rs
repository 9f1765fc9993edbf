// Core value types shared by the renderer, the lighting math and the scenes.

use image::Rgba;

/// What the window shows: one `0x00RRGGBB` word per pixel, as minifb wants it.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// A point in screen space (pixels, y grows downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FPoint {
    pub x: f32,
    pub y: f32,
}

impl FPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance; the lighting hot path never takes a sqrt.
    #[inline]
    pub fn dist_sq(self, other: FPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle with a float origin and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl FRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// One corner of a triangle; colour is interpolated across the face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: FPoint,
    pub color: Rgba<u8>,
}
