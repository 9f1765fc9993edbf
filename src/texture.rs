// Offscreen surfaces: allocation plus the procedural brick wall the lit scenes share.
// Visual: the wall is the only "actor" the lights fall on.

use crate::error::Error;
use crate::render::{BlendMode, Renderer};
use crate::types::FRect;
use image::{ImageBuffer, Rgba, RgbaImage};

/// Allocate a transparent-black RGBA surface.
/// Fails on a zero dimension or when the byte size does not fit in memory.
pub fn create_texture(width: u32, height: u32) -> Result<RgbaImage, Error> {
    if width == 0 || height == 0 {
        return Err(Error::Texture(format!("zero-sized surface {width}x{height}")));
    }
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| Error::Texture(format!("surface {width}x{height} is too large")))?;
    log::debug!("allocating {width}x{height} surface ({len} bytes)");
    ImageBuffer::from_raw(width, height, vec![0u8; len])
        .ok_or_else(|| Error::Texture(format!("buffer does not fit {width}x{height}")))
}

const BRICK_ROW: u32 = 40;
const BRICK_STEP: u32 = 60;
const MORTAR: Rgba<u8> = Rgba([200, 200, 200, 255]);

/// Paint a staggered brick pattern into a fresh `width` x `height` surface.
pub fn brick_wall(renderer: &mut Renderer, width: u32, height: u32) -> Result<RgbaImage, Error> {
    let mut wall = create_texture(width, height)?;
    renderer.with_target(&mut wall, |canvas| {
        canvas.set_blend_mode(BlendMode::None);
        for y in (0..height).step_by(BRICK_ROW as usize) {
            // odd rows are shifted by half a brick
            let offset_x = if (y / BRICK_ROW) % 2 == 0 { 0 } else { 30 };
            for x in (0..width).step_by(BRICK_STEP as usize) {
                let (bx, by) = ((x + offset_x) as f32, y as f32);

                let r = 120 + (x + y) % 40;
                let g = 80 + (x * y) % 30;
                canvas.set_draw_color(Rgba([r as u8, g as u8, 60, 255]));
                canvas.fill_rect(FRect::new(bx, by, 55.0, 35.0));

                canvas.set_draw_color(MORTAR);
                canvas.fill_rect(FRect::new(bx - 2.0, by + 35.0, 59.0, 5.0));
                canvas.fill_rect(FRect::new(bx + 55.0, by, 5.0, 40.0));
            }
        }
    });
    Ok(wall)
}
