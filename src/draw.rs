// Window + HUD drawing.
// Visual effects provided here:
// 1) A window that shows the composited scene.
// 2) A tiny 5x7 bitmap font for the scene/FPS line in the corner.

use crate::error::Error;
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Open the window. With `vsync` the loop is paced to 60 FPS, otherwise it runs flat out.
    pub fn new(title: &str, width: usize, height: usize, vsync: bool) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(if vsync { 60 } else { 0 });
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (the loop exits on it).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Visual: when true, the frame on screen is written out as a PNG (no HUD).
    pub fn snapshot_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::P, KeyRepeat::No)
    }
}

/* ---------- Software drawing: pixels + tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color; off-screen writes are dropped.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

/* ---------- 5x7 bitmap font (enough for "SCENE 4 | FPS: 59.9") ---------- */

/// Return a 5x7 glyph bitmap for the characters the HUD prints.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters the HUD uses
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph appears with a 1-pixel black shadow so it reads over bright light.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (offset, ink) in [(1, 0x00000000), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if rowbits & (1 << (4 - rx)) != 0 {
                    put_pixel(fb, x + rx + offset, y + ry as i32 + offset, ink);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: the "SCENE n | FPS: x" line in the corner; each glyph is 5x7 with
/// 1-pixel spacing, unknown characters leave a gap.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: u32 = 0x00_FF_FF_FF;

    #[test]
    fn hud_characters_all_have_glyphs() {
        for ch in "SCENE 0123456789 | FPS: .".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
        }
        assert!(glyph5x7('~').is_none());
    }

    #[test]
    fn glyphs_fit_in_five_columns() {
        for ch in "SCENE0123456789FPS|:.".chars() {
            let rows = glyph5x7(ch).unwrap();
            assert!(rows.iter().all(|r| r >> 5 == 0));
        }
    }

    #[test]
    fn text_draws_ink_and_shadow() {
        let mut fb = FrameBuffer::new(20, 10);
        fb.pixels.fill(0x00_12_34_56);
        draw_text_5x7(&mut fb, 0, 0, "1", WHITE);
        // top of the '1' stem
        assert_eq!(fb.pixels[2], WHITE);
        // shadow lands one pixel down-right of the bottom serif's right end
        assert_eq!(fb.pixels[7 * 20 + 4], 0);
        // untouched background
        assert_eq!(fb.pixels[19], 0x00_12_34_56);
    }

    #[test]
    fn text_is_clipped_at_the_edges() {
        let mut fb = FrameBuffer::new(4, 4);
        draw_text_5x7(&mut fb, -3, -3, "88", WHITE);
        draw_text_5x7(&mut fb, 2, 2, "88", WHITE);
        assert_eq!(fb.pixels.len(), 16);
    }

    #[test]
    fn put_pixel_drops_off_screen_writes() {
        let mut fb = FrameBuffer::new(3, 2);
        put_pixel(&mut fb, 2, 1, WHITE);
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 2)] {
            put_pixel(&mut fb, x, y, 0x00_AB_CD_EF);
        }
        assert_eq!(fb.pixels, vec![0, 0, 0, 0, 0, WHITE]);
    }
}
