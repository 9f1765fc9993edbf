// Applies a finished light mask over the frame.
// Visual: alpha 0 leaves the scene as drawn, 255 paints it black, anything between
// scales every colour channel down proportionally.

use crate::render::{BlendMode, Renderer};
use image::RgbaImage;

/// Scale one channel by the remaining light `(255 - alpha) / 255`, rounded.
#[inline]
pub fn darken(channel: u8, alpha: u8) -> u8 {
    let lit = u32::from(255 - alpha);
    ((u32::from(channel) * lit + 127) / 255) as u8
}

/// Multiply the frame by the mask's remaining light.
///
/// Draw state is reset before and after, so whatever target or blend override
/// a scene left behind never leaks into the composite or into later draws.
/// A mask smaller than the frame only darkens the overlapping area.
pub fn composite_light_mask(renderer: &mut Renderer, mask: &RgbaImage) {
    renderer.reset_state();
    let (w, h) = (
        renderer.width().min(mask.width()),
        renderer.height().min(mask.height()),
    );
    let frame = renderer.frame_mut();
    for y in 0..h {
        for x in 0..w {
            let alpha = mask.get_pixel(x, y)[3];
            if alpha == 0 {
                continue;
            }
            let px = frame.get_pixel_mut(x, y);
            px[0] = darken(px[0], alpha);
            px[1] = darken(px[1], alpha);
            px[2] = darken(px[2], alpha);
        }
    }
    renderer.reset_state();
}

/// Copy the mask over the whole frame with an explicit texture blend mode
/// (`Mul` for masks that should modulate rather than cover). Same state guarantees.
pub fn composite_with(renderer: &mut Renderer, mask: &RgbaImage, blend: BlendMode) {
    renderer.reset_state();
    renderer.canvas().copy(mask, None, blend);
    renderer.reset_state();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawState;
    use crate::texture::create_texture;
    use image::Rgba;

    #[test]
    fn darken_endpoints() {
        assert_eq!(darken(200, 0), 200);
        assert_eq!(darken(200, 255), 0);
        assert_eq!(darken(200, 128), 100);
    }

    #[test]
    fn composite_matches_alpha_blending_black() {
        // The mask is black with alpha, so darkening must agree with a Blend copy.
        let src = Rgba([0, 0, 0, 235]);
        let dst = Rgba([0, 127, 0, 255]);
        let blended = BlendMode::Blend.apply(src, dst);
        assert_eq!(darken(dst[1], src[3]), blended[1]);
    }

    #[test]
    fn composite_darkens_frame_and_resets_state() {
        let mut renderer = Renderer::new(2, 1).unwrap();
        {
            let mut c = renderer.canvas();
            c.set_blend_mode(BlendMode::None);
            c.set_draw_color(Rgba([0, 127, 0, 255]));
            c.clear();
            // leave an override behind on purpose
            c.set_blend_mode(BlendMode::Mul);
        }
        let mut mask = create_texture(2, 1).unwrap();
        mask.put_pixel(1, 0, Rgba([0, 0, 0, 255]));

        composite_light_mask(&mut renderer, &mask);

        assert_eq!(*renderer.frame().get_pixel(0, 0), Rgba([0, 127, 0, 255]));
        assert_eq!(*renderer.frame().get_pixel(1, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(renderer.state(), DrawState::default());
    }

    #[test]
    fn mul_composite_of_black_mask_agrees_with_darkening() {
        let mut renderer = Renderer::new(3, 1).unwrap();
        {
            let mut c = renderer.canvas();
            c.set_draw_color(Rgba([90, 180, 255, 255]));
            c.clear();
        }
        let mut mask = create_texture(3, 1).unwrap();
        mask.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        mask.put_pixel(1, 0, Rgba([0, 0, 0, 210]));
        mask.put_pixel(2, 0, Rgba([0, 0, 0, 255]));

        composite_with(&mut renderer, &mask, BlendMode::Mul);

        let frame = renderer.frame();
        for x in 0..3 {
            let a = mask.get_pixel(x, 0)[3];
            assert_eq!(frame.get_pixel(x, 0)[0], darken(90, a));
            assert_eq!(frame.get_pixel(x, 0)[2], darken(255, a));
        }
        assert_eq!(renderer.state(), DrawState::default());
    }
}
