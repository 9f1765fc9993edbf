// Scene 1: a bar of light sweeping left to right across a dark yard, once per second.

use super::{draw_background, wall_rect, Scene, WALL_H, WALL_W};
use crate::compositor::composite_light_mask;
use crate::error::Error;
use crate::render::{BlendMode, Renderer};
use crate::texture::{brick_wall, create_texture};
use crate::types::FRect;
use image::{Rgba, RgbaImage};

const AMBIENT_ALPHA: u8 = 225;
const BAR_ALPHA: u8 = 50;
const BAR_WIDTH: f32 = 200.0;
const SWEEP_MS: u32 = 1000;

#[derive(Default)]
pub struct SweepingBar {
    brick_wall: Option<RgbaImage>,
    light_mask: Option<RgbaImage>,
}

/// Left edge of the bar at `now_ms`.
fn bar_x(now_ms: u32, width: u32) -> f32 {
    width as f32 * ((now_ms % SWEEP_MS) as f32 / SWEEP_MS as f32)
}

impl Scene for SweepingBar {
    fn name(&self) -> &'static str {
        "sweeping bar"
    }

    fn setup(&mut self, renderer: &mut Renderer) -> Result<(), Error> {
        self.brick_wall = Some(brick_wall(renderer, WALL_W, WALL_H)?);
        self.light_mask = Some(create_texture(renderer.width(), renderer.height())?);
        Ok(())
    }

    fn draw(&mut self, renderer: &mut Renderer, now_ms: u32) {
        let (Some(wall), Some(mask)) = (&self.brick_wall, &mut self.light_mask) else {
            return;
        };
        let (w, h) = (renderer.width(), renderer.height());

        {
            let mut canvas = renderer.canvas();
            draw_background(&mut canvas);
            canvas.copy(wall, Some(wall_rect(w, h)), BlendMode::Blend);
        }

        renderer.with_target(mask, |canvas| {
            canvas.set_blend_mode(BlendMode::None);
            canvas.set_draw_color(Rgba([0, 0, 0, AMBIENT_ALPHA]));
            canvas.fill_rect(FRect::new(0.0, 0.0, w as f32, h as f32));
            canvas.set_draw_color(Rgba([0, 0, 0, BAR_ALPHA]));
            canvas.fill_rect(FRect::new(bar_x(now_ms, w), 0.0, BAR_WIDTH, h as f32));
        });

        composite_light_mask(renderer, mask);
    }

    fn cleanup(&mut self) {
        self.brick_wall = None;
        self.light_mask = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::darken;
    use crate::scene::GRASS;

    #[test]
    fn bar_crosses_the_screen_each_second() {
        assert_eq!(bar_x(0, 1920), 0.0);
        assert_eq!(bar_x(500, 1920), 960.0);
        assert_eq!(bar_x(1500, 1920), 960.0);
    }

    #[test]
    fn bar_is_brighter_than_ambient() {
        let mut renderer = Renderer::new(800, 600).unwrap();
        let mut scene = SweepingBar::default();
        scene.setup(&mut renderer).unwrap();
        scene.draw(&mut renderer, 0);
        let frame = renderer.frame();
        // bar covers x in [0, 200); corner pixels are plain grass
        assert_eq!(frame.get_pixel(10, 5)[1], darken(GRASS[1], BAR_ALPHA));
        assert_eq!(frame.get_pixel(790, 5)[1], darken(GRASS[1], AMBIENT_ALPHA));
    }
}
