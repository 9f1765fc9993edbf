// Scene 2: a red bulb below the wall throwing a red beam up and a blue beam down,
// the pair spinning around the bulb every 800 ms.
//
// Each beam is drawn twice on the frame: an alpha-blended tint and a Mul pass that
// brightens what is under the beam. The mask gets a matching transparent cut-out.

use super::{draw_background, wall_rect, Scene, BULB_SIDE, WALL_H, WALL_W};
use crate::compositor::composite_with;
use crate::error::Error;
use crate::geometry::{fan_vertices, ray_polygon, rotate_points, RAY_INDICES};
use crate::render::{BlendMode, Canvas, Renderer};
use crate::texture::{brick_wall, create_texture};
use crate::types::{FPoint, FRect};
use image::{Rgba, RgbaImage};

const AMBIENT_ALPHA: u8 = 235;
const SPIN_MS: u32 = 800;
const RAY_WIDTH: f32 = 300.0;
const RAY_HEIGHT: f32 = 1200.0;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const RED_TINT: Rgba<u8> = Rgba([255, 0, 0, 185]);
const BLUE_TINT: Rgba<u8> = Rgba([0, 0, 160, 185]);
const BOOST: Rgba<u8> = Rgba([255, 127, 127, 0]);

#[derive(Default)]
pub struct RotatingBeams {
    brick_wall: Option<RgbaImage>,
    light_mask: Option<RgbaImage>,
}

/// Bulb square, centred horizontally, 200 px below the wall.
fn bulb_rect(width: u32, height: u32) -> FRect {
    FRect::new(
        width as f32 * 0.5 - BULB_SIDE * 0.5,
        height as f32 * 0.5 + WALL_H as f32 * 0.5 + 200.0,
        BULB_SIDE,
        BULB_SIDE,
    )
}

fn spin_degrees(now_ms: u32) -> f64 {
    360.0 * f64::from(now_ms % SPIN_MS) / f64::from(SPIN_MS)
}

/// Red beam (up) and blue beam (down), rotated for `now_ms`.
fn beams(center: FPoint, now_ms: u32) -> ([FPoint; 6], [FPoint; 6]) {
    let near = RAY_WIDTH * 0.5;
    let far = RAY_WIDTH; // the beam doubles in width by its tip
    let reach = RAY_HEIGHT * 0.5;
    let mut red = ray_polygon(center, near, far, reach);
    let mut blue = ray_polygon(center, near, far, -reach);
    let degrees = spin_degrees(now_ms);
    rotate_points(center, &mut red, degrees);
    rotate_points(center, &mut blue, degrees);
    (red, blue)
}

fn draw_beam(canvas: &mut Canvas<'_>, points: &[FPoint; 6], tint: Rgba<u8>) {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.render_geometry(&fan_vertices(points, tint, CLEAR), &RAY_INDICES);
    canvas.set_blend_mode(BlendMode::Mul);
    canvas.render_geometry(&fan_vertices(points, BOOST, CLEAR), &RAY_INDICES);
}

impl Scene for RotatingBeams {
    fn name(&self) -> &'static str {
        "rotating beams"
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
        let bulb = bulb_rect(w, h);
        let center = FPoint::new(bulb.x + bulb.w * 0.5, bulb.y + bulb.h * 0.5);
        let (red, blue) = beams(center, now_ms);

        {
            let mut canvas = renderer.canvas();
            draw_background(&mut canvas);
            canvas.copy(wall, Some(wall_rect(w, h)), BlendMode::Blend);

            canvas.set_draw_color(Rgba([255, 0, 0, 255]));
            canvas.fill_rect(bulb);
            draw_beam(&mut canvas, &red, RED_TINT);
            draw_beam(&mut canvas, &blue, BLUE_TINT);
        }

        renderer.with_target(mask, |canvas| {
            canvas.set_blend_mode(BlendMode::None);
            canvas.set_draw_color(Rgba([0, 0, 0, AMBIENT_ALPHA]));
            canvas.fill_rect(FRect::new(0.0, 0.0, w as f32, h as f32));
            let edge = Rgba([0, 0, 0, AMBIENT_ALPHA]);
            canvas.render_geometry(&fan_vertices(&red, CLEAR, edge), &RAY_INDICES);
            canvas.render_geometry(&fan_vertices(&blue, CLEAR, edge), &RAY_INDICES);
        });

        composite_with(renderer, mask, BlendMode::Mul);
    }

    fn cleanup(&mut self) {
        self.brick_wall = None;
        self.light_mask = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn spin_wraps_every_800ms() {
        assert_eq!(spin_degrees(0), 0.0);
        assert_eq!(spin_degrees(400), 180.0);
        assert_eq!(spin_degrees(800), 0.0);
    }

    #[test]
    fn half_turn_swaps_the_beams() {
        let c = FPoint::new(500.0, 500.0);
        let (red, _) = beams(c, 400);
        // red now points down where blue pointed at rest
        let (_, blue_at_rest) = beams(c, 0);
        assert_abs_diff_eq!(red[3].x, blue_at_rest[3].x, epsilon = 1e-2);
        assert_abs_diff_eq!(red[3].y, blue_at_rest[3].y, epsilon = 1e-2);
    }

    #[test]
    fn mask_is_lit_along_the_beam_and_dark_elsewhere() {
        let mut renderer = Renderer::new(640, 1200).unwrap();
        let mut scene = RotatingBeams::default();
        scene.setup(&mut renderer).unwrap();
        scene.draw(&mut renderer, 0);
        let mask = scene.light_mask.as_ref().unwrap();
        let bulb = bulb_rect(640, 1200);
        let cx = (bulb.x + bulb.w * 0.5) as u32;
        let cy = (bulb.y + bulb.h * 0.5) as u32;
        // just above the bulb, inside the red beam: nearly transparent
        assert!(mask.get_pixel(cx, cy - 10)[3] < 40);
        // far off to the side: full ambient
        assert_eq!(mask.get_pixel(5, 5)[3], AMBIENT_ALPHA);
    }
}
