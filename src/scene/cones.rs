// Scene 3: two white bulbs flanking the wall, each casting an upward cone.
// The cones swing in over the wall 0 -> 45 -> 0 degrees every 1.2 s, mirrored left/right.

use super::{draw_background, wall_rect, Scene, BULB_SIDE, WALL_H, WALL_W};
use crate::compositor::composite_light_mask;
use crate::error::Error;
use crate::geometry::{fan_vertices, ray_polygon, rotate_points, RAY_INDICES};
use crate::render::{BlendMode, Canvas, Renderer};
use crate::texture::{brick_wall, create_texture};
use crate::types::{FPoint, FRect};
use image::{Rgba, RgbaImage};

const AMBIENT_ALPHA: u8 = 235;
const SWING_MS: u32 = 1200;
const SWING_DEGREES: f64 = 45.0;
const RAY_WIDTH: f32 = 300.0;
const RAY_HEIGHT: f32 = 900.0;
/// Gap between the wall's bottom edge and the top of the bulbs.
const BULB_DROP: f32 = 250.0;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const GLOW: Rgba<u8> = Rgba([255, 255, 255, 100]);
const BOOST: Rgba<u8> = Rgba([255, 255, 255, 0]);

#[derive(Default)]
pub struct SwingingCones {
    brick_wall: Option<RgbaImage>,
    light_mask: Option<RgbaImage>,
}

/// Triangle wave: 0 at the start of the cycle, 45 halfway, back to 0.
fn swing_degrees(now_ms: u32) -> f64 {
    let nf = f64::from(now_ms % SWING_MS) / f64::from(SWING_MS);
    if nf < 0.5 {
        SWING_DEGREES * (nf * 2.0)
    } else {
        SWING_DEGREES - SWING_DEGREES * ((nf - 0.5) * 2.0)
    }
}

/// Left and right bulb squares.
fn bulbs(wall: FRect) -> (FRect, FRect) {
    let y = wall.y + wall.h + BULB_DROP;
    (
        FRect::new(wall.x - BULB_SIDE, y, BULB_SIDE, BULB_SIDE),
        FRect::new(wall.x + wall.w + BULB_SIDE, y, BULB_SIDE, BULB_SIDE),
    )
}

fn centre(r: FRect) -> FPoint {
    FPoint::new(r.x + r.w * 0.5, r.y + r.h * 0.5)
}

fn cones(left: FPoint, right: FPoint, now_ms: u32) -> ([FPoint; 6], [FPoint; 6]) {
    let half = RAY_WIDTH * 0.5;
    let mut l = ray_polygon(left, half, half, RAY_HEIGHT);
    let mut r = ray_polygon(right, half, half, RAY_HEIGHT);
    let swing = swing_degrees(now_ms);
    rotate_points(left, &mut l, -swing);
    rotate_points(right, &mut r, swing);
    (l, r)
}

fn draw_cone(canvas: &mut Canvas<'_>, points: &[FPoint; 6]) {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.render_geometry(&fan_vertices(points, GLOW, CLEAR), &RAY_INDICES);
    canvas.set_blend_mode(BlendMode::Mul);
    canvas.render_geometry(&fan_vertices(points, BOOST, CLEAR), &RAY_INDICES);
}

impl Scene for SwingingCones {
    fn name(&self) -> &'static str {
        "swinging cones"
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
        let wall_dest = wall_rect(w, h);
        let (left_bulb, right_bulb) = bulbs(wall_dest);
        let (left, right) = cones(centre(left_bulb), centre(right_bulb), now_ms);

        {
            let mut canvas = renderer.canvas();
            draw_background(&mut canvas);
            canvas.copy(wall, Some(wall_dest), BlendMode::Blend);

            canvas.set_draw_color(Rgba([255, 255, 255, 255]));
            canvas.fill_rect(left_bulb);
            canvas.fill_rect(right_bulb);
            draw_cone(&mut canvas, &left);
            draw_cone(&mut canvas, &right);
        }

        renderer.with_target(mask, |canvas| {
            canvas.set_blend_mode(BlendMode::None);
            canvas.set_draw_color(Rgba([0, 0, 0, AMBIENT_ALPHA]));
            canvas.fill_rect(FRect::new(0.0, 0.0, w as f32, h as f32));
            let edge = Rgba([0, 0, 0, AMBIENT_ALPHA]);
            canvas.render_geometry(&fan_vertices(&left, CLEAR, edge), &RAY_INDICES);
            canvas.render_geometry(&fan_vertices(&right, CLEAR, edge), &RAY_INDICES);
        });

        composite_light_mask(renderer, mask);
    }

    fn cleanup(&mut self) {
        self.brick_wall = None;
        self.light_mask = None;
    }
}
