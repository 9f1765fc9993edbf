// Scene 4: soft lighting.
// Two bulbs beside the wall light the yard with eased circular falloff. Their strength
// pulses in antiphase every 1.5 s: while one brightens quickly (ease-out) the other
// fades slowly (ease-in), so the light seems to hand over from side to side.
//
// The mask is sampled on a coarse grid by the mask rasterizer and darkens the frame
// through the compositor.

use super::{draw_background, wall_rect, Scene, BULB_SIDE, WALL_H, WALL_W};
use crate::compositor::composite_light_mask;
use crate::easing::{smooth_end2, smooth_start2};
use crate::error::Error;
use crate::light::LightSource;
use crate::mask::{rasterize_light_mask, MaskGrid};
use crate::render::{BlendMode, Renderer};
use crate::texture::{brick_wall, create_texture};
use crate::types::{FPoint, FRect};
use image::{Rgba, RgbaImage};

const AMBIENT_ALPHA: u8 = 235;
const PULSE_MS: u32 = 1500;
/// Weakest and strongest bulb (mask alpha at the bulb centre).
const DIM_ALPHA: u8 = 220;
const BRIGHT_ALPHA: u8 = 5;
const LIGHT_RADIUS: f32 = 400.0;
/// Gap between the wall's bottom edge and the top of the bulbs.
const BULB_DROP: f32 = 75.0;

pub struct SoftLights {
    grid_size: u32,
    brick_wall: Option<RgbaImage>,
    light_mask: Option<RgbaImage>,
}

impl SoftLights {
    pub fn new(grid_size: u32) -> Self {
        Self { grid_size, brick_wall: None, light_mask: None }
    }
}

/// (left, right) centre alphas at `now_ms`.
pub fn pulse_min_alphas(now_ms: u32) -> (u8, u8) {
    let cycle = (now_ms % PULSE_MS) as f32 / PULSE_MS as f32;
    let range = f32::from(DIM_ALPHA - BRIGHT_ALPHA);
    let dim_to_bright = |p: f32| f32::from(DIM_ALPHA) - range * smooth_end2(p);
    let bright_to_dim = |p: f32| f32::from(BRIGHT_ALPHA) + range * smooth_start2(p);
    let (left, right) = if cycle < 0.5 {
        let p = cycle * 2.0;
        (dim_to_bright(p), bright_to_dim(p))
    } else {
        let p = (cycle - 0.5) * 2.0;
        (bright_to_dim(p), dim_to_bright(p))
    };
    (to_u8(left), to_u8(right))
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Left and right bulb squares.
fn bulbs(wall: FRect) -> (FRect, FRect) {
    let y = wall.y + wall.h + BULB_DROP;
    (
        FRect::new(wall.x - BULB_SIDE, y, BULB_SIDE, BULB_SIDE),
        FRect::new(wall.x + wall.w + BULB_SIDE, y, BULB_SIDE, BULB_SIDE),
    )
}

/// This frame's lights, one centred on each bulb.
pub fn light_sources(now_ms: u32, width: u32, height: u32) -> [LightSource; 2] {
    let (left, right) = bulbs(wall_rect(width, height));
    let (left_alpha, right_alpha) = pulse_min_alphas(now_ms);
    let centre = |r: FRect| FPoint::new(r.x + r.w * 0.5, r.y + r.h * 0.5);
    [
        LightSource::new(centre(left), LIGHT_RADIUS, left_alpha),
        LightSource::new(centre(right), LIGHT_RADIUS, right_alpha),
    ]
}

impl Scene for SoftLights {
    fn name(&self) -> &'static str {
        "soft lights"
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
        let lights = light_sources(now_ms, w, h);

        {
            let mut canvas = renderer.canvas();
            draw_background(&mut canvas);
            canvas.copy(wall, Some(wall_dest), BlendMode::Blend);
            canvas.set_draw_color(Rgba([255, 255, 255, 255]));
            canvas.fill_rect(left_bulb);
            canvas.fill_rect(right_bulb);
        }

        let grid = MaskGrid::new(mask.width(), mask.height(), self.grid_size);
        let cells = renderer.with_target(mask, |canvas| {
            rasterize_light_mask(canvas, &grid, AMBIENT_ALPHA, &lights)
        });
        log::trace!("soft light mask: {cells} cells");

        composite_light_mask(renderer, mask);
    }

    fn cleanup(&mut self) {
        self.brick_wall = None;
        self.light_mask = None;
    }
}
