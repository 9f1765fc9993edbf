// Scenes: each one owns its offscreen surfaces and knows how to draw one frame.
// Visual: the app cycles through these on a timer (or pins one via SCENE=<n>).

mod beams;
mod cones;
mod noise;
mod soft_lights;
mod sweep;

pub use beams::RotatingBeams;
pub use cones::SwingingCones;
pub use noise::StaticNoise;
pub use soft_lights::SoftLights;
pub use sweep::SweepingBar;

use crate::config::Config;
use crate::error::Error;
use crate::render::{Canvas, Renderer};
use crate::types::FRect;
use image::Rgba;

/// setup -> draw (every frame) -> cleanup.
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Allocate surfaces. A failure here aborts program start.
    fn setup(&mut self, renderer: &mut Renderer) -> Result<(), Error>;

    /// Draw one complete frame into the renderer. `now_ms` is time since start.
    fn draw(&mut self, renderer: &mut Renderer, now_ms: u32);

    /// Release surfaces.
    fn cleanup(&mut self);
}

/// Every scene, in index order.
pub fn all_scenes(config: &Config) -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(StaticNoise::default()),
        Box::new(SweepingBar::default()),
        Box::new(RotatingBeams::default()),
        Box::new(SwingingCones::default()),
        Box::new(SoftLights::new(config.mask_grid_size)),
    ]
}

/// Set up every scene up front; the first failure names its scene.
pub fn setup_all(scenes: &mut [Box<dyn Scene>], renderer: &mut Renderer) -> Result<(), Error> {
    for scene in scenes.iter_mut() {
        log::debug!("setting up scene `{}`", scene.name());
        scene.setup(renderer).map_err(|e| e.in_scene(scene.name()))?;
    }
    Ok(())
}

pub fn cleanup_all(scenes: &mut [Box<dyn Scene>]) {
    for scene in scenes.iter_mut() {
        scene.cleanup();
    }
}

/// Pinned scene if any, otherwise `ttl_ms` per scene in order, wrapping.
pub fn select_scene(now_ms: u32, ttl_ms: u32, count: usize, pinned: Option<usize>) -> usize {
    if let Some(ix) = pinned {
        return ix;
    }
    if count == 0 {
        return 0;
    }
    (now_ms / ttl_ms.max(1)) as usize % count
}

// ---------------------------- shared scene furniture ----------------------------

pub(crate) const GRASS: Rgba<u8> = Rgba([0, 127, 0, 255]);
pub(crate) const WALL_W: u32 = 500;
pub(crate) const WALL_H: u32 = 300;
pub(crate) const BULB_SIDE: f32 = 50.0;

/// Black clear, then a flat green field.
pub(crate) fn draw_background(canvas: &mut Canvas<'_>) {
    canvas.set_draw_color(Rgba([0, 0, 0, 255]));
    canvas.clear();
    canvas.set_draw_color(GRASS);
    canvas.fill_rect(FRect::new(0.0, 0.0, canvas.width() as f32, canvas.height() as f32));
}

/// The wall sits in the middle of the frame.
pub(crate) fn wall_rect(width: u32, height: u32) -> FRect {
    FRect::new(
        width as f32 * 0.5 - WALL_W as f32 * 0.5,
        height as f32 * 0.5 - WALL_H as f32 * 0.5,
        WALL_W as f32,
        WALL_H as f32,
    )
}
