// Scene 0: TV static. Visual: a fresh spray of single pixels in one random colour each frame.

use super::Scene;
use crate::error::Error;
use crate::render::Renderer;
use crate::rng::Rng32;
use crate::types::FPoint;
use image::Rgba;

const POINT_COUNT: usize = 3500;

pub struct StaticNoise {
    rng: Rng32,
    points: Vec<FPoint>,
}

impl Default for StaticNoise {
    fn default() -> Self {
        Self { rng: Rng32::from_time(), points: Vec::new() }
    }
}

impl Scene for StaticNoise {
    fn name(&self) -> &'static str {
        "static"
    }

    fn setup(&mut self, _renderer: &mut Renderer) -> Result<(), Error> {
        self.points = vec![FPoint::default(); POINT_COUNT];
        Ok(())
    }

    fn draw(&mut self, renderer: &mut Renderer, _now_ms: u32) {
        let (w, h) = (renderer.width(), renderer.height());
        for p in &mut self.points {
            *p = FPoint::new(self.rng.below(w) as f32, self.rng.below(h) as f32);
        }
        let color = Rgba([
            self.rng.below(255) as u8,
            self.rng.below(255) as u8,
            self.rng.below(255) as u8,
            255,
        ]);

        let mut canvas = renderer.canvas();
        canvas.set_draw_color(Rgba([0, 0, 0, 255]));
        canvas.clear();
        canvas.set_draw_color(color);
        canvas.draw_points(&self.points);
        renderer.reset_state();
    }

    fn cleanup(&mut self) {
        self.points = Vec::new();
    }
}
