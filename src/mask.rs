// Light mask rasterizer.
// Visual: the darkness overlay is sampled on a coarse grid, so circular falloff shows
// up as visible square steps. Smaller cells look smoother and cost more samples.

use crate::light::{sample_ambient_alpha, LightSource};
use crate::render::{BlendMode, Canvas};
use crate::types::{FPoint, FRect};
use image::Rgba;

/// One flat fill of the mask: `rect` gets black at `alpha`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskCell {
    pub rect: FRect,
    pub alpha: u8,
}

/// Sampling grid laid over a `width` x `height` surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskGrid {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
}

impl MaskGrid {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        // a zero cell would never advance
        Self { width, height, cell_size: cell_size.max(1) }
    }

    /// Cells per row and per column; partial cells at the far edges count.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width.div_ceil(self.cell_size), self.height.div_ceil(self.cell_size))
    }

    /// Fill commands, row by row, each sampled at its cell's top-left corner.
    pub fn cells<'a>(
        self,
        ambient_alpha: u8,
        lights: &'a [LightSource],
    ) -> impl Iterator<Item = MaskCell> + 'a {
        let step = self.cell_size;
        let size = step as f32;
        let (cols, rows) = self.dimensions();
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| {
                let origin = FPoint::new((col * step) as f32, (row * step) as f32);
                MaskCell {
                    rect: FRect::new(origin.x, origin.y, size, size),
                    alpha: sample_ambient_alpha(origin, ambient_alpha, lights),
                }
            })
        })
    }
}

/// Rebuild the whole mask: flat ambient darkness, then one opaque fill per grid cell.
/// Writes use `BlendMode::None`; blending only happens when the mask is composited.
pub fn rasterize_light_mask(
    canvas: &mut Canvas<'_>,
    grid: &MaskGrid,
    ambient_alpha: u8,
    lights: &[LightSource],
) -> usize {
    canvas.set_blend_mode(BlendMode::None);
    canvas.set_draw_color(Rgba([0, 0, 0, ambient_alpha]));
    canvas.fill_rect(FRect::new(0.0, 0.0, canvas.width() as f32, canvas.height() as f32));

    let mut written = 0;
    for cell in grid.cells(ambient_alpha, lights) {
        canvas.set_draw_color(Rgba([0, 0, 0, cell.alpha]));
        canvas.fill_rect(cell.rect);
        written += 1;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderer;
    use crate::texture::create_texture;

    #[test]
    fn grid_covers_partial_edge_cells() {
        let grid = MaskGrid::new(100, 50, 16);
        assert_eq!(grid.dimensions(), (7, 4));
        assert_eq!(grid.cells(200, &[]).count(), 28);
    }

    #[test]
    fn zero_cell_size_is_clamped() {
        assert_eq!(MaskGrid::new(3, 2, 0).dimensions(), (3, 2));
    }

    #[test]
    fn cells_sample_at_their_origin() {
        let lights = [LightSource::new(FPoint::new(16.0, 16.0), 20.0, 10)];
        let grid = MaskGrid::new(64, 64, 16);
        let lit: Vec<_> = grid.cells(235, &lights).filter(|c| c.alpha == 10).collect();
        assert_eq!(lit, vec![MaskCell { rect: FRect::new(16.0, 16.0, 16.0, 16.0), alpha: 10 }]);
        // far corner is out of range
        let last = grid.cells(235, &lights).last().unwrap();
        assert_eq!(last.alpha, 235);
    }

    #[test]
    fn without_lights_the_mask_is_flat_ambient() {
        let mut renderer = Renderer::new(4, 4).unwrap();
        let mut mask = create_texture(40, 24).unwrap();
        let grid = MaskGrid::new(40, 24, 8);
        let written = renderer.with_target(&mut mask, |c| rasterize_light_mask(c, &grid, 235, &[]));
        assert_eq!(written, 15);
        assert!(mask.pixels().all(|p| *p == Rgba([0, 0, 0, 235])));
    }

    #[test]
    fn lit_cells_overwrite_instead_of_blending() {
        let mut renderer = Renderer::new(4, 4).unwrap();
        let mut mask = create_texture(32, 32).unwrap();
        let grid = MaskGrid::new(32, 32, 16);
        let lights = [LightSource::new(FPoint::new(0.0, 0.0), 8.0, 0)];
        renderer.with_target(&mut mask, |c| rasterize_light_mask(c, &grid, 200, &lights));
        // the first cell is fully lit; an opaque write leaves alpha exactly 0
        assert_eq!(*mask.get_pixel(5, 5), Rgba([0, 0, 0, 0]));
        assert_eq!(*mask.get_pixel(20, 20), Rgba([0, 0, 0, 200]));
    }
}
