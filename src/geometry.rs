// Geometry helpers for the light-ray fans: rotation about a pivot and the 6-point ray shape.

use crate::types::{FPoint, Vertex};
use image::Rgba;

/// Screen space has y pointing down, so positive degrees turn clockwise on screen.
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    -degrees.to_radians()
}

/// Rotate `point` around `origin`.
pub fn rotate_point(origin: FPoint, point: FPoint, degrees: f64) -> FPoint {
    let (s, c) = degrees_to_radians(degrees).sin_cos();
    let dx = f64::from(point.x - origin.x);
    let dy = f64::from(point.y - origin.y);
    FPoint::new(
        (f64::from(origin.x) + c * dx - s * dy) as f32,
        (f64::from(origin.y) + s * dx + c * dy) as f32,
    )
}

/// Rotate every point about `origin`; a point on the pivot stays put.
pub fn rotate_points(origin: FPoint, points: &mut [FPoint], degrees: f64) {
    for p in points.iter_mut() {
        *p = rotate_point(origin, *p, degrees);
    }
}

/// Triangle fan over a ray polygon: four triangles sharing vertex 0.
pub const RAY_INDICES: [usize; 12] = [0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 5, 4];

/// A light ray leaving `origin` upwards (negative `length` points it down).
///
/// Index 0 is the origin, then bottom-left, top-left, top-middle, top-right,
/// bottom-right. `near_half_width` is the spread at the bulb, `far_half_width` at the tip.
pub fn ray_polygon(origin: FPoint, near_half_width: f32, far_half_width: f32, length: f32) -> [FPoint; 6] {
    let FPoint { x, y } = origin;
    let tip = y - length;
    [
        origin,
        FPoint::new(x - near_half_width, y),
        FPoint::new(x - far_half_width, tip),
        FPoint::new(x, tip),
        FPoint::new(x + far_half_width, tip),
        FPoint::new(x + near_half_width, y),
    ]
}

/// Vertex 0 takes the centre colour, the rim takes the edge colour.
pub fn fan_vertices(points: &[FPoint; 6], center: Rgba<u8>, edge: Rgba<u8>) -> [Vertex; 6] {
    std::array::from_fn(|i| Vertex {
        position: points[i],
        color: if i == 0 { center } else { edge },
    })
}
