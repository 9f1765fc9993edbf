// Easing curves on normalized progress p in [0,1].
// Inputs are not clamped: values outside [0,1] extrapolate the parabola.

/// Ease-in: slow start, fast finish.
#[inline]
pub fn smooth_start2(p: f32) -> f32 {
    p * p
}

/// Ease-out: fast start, slow finish. Shapes light falloff from centre (0) to edge (1).
#[inline]
pub fn smooth_end2(p: f32) -> f32 {
    let inv = 1.0 - p;
    1.0 - inv * inv
}
