// Soft point lights and the ambient light sampler.
//
// Mask alpha means darkness: 0 leaves the scene untouched, 255 paints it black.
// A light pulls the mask alpha down from the ambient level towards its own
// `min_alpha`, strongest at its centre and fading out (eased) at its radius.

use crate::easing::smooth_end2;
use crate::types::FPoint;

/// One light, rebuilt every frame from animation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub position: FPoint,
    /// Pre-squared radius of effect; distance checks stay sqrt-free.
    pub radius_squared: f32,
    /// Mask alpha at the centre. Lower is a brighter light.
    pub min_alpha: u8,
}

impl LightSource {
    pub fn new(position: FPoint, radius: f32, min_alpha: u8) -> Self {
        Self { position, radius_squared: radius * radius, min_alpha }
    }

    /// Mask alpha this light alone produces at `point`, or `None` when the
    /// point is outside its radius (hard cutoff).
    pub fn local_alpha(&self, point: FPoint, ambient_alpha: u8) -> Option<u8> {
        // A zero-radius light has no area of effect.
        if self.radius_squared <= 0.0 {
            return None;
        }
        let ds = point.dist_sq(self.position);
        if ds > self.radius_squared {
            return None;
        }

        // 0 at the centre, 1 at the edge
        let frac = smooth_end2(ds / self.radius_squared);
        let range = f32::from(ambient_alpha) - f32::from(self.min_alpha);
        Some(to_alpha(f32::from(self.min_alpha) + (range * frac).round()))
    }
}

/// Combined mask alpha at `point` for every light in `lights`.
///
/// No light in range gives the flat ambient level. One light in range gives
/// its own falloff value. Several lights multiply their darkness fractions
/// (`a / 255`), so overlapping lights brighten each other with diminishing
/// returns and the result never overflows.
pub fn sample_ambient_alpha(point: FPoint, ambient_alpha: u8, lights: &[LightSource]) -> u8 {
    let mut in_range = lights.iter().filter_map(|l| l.local_alpha(point, ambient_alpha));
    let Some(first) = in_range.next() else { return ambient_alpha };
    let Some(second) = in_range.next() else { return first };
    combine_alphas_multiplicative([first, second].into_iter().chain(in_range))
}

/// Multiply alphas together as darkness fractions and convert back to a byte.
/// An empty input is "no darkness removed": 255.
pub fn combine_alphas_multiplicative(alphas: impl IntoIterator<Item = u8>) -> u8 {
    let darkness: f64 = alphas.into_iter().map(|a| f64::from(a) / 255.0).product();
    to_alpha_f64(darkness * 255.0)
}

#[inline]
fn to_alpha(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn to_alpha_f64(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMBIENT: u8 = 235;

    fn bulb_at_origin() -> LightSource {
        LightSource::new(FPoint::new(0.0, 0.0), 400.0, 5)
    }

    #[test]
    fn no_lights_returns_ambient() {
        for ambient in [0u8, 17, 235, 255] {
            assert_eq!(sample_ambient_alpha(FPoint::new(12.0, -3.0), ambient, &[]), ambient);
        }
    }

    #[test]
    fn new_squares_the_radius() {
        assert_eq!(bulb_at_origin().radius_squared, 160_000.0);
    }

    #[test]
    fn single_bulb_falloff_points() {
        let lights = [bulb_at_origin()];
        assert_eq!(sample_ambient_alpha(FPoint::new(0.0, 0.0), AMBIENT, &lights), 5);
        // smooth_end2(0.25) = 0.4375; 230 * 0.4375 = 100.625 -> 101
        assert_eq!(sample_ambient_alpha(FPoint::new(200.0, 0.0), AMBIENT, &lights), 106);
        assert_eq!(sample_ambient_alpha(FPoint::new(0.0, 400.0), AMBIENT, &lights), AMBIENT);
    }

    #[test]
    fn outside_every_radius_is_ambient() {
        let lights = [
            bulb_at_origin(),
            LightSource::new(FPoint::new(1000.0, 0.0), 100.0, 0),
        ];
        for p in [FPoint::new(0.0, 401.0), FPoint::new(500.0, 0.0), FPoint::new(-900.0, 900.0)] {
            assert_eq!(sample_ambient_alpha(p, AMBIENT, &lights), AMBIENT);
        }
    }

    #[test]
    fn falloff_is_monotonic_from_centre_to_edge() {
        let light = bulb_at_origin();
        let mut prev = 0u8;
        for step in 0..=400 {
            let a = sample_ambient_alpha(FPoint::new(step as f32, 0.0), AMBIENT, &[light]);
            assert!(a >= prev, "alpha dropped at distance {step}: {prev} -> {a}");
            prev = a;
        }
        assert_eq!(prev, AMBIENT);
    }

    #[test]
    fn zero_radius_light_contributes_nothing() {
        let light = LightSource::new(FPoint::new(5.0, 5.0), 0.0, 0);
        assert_eq!(light.local_alpha(FPoint::new(5.0, 5.0), AMBIENT), None);
        assert_eq!(sample_ambient_alpha(FPoint::new(5.0, 5.0), AMBIENT, &[light]), AMBIENT);
    }

    #[test]
    fn overlapping_lights_are_brighter_than_either() {
        let a = LightSource::new(FPoint::new(0.0, 0.0), 300.0, 40);
        let b = a;
        let p = FPoint::new(100.0, 50.0);
        let alone = a.local_alpha(p, AMBIENT).unwrap();
        let both = sample_ambient_alpha(p, AMBIENT, &[a, b]);
        assert!(both < alone, "{both} should be below {alone}");
    }

    #[test]
    fn two_lights_combine_as_darkness_fractions() {
        // Full-strength flat lights: each light's local alpha is its min_alpha at the centre.
        let p = FPoint::new(10.0, 10.0);
        let lights = [
            LightSource::new(p, 50.0, 100),
            LightSource::new(p, 50.0, 150),
        ];
        assert_eq!(sample_ambient_alpha(p, AMBIENT, &lights), 59);
        assert_eq!(combine_alphas_multiplicative([100, 150]), 59);
    }

    #[test]
    fn many_lights_are_never_dropped() {
        // 40 identical lights at the sample point: every one must count.
        let p = FPoint::new(0.0, 0.0);
        let lights = vec![LightSource::new(p, 10.0, 250); 40];
        let expected = combine_alphas_multiplicative([250; 40]);
        assert_eq!(sample_ambient_alpha(p, AMBIENT, &lights), expected);
        assert!(expected < combine_alphas_multiplicative([250; 32]));
    }

    #[test]
    fn light_darker_than_ambient_stays_in_range() {
        let light = LightSource::new(FPoint::new(0.0, 0.0), 10.0, 255);
        assert_eq!(light.local_alpha(FPoint::new(0.0, 0.0), 20), Some(255));
        assert_eq!(light.local_alpha(FPoint::new(10.0, 0.0), 20), Some(20));
    }

    #[test]
    fn combining_nothing_is_fully_dark() {
        assert_eq!(combine_alphas_multiplicative([0u8; 0]), 255);
        assert_eq!(combine_alphas_multiplicative([0, 200]), 0);
    }

    #[test]
    fn sampler_folds_every_in_range_local_alpha() {
        let lights = [
            LightSource::new(FPoint::new(0.0, 0.0), 300.0, 20),
            LightSource::new(FPoint::new(120.0, 40.0), 200.0, 90),
            LightSource::new(FPoint::new(-50.0, 60.0), 250.0, 160),
            // never in range of the points below
            LightSource::new(FPoint::new(5000.0, 0.0), 10.0, 0),
        ];
        for p in [FPoint::new(10.0, 10.0), FPoint::new(60.0, 30.0), FPoint::new(-20.0, 90.0)] {
            let locals: Vec<u8> =
                lights.iter().filter_map(|l| l.local_alpha(p, AMBIENT)).collect();
            assert_eq!(locals.len(), 3);
            assert_eq!(
                sample_ambient_alpha(p, AMBIENT, &lights),
                combine_alphas_multiplicative(locals)
            );
        }
    }
}
