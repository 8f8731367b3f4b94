//! Sphere ("planet") samplers

use crate::{require_count, require_positive};
use lumen_core::{Result, SampleRng, Vec3};
use std::f32::consts::{PI, TAU};

/// Surface points sit in this outer fraction of the radius
const SHELL_THICKNESS: f32 = 0.04;

/// Fibonacci-lattice points on the sphere surface.
///
/// Each point is pulled inward by at most `SHELL_THICKNESS * radius` so the
/// shell reads as a thin crust rather than a perfect mathematical surface.
pub fn surface(count: usize, radius: f32, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    require_count(count)?;
    require_positive("planet_radius", radius)?;

    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
    let points = (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f32 + 0.5) / count as f32;
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f32;
            let r = radius * (1.0 - rng.range(0.0, SHELL_THICKNESS));
            Vec3::new(ring * theta.cos(), y, ring * theta.sin()) * r
        })
        .collect();
    Ok(points)
}

/// Points filling the sphere volume uniformly (radius = R * cbrt(u))
pub fn volume(count: usize, radius: f32, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    require_count(count)?;
    require_positive("planet_radius", radius)?;

    let points = (0..count)
        .map(|_| {
            let r = radius * rng.next_f32().cbrt();
            let theta = rng.range(0.0, TAU);
            let cos_phi = rng.range(-1.0, 1.0);
            let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
            Vec3::new(
                r * sin_phi * theta.cos(),
                r * cos_phi,
                r * sin_phi * theta.sin(),
            )
        })
        .collect();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::LumenError;

    fn inner_third_share(points: &[Vec3], radius: f32) -> f32 {
        let inner = points
            .iter()
            .filter(|p| p.length() < radius / 3.0)
            .count();
        inner as f32 / points.len() as f32
    }

    #[test]
    fn surface_points_lie_on_shell() {
        let mut rng = SampleRng::new(1);
        let points = surface(800, 2.0, &mut rng).unwrap();
        assert_eq!(points.len(), 800);
        for p in &points {
            let r = p.length();
            assert!(r <= 2.0 + 1e-4 && r >= 2.0 * (1.0 - SHELL_THICKNESS) - 1e-4);
        }
    }

    #[test]
    fn surface_covers_both_poles() {
        let mut rng = SampleRng::new(1);
        let points = surface(200, 1.0, &mut rng).unwrap();
        assert!(points.iter().any(|p| p.y > 0.9));
        assert!(points.iter().any(|p| p.y < -0.9));
    }

    #[test]
    fn volume_points_fill_interior() {
        let mut rng = SampleRng::new(2);
        let points = volume(6000, 2.0, &mut rng).unwrap();
        assert!(points.iter().all(|p| p.length() <= 2.0 + 1e-4));
        // Uniform volume: (1/3)^3 ≈ 3.7% within a third of the radius
        let share = inner_third_share(&points, 2.0);
        assert!(share > 0.015 && share < 0.07, "share = {share}");
    }

    #[test]
    fn low_count_is_less_dense_inside_than_high_count() {
        let mut rng = SampleRng::new(3);
        let sparse = surface(500, 2.0, &mut rng).unwrap();
        let dense = volume(6000, 2.0, &mut rng).unwrap();
        assert!(inner_third_share(&sparse, 2.0) < inner_third_share(&dense, 2.0));
    }

    #[test]
    fn rejects_bad_arguments() {
        let mut rng = SampleRng::new(4);
        assert!(matches!(
            surface(0, 1.0, &mut rng),
            Err(LumenError::InvalidCount(0))
        ));
        assert!(matches!(
            volume(10, 0.0, &mut rng),
            Err(LumenError::InvalidDimension { .. })
        ));
        assert!(volume(10, f32::NAN, &mut rng).is_err());
    }
}
