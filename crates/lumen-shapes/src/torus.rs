//! Torus samplers; the ring lies in the XY plane facing the viewer

use crate::{require_count, require_positive};
use lumen_core::{Result, SampleRng, Vec3};
use std::f32::consts::TAU;

/// Angular jitter as a fraction of one ring step
const RING_JITTER: f32 = 0.5;

/// Points on the tube surface.
///
/// The ring angle advances evenly with a little jitter, the tube angle is
/// random.
pub fn surface(count: usize, major: f32, minor: f32, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    validate(count, major, minor)?;
    let step = TAU / count as f32;
    Ok((0..count)
        .map(|i| {
            let u = i as f32 * step + rng.jitter(step * RING_JITTER);
            let v = rng.range(0.0, TAU);
            let tube = minor * (1.0 + rng.jitter(0.03));
            point(major, u, v, tube)
        })
        .collect())
}

/// Points filling the tube: a random spot inside the circular cross-section
/// at each ring step
pub fn volume(count: usize, major: f32, minor: f32, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    validate(count, major, minor)?;
    let step = TAU / count as f32;
    Ok((0..count)
        .map(|i| {
            let u = i as f32 * step + rng.jitter(step * RING_JITTER);
            let v = rng.range(0.0, TAU);
            // sqrt keeps the disk uniform
            let rho = minor * rng.next_f32().sqrt();
            point(major, u, v, rho)
        })
        .collect())
}

fn point(major: f32, u: f32, v: f32, rho: f32) -> Vec3 {
    let ring = major + rho * v.cos();
    Vec3::new(ring * u.cos(), ring * u.sin(), rho * v.sin())
}

fn validate(count: usize, major: f32, minor: f32) -> Result<()> {
    require_count(count)?;
    require_positive("torus_major_radius", major)?;
    require_positive("torus_minor_radius", minor)
}

/// Distance from `p` to the tube's center circle
pub fn tube_distance(p: Vec3, major: f32) -> f32 {
    let planar = (p.x * p.x + p.y * p.y).sqrt();
    ((planar - major).powi(2) + p.z * p.z).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_points_on_tube_wall() {
        let mut rng = SampleRng::new(31);
        let points = surface(1000, 2.0, 0.5, &mut rng).unwrap();
        assert_eq!(points.len(), 1000);
        for p in points {
            let d = tube_distance(p, 2.0);
            assert!((d - 0.5).abs() <= 0.5 * 0.03 + 1e-4);
        }
    }

    #[test]
    fn volume_points_inside_tube() {
        let mut rng = SampleRng::new(32);
        let points = volume(4000, 2.0, 0.5, &mut rng).unwrap();
        assert!(points.iter().all(|p| tube_distance(*p, 2.0) <= 0.5 + 1e-4));
        let core = points
            .iter()
            .filter(|p| tube_distance(**p, 2.0) < 0.25)
            .count();
        // Uniform disk: a quarter of the area lies within half the radius
        assert!(core > 600);
    }

    #[test]
    fn rejects_bad_arguments() {
        let mut rng = SampleRng::new(33);
        assert!(surface(0, 1.0, 0.2, &mut rng).is_err());
        assert!(volume(5, 1.0, 0.0, &mut rng).is_err());
    }
}
