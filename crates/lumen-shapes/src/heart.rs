//! Heart samplers
//!
//! Boundary is the classic parametric heart
//! `x = 16 sin³t`, `y = 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t`,
//! scaled so its half-width equals `size`.

use crate::geometry::{self, Point2};
use crate::{require_count, require_positive};
use lumen_core::{Result, SampleRng, Vec3};
use std::f32::consts::TAU;

/// Vertices in the discretized boundary polygon
pub const BOUNDARY_SEGMENTS: usize = 128;

/// Share of surface-variant points placed on the outline itself
const OUTLINE_SHARE: f32 = 0.4;

/// Point on the heart curve for parameter `t`, scaled to half-width `size`
pub fn curve_point(t: f32, size: f32) -> Point2 {
    let s = size / 16.0;
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    [x * s, y * s]
}

/// Discretized closed boundary
pub fn outline(size: f32) -> Vec<Point2> {
    (0..BOUNDARY_SEGMENTS)
        .map(|i| curve_point(i as f32 / BOUNDARY_SEGMENTS as f32 * TAU, size))
        .collect()
}

/// Flat heart with a dense outline.
///
/// A fixed share of points traces the curve; the rest fill the interior at
/// near-zero depth.
pub fn surface(count: usize, size: f32, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    require_count(count)?;
    require_positive("heart_size", size)?;

    let polygon = outline(size);
    let outline_count = (count as f32 * OUTLINE_SHARE).round() as usize;
    let flat = size * 0.02;

    let mut points = Vec::with_capacity(count);
    for _ in 0..outline_count {
        let [x, y] = curve_point(rng.range(0.0, TAU), size);
        points.push(Vec3::new(x, y, rng.jitter(flat)));
    }
    for _ in outline_count..count {
        let [x, y] = geometry::sample_in_polygon(&polygon, rng);
        points.push(Vec3::new(x, y, rng.jitter(flat)));
    }
    Ok(points)
}

/// Solid heart: interior by rejection sampling, dome depth toward the center
pub fn volume(count: usize, size: f32, depth: f32, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    require_count(count)?;
    require_positive("heart_size", size)?;
    require_positive("heart_depth", depth)?;

    let polygon = outline(size);
    let planar: Vec<Point2> = (0..count)
        .map(|_| geometry::sample_in_polygon(&polygon, rng))
        .collect();
    let depths = geometry::dome_depths(&planar, &polygon, depth, rng);

    Ok(planar
        .iter()
        .zip(depths)
        .map(|([x, y], z)| Vec3::new(*x, *y, z))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_width_matches_size() {
        let polygon = outline(2.0);
        let (min, max) = geometry::bounds(&polygon);
        assert!((max[0] - 2.0).abs() < 0.01);
        assert!((min[0] + 2.0).abs() < 0.01);
    }

    #[test]
    fn volume_points_inside_outline_and_domed() {
        let mut rng = SampleRng::new(10);
        let points = volume(3000, 2.0, 0.8, &mut rng).unwrap();
        assert_eq!(points.len(), 3000);
        let polygon = outline(2.0);
        for p in &points {
            assert!(geometry::contains(&polygon, [p.x, p.y]));
            assert!(p.z.abs() <= 0.4 + 1e-5);
        }
        // Points near the edge are flatter than the thickest interior points
        let max_z = points.iter().map(|p| p.z.abs()).fold(0.0, f32::max);
        assert!(max_z > 0.2);
    }

    #[test]
    fn surface_has_outline_share() {
        let mut rng = SampleRng::new(11);
        let points = surface(500, 2.0, &mut rng).unwrap();
        assert_eq!(points.len(), 500);
        let polygon = outline(2.0);
        let near_edge = points
            .iter()
            .filter(|p| geometry::distance_to_boundary(&polygon, [p.x, p.y]) < 0.05)
            .count();
        assert!(near_edge >= 200);
    }

    #[test]
    fn rejects_bad_arguments() {
        let mut rng = SampleRng::new(12);
        assert!(surface(0, 1.0, &mut rng).is_err());
        assert!(surface(10, -1.0, &mut rng).is_err());
        assert!(volume(10, 1.0, 0.0, &mut rng).is_err());
    }
}
