//! Five-pointed star samplers
//!
//! The 10-vertex outline (outer and inner radii alternating) is split into
//! five point triangles and five center-fan triangles covering the inner
//! pentagon. Particles are shared out by triangle area.

use crate::geometry::{self, Point2};
use crate::{require_count, require_positive};
use lumen_core::{LumenError, Result, SampleRng, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// Outline vertices, starting with the top point and going counter-clockwise
pub fn vertices(outer: f32, inner: f32) -> [Point2; 10] {
    let mut out = [[0.0; 2]; 10];
    for (k, v) in out.iter_mut().enumerate() {
        let angle = FRAC_PI_2 + k as f32 * PI / 5.0;
        let r = if k % 2 == 0 { outer } else { inner };
        *v = [r * angle.cos(), r * angle.sin()];
    }
    out
}

/// The ten triangles: points first, then the center fan
pub fn triangles(outer: f32, inner: f32) -> Vec<[Point2; 3]> {
    let v = vertices(outer, inner);
    let mut tris = Vec::with_capacity(10);
    for k in 0..5 {
        tris.push([v[(2 * k + 9) % 10], v[2 * k], v[2 * k + 1]]);
    }
    for k in 0..5 {
        tris.push([[0.0, 0.0], v[2 * k + 1], v[(2 * k + 3) % 10]]);
    }
    tris
}

/// Flat star
pub fn surface(count: usize, outer: f32, inner: f32, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    let planar = planar_points(count, outer, inner, rng)?;
    let flat = outer * 0.02;
    Ok(planar
        .into_iter()
        .map(|[x, y]| Vec3::new(x, y, rng.jitter(flat)))
        .collect())
}

/// Star with depth shrinking toward its edges
pub fn volume(
    count: usize,
    outer: f32,
    inner: f32,
    depth: f32,
    rng: &mut SampleRng,
) -> Result<Vec<Vec3>> {
    require_positive("star_depth", depth)?;
    let planar = planar_points(count, outer, inner, rng)?;
    let outline = vertices(outer, inner);
    let depths = geometry::dome_depths(&planar, &outline, depth, rng);
    Ok(planar
        .iter()
        .zip(depths)
        .map(|([x, y], z)| Vec3::new(*x, *y, z))
        .collect())
}

fn planar_points(
    count: usize,
    outer: f32,
    inner: f32,
    rng: &mut SampleRng,
) -> Result<Vec<Point2>> {
    require_count(count)?;
    require_positive("star_outer_radius", outer)?;
    require_positive("star_inner_radius", inner)?;
    if inner >= outer {
        return Err(LumenError::dimension("star_inner_radius", inner));
    }

    let tris = triangles(outer, inner);
    let areas: Vec<f32> = tris
        .iter()
        .map(|[a, b, c]| geometry::triangle_area(*a, *b, *c))
        .collect();
    let shares = geometry::allocate_by_weight(count, &areas);

    let mut points = Vec::with_capacity(count);
    for ([a, b, c], n) in tris.iter().zip(shares) {
        for _ in 0..n {
            points.push(geometry::sample_triangle(*a, *b, *c, rng));
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangles_tile_the_star() {
        let (outer, inner) = (2.0, 0.8);
        let tri_area: f32 = triangles(outer, inner)
            .iter()
            .map(|[a, b, c]| geometry::triangle_area(*a, *b, *c))
            .sum();
        // Shoelace area of the outline polygon
        let v = vertices(outer, inner);
        let poly_area = (0..10)
            .map(|i| {
                let (a, b) = (v[i], v[(i + 1) % 10]);
                a[0] * b[1] - b[0] * a[1]
            })
            .sum::<f32>()
            .abs()
            * 0.5;
        assert!((tri_area - poly_area).abs() < 1e-3);
    }

    #[test]
    fn exact_count_inside_outline() {
        let mut rng = SampleRng::new(21);
        let points = surface(777, 2.0, 0.8, &mut rng).unwrap();
        assert_eq!(points.len(), 777);
        let outline = vertices(2.0, 0.8);
        for p in &points {
            let q = [p.x, p.y];
            assert!(
                geometry::contains(&outline, q) || geometry::distance_to_boundary(&outline, q) < 1e-3
            );
        }
    }

    #[test]
    fn volume_adds_bounded_depth() {
        let mut rng = SampleRng::new(22);
        let points = volume(2000, 2.0, 0.8, 0.6, &mut rng).unwrap();
        assert!(points.iter().all(|p| p.z.abs() <= 0.3 + 1e-5));
        assert!(points.iter().any(|p| p.z.abs() > 0.1));
    }

    #[test]
    fn inner_radius_must_be_smaller() {
        let mut rng = SampleRng::new(23);
        assert!(surface(10, 1.0, 1.5, &mut rng).is_err());
        assert!(surface(10, 1.0, 0.0, &mut rng).is_err());
        assert!(volume(10, 1.0, 0.5, -0.1, &mut rng).is_err());
    }
}
