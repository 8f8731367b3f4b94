//! Arrow through a heart
//!
//! 70% of the particles form the heart, the rest an arrow crossing it
//! diagonally. The arrow is a thin shaft rectangle plus a head triangle.

use crate::geometry::{self, Point2};
use crate::shape::Density;
use crate::{heart, require_count, require_positive};
use lumen_core::{Result, SampleRng, Vec3};

const HEART_SHARE: f32 = 0.7;
const SHAFT_SHARE: f32 = 0.6;

/// Arrow tilt, counter-clockwise from +X
const ARROW_ANGLE: f32 = 25.0 * std::f32::consts::PI / 180.0;

// Arrow dimensions as multiples of the heart size
const SHAFT_START: f32 = -1.4;
const SHAFT_END: f32 = 1.2;
const SHAFT_HALF_WIDTH: f32 = 0.03;
const HEAD_HALF_WIDTH: f32 = 0.18;
const HEAD_TIP: f32 = 1.6;

pub fn arrow_heart(
    count: usize,
    size: f32,
    depth: f32,
    density: Density,
    rng: &mut SampleRng,
) -> Result<Vec<Vec3>> {
    require_count(count)?;
    let heart_count = ((count as f32 * HEART_SHARE).round() as usize).clamp(1, count);
    let arrow_count = count - heart_count;

    let mut points = match density {
        Density::Surface => heart::surface(heart_count, size, rng)?,
        Density::Volume => heart::volume(heart_count, size, depth, rng)?,
    };
    if arrow_count > 0 {
        points.extend(arrow(arrow_count, size, rng)?);
    }
    Ok(points)
}

/// The arrow alone, tilted by 25 degrees and centered near the origin
pub fn arrow(count: usize, size: f32, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    require_count(count)?;
    require_positive("arrow_heart_size", size)?;

    let shaft_count = (count as f32 * SHAFT_SHARE).round() as usize;
    let (sin, cos) = ARROW_ANGLE.sin_cos();
    let flat = size * 0.02;

    let head: [Point2; 3] = [
        [SHAFT_END * size, HEAD_HALF_WIDTH * size],
        [SHAFT_END * size, -HEAD_HALF_WIDTH * size],
        [HEAD_TIP * size, 0.0],
    ];

    let points = (0..count)
        .map(|i| {
            let [x, y] = if i < shaft_count {
                [
                    rng.range(SHAFT_START * size, SHAFT_END * size),
                    rng.jitter(SHAFT_HALF_WIDTH * size),
                ]
            } else {
                geometry::sample_triangle(head[0], head[1], head[2], rng)
            };
            Vec3::new(x * cos - y * sin, x * sin + y * cos, rng.jitter(flat))
        })
        .collect();
    Ok(points)
}
