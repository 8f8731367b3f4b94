//! Planar helpers shared by the heart, star and arrow generators

use lumen_core::SampleRng;

pub type Point2 = [f32; 2];

/// Rejection sampling gives up after this many misses per point
const MAX_REJECTIONS: usize = 10_000;

/// Ray-casting point-in-polygon test (even-odd rule)
pub fn contains(polygon: &[Point2], p: Point2) -> bool {
    let mut inside = false;
    let n = polygon.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let [xi, yi] = polygon[i];
        let [xj, yj] = polygon[j];
        if (yi > p[1]) != (yj > p[1]) {
            let x_cross = (xj - xi) * (p[1] - yi) / (yj - yi) + xi;
            if p[0] < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounds as (min, max)
pub fn bounds(polygon: &[Point2]) -> (Point2, Point2) {
    let mut min = [f32::INFINITY; 2];
    let mut max = [f32::NEG_INFINITY; 2];
    for p in polygon {
        min[0] = min[0].min(p[0]);
        min[1] = min[1].min(p[1]);
        max[0] = max[0].max(p[0]);
        max[1] = max[1].max(p[1]);
    }
    (min, max)
}

/// Distance from `p` to the nearest polygon edge
pub fn distance_to_boundary(polygon: &[Point2], p: Point2) -> f32 {
    let n = polygon.len();
    (0..n)
        .map(|i| segment_distance(polygon[i], polygon[(i + 1) % n], p))
        .fold(f32::INFINITY, f32::min)
}

fn segment_distance(a: Point2, b: Point2, p: Point2) -> f32 {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let ap = [p[0] - a[0], p[1] - a[1]];
    let len_sq = ab[0] * ab[0] + ab[1] * ab[1];
    let t = if len_sq > 0.0 {
        ((ap[0] * ab[0] + ap[1] * ab[1]) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = ap[0] - ab[0] * t;
    let dy = ap[1] - ab[1] * t;
    (dx * dx + dy * dy).sqrt()
}

pub fn triangle_area(a: Point2, b: Point2, c: Point2) -> f32 {
    ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() * 0.5
}

/// Uniform point inside a triangle via folded barycentric coordinates
pub fn sample_triangle(a: Point2, b: Point2, c: Point2, rng: &mut SampleRng) -> Point2 {
    let mut u = rng.next_f32();
    let mut v = rng.next_f32();
    if u + v > 1.0 {
        u = 1.0 - u;
        v = 1.0 - v;
    }
    [
        a[0] + u * (b[0] - a[0]) + v * (c[0] - a[0]),
        a[1] + u * (b[1] - a[1]) + v * (c[1] - a[1]),
    ]
}

/// Uniform point inside `polygon` by rejection from its bounding box.
///
/// Falls back to the first vertex if the polygon is degenerate.
pub fn sample_in_polygon(polygon: &[Point2], rng: &mut SampleRng) -> Point2 {
    let (min, max) = bounds(polygon);
    for _ in 0..MAX_REJECTIONS {
        let p = [rng.range(min[0], max[0]), rng.range(min[1], max[1])];
        if contains(polygon, p) {
            return p;
        }
    }
    polygon.first().copied().unwrap_or([0.0, 0.0])
}

/// Split `count` across `weights` proportionally; the parts always sum to `count`.
///
/// Uses largest-remainder rounding.
pub fn allocate_by_weight(count: usize, weights: &[f32]) -> Vec<usize> {
    let total: f32 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return vec![0; weights.len()];
    }

    let exact: Vec<f32> = weights
        .iter()
        .map(|w| w / total * count as f32)
        .collect();
    let mut parts: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();
    let assigned: usize = parts.iter().sum();

    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });
    for &i in order.iter().cycle().take(count.saturating_sub(assigned)) {
        parts[i] += 1;
    }
    parts
}

/// Dome profile: z shrinks to zero at the polygon edge.
///
/// Each point gets a random z in `[-depth/2, depth/2]` scaled by the square
/// root of its normalized inset from the boundary.
pub fn dome_depths(points: &[Point2], polygon: &[Point2], depth: f32, rng: &mut SampleRng) -> Vec<f32> {
    let insets: Vec<f32> = points
        .iter()
        .map(|p| distance_to_boundary(polygon, *p))
        .collect();
    let max_inset = insets.iter().copied().fold(0.0_f32, f32::max);
    if max_inset <= 0.0 {
        return vec![0.0; points.len()];
    }
    insets
        .iter()
        .map(|d| rng.jitter(depth * 0.5) * (d / max_inset).sqrt())
        .collect()
}
