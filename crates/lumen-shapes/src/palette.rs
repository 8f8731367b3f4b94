//! Per-shape color assignment

use lumen_core::{Rgb, Vec3};

/// Hue particles rest at when no shape palette or effect is active
pub const IDLE: Rgb = Rgb {
    r: 0.35,
    g: 0.55,
    b: 1.0,
};

pub const PLANET_LOW: Rgb = Rgb {
    r: 0.15,
    g: 0.35,
    b: 0.95,
};
pub const PLANET_HIGH: Rgb = Rgb {
    r: 0.95,
    g: 0.55,
    b: 0.85,
};
pub const HEART: Rgb = Rgb {
    r: 1.0,
    g: 0.2,
    b: 0.4,
};
pub const STAR: Rgb = Rgb {
    r: 1.0,
    g: 0.85,
    b: 0.25,
};
pub const TORUS_INNER: Rgb = Rgb {
    r: 0.2,
    g: 0.9,
    b: 1.0,
};
pub const TORUS_OUTER: Rgb = Rgb {
    r: 0.6,
    g: 0.35,
    b: 1.0,
};
pub const TEXT: Rgb = Rgb {
    r: 0.92,
    g: 0.96,
    b: 1.0,
};
/// One color for the whole arrow-through-heart composite
pub const ARROW_HEART: Rgb = Rgb {
    r: 1.0,
    g: 0.3,
    b: 0.55,
};

/// Two-stop gradient over the normalized height (y) of the points
pub fn height_gradient(points: &[Vec3], low: Rgb, high: Rgb) -> Vec<Rgb> {
    let (min, max) = points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    let span = max - min;
    points
        .iter()
        .map(|p| {
            let t = if span > 0.0 { (p.y - min) / span } else { 0.5 };
            low.lerp(&high, t)
        })
        .collect()
}

/// Gradient over planar distance from the z axis
pub fn radial_gradient(points: &[Vec3], inner: Rgb, outer: Rgb) -> Vec<Rgb> {
    let radial = |p: &Vec3| (p.x * p.x + p.y * p.y).sqrt();
    let (min, max) = points
        .iter()
        .map(radial)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r), hi.max(r))
        });
    let span = max - min;
    points
        .iter()
        .map(|p| {
            let t = if span > 0.0 { (radial(p) - min) / span } else { 0.5 };
            inner.lerp(&outer, t)
        })
        .collect()
}

pub fn planet(points: &[Vec3]) -> Vec<Rgb> {
    height_gradient(points, PLANET_LOW, PLANET_HIGH)
}

pub fn heart(points: &[Vec3]) -> Vec<Rgb> {
    vec![HEART; points.len()]
}

pub fn star(points: &[Vec3]) -> Vec<Rgb> {
    vec![STAR; points.len()]
}

pub fn torus(points: &[Vec3]) -> Vec<Rgb> {
    radial_gradient(points, TORUS_INNER, TORUS_OUTER)
}

pub fn text(points: &[Vec3]) -> Vec<Rgb> {
    vec![TEXT; points.len()]
}

pub fn arrow_heart(points: &[Vec3]) -> Vec<Rgb> {
    vec![ARROW_HEART; points.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints_follow_height() {
        let points = [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let colors = planet(&points);
        let close = |a: Rgb, b: Rgb| {
            a.to_array()
                .iter()
                .zip(b.to_array())
                .all(|(x, y)| (x - y).abs() < 1e-5)
        };
        assert!(close(colors[0], PLANET_LOW));
        assert!(close(colors[2], PLANET_HIGH));
        assert!((colors[1].r - (PLANET_LOW.r + PLANET_HIGH.r) / 2.0).abs() < 1e-5);
    }

    #[test]
    fn flat_input_uses_midpoint() {
        let points = [Vec3::ZERO, Vec3::ZERO];
        let colors = planet(&points);
        assert_eq!(colors[0], colors[1]);
    }

    #[test]
    fn palette_channels_stay_in_unit_range() {
        let points: Vec<Vec3> = (0..20).map(|i| Vec3::new(i as f32, -(i as f32), 0.0)).collect();
        for colors in [planet(&points), torus(&points), arrow_heart(&points)] {
            for c in colors {
                for ch in c.to_array() {
                    assert!((0.0..=1.0).contains(&ch));
                }
            }
        }
    }
}
