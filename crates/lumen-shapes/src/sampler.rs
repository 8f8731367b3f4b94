//! Shape dispatch
//!
//! Each shape kind has one table entry bundling its position generator and
//! its palette, so adding a shape means adding one row.

use crate::config::SamplerConfig;
use crate::shape::{Density, Shape, ShapeKind};
use crate::{composite, heart, palette, sphere, star, text, torus};
use log::debug;
use lumen_core::{Result, Rgb, SampleRng, Vec3};

/// Generated targets and their colors, index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeSet {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Rgb>,
}

impl ShapeSet {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Per-call arguments handed to a generator
pub struct ShapeArgs<'a> {
    pub count: usize,
    pub density: Density,
    pub text: &'a str,
}

type Generator = fn(&SamplerConfig, &ShapeArgs<'_>, &mut SampleRng) -> Result<Vec<Vec3>>;
type Palette = fn(&[Vec3]) -> Vec<Rgb>;

struct ShapeEntry {
    kind: ShapeKind,
    name: &'static str,
    generate: Generator,
    palette: Palette,
}

/// Indexed by `ShapeKind as usize`
static SHAPES: [ShapeEntry; 6] = [
    ShapeEntry {
        kind: ShapeKind::Planet,
        name: "planet",
        generate: generate_planet,
        palette: palette::planet,
    },
    ShapeEntry {
        kind: ShapeKind::Heart,
        name: "heart",
        generate: generate_heart,
        palette: palette::heart,
    },
    ShapeEntry {
        kind: ShapeKind::Star,
        name: "star",
        generate: generate_star,
        palette: palette::star,
    },
    ShapeEntry {
        kind: ShapeKind::Torus,
        name: "torus",
        generate: generate_torus,
        palette: palette::torus,
    },
    ShapeEntry {
        kind: ShapeKind::Text,
        name: "text",
        generate: generate_text,
        palette: palette::text,
    },
    ShapeEntry {
        kind: ShapeKind::ArrowHeart,
        name: "arrow_heart",
        generate: generate_arrow_heart,
        palette: palette::arrow_heart,
    },
];

fn generate_planet(c: &SamplerConfig, a: &ShapeArgs<'_>, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    match a.density {
        Density::Surface => sphere::surface(a.count, c.planet_radius, rng),
        Density::Volume => sphere::volume(a.count, c.planet_radius, rng),
    }
}

fn generate_heart(c: &SamplerConfig, a: &ShapeArgs<'_>, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    match a.density {
        Density::Surface => heart::surface(a.count, c.heart_size, rng),
        Density::Volume => heart::volume(a.count, c.heart_size, c.heart_depth, rng),
    }
}

fn generate_star(c: &SamplerConfig, a: &ShapeArgs<'_>, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    match a.density {
        Density::Surface => star::surface(a.count, c.star_outer_radius, c.star_inner_radius, rng),
        Density::Volume => star::volume(
            a.count,
            c.star_outer_radius,
            c.star_inner_radius,
            c.star_depth,
            rng,
        ),
    }
}

fn generate_torus(c: &SamplerConfig, a: &ShapeArgs<'_>, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    match a.density {
        Density::Surface => {
            torus::surface(a.count, c.torus_major_radius, c.torus_minor_radius, rng)
        }
        Density::Volume => torus::volume(a.count, c.torus_major_radius, c.torus_minor_radius, rng),
    }
}

fn generate_text(c: &SamplerConfig, a: &ShapeArgs<'_>, rng: &mut SampleRng) -> Result<Vec<Vec3>> {
    text::generate(a.count, a.text, c.text_height, c.text_depth, a.density, rng)
}

fn generate_arrow_heart(
    c: &SamplerConfig,
    a: &ShapeArgs<'_>,
    rng: &mut SampleRng,
) -> Result<Vec<Vec3>> {
    composite::arrow_heart(a.count, c.arrow_heart_size, c.heart_depth, a.density, rng)
}

/// Generates target sets for any [`Shape`].
///
/// Holds its own deterministic RNG; two samplers with the same seed and
/// config produce identical sequences.
#[derive(Debug, Clone)]
pub struct ShapeSampler {
    config: SamplerConfig,
    rng: SampleRng,
}

impl ShapeSampler {
    pub fn new(config: SamplerConfig, seed: u32) -> Self {
        Self {
            config,
            rng: SampleRng::new(seed),
        }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Density variant used for a population of `count`
    pub fn density_for(&self, count: usize) -> Density {
        Density::for_count(count, self.config.volume_threshold)
    }

    /// Sample `count` targets, picking the density variant from the count
    pub fn sample(&mut self, shape: &Shape, count: usize) -> Result<ShapeSet> {
        let density = self.density_for(count);
        self.sample_with(shape, count, density)
    }

    /// Sample with an explicit density variant.
    ///
    /// An empty text string falls back to the configured default text.
    pub fn sample_with(&mut self, shape: &Shape, count: usize, density: Density) -> Result<ShapeSet> {
        let entry = &SHAPES[shape.kind() as usize];
        debug_assert_eq!(entry.kind, shape.kind(), "shape table out of order");
        let text = match shape.text() {
            Some(s) if !s.is_empty() => s,
            _ => self.config.default_text.as_str(),
        };
        let args = ShapeArgs {
            count,
            density,
            text,
        };

        let positions = (entry.generate)(&self.config, &args, &mut self.rng)?;
        let colors = (entry.palette)(&positions);
        debug!(
            "Sampled {} {} targets ({:?})",
            positions.len(),
            entry.name,
            density
        );
        Ok(ShapeSet { positions, colors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::LumenError;

    fn all_shapes() -> Vec<Shape> {
        vec![
            Shape::Planet,
            Shape::Heart,
            Shape::Star,
            Shape::Torus,
            Shape::Text("LUMEN".into()),
            Shape::ArrowHeart,
        ]
    }

    #[test]
    fn table_rows_match_kinds() {
        for shape in all_shapes() {
            let entry = &SHAPES[shape.kind() as usize];
            assert_eq!(entry.kind, shape.kind());
        }
    }

    #[test]
    fn every_shape_returns_exact_count_in_both_variants() {
        let mut sampler = ShapeSampler::new(SamplerConfig::default(), 7);
        for shape in all_shapes() {
            for density in [Density::Surface, Density::Volume] {
                for count in [1, 37, 2500] {
                    let set = sampler.sample_with(&shape, count, density).unwrap();
                    assert_eq!(set.positions.len(), count, "{shape} {density:?}");
                    assert_eq!(set.colors.len(), count);
                    assert!(set.positions.iter().all(|p| p.is_finite()));
                }
            }
        }
    }

    #[test]
    fn density_follows_threshold() {
        let sampler = ShapeSampler::new(SamplerConfig::default(), 1);
        assert_eq!(sampler.density_for(500), Density::Surface);
        assert_eq!(sampler.density_for(2000), Density::Volume);
    }

    #[test]
    fn arrow_heart_is_single_colored() {
        let mut sampler = ShapeSampler::new(SamplerConfig::default(), 3);
        let set = sampler.sample(&Shape::ArrowHeart, 300).unwrap();
        assert!(set.colors.iter().all(|c| *c == palette::ARROW_HEART));
    }

    #[test]
    fn same_seed_same_targets() {
        let mut a = ShapeSampler::new(SamplerConfig::default(), 99);
        let mut b = ShapeSampler::new(SamplerConfig::default(), 99);
        assert_eq!(
            a.sample(&Shape::Star, 200).unwrap(),
            b.sample(&Shape::Star, 200).unwrap()
        );
    }

    #[test]
    fn empty_text_uses_default_and_invalid_config_fails() {
        let mut sampler = ShapeSampler::new(SamplerConfig::default(), 5);
        assert_eq!(sampler.sample(&Shape::Text(String::new()), 40).unwrap().len(), 40);
        assert!(matches!(
            sampler.sample(&Shape::Text("   ".into()), 40),
            Err(LumenError::EmptyRaster(_))
        ));
        assert!(matches!(sampler.sample(&Shape::Planet, 0), Err(LumenError::InvalidCount(0))));

        let config = SamplerConfig {
            torus_minor_radius: 0.0,
            ..SamplerConfig::default()
        };
        let mut sampler = ShapeSampler::new(config, 5);
        assert!(sampler.sample(&Shape::Torus, 10).is_err());
    }
}
