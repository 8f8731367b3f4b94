//! Sample command

use anyhow::{Context, Result};
use lumen_runtime::LumenConfig;
use lumen_shapes::{Density, Shape, ShapeSampler, ShapeSet};
use serde::Serialize;
use std::path::Path;

pub struct SampleArgs<'a> {
    pub config: Option<&'a Path>,
    pub shape: Shape,
    pub count: usize,
    pub density: Option<Density>,
    pub seed: Option<u32>,
    pub format: String,
    pub output: Option<String>,
}

#[derive(Serialize)]
struct SampledPoint {
    position: [f32; 3],
    color: [f32; 3],
}

pub fn run(args: SampleArgs<'_>) -> Result<()> {
    let config = LumenConfig::load(args.config).context("Failed to load config")?;
    let seed = args.seed.unwrap_or(config.particles.seed);
    let mut sampler = ShapeSampler::new(config.shapes, seed);
    let density = args
        .density
        .unwrap_or_else(|| sampler.density_for(args.count));

    let set = sampler
        .sample_with(&args.shape, args.count, density)
        .with_context(|| format!("Failed to sample {}", args.shape))?;
    log::info!(
        "Sampled {} {} point(s) ({:?})",
        set.len(),
        args.shape,
        density
    );

    let text = match args.format.as_str() {
        "json" => to_json(&set)?,
        "csv" => to_csv(&set),
        other => anyhow::bail!("Unknown format: {}", other),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {}", path))?;
            println!("Wrote {} point(s) to {}", set.len(), path);
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn to_json(set: &ShapeSet) -> Result<String> {
    let points: Vec<SampledPoint> = set
        .positions
        .iter()
        .zip(&set.colors)
        .map(|(p, c)| SampledPoint {
            position: p.to_array(),
            color: c.to_array(),
        })
        .collect();
    let mut json = serde_json::to_string_pretty(&points)?;
    json.push('\n');
    Ok(json)
}

fn to_csv(set: &ShapeSet) -> String {
    let mut out = String::from("x,y,z,r,g,b\n");
    for (p, c) in set.positions.iter().zip(&set.colors) {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            p.x, p.y, p.z, c.r, c.g, c.b
        ));
    }
    out
}
