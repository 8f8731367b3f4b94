//! Simulate command

use anyhow::{Context, Result};
use lumen_runtime::scenario::{self, Scenario, ScenarioReport};
use lumen_runtime::{LumenConfig, ParticleDisplay};
use std::path::Path;

pub struct SimulateArgs<'a> {
    pub config: Option<&'a Path>,
    pub scenario: Option<String>,
    pub particles: Option<usize>,
    pub format: String,
}

pub fn run(args: SimulateArgs<'_>) -> Result<()> {
    let mut config = LumenConfig::load(args.config).context("Failed to load config")?;
    if let Some(count) = args.particles {
        config.particles.count = count;
    }

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(Path::new(path))
            .with_context(|| format!("Failed to load scenario {}", path))?,
        None => scenario::demo(),
    };

    let mut display = ParticleDisplay::new(config).context("Failed to start display")?;
    let report = scenario
        .run(&mut display)
        .context("Scenario playback failed")?;

    match args.format.as_str() {
        "text" => print_report(&report),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => anyhow::bail!("Unknown format: {}", other),
    }
    Ok(())
}

fn print_report(report: &ScenarioReport) {
    println!(
        "Scenario '{}': {} frames, {} gesture change(s)",
        report.name, report.frames, report.gesture_changes
    );
    for (time, reaction) in &report.reactions {
        println!("  {:>6.2}s  {}", time, reaction);
    }
    println!();
    println!(
        "{:>6}  {:>9}  {:>9}  {:>6}  {:<14}  {}",
        "time", "speed", "to-target", "scale", "gesture", "shape"
    );
    for s in &report.stats {
        println!(
            "{:>6.2}  {:>9.3}  {:>9.3}  {:>6.3}  {:<14}  {}{}",
            s.time,
            s.mean_speed,
            s.mean_target_distance,
            s.scale,
            s.gesture.name(),
            s.shape.as_deref().unwrap_or("-"),
            if s.explosion_active { " (exploding)" } else { "" }
        );
    }
    println!();
    println!("Mean speed over run: {:.3}", report.overall_mean_speed());
}
