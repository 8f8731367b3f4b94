//! Lumen CLI - headless driver for the particle display core

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, sample, simulate};
use lumen_shapes::{Density, Shape};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Gesture-driven particle shapes, simulated headless", long_about = None)]
#[command(version)]
struct Cli {
    /// Extra config file layered above ~/.lumen and .lumen configs
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an input scenario and report per-second stats
    Simulate {
        /// Scenario TOML file (plays the built-in gesture tour if omitted)
        scenario: Option<String>,

        /// Override the configured particle count
        #[arg(short = 'n', long)]
        particles: Option<usize>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Sample a shape and print its target positions and colors
    Sample {
        /// planet, heart, star, torus, arrow_heart or text:<string>
        #[arg(value_parser = parse_shape)]
        shape: Shape,

        /// Number of points
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,

        /// Force a density variant instead of choosing by count
        #[arg(long, value_parser = parse_density)]
        density: Option<Density>,

        /// Sampler seed (defaults to the configured seed)
        #[arg(long)]
        seed: Option<u32>,

        /// Output format (json or csv)
        #[arg(long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the resolved configuration as TOML
    Config,
}

fn parse_shape(s: &str) -> Result<Shape, String> {
    s.parse()
}

fn parse_density(s: &str) -> Result<Density, String> {
    match s {
        "surface" => Ok(Density::Surface),
        "volume" => Ok(Density::Volume),
        _ => Err(format!(
            "unknown density '{}'; valid values: surface, volume",
            s
        )),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Simulate {
            scenario,
            particles,
            format,
        } => simulate::run(simulate::SimulateArgs {
            config: config_path,
            scenario,
            particles,
            format,
        }),
        Commands::Sample {
            shape,
            count,
            density,
            seed,
            format,
            output,
        } => sample::run(sample::SampleArgs {
            config: config_path,
            shape,
            count,
            density,
            seed,
            format,
            output,
        }),
        Commands::Config => config::run(config_path),
    }
}
