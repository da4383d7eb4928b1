//! Glide CLI
//!
//! Validate carousel configs and run carousels headlessly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use glide_carousel::CarouselConfig;

mod simulate;

use simulate::{Simulation, Window};

#[derive(Parser)]
#[command(name = "glide")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Glide carousel CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a carousel against a simulated clock and print its timeline
    Simulate {
        /// Carousel config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of slides
        #[arg(short, long, default_value = "3")]
        slides: usize,

        /// Total simulated time in milliseconds
        #[arg(short, long, default_value = "5000")]
        duration_ms: u64,

        /// Simulated frame length in milliseconds
        #[arg(long, default_value = "16")]
        step_ms: u64,

        /// How long the host takes to finish a slide transition
        #[arg(long, default_value = "600")]
        transition_ms: u64,

        /// Never report transition ends (exercises the fallback timer)
        #[arg(long)]
        no_transition_end: bool,

        /// Pointer over the carousel during FROM..TO milliseconds
        #[arg(long, value_parser = parse_window)]
        hover: Option<Window>,

        /// Carousel hidden during FROM..TO milliseconds
        #[arg(long, value_parser = parse_window)]
        hidden: Option<Window>,

        /// Disable wraparound regardless of config
        #[arg(long)]
        no_wrap: bool,
    },

    /// Validate a carousel config file
    Check {
        /// Config file
        path: PathBuf,
    },

    /// Print the default config as TOML
    Defaults,
}

fn parse_window(value: &str) -> std::result::Result<Window, String> {
    let (from, to) = value
        .split_once("..")
        .ok_or_else(|| format!("expected FROM..TO, got `{value}`"))?;
    let from = from
        .trim()
        .parse()
        .map_err(|e| format!("invalid start `{from}`: {e}"))?;
    let to = to
        .trim()
        .parse()
        .map_err(|e| format!("invalid end `{to}`: {e}"))?;
    if to < from {
        return Err(format!("window end {to} is before start {from}"));
    }
    Ok(Window { from, to })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            config,
            slides,
            duration_ms,
            step_ms,
            transition_ms,
            no_transition_end,
            hover,
            hidden,
            no_wrap,
        } => {
            let mut config = load_config(config.as_ref())?;
            if no_wrap {
                config.wrap = false;
            }
            let simulation = Simulation {
                config,
                slides,
                duration_ms,
                step_ms,
                transition_ms: (!no_transition_end).then_some(transition_ms),
                hover,
                hidden,
            };
            cmd_simulate(simulation)
        }

        Commands::Check { path } => cmd_check(&path),

        Commands::Defaults => cmd_defaults(),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<CarouselConfig> {
    match path {
        Some(path) => CarouselConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(CarouselConfig::default()),
    }
}

fn cmd_simulate(simulation: Simulation) -> Result<()> {
    if simulation.step_ms == 0 {
        anyhow::bail!("--step-ms must be greater than zero");
    }

    info!(
        "Simulating {} slides for {}ms",
        simulation.slides, simulation.duration_ms
    );

    let report = simulation.run();
    for line in &report.lines {
        println!("{line}");
    }
    info!(
        "{} selections, {} settled transitions, final slide {}",
        report.selections, report.settled, report.final_index
    );
    Ok(())
}

fn cmd_check(path: &PathBuf) -> Result<()> {
    let config = CarouselConfig::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;

    info!("{} is valid", path.display());
    match config.autoplay_interval() {
        Some(interval) => info!("Autoplay every {}ms", interval.as_millis()),
        None => info!("Autoplay disabled"),
    }
    Ok(())
}

fn cmd_defaults() -> Result<()> {
    let text = CarouselConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    print!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window() {
        assert_eq!(parse_window("100..250"), Ok(Window { from: 100, to: 250 }));
        assert!(parse_window("250..100").is_err());
        assert!(parse_window("100").is_err());
        assert!(parse_window("a..3").is_err());
    }

    #[test]
    fn test_cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "glide",
            "simulate",
            "--slides",
            "4",
            "--hover",
            "1000..2000",
            "--no-wrap",
        ])
        .unwrap();

        match cli.command {
            Commands::Simulate {
                slides,
                hover,
                no_wrap,
                ..
            } => {
                assert_eq!(slides, 4);
                assert_eq!(hover, Some(Window { from: 1000, to: 2000 }));
                assert!(no_wrap);
            }
            _ => panic!("expected simulate"),
        }
    }
}
