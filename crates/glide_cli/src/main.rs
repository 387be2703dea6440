//! Glide CLI
//!
//! Replays scripted touch gestures against a headless document and
//! evaluates the momentum model.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use glide_layout::widgets::momentum;

mod scenario;

use scenario::Scenario;

#[derive(Parser)]
#[command(name = "glide")]
#[command(author, version, about = "Touch momentum scrolling, headless", long_about = None)]
struct Cli {
    /// Log state transitions and geometry
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a gesture scenario and print where the content ends up
    Replay {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project a glide from a drag distance and duration
    Momentum {
        /// Signed distance covered during the velocity window (px)
        #[arg(long, allow_negative_numbers = true)]
        distance: f32,

        /// Duration of the velocity window (ms)
        #[arg(long)]
        elapsed: f32,

        /// Travel limit for positive distances (px)
        #[arg(long)]
        upper: Option<f32>,

        /// Travel limit for negative distances (px)
        #[arg(long)]
        lower: Option<f32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Replay { scenario, json } => cmd_replay(&scenario, json),
        Commands::Momentum {
            distance,
            elapsed,
            upper,
            lower,
        } => {
            let result = momentum(
                distance,
                elapsed,
                upper.unwrap_or(f32::INFINITY),
                lower.unwrap_or(f32::INFINITY),
            );
            println!("distance: {}", result.distance);
            println!("time:     {}ms", result.time_ms);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "glide=debug" } else { "glide=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_replay(path: &std::path::Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    info!(
        "Replaying {} ({} steps)",
        path.display(),
        scenario.steps.len()
    );
    let report = scenario.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("offset:     {:?}", report.offset);
    println!("rendered:   {:?}", report.rendered);
    println!("max offset: {:?}", report.max_offset);
    println!("state:      {}", report.state);
    println!("clicks:     {}", report.clicks);
    println!("animating:  {}", report.animating);
    for track in &report.tracks {
        println!(
            "{} track: extent {} thumb {} max {} at {}{}",
            track.axis,
            track.track_extent,
            track.thumb_extent,
            track.max_thumb_offset,
            track.position,
            if track.visible { " (visible)" } else { "" }
        );
    }
    Ok(())
}
