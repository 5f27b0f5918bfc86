//! VidInspect CLI: movement stall detection for recorded process videos.
//!
//! Usage:
//!   vidinspect analyze <INPUT>   Sample a video and report movement stalls
//!   vidinspect probe <INPUT>     Show video metadata and the sampling plan

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vidinspect_common::config::AppConfig;
use vidinspect_model::config::AnalysisTemplate;
use vidinspect_model::zone::Zone;

mod commands;

#[derive(Parser)]
#[command(
    name = "vidinspect",
    about = "Detect movement stalls in process videos",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a video once per second and report movement stalls
    Analyze {
        /// Video file, or a directory of frame images
        input: PathBuf,

        /// Movement sensitivity in [10, 100]; stall below threshold x 100 changed pixels
        #[arg(long)]
        threshold: Option<u32>,

        /// Record the motion timeline only, without stall events
        #[arg(long)]
        no_track_movement: bool,

        /// Print an activity overview when no stalls were found
        #[arg(long)]
        full_analysis: bool,

        /// Restrict measurement to a zone: x1,y1,x2,y2
        #[arg(long)]
        zone: Option<Zone>,

        /// Do not outline the zone on saved frames
        #[arg(long)]
        no_zone_overlay: bool,

        /// Template for advice text: default|stop-control|assembly-analysis|rotation-detection
        #[arg(long, default_value = "default")]
        template: AnalysisTemplate,

        /// Frame rate of an image-sequence input
        #[arg(long, default_value = "30.0")]
        sequence_fps: f64,

        /// Save each sampled frame (with zone outline and stall badge) to this directory
        #[arg(long)]
        frames_dir: Option<PathBuf>,

        /// Write the JSON report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show video metadata and the sampling plan
    Probe {
        /// Video file, or a directory of frame images
        input: PathBuf,

        /// Frame rate of an image-sequence input
        #[arg(long, default_value = "30.0")]
        sequence_fps: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if cli.json_logs {
        logging.json = true;
    }
    vidinspect_common::logging::init_logging(&logging)?;

    match cli.command {
        Commands::Analyze {
            input,
            threshold,
            no_track_movement,
            full_analysis,
            zone,
            no_zone_overlay,
            template,
            sequence_fps,
            frames_dir,
            report,
        } => commands::analyze::run(
            &config,
            commands::analyze::AnalyzeArgs {
                input,
                threshold,
                no_track_movement,
                full_analysis,
                zone,
                no_zone_overlay,
                template,
                sequence_fps,
                frames_dir,
                report,
            },
        ),
        Commands::Probe {
            input,
            sequence_fps,
        } => commands::probe::run(&config, input, sequence_fps),
    }
}
