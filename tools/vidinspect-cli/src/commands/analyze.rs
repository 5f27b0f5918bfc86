//! Run a stall inspection on one video.

use std::path::PathBuf;

use vidinspect_common::clock::SystemClock;
use vidinspect_common::config::AppConfig;
use vidinspect_model::config::{AnalysisConfig, AnalysisTemplate};
use vidinspect_model::report::{AnalysisReport, Summary};
use vidinspect_model::zone::Zone;
use vidinspect_motion::run_inspection_with_observer;

pub struct AnalyzeArgs {
    pub input: PathBuf,
    pub threshold: Option<u32>,
    pub no_track_movement: bool,
    pub full_analysis: bool,
    pub zone: Option<Zone>,
    pub no_zone_overlay: bool,
    pub template: AnalysisTemplate,
    pub sequence_fps: f64,
    pub frames_dir: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// Layer command-line flags over the configured defaults.
    fn analysis_config(&self, app: &AppConfig) -> AnalysisConfig {
        let mut config = AnalysisConfig::from_defaults(&app.analysis);
        if let Some(threshold) = self.threshold {
            config.movement_threshold = threshold;
        }
        config.track_movement &= !self.no_track_movement;
        config.full_analysis |= self.full_analysis;
        config.zone_overlay &= !self.no_zone_overlay;
        config.template = self.template;
        if let Some(zone) = self.zone {
            config = config.with_zone(zone);
        }
        config
    }
}

pub fn run(app: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = args.analysis_config(app);
    println!("Analyzing: {}", args.input.display());

    let source = super::open_source(app, &args.input, args.sequence_fps)?;

    if let Some(ref dir) = args.frames_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", dir.display()))?;
    }

    let mut saved_frames = 0usize;
    let run = run_inspection_with_observer(source, &config, &SystemClock, |frame, outcome| {
        if let Some(outcome) = outcome {
            tracing::debug!(index = outcome.frame_index, score = outcome.score, "Interval scored");
        }
        let Some(ref dir) = args.frames_dir else {
            return;
        };
        let path = dir.join(format!("frame_{:06}.png", frame.index));
        match frame.display_frame().save(&path) {
            Ok(()) => saved_frames += 1,
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to save frame"),
        }
    })
    .map_err(|e| anyhow::anyhow!("Analysis failed: {e}"))?;

    if let Some(ref err) = run.stopped_by {
        println!("  Warning: analysis stopped early: {err}");
        println!("  Results below cover the frames read before the failure.");
    }

    print_report(&run.report);

    if let Some(ref dir) = args.frames_dir {
        println!("\n  Saved {saved_frames} frames to: {}", dir.display());
    }

    if let Some(ref path) = args.report {
        std::fs::write(path, run.report.to_json_pretty()?)
            .map_err(|e| anyhow::anyhow!("Failed to write report: {e}"))?;
        println!("  Report saved to: {}", path.display());
    }

    println!("\nAnalysis complete.");
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!(
        "  Sampled {} frames, {} intervals",
        report.sampled_frames,
        report.timeline.len()
    );
    if let Some(max) = report.timeline.max_score() {
        println!(
            "  Motion score: mean {:.1}, max {max}",
            report.timeline.mean_score()
        );
    }
    println!();

    println!("Event log:");
    if report.events.is_empty() {
        println!("  (none)");
    }
    for event in &report.events {
        println!("  {event}");
    }
    println!();

    match &report.summary {
        Summary::EventDriven { recommendations } => {
            println!("Recommendations:");
            for rec in recommendations {
                println!("  {}", rec.description);
                println!("    {}", rec.advice);
            }
        }
        Summary::ActivityOverview {
            average_score,
            level,
            message,
        } => {
            println!("Activity overview:");
            println!("  Average motion score: {average_score:.1} ({level})");
            println!("  {message}");
        }
        Summary::NoEvents => {
            println!("No movement stalls detected.");
        }
    }
}
