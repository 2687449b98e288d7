//! CLI argument definitions.

use clap::Parser;
use framewise::ConfigOverrides;
use std::path::PathBuf;

/// framewise - chained video frame narration using vision models
#[derive(Parser, Debug)]
#[command(name = "framewise")]
#[command(about = "Chained video frame analyzer using vision-capable models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the video file
    #[arg(long)]
    pub video: PathBuf,

    /// Interval between sampled frames in seconds
    #[arg(long)]
    pub interval: Option<f64>,

    /// Vision-capable model name
    #[arg(long)]
    pub model: Option<String>,

    /// System prompt sent with every frame
    #[arg(long)]
    pub system_prompt: Option<String>,

    /// Task description file, relative to the tasks directory
    #[arg(long)]
    pub task: Option<PathBuf>,

    /// Print frame records as JSON instead of a text summary
    #[arg(long)]
    pub json: bool,

    /// Number of prior narrations sent with each frame
    #[arg(long)]
    pub context_window: Option<usize>,

    /// Attempts per frame before giving up on rate limiting
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Directory extracted frames are written to
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// Use frames already in the frames directory instead of decoding the video
    #[arg(long)]
    pub from_frames: bool,

    /// Directory reports are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Flags that replace configured values.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            interval_seconds: self.interval,
            context_window: self.context_window,
            system_prompt: self.system_prompt.clone(),
            frames_dir: self.frames_dir.clone(),
            output_dir: self.output_dir.clone(),
            model: self.model.clone(),
            max_attempts: self.max_attempts,
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
