//! Analysis command handler.

use super::{Cli, render_json, render_text};
use framewise::{
    DirectorySampler, FfmpegSampler, FrameSampler, FramewiseConfig, FramewiseResult,
    VideoSource, analyze_video, vision_client,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Sample, narrate, persist and print one video.
///
/// Credentials and decoder availability are checked before the task file is
/// read and before the first frame is sampled.
#[instrument(skip_all, fields(video = %cli.video.display()))]
pub async fn run_analysis(
    cli: &Cli,
    config: &FramewiseConfig,
    cancel: CancellationToken,
) -> FramewiseResult<()> {
    let client = Arc::new(vision_client(config)?);
    let sampler = frame_sampler(cli, config).await?;
    let source = VideoSource::new(&cli.video, cli.task.clone());

    let saved = analyze_video(&source, client, sampler.as_ref(), config, cancel).await?;
    println!("Analysis results saved to {}", saved.path().display());

    if cli.json {
        println!("{}", render_json(saved.report())?);
    } else {
        println!("{}", render_text(saved.report()));
    }

    Ok(())
}

async fn frame_sampler(
    cli: &Cli,
    config: &FramewiseConfig,
) -> FramewiseResult<Box<dyn FrameSampler>> {
    let frames_dir = config.analysis().frames_dir();
    if cli.from_frames {
        Ok(Box::new(DirectorySampler::new(frames_dir)))
    } else {
        Ok(Box::new(FfmpegSampler::detect(frames_dir).await?))
    }
}
