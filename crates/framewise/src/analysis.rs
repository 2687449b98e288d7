//! One complete analysis of a video, from sampling to a saved report.

use crate::{AnalysisReport, FramewiseConfig, TaskDescription, report_file_name};
use chrono::Local;
use framewise_chain::{ChainedAnalysisEngine, compose_system_prompt};
use framewise_error::{ConfigError, FramewiseResult};
use framewise_interface::{FrameSampler, VisionDriver};
use framewise_models::OpenAIVisionClient;
use framewise_retry::ResilientRequestExecutor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// The video to analyse and the task file that steers the narration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSource {
    video: PathBuf,
    task_file: Option<PathBuf>,
}

impl VideoSource {
    /// Create a source. `task_file` is resolved against `analysis.tasks_dir`.
    pub fn new(video: impl Into<PathBuf>, task_file: Option<PathBuf>) -> Self {
        Self {
            video: video.into(),
            task_file,
        }
    }

    /// Path to the video.
    pub fn video(&self) -> &Path {
        &self.video
    }

    /// Task file name, if any.
    pub fn task_file(&self) -> Option<&Path> {
        self.task_file.as_deref()
    }
}

/// A finished run and the file it was saved to.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct SavedReport {
    /// Report contents
    report: AnalysisReport,
    /// Location of the written JSON
    path: PathBuf,
}

/// Build the configured vision client.
///
/// # Errors
///
/// Returns an error if the API key variable is unset or blank.
pub fn vision_client(config: &FramewiseConfig) -> Result<OpenAIVisionClient, ConfigError> {
    let provider = config.provider();
    let api_key = provider.api_key()?;
    Ok(
        OpenAIVisionClient::with_api_key(api_key, provider.model().clone())
            .with_endpoint(provider.endpoint().clone()),
    )
}

/// Sample `source`, narrate every frame in order and save the report.
///
/// The task file is read before any frame is sampled. The report is written
/// only after every frame has been narrated, so a failed or cancelled run
/// leaves nothing in `analysis.output_dir`.
///
/// # Errors
///
/// - `Config` if the task file cannot be read
/// - any sampler, provider or analysis error from the run
/// - `Storage` or `Json` if the report cannot be written
#[instrument(
    skip_all,
    fields(
        video = %source.video().display(),
        provider = driver.provider_name(),
        model = %driver.model_name()
    )
)]
pub async fn analyze_video<D>(
    source: &VideoSource,
    driver: Arc<D>,
    sampler: &dyn FrameSampler,
    config: &FramewiseConfig,
    cancel: CancellationToken,
) -> FramewiseResult<SavedReport>
where
    D: VisionDriver + ?Sized,
{
    let analysis = config.analysis();

    let task = match source.task_file() {
        Some(file) => Some(TaskDescription::load(analysis.tasks_dir(), file).await?),
        None => None,
    };
    let system_prompt = compose_system_prompt(
        analysis.base_system_prompt(),
        task.as_ref().map(|t| t.text().as_str()),
    );

    let frames = sampler
        .sample(source.video(), *analysis.interval_seconds())
        .await?;
    info!(frames = frames.len(), "Frames ready for analysis");

    let executor = ResilientRequestExecutor::new(driver, config.retry().clone());
    let engine = ChainedAnalysisEngine::new(executor, *analysis.context_window())?
        .with_cancellation(cancel);
    let results = engine.run(&frames, system_prompt.as_deref()).await?;

    let report = AnalysisReport::new(task.map(|t| t.text().clone()), source.video(), results);
    let file_name = report_file_name(Local::now(), source.video(), source.task_file());
    let path = report.write(analysis.output_dir(), &file_name).await?;
    info!(path = %path.display(), "Report saved");

    Ok(SavedReport { report, path })
}
