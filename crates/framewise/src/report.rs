//! JSON analysis reports.

use chrono::{DateTime, Local};
use framewise_core::{AnalysisResult, ResultSequence};
use framewise_error::{FramewiseResult, JsonError, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Task stem used in report names when no task file was given.
pub const DEFAULT_TASK_STEM: &str = "default_task";

/// Persisted outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AnalysisReport {
    /// Task description text, if a task file was used
    task: Option<String>,
    /// File name of the analysed video
    video: String,
    /// One record per frame, in order
    frames: Vec<AnalysisResult>,
}

impl AnalysisReport {
    /// Build a report from a completed run.
    pub fn new(task: Option<String>, video: &Path, results: ResultSequence) -> Self {
        let video = video
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| video.display().to_string());
        Self {
            task,
            video,
            frames: results.into_vec(),
        }
    }

    /// Pretty JSON for the frame records alone.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn frames_json(&self) -> Result<String, JsonError> {
        serde_json::to_string_pretty(&self.frames)
            .map_err(|e| JsonError::new(format!("Failed to serialize frames: {}", e)))
    }

    /// Write the report as pretty JSON to `<output_dir>/<file_name>`.
    ///
    /// The directory is created if needed. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the report
    /// cannot be serialized, or the file cannot be written.
    #[instrument(skip(self), fields(frames = self.frames.len()))]
    pub async fn write(&self, output_dir: &Path, file_name: &str) -> FramewiseResult<PathBuf> {
        tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                output_dir.display(),
                e
            )))
        })?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| JsonError::new(format!("Failed to serialize report: {}", e)))?;

        let path = output_dir.join(file_name);
        tokio::fs::write(&path, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        debug!(path = %path.display(), "Report written");
        Ok(path)
    }

    /// Read a report back from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid report.
    pub async fn read(path: &Path) -> FramewiseResult<Self> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        let report = serde_json::from_str(&text)
            .map_err(|e| JsonError::new(format!("Failed to parse report {}: {}", path.display(), e)))?;
        Ok(report)
    }
}

/// `analysis_<YYYYmmdd-HHMMSS>_<video-stem>_<task-stem>.json`
///
/// Stems are the file name up to its first dot. Without a task file the task
/// stem is `default_task`.
///
/// ```
/// use chrono::{Local, TimeZone};
/// use framewise::report_file_name;
/// use std::path::Path;
///
/// let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// let name = report_file_name(at, Path::new("clips/street.cam.mp4"), Some(Path::new("count_cars.txt")));
/// assert_eq!(name, "analysis_20240309-140507_street_count_cars.json");
/// ```
pub fn report_file_name(at: DateTime<Local>, video: &Path, task_file: Option<&Path>) -> String {
    let task = task_file
        .map(leading_stem)
        .unwrap_or_else(|| DEFAULT_TASK_STEM.to_string());
    format!(
        "analysis_{}_{}_{}.json",
        at.format("%Y%m%d-%H%M%S"),
        leading_stem(video),
        task
    )
}

fn leading_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}
