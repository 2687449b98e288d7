//! Sampling from frame artifacts that are already on disk.

use async_trait::async_trait;
use framewise_core::{FrameSample, Timestamp};
use framewise_error::{FrameError, FrameErrorKind, FramewiseResult};
use framewise_interface::FrameSampler;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Lists `frame_<MM>m_<SS>s.jpg` artifacts in a directory, ordered by timestamp.
///
/// The video path and interval passed to [`FrameSampler::sample`] are not
/// used for decoding: the interval is still validated, and the video path
/// only appears in logs. Files that do not follow the naming convention are
/// ignored.
#[derive(Debug, Clone)]
pub struct DirectorySampler {
    dir: PathBuf,
}

impl DirectorySampler {
    /// Sample from the artifacts in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory being listed.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn list(&self) -> Result<Vec<(Timestamp, PathBuf)>, FrameError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            FrameError::new(FrameErrorKind::InputUnavailable(format!(
                "Frames directory not readable: {} ({})",
                self.dir.display(),
                e
            )))
        })?;

        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            FrameError::new(FrameErrorKind::Io(format!(
                "Failed to list {}: {}",
                self.dir.display(),
                e
            )))
        })? {
            let path = entry.path();
            let is_jpg = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("jpg"));
            if !is_jpg {
                continue;
            }
            match Timestamp::parse_frame_name(&path) {
                Some(ts) => found.push((ts, path)),
                None => debug!(path = %path.display(), "Skipping file without frame timestamp"),
            }
        }

        found.sort();
        Ok(found)
    }
}

#[async_trait]
impl FrameSampler for DirectorySampler {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn sample(&self, video: &Path, interval_seconds: f64) -> FramewiseResult<Vec<FrameSample>> {
        crate::validate_interval(interval_seconds)?;

        let found = self.list().await?;
        if found.is_empty() {
            return Err(FrameError::new(FrameErrorKind::InputUnavailable(format!(
                "No frame_<MM>m_<SS>s.jpg artifacts in {}",
                self.dir.display()
            )))
            .into());
        }

        let frames: Vec<FrameSample> = found
            .into_iter()
            .enumerate()
            .map(|(index, (timestamp, path))| FrameSample::new(index, path, timestamp))
            .collect();

        info!(frames = frames.len(), "Loaded pre-extracted frames");
        Ok(frames)
    }
}
