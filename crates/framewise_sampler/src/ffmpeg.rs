//! Video sampling through the ffmpeg command line tools.

use crate::schedule::{sample_instants, validate_interval};
use async_trait::async_trait;
use framewise_core::FrameSample;
use framewise_error::{FrameError, FrameErrorKind, FramewiseResult};
use framewise_interface::FrameSampler;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Samples frames by invoking `ffprobe` for the duration and `ffmpeg` once
/// per sampled instant.
///
/// Construct with [`FfmpegSampler::detect`], which confirms both executables
/// run before any video is touched.
#[derive(Debug, Clone)]
pub struct FfmpegSampler {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
    output_dir: PathBuf,
}

impl FfmpegSampler {
    /// Find `ffmpeg` and `ffprobe` on `PATH` and write frames to `output_dir`.
    ///
    /// # Errors
    ///
    /// `DependencyMissing` if either executable cannot be run.
    pub async fn detect(output_dir: impl Into<PathBuf>) -> Result<Self, FrameError> {
        Self::detect_with("ffmpeg", "ffprobe", output_dir).await
    }

    /// Like [`FfmpegSampler::detect`], with explicit executable locations.
    #[instrument(skip_all)]
    pub async fn detect_with(
        ffmpeg: impl Into<PathBuf>,
        ffprobe: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, FrameError> {
        let sampler = Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            output_dir: output_dir.into(),
        };
        check_version(&sampler.ffmpeg).await?;
        check_version(&sampler.ffprobe).await?;
        info!(
            ffmpeg = %sampler.ffmpeg.display(),
            ffprobe = %sampler.ffprobe.display(),
            "Video decoding available"
        );
        Ok(sampler)
    }

    /// Directory frame artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Container duration in seconds.
    ///
    /// # Errors
    ///
    /// `DecodeFailure` if `ffprobe` fails or reports no usable duration.
    #[instrument(skip(self))]
    pub async fn probe_duration(&self, video: &Path) -> Result<f64, FrameError> {
        let output = Command::new(&self.ffprobe)
            .args(["-v", "error", "-show_entries", "format=duration"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(video)
            .output()
            .await
            .map_err(|e| {
                FrameError::new(FrameErrorKind::DecodeFailure(format!(
                    "Failed to run {}: {}",
                    self.ffprobe.display(),
                    e
                )))
            })?;

        if !output.status.success() {
            return Err(FrameError::new(FrameErrorKind::DecodeFailure(format!(
                "Failed to open video {}: {}",
                video.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            ))));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let duration = stdout
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| {
                FrameError::new(FrameErrorKind::DecodeFailure(format!(
                    "No duration reported for {}: '{}'",
                    video.display(),
                    stdout.trim()
                )))
            })?;

        debug!(duration, "Probed video duration");
        Ok(duration)
    }

    /// Write the frame at `seconds` to `dest`.
    ///
    /// Returns `false` when the decoder produced no image, which happens when
    /// the position lies past the last decodable frame.
    async fn extract_frame(&self, video: &Path, seconds: f64, dest: &Path) -> Result<bool, FrameError> {
        // Stale artifact from an earlier run would mask an empty decode.
        tokio::fs::remove_file(dest).await.ok();

        let output = Command::new(&self.ffmpeg)
            .args(["-hide_banner", "-loglevel", "error", "-y"])
            .arg("-ss")
            .arg(format!("{:.3}", seconds))
            .arg("-i")
            .arg(video)
            .args(["-frames:v", "1", "-q:v", "2"])
            .arg(dest)
            .output()
            .await
            .map_err(|e| {
                FrameError::new(FrameErrorKind::DecodeFailure(format!(
                    "Failed to run {}: {}",
                    self.ffmpeg.display(),
                    e
                )))
            })?;

        if !output.status.success() {
            return Err(FrameError::new(FrameErrorKind::DecodeFailure(format!(
                "Failed to decode frame at {:.3}s: {}",
                seconds,
                String::from_utf8_lossy(&output.stderr).trim()
            ))));
        }

        Ok(tokio::fs::try_exists(dest).await.unwrap_or(false))
    }
}

#[async_trait]
impl FrameSampler for FfmpegSampler {
    #[instrument(skip(self), fields(output_dir = %self.output_dir.display()))]
    async fn sample(&self, video: &Path, interval_seconds: f64) -> FramewiseResult<Vec<FrameSample>> {
        let metadata = tokio::fs::metadata(video).await.map_err(|e| {
            FrameError::new(FrameErrorKind::InputUnavailable(format!(
                "Video not found: {} ({})",
                video.display(),
                e
            )))
        })?;
        if !metadata.is_file() {
            return Err(FrameError::new(FrameErrorKind::InputUnavailable(format!(
                "Not a file: {}",
                video.display()
            )))
            .into());
        }
        validate_interval(interval_seconds)?;

        let duration = self.probe_duration(video).await?;
        let instants = sample_instants(duration, interval_seconds)?;

        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            FrameError::new(FrameErrorKind::Io(format!(
                "Failed to create {}: {}",
                self.output_dir.display(),
                e
            )))
        })?;

        let mut frames = Vec::with_capacity(instants.len());
        for instant in instants {
            let dest = self.output_dir.join(instant.timestamp.frame_file_name());
            if !self.extract_frame(video, instant.seconds, &dest).await? {
                debug!(seconds = instant.seconds, "No frame decoded, stopping");
                break;
            }
            debug!(index = frames.len(), timestamp = %instant.timestamp, path = %dest.display(), "Extracted frame");
            frames.push(FrameSample::new(frames.len(), dest, instant.timestamp));
        }

        info!(frames = frames.len(), duration, "Sampled video");
        Ok(frames)
    }
}

async fn check_version(program: &Path) -> Result<(), FrameError> {
    let missing = |detail: String| {
        FrameError::new(FrameErrorKind::DependencyMissing(format!(
            "{} is required for frame extraction ({})",
            display_name(program),
            detail
        )))
    };

    let status = Command::new(program)
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await
        .map_err(|e| missing(e.to_string()))?;

    if !status.success() {
        return Err(missing(format!("`-version` exited with {}", status)));
    }
    Ok(())
}

fn display_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or_else(|| OsStr::new("decoder"))
        .to_string_lossy()
        .into_owned()
}
