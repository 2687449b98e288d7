//! Tests for the ffmpeg-backed sampler.
//!
//! Capability and input checks use stand-in executables so they run without
//! ffmpeg installed. Decoding a real clip needs the `ffmpeg` feature.

use framewise_error::{FrameError, FrameErrorKind, FramewiseError, FramewiseErrorKind};
use framewise_interface::FrameSampler;
use framewise_sampler::FfmpegSampler;
use std::path::Path;
use tempfile::TempDir;

fn frame_kind(err: &FramewiseError) -> &FrameErrorKind {
    match err.kind() {
        FramewiseErrorKind::Frame(e) => e.kind(),
        other => panic!("expected frame error, got {}", other),
    }
}

fn assert_dependency_missing(err: &FrameError) {
    assert!(
        matches!(err.kind, FrameErrorKind::DependencyMissing(_)),
        "got {}",
        err
    );
}

#[tokio::test]
async fn test_detect_fails_without_executables() {
    let out = TempDir::new().unwrap();
    let err = FfmpegSampler::detect_with(
        "/nonexistent/ffmpeg",
        "/nonexistent/ffprobe",
        out.path(),
    )
    .await
    .unwrap_err();

    assert_dependency_missing(&err);
    assert!(err.to_string().contains("ffmpeg"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_detect_fails_when_version_check_fails() {
    let out = TempDir::new().unwrap();
    let err = FfmpegSampler::detect_with("true", "false", out.path())
        .await
        .unwrap_err();

    assert_dependency_missing(&err);
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_video_is_input_unavailable() {
    let out = TempDir::new().unwrap();
    let sampler = FfmpegSampler::detect_with("true", "true", out.path())
        .await
        .unwrap();

    let err = sampler
        .sample(&out.path().join("missing.mp4"), 2.0)
        .await
        .unwrap_err();

    assert!(matches!(frame_kind(&err), FrameErrorKind::InputUnavailable(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_directory_as_video_is_input_unavailable() {
    let out = TempDir::new().unwrap();
    let sampler = FfmpegSampler::detect_with("true", "true", out.path())
        .await
        .unwrap();

    let err = sampler.sample(out.path(), 2.0).await.unwrap_err();

    assert!(matches!(frame_kind(&err), FrameErrorKind::InputUnavailable(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_invalid_interval_checked_before_decoding() {
    let out = TempDir::new().unwrap();
    let video = out.path().join("clip.mp4");
    std::fs::write(&video, b"not a video").unwrap();
    let sampler = FfmpegSampler::detect_with("true", "true", out.path())
        .await
        .unwrap();

    let err = sampler.sample(&video, -2.0).await.unwrap_err();

    assert!(matches!(frame_kind(&err), FrameErrorKind::InvalidInterval(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unprobeable_video_is_decode_failure() {
    let out = TempDir::new().unwrap();
    let video = out.path().join("clip.mp4");
    std::fs::write(&video, b"not a video").unwrap();
    // `true` exits cleanly but prints no duration.
    let sampler = FfmpegSampler::detect_with("true", "true", out.path())
        .await
        .unwrap();

    let err = sampler.sample(&video, 2.0).await.unwrap_err();

    assert!(matches!(frame_kind(&err), FrameErrorKind::DecodeFailure(_)));
}

#[tokio::test]
#[cfg_attr(not(feature = "ffmpeg"), ignore)]
async fn test_samples_synthetic_clip() -> Result<(), Box<dyn std::error::Error>> {
    let work = TempDir::new()?;
    let video = work.path().join("testsrc.mp4");

    let status = std::process::Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-y"])
        .args(["-f", "lavfi", "-i", "testsrc=duration=5:size=64x64:rate=10"])
        .arg(&video)
        .status()?;
    assert!(status.success(), "ffmpeg could not render the test clip");

    let frames_dir = work.path().join("frames");
    let sampler = FfmpegSampler::detect(&frames_dir).await?;
    let frames = sampler.sample(&video, 2.0).await?;

    let stamps: Vec<String> = frames.iter().map(|f| f.timestamp().to_string()).collect();
    assert_eq!(stamps, ["00:00", "00:02", "00:04"]);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(*frame.index(), i);
        assert!(frame.path().starts_with(&frames_dir));
        assert!(frame.path().is_file());
    }

    Ok(())
}
