//! Tests for sampling pre-extracted frame directories.

use framewise_error::{FrameErrorKind, FramewiseErrorKind};
use framewise_interface::FrameSampler;
use framewise_sampler::DirectorySampler;
use std::path::Path;
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), [0xFF, 0xD8, 0xFF]).unwrap();
}

fn frame_kind(err: &framewise_error::FramewiseError) -> &FrameErrorKind {
    match err.kind() {
        FramewiseErrorKind::Frame(e) => e.kind(),
        other => panic!("expected frame error, got {}", other),
    }
}

#[tokio::test]
async fn test_frames_ordered_by_timestamp() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "frame_01m_00s.jpg");
    touch(dir.path(), "frame_00m_02s.jpg");
    touch(dir.path(), "frame_00m_00s.jpg");
    touch(dir.path(), "frame_00m_58s.jpg");

    let frames = DirectorySampler::new(dir.path())
        .sample(Path::new("video.mp4"), 2.0)
        .await
        .unwrap();

    let stamps: Vec<String> = frames.iter().map(|f| f.timestamp().to_string()).collect();
    assert_eq!(stamps, ["00:00", "00:02", "00:58", "01:00"]);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(*frame.index(), i);
    }
    assert!(frames[3].path().ends_with("frame_01m_00s.jpg"));
}

#[tokio::test]
async fn test_unrelated_files_ignored() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "frame_00m_04s.jpg");
    touch(dir.path(), "frame_00001.jpg");
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "frame_00m_06s.png");

    let frames = DirectorySampler::new(dir.path())
        .sample(Path::new("video.mp4"), 2.0)
        .await
        .unwrap();

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].timestamp().to_string(), "00:04");
}

#[tokio::test]
async fn test_missing_directory_is_input_unavailable() {
    let dir = TempDir::new().unwrap();
    let err = DirectorySampler::new(dir.path().join("absent"))
        .sample(Path::new("video.mp4"), 2.0)
        .await
        .unwrap_err();

    assert!(matches!(frame_kind(&err), FrameErrorKind::InputUnavailable(_)));
}

#[tokio::test]
async fn test_empty_directory_is_input_unavailable() {
    let dir = TempDir::new().unwrap();
    let err = DirectorySampler::new(dir.path())
        .sample(Path::new("video.mp4"), 2.0)
        .await
        .unwrap_err();

    assert!(matches!(frame_kind(&err), FrameErrorKind::InputUnavailable(_)));
}

#[tokio::test]
async fn test_invalid_interval_rejected() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "frame_00m_00s.jpg");

    let err = DirectorySampler::new(dir.path())
        .sample(Path::new("video.mp4"), 0.0)
        .await
        .unwrap_err();

    assert!(matches!(frame_kind(&err), FrameErrorKind::InvalidInterval(_)));
}
