//! Frame samples produced by a sampler.

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One still image taken from a video.
///
/// Samples are produced in order by a sampler and consumed once by the
/// analysis engine. The index is carried explicitly rather than inferred from
/// position so that ordering can be checked.
///
/// # Examples
///
/// ```
/// use framewise_core::FrameSample;
///
/// let frame = FrameSample::from_path(2, "frames/frame_00m_04s.jpg");
/// assert_eq!(*frame.index(), 2);
/// assert_eq!(frame.timestamp().to_string(), "00:04");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FrameSample {
    /// Position of this frame in the sampled sequence, starting at 0
    index: usize,
    /// Location of the image artifact
    path: PathBuf,
    /// Where in the video the frame was taken
    timestamp: Timestamp,
}

impl FrameSample {
    /// Create a frame sample.
    pub fn new(index: usize, path: impl Into<PathBuf>, timestamp: Timestamp) -> Self {
        Self {
            index,
            path: path.into(),
            timestamp,
        }
    }

    /// Create a frame sample, deriving the timestamp from the artifact name.
    pub fn from_path(index: usize, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let timestamp = Timestamp::from_frame_path(&path);
        Self::new(index, path, timestamp)
    }

    /// Borrow the artifact location as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}
