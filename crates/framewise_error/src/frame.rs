//! Frame sampling errors.

/// Failure conditions raised while turning a video into frame samples.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum FrameErrorKind {
    /// Source video is missing or unreadable
    #[display("Input unavailable: {}", _0)]
    InputUnavailable(String),
    /// Required decoding capability is absent
    #[display("Dependency missing: {}", _0)]
    DependencyMissing(String),
    /// The container could not be opened or a frame could not be decoded
    #[display("Decode failure: {}", _0)]
    DecodeFailure(String),
    /// Sampling interval must be a finite number of seconds above zero
    #[display("Invalid sampling interval: {}", _0)]
    InvalidInterval(String),
    /// Filesystem error while reading or writing frame artifacts
    #[display("I/O error: {}", _0)]
    Io(String),
}

/// Frame sampling error with location tracking.
///
/// # Examples
///
/// ```
/// use framewise_error::{FrameError, FrameErrorKind};
///
/// let err = FrameError::new(FrameErrorKind::DependencyMissing("ffmpeg".to_string()));
/// assert!(format!("{}", err).contains("ffmpeg"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Frame Error: {} at line {} in {}", kind, line, file)]
pub struct FrameError {
    /// The kind of error that occurred
    pub kind: FrameErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FrameError {
    /// Create a new frame error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FrameErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FrameErrorKind {
        &self.kind
    }
}
