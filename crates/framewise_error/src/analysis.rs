//! Chained analysis errors.

/// Specific error conditions for the chained analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AnalysisErrorKind {
    /// A frame or result arrived with an index other than the next expected one
    #[display("Frame out of order: expected index {}, found {}", expected, found)]
    OutOfOrder {
        /// Index the sequence expected next
        expected: usize,
        /// Index that was supplied
        found: usize,
    },
    /// Context window size must be at least one
    #[display("Context window size must be at least 1, got {}", _0)]
    InvalidWindowSize(usize),
    /// The run was cancelled between frames
    #[display("Analysis cancelled before frame {}", _0)]
    Cancelled(usize),
}

/// Analysis error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Analysis Error: {} at line {} in {}", kind, line, file)]
pub struct AnalysisError {
    /// The kind of error that occurred
    pub kind: AnalysisErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AnalysisError {
    /// Create a new analysis error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AnalysisErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AnalysisErrorKind {
        &self.kind
    }
}
