//! Narration results and the sequence that owns them.

use crate::{FrameSample, Timestamp};
use framewise_error::{AnalysisError, AnalysisErrorKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Narration produced for one frame.
///
/// Created once per frame, in index order, and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AnalysisResult {
    /// Index of the source frame
    index: usize,
    /// Artifact location of the source frame
    path: PathBuf,
    /// Timestamp of the source frame
    timestamp: Timestamp,
    /// Narration text returned by the provider
    text: String,
}

impl AnalysisResult {
    /// Create a result from its parts.
    pub fn new(
        index: usize,
        path: impl Into<PathBuf>,
        timestamp: Timestamp,
        text: impl Into<String>,
    ) -> Self {
        Self {
            index,
            path: path.into(),
            timestamp,
            text: text.into(),
        }
    }

    /// Attach narration text to the frame it describes.
    pub fn for_frame(frame: &FrameSample, text: impl Into<String>) -> Self {
        Self::new(
            *frame.index(),
            frame.path().clone(),
            *frame.timestamp(),
            text,
        )
    }
}

/// Append-only, chronologically ordered collection of results.
///
/// Invariant: `sequence[i].index == i` for every `i`. The only mutation is
/// [`ResultSequence::append`], which rejects anything else.
///
/// # Examples
///
/// ```
/// use framewise_core::{AnalysisResult, ResultSequence, Timestamp};
///
/// let mut sequence = ResultSequence::new();
/// sequence
///     .append(AnalysisResult::new(0, "f0.jpg", Timestamp::default(), "a kitchen"))
///     .unwrap();
///
/// // Index 2 would skip index 1.
/// let gap = AnalysisResult::new(2, "f2.jpg", Timestamp::default(), "a dog");
/// assert!(sequence.append(gap).is_err());
/// assert_eq!(sequence.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSequence {
    results: Vec<AnalysisResult>,
}

impl ResultSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sequence with room for `capacity` results.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
        }
    }

    /// Append the next result.
    ///
    /// # Errors
    ///
    /// Returns `OutOfOrder` if the result's index is not the current length.
    pub fn append(&mut self, result: AnalysisResult) -> Result<(), AnalysisError> {
        let expected = self.results.len();
        if result.index != expected {
            return Err(AnalysisError::new(AnalysisErrorKind::OutOfOrder {
                expected,
                found: result.index,
            }));
        }
        self.results.push(result);
        Ok(())
    }

    /// The most recent `min(size, len)` results, oldest first.
    pub fn window(&self, size: usize) -> ContextWindow<'_> {
        let start = self.results.len().saturating_sub(size);
        ContextWindow::new(&self.results[start..])
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no result has been produced yet.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Read-only view of every result.
    pub fn as_slice(&self) -> &[AnalysisResult] {
        &self.results
    }

    /// Iterate results in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisResult> {
        self.results.iter()
    }

    /// Give up ownership of the results.
    pub fn into_vec(self) -> Vec<AnalysisResult> {
        self.results
    }
}

impl<'a> IntoIterator for &'a ResultSequence {
    type Item = &'a AnalysisResult;
    type IntoIter = std::slice::Iter<'a, AnalysisResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl IntoIterator for ResultSequence {
    type Item = AnalysisResult;
    type IntoIter = std::vec::IntoIter<AnalysisResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Bounded, read-only view of the latest results.
///
/// Recomputed for every request and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow<'a> {
    entries: &'a [AnalysisResult],
}

impl<'a> ContextWindow<'a> {
    /// View an ordered slice of results as a context window.
    pub fn new(entries: &'a [AnalysisResult]) -> Self {
        Self { entries }
    }

    /// Results in the window, oldest first.
    pub fn entries(&self) -> &'a [AnalysisResult] {
        self.entries
    }

    /// Number of results in the window.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window holds no results.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate results oldest first.
    pub fn iter(&self) -> std::slice::Iter<'a, AnalysisResult> {
        self.entries.iter()
    }

    /// Frame indices covered by the window.
    pub fn indices(&self) -> Vec<usize> {
        self.entries.iter().map(|r| r.index).collect()
    }
}
