//! Top-level error wrapper types.

use crate::{
    AnalysisError, BuilderError, ConfigError, FrameError, JsonError, ProviderError, StorageError,
};

/// Every failure a framewise run can surface.
///
/// # Examples
///
/// ```
/// use framewise_error::{FramewiseError, JsonError};
///
/// let json_err = JsonError::new("unexpected end of input");
/// let err: FramewiseError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FramewiseErrorKind {
    /// Frame sampling error
    #[from(FrameError)]
    Frame(FrameError),
    /// Inference provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Chained analysis error
    #[from(AnalysisError)]
    Analysis(AnalysisError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Report storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// framewise error with kind discrimination.
///
/// # Examples
///
/// ```
/// use framewise_error::{ConfigError, FramewiseErrorKind, FramewiseResult};
///
/// fn might_fail() -> FramewiseResult<()> {
///     Err(ConfigError::new("context_window must be at least 1"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), FramewiseErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Framewise Error: {}", _0)]
pub struct FramewiseError(Box<FramewiseErrorKind>);

impl FramewiseError {
    /// Create a new error from a kind.
    pub fn new(kind: FramewiseErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FramewiseErrorKind {
        &self.0
    }

    /// The provider failure behind this error, if any.
    pub fn provider_kind(&self) -> Option<&crate::ProviderErrorKind> {
        match self.kind() {
            FramewiseErrorKind::Provider(e) => Some(&e.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to FramewiseErrorKind
impl<T> From<T> for FramewiseError
where
    T: Into<FramewiseErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for framewise operations.
pub type FramewiseResult<T> = std::result::Result<T, FramewiseError>;
