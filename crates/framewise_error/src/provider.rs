//! Inference provider errors and retry classification.

/// Whether a failure is worth another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Disposition {
    /// Transient failure; the retry loop may try again after a backoff
    Retryable,
    /// Terminal failure; surfaced to the caller without retry
    Fatal,
}

/// Inference provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Provider throttled the request
    #[display("Rate limited: {}", _0)]
    RateLimited(String),
    /// Credential was rejected
    #[display("Authentication failure: {}", _0)]
    AuthenticationFailure(String),
    /// Provider rejected the request shape
    #[display("Malformed request: {}", _0)]
    MalformedRequest(String),
    /// Any other non-success response
    #[display("Provider error (status {:?}): {}", status, message)]
    Unknown {
        /// HTTP status code, when one was received
        status: Option<u16>,
        /// Error message
        message: String,
    },
    /// Request never reached the provider or the connection dropped
    #[display("Transport error: {}", _0)]
    Transport(String),
    /// Provider answered without any narration text
    #[display("Provider returned no text")]
    EmptyResponse,
    /// Every attempt in the retry budget failed with a retryable error
    #[display("Gave up after {} attempts: {}", attempts, last)]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Message of the final failure
        last: String,
    },
    /// The run was cancelled while waiting on the provider
    #[display("Request cancelled")]
    Cancelled,
}

impl ProviderErrorKind {
    /// Classify this failure for the retry loop.
    ///
    /// Only provider throttling is transient; everything else fails the run.
    pub fn disposition(&self) -> Disposition {
        match self {
            ProviderErrorKind::RateLimited(_) => Disposition::Retryable,
            _ => Disposition::Fatal,
        }
    }

    /// Short label used for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderErrorKind::RateLimited(_) => "rate_limit",
            ProviderErrorKind::AuthenticationFailure(_) => "auth",
            ProviderErrorKind::MalformedRequest(_) => "invalid_request",
            ProviderErrorKind::Unknown { .. } => "unknown",
            ProviderErrorKind::Transport(_) => "network",
            ProviderErrorKind::EmptyResponse => "empty_response",
            ProviderErrorKind::RetriesExhausted { .. } => "retries_exhausted",
            ProviderErrorKind::Cancelled => "cancelled",
        }
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use framewise_error::{Disposition, ProviderError, ProviderErrorKind, RetryableError};
///
/// let err = ProviderError::new(ProviderErrorKind::RateLimited("slow down".to_string()));
/// assert_eq!(err.disposition(), Disposition::Retryable);
///
/// let err = ProviderError::new(ProviderErrorKind::AuthenticationFailure("bad key".to_string()));
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ProviderErrorKind {
        &self.kind
    }
}

/// Result type for a single provider interaction.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Trait for errors that carry a retry classification.
///
/// The retry loop never inspects concrete error types; it asks for a
/// [`Disposition`] and acts on that alone.
pub trait RetryableError {
    /// Map this failure to `Retryable` or `Fatal`.
    fn disposition(&self) -> Disposition;

    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool {
        self.disposition() == Disposition::Retryable
    }
}

impl RetryableError for ProviderError {
    fn disposition(&self) -> Disposition {
        self.kind.disposition()
    }
}
