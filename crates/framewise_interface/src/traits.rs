//! Trait definitions for inference clients and frame samplers.

use async_trait::async_trait;
use framewise_core::{FrameSample, InferenceRequest};
use framewise_error::{FramewiseResult, ProviderResult};
use std::path::Path;
use std::sync::Arc;

/// Core trait that every vision inference backend implements.
///
/// One call is one attempt: implementations must not retry internally, and
/// must classify failures through [`framewise_error::ProviderErrorKind`] so
/// the retry loop can tell throttling from fatal errors.
#[async_trait]
pub trait VisionDriver: Send + Sync {
    /// Narrate the frame in `request`, returning the provider's text.
    async fn describe(&self, request: &InferenceRequest) -> ProviderResult<String>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: VisionDriver + ?Sized> VisionDriver for Arc<T> {
    async fn describe(&self, request: &InferenceRequest) -> ProviderResult<String> {
        (**self).describe(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Source of still frames sampled from a video.
///
/// The returned samples are finite, ordered by timestamp, and indexed from 0.
/// A run consumes them exactly once.
#[async_trait]
pub trait FrameSampler: Send + Sync {
    /// Sample `video` every `interval_seconds`.
    ///
    /// # Errors
    ///
    /// - `InputUnavailable` if `video` does not resolve to a readable file
    /// - `DependencyMissing` if decoding support is absent
    /// - `DecodeFailure` if the container cannot be opened
    async fn sample(&self, video: &Path, interval_seconds: f64) -> FramewiseResult<Vec<FrameSample>>;
}
