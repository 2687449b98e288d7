//! Metrics for vision inference calls.
//!
//! Provides OpenTelemetry-based metrics for tracking provider latency,
//! failures by class, and token usage. Instruments are created on the global
//! meter, so nothing is exported unless the binary installs a meter provider.

use framewise_error::ProviderErrorKind;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for vision inference calls.
///
/// Labeled with provider (e.g. "openai") and model name.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total inference requests that returned narration
    pub requests: Counter<u64>,
    /// Failed inference requests
    pub errors: Counter<u64>,
    /// Inference call duration in seconds
    pub duration: Histogram<f64>,
    /// Total tokens used (prompt + completion)
    pub tokens_used: Counter<u64>,
    /// Prompt tokens used
    pub prompt_tokens: Counter<u64>,
    /// Completion tokens used
    pub completion_tokens: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("framewise_vision");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("vision.requests")
                .with_description("Total vision inference requests")
                .build(),
            errors: meter
                .u64_counter("vision.errors")
                .with_description("Failed vision inference requests")
                .build(),
            duration: meter
                .f64_histogram("vision.duration")
                .with_unit("seconds")
                .with_description("Vision inference call duration")
                .build(),
            tokens_used: meter
                .u64_counter("vision.tokens")
                .with_description("Total tokens used (prompt + completion)")
                .build(),
            prompt_tokens: meter
                .u64_counter("vision.tokens.prompt")
                .with_description("Prompt tokens used")
                .build(),
            completion_tokens: meter
                .u64_counter("vision.tokens.completion")
                .with_description("Completion tokens used")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful inference request.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed inference request, labeled by failure class.
    pub fn record_error(&self, provider: &str, model: &str, kind: &ProviderErrorKind) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", kind.label()),
        ];
        self.errors.add(1, labels);
    }

    /// Record token usage reported by the provider.
    pub fn record_tokens(
        &self,
        model: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
        total_tokens: u64,
    ) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.tokens_used.add(total_tokens, labels);
        self.prompt_tokens.add(prompt_tokens, labels);
        self.completion_tokens.add(completion_tokens, labels);
    }
}

impl Default for LlmMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}
