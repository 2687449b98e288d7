//! Scripted vision driver for retry tests.

use async_trait::async_trait;
use framewise_core::{ImageData, InferenceRequest};
use framewise_error::{ProviderError, ProviderErrorKind, ProviderResult};
use framewise_interface::VisionDriver;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

/// Replays scripted outcomes, then repeats a fallback outcome forever.
pub struct ScriptedDriver {
    script: Mutex<VecDeque<ProviderResult<String>>>,
    fallback: ProviderResult<String>,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedDriver {
    pub fn new(script: Vec<ProviderResult<String>>, fallback: ProviderResult<String>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always(outcome: ProviderResult<String>) -> Self {
        Self::new(Vec::new(), outcome)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Time between consecutive calls.
    pub fn gaps(&self) -> Vec<std::time::Duration> {
        let calls = self.calls.lock().unwrap();
        calls.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

#[async_trait]
impl VisionDriver for ScriptedDriver {
    async fn describe(&self, _request: &InferenceRequest) -> ProviderResult<String> {
        self.calls.lock().unwrap().push(Instant::now());
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-vision"
    }
}

pub fn rate_limited() -> ProviderResult<String> {
    Err(ProviderError::new(ProviderErrorKind::RateLimited(
        "Too many requests".to_string(),
    )))
}

pub fn unauthorized() -> ProviderResult<String> {
    Err(ProviderError::new(ProviderErrorKind::AuthenticationFailure(
        "Incorrect API key provided".to_string(),
    )))
}

pub fn request() -> InferenceRequest {
    InferenceRequest::builder()
        .context_text("This is the first frame. Analyze it and describe what you observe:")
        .image(ImageData::new("image/jpeg", vec![0xFF, 0xD8, 0xFF]))
        .build()
        .unwrap()
}
