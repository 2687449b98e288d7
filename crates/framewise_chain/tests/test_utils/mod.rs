//! Test doubles for chained analysis tests.

use async_trait::async_trait;
use framewise_core::{FrameSample, InferenceRequest, Timestamp};
use framewise_error::{ProviderError, ProviderErrorKind, ProviderResult};
use framewise_interface::VisionDriver;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Records every request and answers "Narration <n>" for the n-th call,
/// unless a scripted failure is queued for that call.
#[derive(Default)]
pub struct RecordingDriver {
    requests: Mutex<Vec<InferenceRequest>>,
    failures: Mutex<VecDeque<(usize, ProviderErrorKind)>>,
    cancel_after: Mutex<Option<(usize, CancellationToken)>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail call number `call` (counted from 0) with `kind`.
    pub fn fail_on(self, call: usize, kind: ProviderErrorKind) -> Self {
        self.failures.lock().unwrap().push_back((call, kind));
        self
    }

    /// Cancel `token` once `calls` calls have completed.
    pub fn cancel_after(self, calls: usize, token: CancellationToken) -> Self {
        *self.cancel_after.lock().unwrap() = Some((calls, token));
        self
    }

    pub fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn context_texts(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.context_text().clone())
            .collect()
    }
}

#[async_trait]
impl VisionDriver for RecordingDriver {
    async fn describe(&self, request: &InferenceRequest) -> ProviderResult<String> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        let result = {
            let mut failures = self.failures.lock().unwrap();
            match failures.iter().position(|(n, _)| *n == call) {
                Some(pos) => {
                    let (_, kind) = failures.remove(pos).unwrap();
                    Err(ProviderError::new(kind))
                }
                None => Ok(format!("Narration {}", call)),
            }
        };

        if let Some((calls, token)) = self.cancel_after.lock().unwrap().as_ref() {
            if call + 1 >= *calls {
                token.cancel();
            }
        }

        result
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }

    fn model_name(&self) -> &str {
        "recording-vision"
    }
}

/// Write `count` fake JPEG artifacts two seconds apart and return their samples.
pub fn write_frames(dir: &Path, count: usize) -> Vec<FrameSample> {
    (0..count)
        .map(|i| {
            let timestamp = Timestamp::from_seconds(i as f64 * 2.0);
            let path = dir.join(timestamp.frame_file_name());
            std::fs::write(&path, [0xFF, 0xD8, 0xFF, i as u8]).unwrap();
            FrameSample::new(i, path, timestamp)
        })
        .collect()
}

/// Lines of a context text that carry a prior narration.
pub fn frame_lines(context_text: &str) -> Vec<&str> {
    context_text
        .lines()
        .filter(|l| l.starts_with("Frame "))
        .collect()
}
