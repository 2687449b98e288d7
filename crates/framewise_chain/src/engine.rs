//! Sequential, context-chained analysis of sampled frames.

use crate::ContextWindowBuilder;
use framewise_core::{AnalysisResult, FrameSample, ImageData, InferenceRequest, ResultSequence};
use framewise_error::{
    AnalysisError, AnalysisErrorKind, BuilderError, FrameError, FrameErrorKind, FramewiseResult,
};
use framewise_interface::VisionDriver;
use framewise_retry::ResilientRequestExecutor;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Number of prior narrations sent with each request unless configured otherwise.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Narrates frames one at a time, each conditioned on the most recent prior
/// narrations.
///
/// For frame `i` the engine takes the last `min(K, i)` results, renders them
/// with the [`ContextWindowBuilder`], sends the request through the
/// [`ResilientRequestExecutor`] and appends the answer. Frames are never
/// processed concurrently: each request reads everything written before it.
///
/// Any failure aborts the run and the partial results are dropped.
pub struct ChainedAnalysisEngine<D: ?Sized> {
    executor: ResilientRequestExecutor<D>,
    context: ContextWindowBuilder,
    window_size: usize,
    cancel: Option<CancellationToken>,
}

impl<D: VisionDriver + ?Sized> ChainedAnalysisEngine<D> {
    /// Create an engine that sends up to `window_size` prior narrations per request.
    ///
    /// # Errors
    ///
    /// `InvalidWindowSize` if `window_size` is zero.
    pub fn new(executor: ResilientRequestExecutor<D>, window_size: usize) -> Result<Self, AnalysisError> {
        if window_size == 0 {
            return Err(AnalysisError::new(AnalysisErrorKind::InvalidWindowSize(
                window_size,
            )));
        }
        Ok(Self {
            executor,
            context: ContextWindowBuilder::default(),
            window_size,
            cancel: None,
        })
    }

    /// Use a custom context renderer.
    pub fn with_context_builder(mut self, context: ContextWindowBuilder) -> Self {
        self.context = context;
        self
    }

    /// Stop between frames, and inside retries, once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.executor = self.executor.with_cancellation(token.clone());
        self.cancel = Some(token);
        self
    }

    /// Maximum number of prior narrations per request.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// The request executor.
    pub fn executor(&self) -> &ResilientRequestExecutor<D> {
        &self.executor
    }

    /// Narrate `frames` in order.
    ///
    /// `frames[i]` must carry index `i`. On success the returned sequence has
    /// exactly one result per frame, in the same order.
    ///
    /// # Errors
    ///
    /// - `OutOfOrder` if a frame's index does not match its position
    /// - `Cancelled` if the cancellation token fires between frames
    /// - `InputUnavailable` or `Io` if a frame image cannot be read
    /// - any fatal provider error, including `RetriesExhausted`
    #[instrument(
        skip(self, frames, system_prompt),
        fields(
            frame_count = frames.len(),
            window_size = self.window_size,
            provider = self.executor.driver().provider_name(),
            model = %self.executor.driver().model_name()
        )
    )]
    pub async fn run(
        &self,
        frames: &[FrameSample],
        system_prompt: Option<&str>,
    ) -> FramewiseResult<ResultSequence> {
        info!("Starting chained analysis");

        let mut results = ResultSequence::with_capacity(frames.len());
        let mut expected: usize = 0;

        for frame in frames {
            if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                return Err(AnalysisError::new(AnalysisErrorKind::Cancelled(expected)).into());
            }
            if *frame.index() != expected {
                return Err(AnalysisError::new(AnalysisErrorKind::OutOfOrder {
                    expected,
                    found: *frame.index(),
                })
                .into());
            }

            info!(
                index = expected,
                total = frames.len(),
                timestamp = %frame.timestamp(),
                path = %frame.path().display(),
                "Analyzing frame"
            );

            let text = self.analyze_frame(frame, &results, system_prompt).await?;
            results.append(AnalysisResult::for_frame(frame, text))?;
            expected += 1;
        }

        info!(results = results.len(), "Chained analysis completed");
        Ok(results)
    }

    async fn analyze_frame(
        &self,
        frame: &FrameSample,
        results: &ResultSequence,
        system_prompt: Option<&str>,
    ) -> FramewiseResult<String> {
        let window = results.window(self.window_size);
        debug!(
            index = frame.index(),
            window_len = window.len(),
            window = ?window.indices(),
            "Rendering context window"
        );
        let (system_prompt, context_text) = self.context.build(&window, system_prompt).into_parts();

        let image = load_image(frame.as_path()).await?;
        let request = InferenceRequest::builder()
            .system_prompt(system_prompt)
            .context_text(context_text)
            .image(image)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        let text = self.executor.execute(&request).await?;
        debug!(index = frame.index(), chars = text.len(), "Frame narrated");
        Ok(text)
    }
}

async fn load_image(path: &Path) -> Result<ImageData, FrameError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        let kind = if e.kind() == std::io::ErrorKind::NotFound {
            FrameErrorKind::InputUnavailable(format!("Frame not found: {}", path.display()))
        } else {
            FrameErrorKind::Io(format!("Failed to read {}: {}", path.display(), e))
        };
        FrameError::new(kind)
    })?;
    Ok(ImageData::new(ImageData::mime_for_path(path), bytes))
}
