//! framewise - chained narration of what changes across video frames.
//!
//! framewise samples still frames from a video at a fixed interval and asks a
//! vision model to describe each one, passing along the narrations of the
//! most recent frames so every answer reads as a change log against what came
//! before.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use framewise::{
//!     ChainedAnalysisEngine, FfmpegSampler, FrameSampler, OpenAIVisionClient,
//!     ResilientRequestExecutor, RetryPolicy,
//! };
//! use std::{path::Path, sync::Arc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sampler = FfmpegSampler::detect("frames").await?;
//!     let frames = sampler.sample(Path::new("clip.mp4"), 2.0).await?;
//!
//!     let client = Arc::new(OpenAIVisionClient::new("gpt-4o-mini")?);
//!     let executor = ResilientRequestExecutor::new(client, RetryPolicy::default());
//!     let engine = ChainedAnalysisEngine::new(executor, 5)?;
//!
//!     for result in engine.run(&frames, None).await?.iter() {
//!         println!("[{}] {}", result.timestamp(), result.text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry stdout exporters for traces and metrics
//! - `api` - run tests that call the real provider
//!
//! # Architecture
//!
//! - `framewise_error` - Error types
//! - `framewise_core` - Frames, requests, results and the context window
//! - `framewise_interface` - `VisionDriver` and `FrameSampler` traits
//! - `framewise_retry` - Retry policy and resilient request execution
//! - `framewise_models` - OpenAI-compatible vision client and metrics
//! - `framewise_sampler` - ffmpeg and directory frame samplers
//! - `framewise_chain` - Context rendering and the chained analysis engine
//!
//! This crate re-exports everything and adds configuration, reports, and the
//! `framewise` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod config;
mod report;
mod task;

#[cfg(feature = "observability")]
pub mod observability;

pub use analysis::{SavedReport, VideoSource, analyze_video, vision_client};
pub use config::{AnalysisSettings, ConfigOverrides, FramewiseConfig, ProviderSettings};
pub use report::{AnalysisReport, DEFAULT_TASK_STEM, report_file_name};
pub use task::TaskDescription;

pub use framewise_chain::{
    CONTEXT_PREAMBLE, ChainedAnalysisEngine, ContextWindowBuilder, DEFAULT_WINDOW_SIZE,
    FIRST_FRAME_INSTRUCTION, NEXT_FRAME_INSTRUCTION, RenderedPrompt, compose_system_prompt,
    summarize_changes,
};
pub use framewise_core::{
    AnalysisResult, ContextWindow, FrameSample, ImageData, InferenceRequest,
    InferenceRequestBuilder, ResultSequence, Timestamp,
};
pub use framewise_error::{
    AnalysisError, AnalysisErrorKind, BuilderError, BuilderErrorKind, ConfigError, Disposition,
    FrameError, FrameErrorKind, FramewiseError, FramewiseErrorKind, FramewiseResult, JsonError,
    ProviderError, ProviderErrorKind, ProviderResult, RetryableError, StorageError,
    StorageErrorKind,
};
pub use framewise_interface::{FrameSampler, VisionDriver};
pub use framewise_models::{DEFAULT_ENDPOINT, LlmMetrics, OpenAIVisionClient};
pub use framewise_retry::{ResilientRequestExecutor, RetryPolicy, RetryPolicyBuilder};
pub use framewise_sampler::{DirectorySampler, FfmpegSampler};
