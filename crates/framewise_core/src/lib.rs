//! Core data types for framewise.
//!
//! These are the values that flow through a run: frame samples produced by a
//! sampler, the inference request built for each frame, and the append-only
//! sequence of narration results together with its bounded context view.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod frame;
mod request;
mod result;
mod timestamp;

pub use frame::FrameSample;
pub use request::{ImageData, InferenceRequest, InferenceRequestBuilder};
pub use result::{AnalysisResult, ContextWindow, ResultSequence};
pub use timestamp::Timestamp;
