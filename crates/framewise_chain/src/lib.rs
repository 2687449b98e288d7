//! Chained, context-bounded frame analysis.
//!
//! Frames are narrated strictly one after another. Each request carries the
//! narrations of at most `K` preceding frames, rendered by
//! [`ContextWindowBuilder`], so prompt size stays bounded however long the
//! video is. [`ChainedAnalysisEngine`] owns the growing
//! [`framewise_core::ResultSequence`] and hands collaborators read-only views.
//!
//! ```rust,ignore
//! use framewise_chain::ChainedAnalysisEngine;
//! use framewise_retry::{ResilientRequestExecutor, RetryPolicy};
//!
//! let executor = ResilientRequestExecutor::new(driver, RetryPolicy::default());
//! let engine = ChainedAnalysisEngine::new(executor, 5)?;
//! let results = engine.run(&frames, Some("You are a meticulous observer.")).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod engine;
mod prompt;

pub use context::{
    CONTEXT_PREAMBLE, ContextWindowBuilder, FIRST_FRAME_INSTRUCTION, NEXT_FRAME_INSTRUCTION,
    RenderedPrompt,
};
pub use engine::{ChainedAnalysisEngine, DEFAULT_WINDOW_SIZE};
pub use prompt::{compose_system_prompt, summarize_changes};
