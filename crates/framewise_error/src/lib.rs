//! Error types for framewise.
//!
//! This crate provides the error taxonomy shared by every framewise crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Provider failures additionally carry a [`Disposition`] through the
//! [`RetryableError`] trait, which is what the retry loop consumes.
//!
//! # Examples
//!
//! ```
//! use framewise_error::{FrameError, FrameErrorKind, FramewiseResult};
//!
//! fn open_video() -> FramewiseResult<()> {
//!     Err(FrameError::new(FrameErrorKind::InputUnavailable("clip.mp4".into())))?
//! }
//!
//! assert!(open_video().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod builder;
mod config;
mod error;
mod frame;
mod json;
mod provider;
mod storage;

pub use analysis::{AnalysisError, AnalysisErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{FramewiseError, FramewiseErrorKind, FramewiseResult};
pub use frame::{FrameError, FrameErrorKind};
pub use json::JsonError;
pub use provider::{Disposition, ProviderError, ProviderErrorKind, ProviderResult, RetryableError};
pub use storage::{StorageError, StorageErrorKind};
