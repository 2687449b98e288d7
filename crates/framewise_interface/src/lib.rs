//! Trait definitions for framewise.
//!
//! The pipeline depends on two collaborators it does not implement itself:
//! a vision-capable inference client and a source of ordered frame samples.
//! Both are passed in explicitly, which is also how tests substitute doubles.

mod traits;

pub use traits::{FrameSampler, VisionDriver};
