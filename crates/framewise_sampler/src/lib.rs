//! Frame samplers for framewise.
//!
//! - [`FfmpegSampler`] decodes a video with the `ffmpeg` and `ffprobe`
//!   executables, writing one JPEG per sampled instant.
//! - [`DirectorySampler`] picks up frame artifacts that already exist on disk.
//!
//! Both name artifacts `frame_<MM>m_<SS>s.jpg` and return samples ordered by
//! timestamp with indices starting at 0.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod directory;
mod ffmpeg;
mod schedule;

pub use directory::DirectorySampler;
pub use ffmpeg::FfmpegSampler;
pub use schedule::{SampleInstant, sample_instants, validate_interval};
