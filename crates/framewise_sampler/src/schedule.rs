//! Sampling instants for a video of known duration.

use framewise_core::Timestamp;
use framewise_error::{FrameError, FrameErrorKind};

/// A position to grab a frame at, with the timestamp its artifact is named after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleInstant {
    /// Position in seconds
    pub seconds: f64,
    /// Whole-second timestamp
    pub timestamp: Timestamp,
}

/// Reject intervals that are not finite and above zero.
pub fn validate_interval(interval_seconds: f64) -> Result<(), FrameError> {
    if !interval_seconds.is_finite() || interval_seconds <= 0.0 {
        return Err(FrameError::new(FrameErrorKind::InvalidInterval(format!(
            "{} (must be a finite number of seconds above zero)",
            interval_seconds
        ))));
    }
    Ok(())
}

/// Instants `0, interval, 2*interval, ...` strictly before `duration`.
///
/// Instants that truncate to an already used whole second are dropped, so
/// every artifact name is unique.
///
/// ```
/// use framewise_sampler::sample_instants;
///
/// let instants = sample_instants(5.0, 2.0).unwrap();
/// let names: Vec<_> = instants.iter().map(|i| i.timestamp.to_string()).collect();
/// assert_eq!(names, ["00:00", "00:02", "00:04"]);
/// ```
pub fn sample_instants(duration: f64, interval_seconds: f64) -> Result<Vec<SampleInstant>, FrameError> {
    validate_interval(interval_seconds)?;

    let mut instants: Vec<SampleInstant> = Vec::new();
    if !duration.is_finite() || duration <= 0.0 {
        return Ok(instants);
    }

    let mut step: u64 = 0;
    loop {
        let seconds = step as f64 * interval_seconds;
        if seconds >= duration {
            break;
        }
        let timestamp = Timestamp::from_seconds(seconds);
        if instants.last().is_none_or(|prev| prev.timestamp != timestamp) {
            instants.push(SampleInstant { seconds, timestamp });
        }
        step += 1;
    }
    Ok(instants)
}
