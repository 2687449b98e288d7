//! Frame timestamps in `MM:SS` form.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Position of a frame in its video, at whole-second resolution.
///
/// Serializes as the `MM:SS` string used in reports.
///
/// # Examples
///
/// ```
/// use framewise_core::Timestamp;
///
/// let ts = Timestamp::from_seconds(365.4);
/// assert_eq!(ts.to_string(), "06:05");
/// assert_eq!(ts.frame_file_name(), "frame_06m_05s.jpg");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{:02}:{:02}", minutes, seconds)]
#[serde(into = "String", try_from = "String")]
pub struct Timestamp {
    minutes: u32,
    seconds: u32,
}

impl Timestamp {
    /// Create a timestamp, normalising seconds above 59 into minutes.
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes: minutes + seconds / 60,
            seconds: seconds % 60,
        }
    }

    /// Truncate a position in seconds to a timestamp.
    ///
    /// Negative and non-finite positions map to `00:00`.
    pub fn from_seconds(position: f64) -> Self {
        if !position.is_finite() || position <= 0.0 {
            return Self::default();
        }
        let whole = position.floor() as u64;
        Self::new((whole / 60) as u32, (whole % 60) as u32)
    }

    /// Recover the timestamp encoded in a `frame_<MM>m_<SS>s.jpg` artifact name.
    ///
    /// Names that do not follow the convention yield `00:00`.
    ///
    /// ```
    /// use framewise_core::Timestamp;
    /// use std::path::Path;
    ///
    /// let ts = Timestamp::from_frame_path(Path::new("frames/frame_06m_05s.jpg"));
    /// assert_eq!(ts.to_string(), "06:05");
    ///
    /// let fallback = Timestamp::from_frame_path(Path::new("frames/frame_00001.jpg"));
    /// assert_eq!(fallback.to_string(), "00:00");
    /// ```
    pub fn from_frame_path(path: &Path) -> Self {
        Self::parse_frame_name(path).unwrap_or_default()
    }

    /// Strict variant of [`Timestamp::from_frame_path`].
    pub fn parse_frame_name(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        let mut parts = stem.rsplit('_');
        let seconds = parts.next()?.strip_suffix('s')?.parse().ok()?;
        let minutes = parts.next()?.strip_suffix('m')?.parse().ok()?;
        if parts.next()? != "frame" {
            return None;
        }
        Some(Self::new(minutes, seconds))
    }

    /// Artifact file name for a frame taken at this timestamp.
    pub fn frame_file_name(&self) -> String {
        format!("frame_{:02}m_{:02}s.jpg", self.minutes, self.seconds)
    }

    /// Whole minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Seconds within the minute.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Total whole seconds from the start of the video.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (minutes, seconds) = s
            .split_once(':')
            .ok_or_else(|| format!("timestamp '{}' is not MM:SS", s))?;
        let minutes = minutes
            .parse()
            .map_err(|e| format!("invalid minutes in '{}': {}", s, e))?;
        let seconds: u32 = seconds
            .parse()
            .map_err(|e| format!("invalid seconds in '{}': {}", s, e))?;
        if seconds > 59 {
            return Err(format!("seconds out of range in '{}'", s));
        }
        Ok(Self::new(minutes, seconds))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
