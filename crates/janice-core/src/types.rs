use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A decoded media frame: row-major, interleaved, 8 bits per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub channels: u32,
    pub rows: u32,
    pub cols: u32,
    pub data: Vec<u8>,
}

impl Image {
    /// Number of bytes a well-formed image of these dimensions holds.
    pub fn expected_len(&self) -> usize {
        self.channels as usize * self.rows as usize * self.cols as usize
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// An object followed across frames. The three vectors are parallel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub rects: Vec<Rect>,
    pub confidences: Vec<f32>,
    pub frames: Vec<u32>,
}

impl Track {
    pub fn push(&mut self, rect: Rect, confidence: f32, frame: u32) {
        self.rects.push(rect);
        self.confidences.push(confidence);
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Iterate `(rect, confidence, frame)` entries in track order.
    pub fn iter(&self) -> impl Iterator<Item = (&Rect, f32, u32)> + '_ {
        self.rects
            .iter()
            .zip(self.confidences.iter().copied())
            .zip(self.frames.iter().copied())
            .map(|((rect, confidence), frame)| (rect, confidence, frame))
    }
}

/// Which detections an implementation should report per media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionPolicy {
    All,
    Largest,
    Best,
}

impl DetectionPolicy {
    pub const VALID: &'static str = "[All | Largest | Best]";
}

impl FromStr for DetectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(DetectionPolicy::All),
            "Largest" => Ok(DetectionPolicy::Largest),
            "Best" => Ok(DetectionPolicy::Best),
            other => Err(format!(
                "invalid detection policy '{other}'; valid detection policies are {}",
                Self::VALID
            )),
        }
    }
}

/// The role templates are enrolled for. The discriminant is the wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentRole {
    Reference11 = 0,
    Verification11 = 1,
    Probe1N = 2,
    Gallery1N = 3,
    Cluster = 4,
}

impl EnrollmentRole {
    pub const VALID: &'static str = "[Reference11 | Verification11 | Probe1N | Gallery1N | Cluster]";

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl FromStr for EnrollmentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Reference11" => Ok(EnrollmentRole::Reference11),
            "Verification11" => Ok(EnrollmentRole::Verification11),
            "Probe1N" => Ok(EnrollmentRole::Probe1N),
            "Gallery1N" => Ok(EnrollmentRole::Gallery1N),
            "Cluster" => Ok(EnrollmentRole::Cluster),
            other => Err(format!(
                "invalid enrollment role '{other}'; valid enrollment roles are {}",
                Self::VALID
            )),
        }
    }
}

impl fmt::Display for EnrollmentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// How a batch call reacts to a per-item failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchPolicy {
    /// Stop at the first failing item.
    AbortEarly,
    /// Record the failure and keep processing the remaining items.
    FlagAndFinish,
}

/// Parameters passed to every enrollment call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub policy: DetectionPolicy,
    /// Smallest object side, in pixels, an implementation should report.
    pub min_object_size: Option<u32>,
    pub role: EnrollmentRole,
    /// Similarity threshold for search and cluster calls.
    pub threshold: f64,
    /// Maximum number of search results.
    pub max_returns: u32,
    /// Clustering hint in [0, 1].
    pub hint: f64,
    pub batch_policy: BatchPolicy,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            policy: DetectionPolicy::All,
            min_object_size: None,
            role: EnrollmentRole::Probe1N,
            threshold: 0.0,
            max_returns: 50,
            hint: 0.5,
            batch_policy: BatchPolicy::FlagAndFinish,
        }
    }
}
