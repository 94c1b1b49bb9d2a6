//! janice-core — The JanICE recognition API boundary.
//!
//! Defines the error codes, image and track types, enrollment context, and the
//! two traits every backend plugs into: [`MediaIterator`] for media I/O and
//! [`Sdk`] for batch detection and template enrollment.

pub mod error;
pub mod media;
pub mod sdk;
pub mod types;

pub use error::{JaniceError, Result};
pub use media::MediaIterator;
pub use sdk::{BatchOutcome, MediaResult, Sdk, SdkConfig};
pub use types::{BatchPolicy, Context, DetectionPolicy, EnrollmentRole, Image, Rect, Track};
