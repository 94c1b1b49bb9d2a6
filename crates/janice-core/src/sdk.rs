//! Batch recognition service interface.
//!
//! An [`Sdk`] owns detection, feature extraction and template serialization.
//! Callers hand it batches of media and get back, per media, the templates
//! enrolled from it and the detection that produced each template.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JaniceError, Result};
use crate::media::MediaIterator;
use crate::types::{Context, Track};

/// Parameters passed to [`Sdk::initialize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Directory holding the implementation's resources.
    pub sdk_path: PathBuf,
    /// Scratch directory the implementation may read and write.
    pub temp_path: PathBuf,
    /// Directory the implementation may write logs to.
    pub log_path: PathBuf,
    /// Implementation-defined parameters.
    pub algorithm: String,
    pub num_threads: u32,
    /// CUDA device indices the implementation may use.
    pub gpus: Vec<u32>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            sdk_path: PathBuf::from("./"),
            temp_path: PathBuf::from("./"),
            log_path: PathBuf::from("./"),
            algorithm: String::new(),
            num_threads: 1,
            gpus: Vec::new(),
        }
    }
}

/// Templates and detections enrolled from one media. `templates[i]` was
/// produced from `detections[i]`.
#[derive(Debug)]
pub struct MediaResult<T, D> {
    pub templates: Vec<T>,
    pub detections: Vec<D>,
}

impl<T, D> Default for MediaResult<T, D> {
    fn default() -> Self {
        Self {
            templates: Vec::new(),
            detections: Vec::new(),
        }
    }
}

/// Output of a batch enrollment: one entry per input media, in input order.
#[derive(Debug)]
pub struct BatchOutcome<T, D> {
    pub results: Vec<MediaResult<T, D>>,
    /// Per-media status, parallel to `results`.
    pub statuses: Vec<Result<()>>,
}

impl<T, D> Default for BatchOutcome<T, D> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            statuses: Vec::new(),
        }
    }
}

impl<T, D> BatchOutcome<T, D> {
    pub fn push(&mut self, result: MediaResult<T, D>, status: Result<()>) {
        self.results.push(result);
        self.statuses.push(status);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// `(batch index, error)` for every media that failed.
    pub fn failures(&self) -> impl Iterator<Item = (usize, JaniceError)> + '_ {
        self.statuses
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.err().map(|e| (i, e)))
    }

    pub fn finished_with_errors(&self) -> bool {
        self.statuses.iter().any(|s| s.is_err())
    }
}

/// A recognition implementation.
pub trait Sdk: Sized {
    type Template;
    type Detection;

    /// Bring the implementation up. Called once before any other call.
    fn initialize(config: &SdkConfig) -> Result<Self>;

    /// Detect objects in every media and enroll a template per detection.
    ///
    /// Per-media failures are reported through [`BatchOutcome::statuses`]
    /// when `context.batch_policy` is `FlagAndFinish`. An `Err` return means
    /// the batch as a whole failed.
    fn enroll_from_media_batch(
        &mut self,
        media: &mut [Box<dyn MediaIterator>],
        context: &Context,
    ) -> Result<BatchOutcome<Self::Template, Self::Detection>>;

    fn serialize_template(&self, template: &Self::Template) -> Result<Vec<u8>>;

    /// Write a template to `path` in the implementation's own format.
    fn write_template(&self, template: &Self::Template, path: &Path) -> Result<()> {
        let bytes = self.serialize_template(template)?;
        std::fs::write(path, bytes).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "template write failed");
            JaniceError::WriteError
        })
    }

    /// The frames, locations and confidences a detection covers.
    fn detection_track(&self, detection: &Self::Detection) -> Result<Track>;

    /// Release implementation resources.
    fn finalize(self) -> Result<()> {
        Ok(())
    }
}
