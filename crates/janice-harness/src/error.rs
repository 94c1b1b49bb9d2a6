use std::path::PathBuf;

use janice_core::JaniceError;
use thiserror::Error;

use crate::media_list::MediaListError;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("media list: {0}")]
    MediaList(#[from] MediaListError),
    #[error("{call} failed: {error} ({})", .error.code())]
    Api {
        call: &'static str,
        error: JaniceError,
    },
    #[error("batch {batch_idx} finished with fatal errors: {}", describe(.failures))]
    BatchFailed {
        batch_idx: usize,
        failures: Vec<(usize, JaniceError)>,
    },
    #[error("batch {batch_idx}: expected {expected} template lists, got {actual}")]
    TemplateCountMismatch {
        batch_idx: usize,
        expected: usize,
        actual: usize,
    },
    #[error("batch {batch_idx}, media {media_idx}: {templates} templates but {detections} detections")]
    DetectionCountMismatch {
        batch_idx: usize,
        media_idx: usize,
        templates: usize,
        detections: usize,
    },
    #[error("destination is not a directory: {0}")]
    DestinationNotDirectory(PathBuf),
    #[error("output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

fn describe(failures: &[(usize, JaniceError)]) -> String {
    failures
        .iter()
        .map(|(idx, e)| format!("#{idx} {}", e.code()))
        .collect::<Vec<_>>()
        .join(", ")
}
