//! Which API failures the harness tolerates.

use std::collections::BTreeSet;

use janice_core::{BatchOutcome, JaniceError};

use crate::error::HarnessError;

#[derive(Debug, Clone, Default)]
pub struct NonfatalErrors {
    codes: BTreeSet<JaniceError>,
}

impl NonfatalErrors {
    pub fn new(codes: impl IntoIterator<Item = JaniceError>) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    pub fn contains(&self, error: JaniceError) -> bool {
        self.codes.contains(&error)
    }

    /// `Ok(Some(value))` on success, `Ok(None)` when the failure is tolerated.
    pub fn check<T>(
        &self,
        call: &'static str,
        result: janice_core::Result<T>,
    ) -> Result<Option<T>, HarnessError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) if self.contains(error) => {
                tracing::warn!(call, error = %error, code = error.code(), "nonfatal API failure");
                Ok(None)
            }
            Err(error) => {
                tracing::error!(call, error = %error, code = error.code(), "API failure");
                Err(HarnessError::Api { call, error })
            }
        }
    }

    /// Log every failed media of a batch. Returns how many were tolerated, or
    /// an error listing the failures that were not.
    pub fn check_batch<T, D>(
        &self,
        batch_idx: usize,
        outcome: &BatchOutcome<T, D>,
    ) -> Result<usize, HarnessError> {
        let mut tolerated = 0;
        let mut fatal = Vec::new();

        for (media_idx, error) in outcome.failures() {
            tracing::warn!(
                batch_idx,
                media_idx,
                error = %error,
                code = error.code(),
                "batch item failed"
            );
            if self.contains(error) {
                tolerated += 1;
            } else {
                fatal.push((media_idx, error));
            }
        }

        if fatal.is_empty() {
            Ok(tolerated)
        } else {
            Err(HarnessError::BatchFailed {
                batch_idx,
                failures: fatal,
            })
        }
    }
}
