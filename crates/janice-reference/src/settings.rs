//! Reference SDK settings.
//!
//! Read from `reference.toml` in the SDK directory, then overridden by the
//! `algorithm` string, which is parsed as the same TOML keys
//! (e.g. `min_frame_size = 32`).

use std::path::Path;

use janice_core::{JaniceError, Result};
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "reference.toml";
const DEFAULT_TEMPLATE_VERSION: &str = "reference-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSettings {
    /// Frames with a side shorter than this are skipped.
    pub min_frame_size: u32,
    /// Version tag stamped into every template.
    pub template_version: String,
}

impl Default for ReferenceSettings {
    fn default() -> Self {
        Self {
            min_frame_size: 0,
            template_version: DEFAULT_TEMPLATE_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialSettings {
    min_frame_size: Option<u32>,
    template_version: Option<String>,
}

impl ReferenceSettings {
    /// Load settings for an SDK rooted at `sdk_path`.
    pub fn load(sdk_path: &Path, algorithm: &str) -> Result<Self> {
        let mut settings = Self::default();

        let file = sdk_path.join(SETTINGS_FILE);
        if file.is_file() {
            let src = std::fs::read_to_string(&file).map_err(|e| {
                tracing::warn!(path = %file.display(), error = %e, "cannot read settings");
                JaniceError::BadSdkConfig
            })?;
            let partial: PartialSettings = toml::from_str(&src).map_err(|e| {
                tracing::warn!(path = %file.display(), error = %e, "bad settings TOML");
                JaniceError::BadSdkConfig
            })?;
            settings.apply(partial);
            tracing::debug!(path = %file.display(), "loaded reference settings");
        }

        if !algorithm.trim().is_empty() {
            let partial: PartialSettings = toml::from_str(algorithm).map_err(|e| {
                tracing::warn!(algorithm, error = %e, "bad algorithm parameters");
                JaniceError::BadArgument
            })?;
            settings.apply(partial);
        }

        Ok(settings)
    }

    fn apply(&mut self, partial: PartialSettings) {
        if let Some(v) = partial.min_frame_size {
            self.min_frame_size = v;
        }
        if let Some(v) = partial.template_version {
            self.template_version = v;
        }
    }
}
