use janice_core::{EnrollmentRole, Image, JaniceError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Template produced by the reference SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTemplate {
    pub version: String,
    pub role: EnrollmentRole,
    /// Frame number of every frame that contributed.
    pub frames: Vec<u32>,
    /// Hex SHA-256 of each contributing frame's pixels, parallel to `frames`.
    pub digests: Vec<String>,
}

impl ReferenceTemplate {
    pub fn new(version: &str, role: EnrollmentRole) -> Self {
        Self {
            version: version.to_string(),
            role,
            frames: Vec::new(),
            digests: Vec::new(),
        }
    }

    pub fn add_frame(&mut self, frame: u32, image: &Image) {
        self.frames.push(frame);
        self.digests.push(frame_digest(image));
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            tracing::warn!(error = %e, "template serialization failed");
            JaniceError::FailureToSerialize
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::warn!(error = %e, "template deserialization failed");
            JaniceError::FailureToDeserialize
        })
    }
}

/// Digest over the image dimensions and pixels.
pub fn frame_digest(image: &Image) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.channels.to_le_bytes());
    hasher.update(image.rows.to_le_bytes());
    hasher.update(image.cols.to_le_bytes());
    hasher.update(&image.data);
    format!("{:x}", hasher.finalize())
}
