//! JanICE API error codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used by every API call.
pub type Result<T> = std::result::Result<T, JaniceError>;

/// Error codes returned by API calls. Success is represented by `Ok`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JaniceError {
    #[error("catch-all error")]
    UnknownError,
    #[error("memory allocation failed")]
    OutOfMemory,
    #[error("incorrect location provided to initialize")]
    InvalidSdk,
    #[error("sdk configuration file could not be read or was invalid")]
    BadSdkConfig,
    #[error("incorrect license file")]
    BadLicense,
    #[error("missing required data")]
    MissingData,
    #[error("the GPU is not functioning or unavailable")]
    InvalidGpu,
    #[error("an argument to a function was not valid")]
    BadArgument,
    #[error("failed to open a file")]
    OpenError,
    #[error("failed to read from a file")]
    ReadError,
    #[error("failed to write to a file")]
    WriteError,
    #[error("failed to parse a file")]
    ParseError,
    #[error("failed to decode a media file")]
    InvalidMedia,
    #[error("no more frames in the media")]
    MediaAtEnd,
    #[error("requested frame or index is out of bounds")]
    OutOfBounds,
    #[error("a template id already exists in a gallery")]
    DuplicateId,
    #[error("a template id was not found")]
    MissingId,
    #[error("an empty filename was provided")]
    MissingFileName,
    #[error("the template role is incompatible with the function")]
    IncorrectRoleForTemplate,
    #[error("could not serialize a data structure")]
    FailureToSerialize,
    #[error("could not deserialize a data structure")]
    FailureToDeserialize,
    #[error("batch call aborted early due to an error")]
    BatchAbortedEarly,
    #[error("batch call finished but with errors")]
    BatchFinishedWithErrors,
    #[error("callback requested immediate exit")]
    CallbackExitImmediately,
    #[error("optional function not implemented")]
    NotImplemented,
}

impl JaniceError {
    /// Every error code, in declaration order.
    pub const ALL: [JaniceError; 25] = [
        JaniceError::UnknownError,
        JaniceError::OutOfMemory,
        JaniceError::InvalidSdk,
        JaniceError::BadSdkConfig,
        JaniceError::BadLicense,
        JaniceError::MissingData,
        JaniceError::InvalidGpu,
        JaniceError::BadArgument,
        JaniceError::OpenError,
        JaniceError::ReadError,
        JaniceError::WriteError,
        JaniceError::ParseError,
        JaniceError::InvalidMedia,
        JaniceError::MediaAtEnd,
        JaniceError::OutOfBounds,
        JaniceError::DuplicateId,
        JaniceError::MissingId,
        JaniceError::MissingFileName,
        JaniceError::IncorrectRoleForTemplate,
        JaniceError::FailureToSerialize,
        JaniceError::FailureToDeserialize,
        JaniceError::BatchAbortedEarly,
        JaniceError::BatchFinishedWithErrors,
        JaniceError::CallbackExitImmediately,
        JaniceError::NotImplemented,
    ];

    /// Canonical `JANICE_*` name of the code.
    pub fn code(&self) -> &'static str {
        match self {
            JaniceError::UnknownError => "JANICE_UNKNOWN_ERROR",
            JaniceError::OutOfMemory => "JANICE_OUT_OF_MEMORY",
            JaniceError::InvalidSdk => "JANICE_INVALID_SDK",
            JaniceError::BadSdkConfig => "JANICE_BAD_SDK_CONFIG",
            JaniceError::BadLicense => "JANICE_BAD_LICENSE",
            JaniceError::MissingData => "JANICE_MISSING_DATA",
            JaniceError::InvalidGpu => "JANICE_INVALID_GPU",
            JaniceError::BadArgument => "JANICE_BAD_ARGUMENT",
            JaniceError::OpenError => "JANICE_OPEN_ERROR",
            JaniceError::ReadError => "JANICE_READ_ERROR",
            JaniceError::WriteError => "JANICE_WRITE_ERROR",
            JaniceError::ParseError => "JANICE_PARSE_ERROR",
            JaniceError::InvalidMedia => "JANICE_INVALID_MEDIA",
            JaniceError::MediaAtEnd => "JANICE_MEDIA_AT_END",
            JaniceError::OutOfBounds => "JANICE_OUT_OF_BOUNDS",
            JaniceError::DuplicateId => "JANICE_DUPLICATE_ID",
            JaniceError::MissingId => "JANICE_MISSING_ID",
            JaniceError::MissingFileName => "JANICE_MISSING_FILE_NAME",
            JaniceError::IncorrectRoleForTemplate => "JANICE_INCORRECT_ROLE_FOR_TEMPLATE",
            JaniceError::FailureToSerialize => "JANICE_FAILURE_TO_SERIALIZE",
            JaniceError::FailureToDeserialize => "JANICE_FAILURE_TO_DESERIALIZE",
            JaniceError::BatchAbortedEarly => "JANICE_BATCH_ABORTED_EARLY",
            JaniceError::BatchFinishedWithErrors => "JANICE_BATCH_FINISHED_WITH_ERRORS",
            JaniceError::CallbackExitImmediately => "JANICE_CALLBACK_EXIT_IMMEDIATELY",
            JaniceError::NotImplemented => "JANICE_NOT_IMPLEMENTED",
        }
    }
}

/// Returned when a string does not name a known error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownErrorCode(pub String);

impl fmt::Display for UnknownErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown JanICE error code: {}", self.0)
    }
}

impl std::error::Error for UnknownErrorCode {}

impl FromStr for JaniceError {
    type Err = UnknownErrorCode;

    /// Accepts `JANICE_MEDIA_AT_END`, `media_at_end`, etc.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix("JANICE_").unwrap_or(&upper);

        JaniceError::ALL
            .iter()
            .copied()
            .find(|e| &e.code()["JANICE_".len()..] == name)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}
