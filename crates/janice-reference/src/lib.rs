//! janice-reference — A reference [`Sdk`](janice_core::Sdk) implementation.
//!
//! Performs no detection or recognition. Every media yields one track that
//! covers each readable frame with a whole-frame rectangle, and one template
//! holding a SHA-256 digest per frame. Useful for exercising harnesses and
//! media backends without a vendor library.

pub mod settings;
pub mod template;

mod sdk;

pub use sdk::{ReferenceDetection, ReferenceSdk};
pub use settings::ReferenceSettings;
pub use template::ReferenceTemplate;
