//! janice-harness — Enroll an IJB-C media list through a JanICE SDK.
//!
//! Reads the media list, builds one media iterator per sighting, sends them
//! to the SDK in batches, writes every template to disk and one output row per
//! track entry.

pub mod cli;
pub mod enroll;
pub mod error;
pub mod media_list;
pub mod nonfatal;
pub mod output;

pub use cli::Cli;
pub use enroll::{run, RunSummary};
pub use error::HarnessError;
