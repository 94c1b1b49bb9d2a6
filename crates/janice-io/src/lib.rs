//! janice-io — Media iterators over still images.
//!
//! Decodes with the `image` crate. A single file is one-frame media; a list of
//! files is a sparse sequence treated as a video whose frame numbers are
//! supplied by the caller.

pub mod convert;
pub mod sparse;
pub mod still;

use std::path::{Path, PathBuf};

use janice_core::{JaniceError, MediaIterator, Result};

pub use sparse::SparseImageIterator;
pub use still::StillImageIterator;

/// Create an iterator over a single still image.
pub fn create_media_iterator(path: impl AsRef<Path>) -> Result<Box<dyn MediaIterator>> {
    Ok(Box::new(StillImageIterator::new(path)?))
}

/// Create an iterator over a list of still images treated as one video.
///
/// `frames` gives the frame number of each file; `None` numbers them `0..n`.
pub fn create_sparse_media_iterator<P: AsRef<Path>>(
    filenames: &[P],
    frames: Option<&[u32]>,
) -> Result<Box<dyn MediaIterator>> {
    let filenames: Vec<PathBuf> = filenames.iter().map(|p| p.as_ref().to_path_buf()).collect();
    let frames = match frames {
        Some(frames) => frames.to_vec(),
        None => (0..filenames.len() as u32).collect(),
    };
    Ok(Box::new(SparseImageIterator::new(filenames, frames)?))
}

pub(crate) fn check_filename(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(JaniceError::MissingFileName);
    }
    Ok(())
}
