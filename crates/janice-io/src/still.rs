//! One-frame media backed by a single still image.

use std::path::{Path, PathBuf};

use janice_core::{Image, JaniceError, MediaIterator, Result};

use crate::convert::decode_file;

/// Iterator over a single still image. The file is decoded on access.
#[derive(Debug)]
pub struct StillImageIterator {
    path: PathBuf,
    consumed: bool,
}

impl StillImageIterator {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        crate::check_filename(&path)?;
        Ok(Self {
            path,
            consumed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MediaIterator for StillImageIterator {
    fn is_video(&self) -> Result<bool> {
        Ok(false)
    }

    fn next(&mut self) -> Result<Image> {
        if self.consumed {
            return Err(JaniceError::MediaAtEnd);
        }
        let image = decode_file(&self.path)?;
        self.consumed = true;
        Ok(image)
    }

    fn seek(&mut self, frame: u32) -> Result<()> {
        if frame != 0 {
            return Err(JaniceError::OutOfBounds);
        }
        self.consumed = false;
        Ok(())
    }

    fn get(&mut self, frame: u32) -> Result<Image> {
        if frame != 0 {
            return Err(JaniceError::OutOfBounds);
        }
        decode_file(&self.path)
    }

    fn tell(&self) -> Result<u32> {
        if self.consumed {
            return Err(JaniceError::MediaAtEnd);
        }
        Ok(0)
    }

    fn reset(&mut self) -> Result<()> {
        self.consumed = false;
        Ok(())
    }
}
