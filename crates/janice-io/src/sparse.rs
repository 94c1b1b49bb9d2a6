//! A list of still images presented as a video.
//!
//! Frames are read strictly in order. There is no frame rate and no random
//! access: `frame_rate`, `seek` and `get` return `InvalidMedia`.

use std::path::PathBuf;

use janice_core::{Image, JaniceError, MediaIterator, Result};

use crate::convert::decode_file;

#[derive(Debug)]
pub struct SparseImageIterator {
    filenames: Vec<PathBuf>,
    frames: Vec<u32>,
    pos: usize,
}

impl SparseImageIterator {
    /// `frames[i]` is the frame number reported for `filenames[i]`.
    pub fn new(filenames: Vec<PathBuf>, frames: Vec<u32>) -> Result<Self> {
        if filenames.is_empty() || filenames.len() != frames.len() {
            tracing::warn!(
                files = filenames.len(),
                frames = frames.len(),
                "sparse media needs one frame number per file"
            );
            return Err(JaniceError::BadArgument);
        }
        for path in &filenames {
            crate::check_filename(path)?;
        }

        Ok(Self {
            filenames,
            frames,
            pos: 0,
        })
    }

    pub fn filenames(&self) -> &[PathBuf] {
        &self.filenames
    }
}

impl MediaIterator for SparseImageIterator {
    fn is_video(&self) -> Result<bool> {
        Ok(true)
    }

    /// The cursor only advances when the file decodes.
    fn next(&mut self) -> Result<Image> {
        let Some(path) = self.filenames.get(self.pos) else {
            return Err(JaniceError::MediaAtEnd);
        };
        let image = decode_file(path)?;
        self.pos += 1;
        Ok(image)
    }

    fn tell(&self) -> Result<u32> {
        self.frames
            .get(self.pos)
            .copied()
            .ok_or(JaniceError::MediaAtEnd)
    }

    fn reset(&mut self) -> Result<()> {
        self.pos = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use std::path::Path;

    fn write_frames(dir: &Path, count: u8) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = dir.join(format!("frame_{i}.png"));
                GrayImage::from_pixel(3, 2, Luma([i * 10])).save(&path).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_sequential_read_reports_frames() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_frames(dir.path(), 3);
        let mut it = SparseImageIterator::new(files, vec![5, 17, 40]).unwrap();

        assert_eq!(it.is_video(), Ok(true));
        let mut seen = Vec::new();
        loop {
            let frame = match it.tell() {
                Ok(f) => f,
                Err(e) => {
                    assert_eq!(e, JaniceError::MediaAtEnd);
                    break;
                }
            };
            let img = it.next().unwrap();
            seen.push((frame, img.data[0]));
        }
        assert_eq!(seen, vec![(5, 0), (17, 10), (40, 20)]);
        assert_eq!(it.next().unwrap_err(), JaniceError::MediaAtEnd);
    }

    #[test]
    fn test_reset_rewinds() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_frames(dir.path(), 2);
        let mut it = SparseImageIterator::new(files, vec![0, 1]).unwrap();
        it.next().unwrap();
        it.next().unwrap();
        assert_eq!(it.tell(), Err(JaniceError::MediaAtEnd));
        it.reset().unwrap();
        assert_eq!(it.tell(), Ok(0));
    }

    #[test]
    fn test_random_access_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_frames(dir.path(), 2);
        let mut it = SparseImageIterator::new(files, vec![0, 1]).unwrap();
        assert_eq!(it.frame_rate(), Err(JaniceError::InvalidMedia));
        assert_eq!(it.seek(1), Err(JaniceError::InvalidMedia));
        assert_eq!(it.get(0).unwrap_err(), JaniceError::InvalidMedia);
    }

    #[test]
    fn test_bad_file_keeps_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = write_frames(dir.path(), 1);
        files.insert(0, dir.path().join("missing.png"));
        let mut it = SparseImageIterator::new(files, vec![0, 1]).unwrap();
        assert_eq!(it.next().unwrap_err(), JaniceError::OpenError);
        assert_eq!(it.tell(), Ok(0));
    }

    #[test]
    fn test_length_mismatch_and_empty() {
        let err = SparseImageIterator::new(vec![PathBuf::from("a.png")], vec![]).unwrap_err();
        assert_eq!(err, JaniceError::BadArgument);
        let err = SparseImageIterator::new(vec![], vec![]).unwrap_err();
        assert_eq!(err, JaniceError::BadArgument);
    }

    #[test]
    fn test_factory_numbers_frames_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_frames(dir.path(), 3);
        let mut it = crate::create_sparse_media_iterator(&files, None).unwrap();
        it.next().unwrap();
        it.next().unwrap();
        assert_eq!(it.tell(), Ok(2));
    }
}
