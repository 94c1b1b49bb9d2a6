//! Media iterator interface.
//!
//! A media iterator gives sequential (and optionally random) access to the
//! frames of a single piece of media. Still images are one-frame media.
//! Releasing the iterator is `Drop`.

use crate::error::{JaniceError, Result};
use crate::types::Image;

pub trait MediaIterator: Send {
    /// Whether the media should be treated as a video.
    fn is_video(&self) -> Result<bool>;

    /// Frames per second. Media without a known rate return `InvalidMedia`.
    fn frame_rate(&self) -> Result<f32> {
        Err(JaniceError::InvalidMedia)
    }

    /// Decode the frame at the cursor and advance. `MediaAtEnd` once exhausted.
    fn next(&mut self) -> Result<Image>;

    /// Move the cursor to `frame`.
    fn seek(&mut self, _frame: u32) -> Result<()> {
        Err(JaniceError::InvalidMedia)
    }

    /// Decode `frame` without moving the cursor.
    fn get(&mut self, _frame: u32) -> Result<Image> {
        Err(JaniceError::InvalidMedia)
    }

    /// Frame number at the cursor. `MediaAtEnd` once exhausted.
    fn tell(&self) -> Result<u32>;

    /// Rewind to the first frame.
    fn reset(&mut self) -> Result<()>;
}

impl<M: MediaIterator + ?Sized> MediaIterator for Box<M> {
    fn is_video(&self) -> Result<bool> {
        (**self).is_video()
    }

    fn frame_rate(&self) -> Result<f32> {
        (**self).frame_rate()
    }

    fn next(&mut self) -> Result<Image> {
        (**self).next()
    }

    fn seek(&mut self, frame: u32) -> Result<()> {
        (**self).seek(frame)
    }

    fn get(&mut self, frame: u32) -> Result<Image> {
        (**self).get(frame)
    }

    fn tell(&self) -> Result<u32> {
        (**self).tell()
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields `count` 1x1 gray frames.
    struct Counter {
        pos: u32,
        count: u32,
    }

    impl MediaIterator for Counter {
        fn is_video(&self) -> Result<bool> {
            Ok(true)
        }

        fn next(&mut self) -> Result<Image> {
            if self.pos == self.count {
                return Err(JaniceError::MediaAtEnd);
            }
            self.pos += 1;
            Ok(Image { channels: 1, rows: 1, cols: 1, data: vec![self.pos as u8] })
        }

        fn tell(&self) -> Result<u32> {
            if self.pos == self.count {
                return Err(JaniceError::MediaAtEnd);
            }
            Ok(self.pos)
        }

        fn reset(&mut self) -> Result<()> {
            self.pos = 0;
            Ok(())
        }
    }

    #[test]
    fn test_default_optional_operations() {
        let mut it = Counter { pos: 0, count: 2 };
        assert_eq!(it.frame_rate(), Err(JaniceError::InvalidMedia));
        assert_eq!(it.seek(1), Err(JaniceError::InvalidMedia));
        assert_eq!(it.get(0).unwrap_err(), JaniceError::InvalidMedia);
    }

    #[test]
    fn test_boxed_dispatch() {
        let mut it: Box<dyn MediaIterator> = Box::new(Counter { pos: 0, count: 2 });
        assert_eq!(it.tell(), Ok(0));
        assert_eq!(it.next().unwrap().data, vec![1]);
        assert_eq!(it.next().unwrap().data, vec![2]);
        assert_eq!(it.next().unwrap_err(), JaniceError::MediaAtEnd);
        assert_eq!(it.tell(), Err(JaniceError::MediaAtEnd));
        it.reset().unwrap();
        assert_eq!(it.tell(), Ok(0));
    }
}
