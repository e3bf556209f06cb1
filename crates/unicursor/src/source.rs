//! Byte sources consumed by the transcoder.
//!
//! A [`ByteSource`] produces bytes one at a time, reports exhaustion, and
//! accepts exactly one byte of pushback. The decoders only ever need to look
//! one byte ahead, so nothing larger is required.

use crate::error::SourceError;

/// A forward-only byte producer with a single byte of pushback.
pub trait ByteSource {
    /// Whether another byte can be read (including a pushed back one).
    fn has_next(&mut self) -> bool;

    /// Reads the next byte.
    ///
    /// # Errors
    ///
    /// [`SourceError::Exhausted`] once every byte has been read.
    fn read_byte(&mut self) -> Result<u8, SourceError>;

    /// Pushes `byte` back so that the next [`read_byte`](Self::read_byte)
    /// returns it.
    ///
    /// # Errors
    ///
    /// [`SourceError::PushbackOccupied`] if a byte is already pending.
    fn unread_byte(&mut self, byte: u8) -> Result<(), SourceError>;

    /// Offset of the next byte to be read, counted from the first byte.
    ///
    /// A byte pushed back onto a fresh source reports offset 0.
    fn position(&self) -> usize;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn read_byte(&mut self) -> Result<u8, SourceError> {
        (**self).read_byte()
    }

    fn unread_byte(&mut self, byte: u8) -> Result<(), SourceError> {
        (**self).unread_byte(byte)
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

/// A [`ByteSource`] over an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    offset: usize,
    pending: Option<u8>,
}

impl<'a> SliceSource<'a> {
    /// A source reading `bytes` from the start.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            pending: None,
        }
    }

    /// The bytes not read yet, excluding a pending pushed back byte.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn has_next(&mut self) -> bool {
        self.pending.is_some() || self.offset < self.bytes.len()
    }

    fn read_byte(&mut self) -> Result<u8, SourceError> {
        if let Some(byte) = self.pending.take() {
            return Ok(byte);
        }
        let byte = *self
            .bytes
            .get(self.offset)
            .ok_or(SourceError::Exhausted {
                offset: self.offset,
            })?;
        self.offset += 1;
        Ok(byte)
    }

    fn unread_byte(&mut self, byte: u8) -> Result<(), SourceError> {
        if self.pending.is_some() {
            return Err(SourceError::PushbackOccupied {
                offset: self.position(),
            });
        }
        self.pending = Some(byte);
        Ok(())
    }

    fn position(&self) -> usize {
        // A byte pushed back before anything was read sits at offset 0.
        self.offset.saturating_sub(usize::from(self.pending.is_some()))
    }
}

#[cfg(feature = "std")]
pub use reader::ReaderSource;

#[cfg(feature = "std")]
mod reader {
    use std::io::{ErrorKind, Read};

    use super::ByteSource;
    use crate::error::SourceError;

    /// A [`ByteSource`] over any [`Read`] implementation.
    ///
    /// Reads are unbuffered, one byte at a time; wrap files in a
    /// [`BufReader`](std::io::BufReader). An I/O failure makes
    /// [`has_next`](ByteSource::has_next) report `true` so the next
    /// [`read_byte`](ByteSource::read_byte) can surface it as
    /// [`SourceError::Io`].
    #[derive(Debug)]
    pub struct ReaderSource<R> {
        reader: R,
        offset: usize,
        pending: Option<u8>,
        failure: Option<ErrorKind>,
        exhausted: bool,
    }

    impl<R: Read> ReaderSource<R> {
        /// Wraps `reader`; nothing is read until the first call.
        pub fn new(reader: R) -> Self {
            Self {
                reader,
                offset: 0,
                pending: None,
                failure: None,
                exhausted: false,
            }
        }

        /// Releases the underlying reader.
        pub fn into_inner(self) -> R {
            self.reader
        }

        fn fill(&mut self) -> Option<u8> {
            if self.exhausted || self.failure.is_some() {
                return None;
            }
            let mut byte = [0u8; 1];
            loop {
                match self.reader.read(&mut byte) {
                    Ok(0) => {
                        self.exhausted = true;
                        return None;
                    }
                    Ok(_) => {
                        self.offset += 1;
                        return Some(byte[0]);
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) => {
                        self.failure = Some(e.kind());
                        return None;
                    }
                }
            }
        }
    }

    impl<R: Read> ByteSource for ReaderSource<R> {
        fn has_next(&mut self) -> bool {
            if self.pending.is_some() {
                return true;
            }
            if let Some(byte) = self.fill() {
                self.pending = Some(byte);
                return true;
            }
            self.failure.is_some()
        }

        fn read_byte(&mut self) -> Result<u8, SourceError> {
            if let Some(byte) = self.pending.take() {
                return Ok(byte);
            }
            if let Some(byte) = self.fill() {
                return Ok(byte);
            }
            match self.failure.take() {
                Some(kind) => {
                    // Reported once; later reads see the reader as exhausted.
                    self.exhausted = true;
                    Err(SourceError::Io {
                        offset: self.offset,
                        kind,
                    })
                }
                None => Err(SourceError::Exhausted {
                    offset: self.offset,
                }),
            }
        }

        fn unread_byte(&mut self, byte: u8) -> Result<(), SourceError> {
            if self.pending.is_some() {
                return Err(SourceError::PushbackOccupied {
                    offset: self.position(),
                });
            }
            self.pending = Some(byte);
            Ok(())
        }

        fn position(&self) -> usize {
            // A byte pushed back before anything was read sits at offset 0.
            self.offset.saturating_sub(usize::from(self.pending.is_some()))
        }
    }
}
