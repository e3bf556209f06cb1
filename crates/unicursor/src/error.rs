use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::encoding::Encoding;

/// An invalid constructor or configuration argument.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A buffer was created with room for no scalar.
    #[error("the size of the buffer can't be 0")]
    ZeroCapacity,
    /// A buffer was created with a growth increment of 0.
    #[error("the growth size of the buffer can't be 0")]
    ZeroGrowth,
    /// The name given does not match any [`Encoding`].
    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),
}

/// Failure reported by a [`ByteSource`](crate::ByteSource).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// Every byte has been read.
    #[error("the byte source has been read completely (byte {offset})")]
    Exhausted {
        /// Offset one past the last byte.
        offset: usize,
    },
    /// A second byte was pushed back before the first was read again.
    #[error("can't unread at byte {offset}: a byte is already pending")]
    PushbackOccupied {
        /// Offset of the pending byte.
        offset: usize,
    },
    /// The underlying reader failed.
    #[cfg(feature = "std")]
    #[error("i/o failure at byte {offset}: {kind}")]
    Io {
        /// Offset of the byte that could not be read.
        offset: usize,
        /// Kind of the reader's error.
        kind: std::io::ErrorKind,
    },
}

/// Failure while converting between bytes and scalar values.
///
/// Every variant names the encoding involved and either the byte offset at
/// which the problem starts or the offending value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeError {
    /// The source ended in the middle of a sequence.
    #[error("truncated {encoding} sequence: the source ended at byte {offset}")]
    Truncated {
        /// Encoding being decoded.
        encoding: Encoding,
        /// Offset at which a byte was missing.
        offset: usize,
    },
    /// The bytes do not form a legal sequence.
    #[error("invalid {encoding} sequence at byte {offset}")]
    InvalidSequence {
        /// Encoding being decoded.
        encoding: Encoding,
        /// Offset of the first byte of the sequence.
        offset: usize,
    },
    /// An unpaired UTF-16 surrogate, or a surrogate value in UTF-32.
    #[error("lone or invalid surrogate 0x{unit:04X} in {encoding} at byte {offset}")]
    LoneOrInvalidSurrogate {
        /// Encoding being decoded.
        encoding: Encoding,
        /// Offset of the offending unit.
        offset: usize,
        /// The offending unit.
        unit: u32,
    },
    /// The byte-order mark is absent or different.
    #[error("wrong {encoding} BOM: expected 0x{expected:02X} (byte {offset})")]
    MissingOrWrongBom {
        /// Encoding whose mark was expected.
        encoding: Encoding,
        /// First mark byte that did not match.
        expected: u8,
        /// Offset of that byte.
        offset: usize,
    },
    /// A surrogate or a value above `U+10FFFF` was given to the encoder.
    #[error("0x{scalar:X} is not a Unicode scalar value and can't be encoded in {encoding}")]
    UnencodableScalar {
        /// Target encoding.
        encoding: Encoding,
        /// The rejected value.
        scalar: u32,
    },
    /// The byte source failed for another reason than running dry.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// The bound an index was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Valid indices are `0..=n`.
    Inclusive(usize),
    /// Valid indices are `0..n`.
    Exclusive(usize),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Inclusive(max) => write!(
                f,
                "it should be greater than or equal to 0 and less than or equal to {max}"
            ),
            Bound::Exclusive(end) => write!(
                f,
                "it should be greater than or equal to 0 and less than {end}"
            ),
        }
    }
}

/// A position or index argument outside of its documented range.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("index outside of range ({index}), {bound}")]
pub struct IndexOutOfRange {
    /// The rejected index.
    pub index: usize,
    /// The range it was checked against.
    pub bound: Bound,
}

impl IndexOutOfRange {
    pub(crate) fn check_inclusive(index: usize, max: usize) -> Result<(), Self> {
        if index > max {
            return Err(Self {
                index,
                bound: Bound::Inclusive(max),
            });
        }
        Ok(())
    }

    pub(crate) fn check_exclusive(index: usize, end: usize) -> Result<(), Self> {
        if index >= end {
            return Err(Self {
                index,
                bound: Bound::Exclusive(end),
            });
        }
        Ok(())
    }
}

/// Failure while building a [`MappedDocument`](crate::MappedDocument).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The source yielded no scalar.
    #[error("this stream is empty{}", in_file(.filename))]
    EmptySource {
        /// Filename from the document options.
        filename: Option<String>,
    },
    /// Decoding the source failed.
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
}

struct InFile<'a>(Option<&'a str>);

impl fmt::Display for InFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => write!(f, " ({name})"),
            None => Ok(()),
        }
    }
}

#[allow(clippy::ref_option)]
fn in_file(filename: &Option<String>) -> InFile<'_> {
    InFile(filename.as_deref())
}

/// Failure of a [`Cursor`](crate::Cursor) movement.
///
/// Each variant carries the debug snippet rendered at the cursor position
/// when the failure happened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// A read or peek past the end-of-stream slot.
    #[error("end of stream reached, no more character to read\n{context}")]
    EndOfStream {
        /// Snippet at the cursor position.
        context: String,
    },
    /// An unread at position 0.
    #[error("nothing to unread\n{context}")]
    NothingToUnread {
        /// Snippet at the cursor position.
        context: String,
    },
    /// A reset with an empty mark stack.
    #[error("no position has been saved, mark() must be called first\n{context}")]
    NoMarkSaved {
        /// Snippet at the cursor position.
        context: String,
    },
}
