//! A growable, order-preserving buffer of Unicode scalar values.
//!
//! [`ScalarBuffer`] collects decoded text and literals. Storage grows by a fixed increment chosen at construction, and
//! a leading byte-order mark (`U+FEFF`) is treated as a marker: it is kept in
//! the buffer but never rendered or encoded.
//!
//! # Errors
//!
//! - Constructors reject a zero capacity or growth increment with a
//!   [`ConfigError`].
//! - Indexed access and truncation report an [`IndexOutOfRange`] naming the
//!   violated bound.

use alloc::{string::String, vec::Vec};
use core::fmt;

use bstr::ByteSlice;

use crate::{
    document::BOM_SCALAR,
    encoding::Encoding,
    error::{ConfigError, IndexOutOfRange, TranscodeError},
    source::ByteSource,
    transcode::{self, Decoder},
};

/// A growable sequence of scalar values with string-like helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarBuffer {
    scalars: Vec<char>,
    growth: usize,
}

impl ScalarBuffer {
    /// Capacity and growth increment of [`ScalarBuffer::new`].
    pub const DEFAULT_CAPACITY: usize = 16;

    /// An empty buffer with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY).
    #[must_use]
    pub fn new() -> Self {
        Self {
            scalars: Vec::with_capacity(Self::DEFAULT_CAPACITY),
            growth: Self::DEFAULT_CAPACITY,
        }
    }

    /// Creates an empty buffer holding `capacity` scalars before it first
    /// grows. Later growth happens in steps of `capacity`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroCapacity`] if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            scalars: Vec::with_capacity(capacity),
            growth: capacity,
        })
    }

    /// Creates a buffer holding a copy of `scalars`, growing in steps of
    /// `growth` afterwards.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroGrowth`] if `growth` is 0.
    pub fn from_scalars(scalars: &[char], growth: usize) -> Result<Self, ConfigError> {
        if growth == 0 {
            return Err(ConfigError::ZeroGrowth);
        }
        Ok(Self {
            scalars: scalars.to_vec(),
            growth,
        })
    }

    /// Decodes `bytes`, validating the mark of `encoding` first.
    ///
    /// # Errors
    ///
    /// The first [`TranscodeError`] met.
    pub fn decode(encoding: Encoding, bytes: &[u8]) -> Result<Self, TranscodeError> {
        Self::decode_body(transcode::after_bom(encoding, bytes)?, encoding)
    }

    /// Decodes everything `source` yields, validating the mark of `encoding`
    /// first.
    ///
    /// # Errors
    ///
    /// The first [`TranscodeError`] met.
    pub fn decode_from<S: ByteSource>(
        encoding: Encoding,
        mut source: S,
    ) -> Result<Self, TranscodeError> {
        transcode::read_bom(encoding, &mut source)?;
        Self::decode_body(source, encoding)
    }

    fn decode_body<S: ByteSource>(source: S, encoding: Encoding) -> Result<Self, TranscodeError> {
        let mut buffer = Self::new();
        for ch in Decoder::new(source, encoding) {
            buffer.push(ch?);
        }
        Ok(buffer)
    }

    fn reserve(&mut self, additional: usize) {
        let capacity = self.scalars.capacity();
        let needed = self.scalars.len().saturating_add(additional);
        if needed <= capacity {
            return;
        }
        let steps = (needed - capacity).div_ceil(self.growth);
        let target = capacity.saturating_add(steps.saturating_mul(self.growth));
        self.scalars.reserve_exact(target - self.scalars.len());
    }

    /// Appends one scalar value.
    pub fn push(&mut self, ch: char) {
        self.reserve(1);
        self.scalars.push(ch);
    }

    /// Appends the scalars of a UTF-8 text. Bytes that are not valid UTF-8
    /// are replaced by `U+FFFD`.
    pub fn append_literal<B: AsRef<[u8]>>(&mut self, text: B) {
        let bytes = text.as_ref();
        // Never more scalars than bytes.
        self.reserve(bytes.len());
        self.scalars.extend(bytes.chars());
    }

    /// Appends a slice of scalars.
    pub fn append_scalars(&mut self, scalars: &[char]) {
        self.reserve(scalars.len());
        self.scalars.extend_from_slice(scalars);
    }

    /// Number of buffered scalars, leading mark included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    /// Whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    /// Shortens the buffer to `new_len` scalars.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`] if `new_len` is greater than [`len`](Self::len).
    pub fn truncate(&mut self, new_len: usize) -> Result<(), IndexOutOfRange> {
        IndexOutOfRange::check_inclusive(new_len, self.scalars.len())?;
        self.scalars.truncate(new_len);
        Ok(())
    }

    /// Removes every scalar, keeping the allocation.
    pub fn clear(&mut self) {
        self.scalars.clear();
    }

    /// The scalar at `index`.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`] unless `index < len()`.
    pub fn at(&self, index: usize) -> Result<char, IndexOutOfRange> {
        IndexOutOfRange::check_exclusive(index, self.scalars.len())?;
        Ok(self.scalars[index])
    }

    /// The buffered scalars, leading mark included.
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.scalars
    }

    /// A copy of the buffered scalars, leading mark included.
    #[must_use]
    pub fn to_scalars(&self) -> Vec<char> {
        self.scalars.clone()
    }

    fn without_mark(&self) -> &[char] {
        match self.scalars.split_first() {
            Some((&BOM_SCALAR, rest)) => rest,
            _ => &self.scalars,
        }
    }

    /// The buffered scalars as text, without a leading `U+FEFF`.
    #[must_use]
    pub fn render_as_text(&self) -> String {
        self.without_mark().iter().collect()
    }

    /// Encodes the buffer with the mark of `encoding` in front. A leading
    /// `U+FEFF` in the buffer is not encoded.
    #[must_use]
    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        transcode::encode_all(self.without_mark(), encoding)
    }

    /// Renders the buffer as text and empties it.
    pub fn drain_as_text(&mut self) -> String {
        let text = self.render_as_text();
        self.scalars.clear();
        text
    }
}

impl Default for ScalarBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScalarBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        self.without_mark().iter().try_for_each(|&ch| f.write_char(ch))
    }
}

impl Extend<char> for ScalarBuffer {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for ch in iter {
            self.push(ch);
        }
    }
}

impl FromIterator<char> for ScalarBuffer {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl fmt::Write for ScalarBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.reserve(s.len());
        self.scalars.extend(s.chars());
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.push(c);
        Ok(())
    }
}
