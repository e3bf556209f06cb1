//! Byte ⇄ scalar value conversion for the six supported encodings.
//!
//! The single-scalar functions ([`decode_one`], [`encode_one`]) work over a
//! [`ByteSource`] and a `Vec<u8>` sink respectively and never look more than
//! one byte ahead. Byte-order marks are handled separately by [`read_bom`]
//! and [`write_bom`]; the bulk helpers ([`decode_all`], [`encode_all`],
//! [`transcode_bytes`]) combine both.
//!
//! # Errors
//!
//! Decoding is strict. UTF-8 rejects overlong forms, encoded surrogates and
//! values above `U+10FFFF`; UTF-16 rejects unpaired surrogates; UTF-32 rejects
//! surrogates and out-of-range values. Errors carry the offset of the first
//! byte of the offending sequence (or of the point where the source ran dry).

pub mod classify;

use alloc::vec::Vec;

use crate::{
    encoding::Encoding,
    error::{SourceError, TranscodeError},
    source::{ByteSource, SliceSource},
};
use classify::{is_high_surrogate, is_low_surrogate, is_surrogate};

/// Reads exactly one scalar value from `source`.
///
/// [`Encoding::Utf8Bom`] decodes like [`Encoding::Utf8`]: the mark is only
/// consumed by [`read_bom`].
///
/// # Errors
///
/// - [`TranscodeError::Truncated`] if the source ends mid-sequence.
/// - [`TranscodeError::InvalidSequence`] for bytes that are not a legal
///   sequence.
/// - [`TranscodeError::LoneOrInvalidSurrogate`] for surrogate misuse in
///   UTF-16 or UTF-32.
pub fn decode_one<S: ByteSource + ?Sized>(
    source: &mut S,
    encoding: Encoding,
) -> Result<char, TranscodeError> {
    match encoding {
        Encoding::Utf8 | Encoding::Utf8Bom => decode_utf8(source, encoding),
        Encoding::Utf16Be | Encoding::Utf16Le => decode_utf16(source, encoding),
        Encoding::Utf32Be | Encoding::Utf32Le => decode_utf32(source, encoding),
    }
}

fn next_byte<S: ByteSource + ?Sized>(
    source: &mut S,
    encoding: Encoding,
) -> Result<u8, TranscodeError> {
    source.read_byte().map_err(|e| match e {
        SourceError::Exhausted { offset } => TranscodeError::Truncated { encoding, offset },
        other => TranscodeError::Source(other),
    })
}

fn decode_utf8<S: ByteSource + ?Sized>(
    source: &mut S,
    encoding: Encoding,
) -> Result<char, TranscodeError> {
    let offset = source.position();
    let invalid = TranscodeError::InvalidSequence { encoding, offset };

    let lead = next_byte(source, encoding)?;
    // (continuation bytes, payload bits of the lead byte, smallest legal value)
    let (continuations, mut value, min) = match lead {
        0x00..=0x7F => return Ok(char::from(lead)),
        0xC2..=0xDF => (1, u32::from(lead & 0x1F), 0x80),
        0xE0..=0xEF => (2, u32::from(lead & 0x0F), 0x800),
        0xF0..=0xF4 => (3, u32::from(lead & 0x07), 0x1_0000),
        _ => return Err(invalid),
    };

    for _ in 0..continuations {
        let byte = next_byte(source, encoding)?;
        if byte & 0xC0 != 0x80 {
            // Leave the byte for the next call so the stream stays aligned.
            source.unread_byte(byte)?;
            return Err(invalid);
        }
        value = (value << 6) | u32::from(byte & 0x3F);
    }

    if value < min {
        return Err(invalid);
    }
    char::from_u32(value).ok_or(invalid)
}

fn read_u16<S: ByteSource + ?Sized>(
    source: &mut S,
    encoding: Encoding,
) -> Result<u32, TranscodeError> {
    let b0 = next_byte(source, encoding)?;
    let b1 = next_byte(source, encoding)?;
    let unit = match encoding {
        Encoding::Utf16Le => u16::from_le_bytes([b0, b1]),
        _ => u16::from_be_bytes([b0, b1]),
    };
    Ok(u32::from(unit))
}

fn decode_utf16<S: ByteSource + ?Sized>(
    source: &mut S,
    encoding: Encoding,
) -> Result<char, TranscodeError> {
    let offset = source.position();
    let unit = read_u16(source, encoding)?;

    if is_high_surrogate(unit) {
        let lone = TranscodeError::LoneOrInvalidSurrogate {
            encoding,
            offset,
            unit,
        };
        if !source.has_next() {
            return Err(lone);
        }
        let low = read_u16(source, encoding)?;
        if !is_low_surrogate(low) {
            return Err(lone);
        }
        let value = 0x1_0000 + (unit - 0xD800) * 0x400 + (low - 0xDC00);
        return char::from_u32(value).ok_or(lone);
    }

    if is_low_surrogate(unit) {
        return Err(TranscodeError::LoneOrInvalidSurrogate {
            encoding,
            offset,
            unit,
        });
    }

    char::from_u32(unit).ok_or(TranscodeError::InvalidSequence { encoding, offset })
}

fn decode_utf32<S: ByteSource + ?Sized>(
    source: &mut S,
    encoding: Encoding,
) -> Result<char, TranscodeError> {
    let offset = source.position();
    let mut bytes = [0u8; 4];
    for byte in &mut bytes {
        *byte = next_byte(source, encoding)?;
    }
    let value = match encoding {
        Encoding::Utf32Le => u32::from_le_bytes(bytes),
        _ => u32::from_be_bytes(bytes),
    };

    if is_surrogate(value) {
        return Err(TranscodeError::LoneOrInvalidSurrogate {
            encoding,
            offset,
            unit: value,
        });
    }
    char::from_u32(value).ok_or(TranscodeError::InvalidSequence { encoding, offset })
}

/// Appends the bytes of `scalar` in `encoding` to `sink`.
///
/// Scalars above `U+FFFF` become a surrogate pair in UTF-16.
///
/// # Errors
///
/// [`TranscodeError::UnencodableScalar`] if `scalar` is a surrogate or above
/// `U+10FFFF`. Nothing is written in that case.
pub fn encode_one(
    scalar: u32,
    encoding: Encoding,
    sink: &mut Vec<u8>,
) -> Result<(), TranscodeError> {
    let ch = char::from_u32(scalar)
        .ok_or(TranscodeError::UnencodableScalar { encoding, scalar })?;
    encode_char(ch, encoding, sink);
    Ok(())
}

pub(crate) fn encode_char(ch: char, encoding: Encoding, sink: &mut Vec<u8>) {
    match encoding {
        Encoding::Utf8 | Encoding::Utf8Bom => {
            let mut buf = [0u8; 4];
            sink.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        Encoding::Utf16Be | Encoding::Utf16Le => {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                if encoding == Encoding::Utf16Le {
                    sink.extend_from_slice(&unit.to_le_bytes());
                } else {
                    sink.extend_from_slice(&unit.to_be_bytes());
                }
            }
        }
        Encoding::Utf32Be => sink.extend_from_slice(&u32::from(ch).to_be_bytes()),
        Encoding::Utf32Le => sink.extend_from_slice(&u32::from(ch).to_le_bytes()),
    }
}

/// Consumes and validates the byte-order mark of `encoding`.
///
/// A no-op for [`Encoding::Utf8`]. For [`Encoding::Utf8Bom`] the mark is
/// optional: when the first byte is not `0xEF` it is pushed back and nothing
/// is consumed. A leading `0xEF` must be followed by `BB BF`, since a source
/// only takes one byte of pushback. The slice based helpers ([`decode_all`],
/// [`transcode_bytes`]) see the whole input and have no such restriction.
/// UTF-16 and UTF-32 always require their mark.
///
/// # Errors
///
/// [`TranscodeError::MissingOrWrongBom`] naming the first expected byte that
/// was absent or different, and its offset.
pub fn read_bom<S: ByteSource + ?Sized>(
    encoding: Encoding,
    source: &mut S,
) -> Result<(), TranscodeError> {
    let bom = encoding.bom();
    if bom.is_empty() {
        return Ok(());
    }

    if encoding == Encoding::Utf8Bom {
        if !source.has_next() {
            return Ok(());
        }
        let first = source.read_byte()?;
        if first != bom[0] {
            source.unread_byte(first)?;
            return Ok(());
        }
        return expect_bytes(encoding, source, &bom[1..]);
    }

    expect_bytes(encoding, source, bom)
}

fn expect_bytes<S: ByteSource + ?Sized>(
    encoding: Encoding,
    source: &mut S,
    expected: &[u8],
) -> Result<(), TranscodeError> {
    for &want in expected {
        let offset = source.position();
        let wrong = TranscodeError::MissingOrWrongBom {
            encoding,
            expected: want,
            offset,
        };
        match source.read_byte() {
            Ok(got) if got == want => {}
            Ok(_) | Err(SourceError::Exhausted { .. }) => return Err(wrong),
            Err(other) => return Err(other.into()),
        }
    }
    Ok(())
}

/// Appends the byte-order mark of `encoding` to `sink` (nothing for plain
/// UTF-8).
pub fn write_bom(encoding: Encoding, sink: &mut Vec<u8>) {
    sink.extend_from_slice(encoding.bom());
}

/// An iterator decoding scalar values from a byte source until it is
/// exhausted.
///
/// No byte-order mark handling takes place; call [`read_bom`] first when the
/// input carries one. The iterator yields at most one error and then stops.
#[derive(Debug)]
pub struct Decoder<S> {
    source: S,
    encoding: Encoding,
    failed: bool,
}

impl<S: ByteSource> Decoder<S> {
    /// Decodes `source` as `encoding`, starting at its current position.
    pub fn new(source: S, encoding: Encoding) -> Self {
        Self {
            source,
            encoding,
            failed: false,
        }
    }

    /// The encoding being decoded.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Offset of the next byte the decoder will read.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Gives the source back, positioned after the last decoded scalar.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: ByteSource> Iterator for Decoder<S> {
    type Item = Result<char, TranscodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.source.has_next() {
            return None;
        }
        let item = decode_one(&mut self.source, self.encoding);
        self.failed = item.is_err();
        Some(item)
    }
}

impl<S: ByteSource> core::iter::FusedIterator for Decoder<S> {}

/// Guesses the encoding of `bytes` from its byte-order mark.
///
/// See [`Encoding::detect`].
#[must_use]
pub fn detect_bom(bytes: &[u8]) -> Option<Encoding> {
    Encoding::detect(bytes)
}

/// A source over `bytes` positioned after the mark of `encoding`.
///
/// The optional UTF-8 mark is skipped only when all three of its bytes are
/// there, so mark-less input may start with any scalar.
pub(crate) fn after_bom(
    encoding: Encoding,
    bytes: &[u8],
) -> Result<SliceSource<'_>, TranscodeError> {
    let mut source = SliceSource::new(bytes);
    if encoding != Encoding::Utf8Bom {
        read_bom(encoding, &mut source)?;
    } else if bytes.starts_with(encoding.bom()) {
        for _ in encoding.bom() {
            source.read_byte()?;
        }
    }
    Ok(source)
}

/// Decodes a whole buffer, validating its byte-order mark first.
///
/// # Errors
///
/// The first [`TranscodeError`] met, including a missing or wrong mark.
pub fn decode_all(encoding: Encoding, bytes: &[u8]) -> Result<Vec<char>, TranscodeError> {
    Decoder::new(after_bom(encoding, bytes)?, encoding).collect()
}

/// Encodes `scalars`, preceded by the byte-order mark of `encoding`.
#[must_use]
pub fn encode_all(scalars: &[char], encoding: Encoding) -> Vec<u8> {
    let mut sink = Vec::with_capacity(encoding.bom().len() + scalars.len());
    write_bom(encoding, &mut sink);
    for &ch in scalars {
        encode_char(ch, encoding, &mut sink);
    }
    sink
}

/// Re-encodes `bytes` from `from` to `to`, failing at the first invalid
/// scalar.
///
/// The input mark is validated as in [`decode_all`] and the output mark of
/// `to` is always written.
///
/// # Errors
///
/// The first [`TranscodeError`] met while decoding.
pub fn transcode_bytes(
    bytes: &[u8],
    from: Encoding,
    to: Encoding,
) -> Result<Vec<u8>, TranscodeError> {
    let mut source = after_bom(from, bytes)?;

    let mut sink = Vec::with_capacity(bytes.len() + to.bom().len());
    write_bom(to, &mut sink);
    while source.has_next() {
        let ch = decode_one(&mut source, from)?;
        encode_char(ch, to, &mut sink);
    }
    Ok(sink)
}
