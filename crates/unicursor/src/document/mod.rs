//! MappedDocument: the immutable, line/column-indexed view of a scalar stream.
//!
//! What it does
//! - Pulls every scalar from a decoder (or a pre-decoded array) exactly once
//!   and stores it next to its line and column.
//! - Normalizes line terminators on the way in: `CR LF` and lone `CR` both
//!   become a single `LF`.
//! - Drops trailing line feeds and places an end-of-stream slot right after
//!   the last real scalar.
//! - Renders debug snippets: a few lines of source around a position with a
//!   caret under it.
//!
//! Invariants
//! - Slot 0 is a synthetic `LF` at line 0, column 0. Content starts at slot 1,
//!   line 1, column 1.
//! - Slot `eos` is the end-of-stream sentinel, `eos >= 1`. Every position in
//!   `0..=eos` has a line and a column.
//! - A slot following an `LF` starts a new line at column 1; any other slot
//!   stays on the line of its predecessor, one column further.
//! - Nothing is mutated after construction, so a document can be shared
//!   between cursors and threads.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    encoding::Encoding,
    error::{DocumentError, IndexOutOfRange},
    options::DocumentOptions,
    source::{ByteSource, SliceSource},
    transcode::Decoder,
};

/// Line feed, the only line terminator left after mapping.
pub const LF: char = '\n';
/// Carriage return, rewritten to [`LF`] during mapping.
pub const CR: char = '\r';
/// Byte-order mark scalar, `U+FEFF`.
pub const BOM_SCALAR: char = '\u{FEFF}';
/// Integer value of [`Symbol::EndOfStream`].
pub const EOS_VALUE: i32 = -1;

/// Slots added to the backing arrays each time they fill up.
const GROWTH_BLOCK: usize = 4096;

/// A document cell: a scalar value or the end-of-stream sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A scalar value of the document.
    Char(char),
    /// One past the last scalar.
    EndOfStream,
}

impl Symbol {
    /// The scalar value, or [`EOS_VALUE`] at the end of the stream.
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        match self {
            Symbol::Char(ch) => ch as i32,
            Symbol::EndOfStream => EOS_VALUE,
        }
    }

    /// The scalar value, or `None` at the end of the stream.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Symbol::Char(ch) => Some(ch),
            Symbol::EndOfStream => None,
        }
    }

    /// Whether this is the end-of-stream sentinel.
    #[must_use]
    pub const fn is_end_of_stream(self) -> bool {
        matches!(self, Symbol::EndOfStream)
    }
}

impl From<char> for Symbol {
    fn from(ch: char) -> Self {
        Symbol::Char(ch)
    }
}

impl PartialEq<char> for Symbol {
    fn eq(&self, other: &char) -> bool {
        matches!(self, Symbol::Char(ch) if ch == other)
    }
}

fn grow<T>(slots: &mut Vec<T>) {
    if slots.len() == slots.capacity() {
        slots.reserve_exact(GROWTH_BLOCK);
    }
}

/// Where the slot following `(prev, line, column)` lands.
#[inline]
fn next_coordinates(prev: char, line: usize, column: usize) -> (usize, usize) {
    if prev == LF {
        (line + 1, 1)
    } else {
        (line, column + 1)
    }
}

/// Accumulates the three parallel arrays while the input is consumed.
struct Mapper {
    scalars: Vec<char>,
    lines: Vec<usize>,
    columns: Vec<usize>,
    after_cr: bool,
    consumed: usize,
}

impl Mapper {
    fn new() -> Self {
        let mut scalars = Vec::with_capacity(GROWTH_BLOCK);
        let mut lines = Vec::with_capacity(GROWTH_BLOCK);
        let mut columns = Vec::with_capacity(GROWTH_BLOCK);
        scalars.push(LF);
        lines.push(0);
        columns.push(0);
        Self {
            scalars,
            lines,
            columns,
            after_cr: false,
            consumed: 0,
        }
    }

    /// Coordinates of the slot after the last stored one.
    fn next(&self) -> (usize, usize) {
        let last = self.scalars.len() - 1;
        next_coordinates(self.scalars[last], self.lines[last], self.columns[last])
    }

    fn store(&mut self, ch: char) {
        let (line, column) = self.next();
        grow(&mut self.scalars);
        grow(&mut self.lines);
        grow(&mut self.columns);
        self.scalars.push(ch);
        self.lines.push(line);
        self.columns.push(column);
    }

    fn feed(&mut self, ch: char) {
        self.consumed += 1;
        let after_cr = core::mem::replace(&mut self.after_cr, ch == CR);
        match ch {
            // Already stored when the CR was seen.
            LF if after_cr => {}
            CR => self.store(LF),
            _ => self.store(ch),
        }
    }

    fn finish(mut self, options: DocumentOptions) -> Result<MappedDocument, DocumentError> {
        if self.consumed == 0 {
            return Err(DocumentError::EmptySource {
                filename: options.filename,
            });
        }

        let eos = self
            .scalars
            .iter()
            .rposition(|&ch| ch != LF)
            .map_or(1, |last| last + 1);

        trace_event!(
            message = "document mapped",
            eos,
            scalars_read = self.consumed,
            stripped_line_feeds = self.scalars.len() - eos,
            filename = ?options.filename,
        );

        self.scalars.truncate(eos);
        self.lines.truncate(eos);
        self.columns.truncate(eos);
        let (line, column) = self.next();
        self.lines.push(line);
        self.columns.push(column);

        Ok(MappedDocument {
            scalars: self.scalars,
            lines: self.lines,
            columns: self.columns,
            eos,
            options: options.normalized(),
        })
    }
}

/// An immutable scalar array with per-position line and column numbers.
///
/// Positions run from `0` (before the first scalar) to
/// [`eos_index`](Self::eos_index) (the end-of-stream sentinel) inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedDocument {
    /// `scalars[0]` is the synthetic LF; the sentinel slot is not stored.
    scalars: Vec<char>,
    lines: Vec<usize>,
    columns: Vec<usize>,
    eos: usize,
    options: DocumentOptions,
}

impl MappedDocument {
    /// Builds a document from everything `source` yields in `encoding`.
    ///
    /// No byte-order mark is consumed: a mark present in the bytes is kept as
    /// a `U+FEFF` scalar.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::EmptySource`] if the source yields no scalar.
    /// - [`DocumentError::Transcode`] with the first decoding failure.
    pub fn decode<S: ByteSource>(
        encoding: Encoding,
        source: S,
        options: DocumentOptions,
    ) -> Result<Self, DocumentError> {
        let mut mapper = Mapper::new();
        for ch in Decoder::new(source, encoding) {
            match ch {
                Ok(ch) => mapper.feed(ch),
                Err(error) => {
                    trace_event!(
                        message = "decoding failed while mapping document",
                        error = %error,
                        filename = ?options.filename,
                    );
                    return Err(error.into());
                }
            }
        }
        mapper.finish(options)
    }

    /// Builds a document from in-memory bytes. See [`decode`](Self::decode).
    ///
    /// # Errors
    ///
    /// As [`decode`](Self::decode).
    pub fn from_bytes(
        encoding: Encoding,
        bytes: &[u8],
        options: DocumentOptions,
    ) -> Result<Self, DocumentError> {
        Self::decode(encoding, SliceSource::new(bytes), options)
    }

    /// Builds a document from already decoded scalars.
    ///
    /// # Errors
    ///
    /// [`DocumentError::EmptySource`] if `scalars` is empty.
    pub fn from_scalars(scalars: &[char], options: DocumentOptions) -> Result<Self, DocumentError> {
        let mut mapper = Mapper::new();
        for &ch in scalars {
            mapper.feed(ch);
        }
        mapper.finish(options)
    }

    /// Builds a document from text.
    ///
    /// # Errors
    ///
    /// [`DocumentError::EmptySource`] if `text` is empty.
    pub fn from_text(text: &str, options: DocumentOptions) -> Result<Self, DocumentError> {
        let mut mapper = Mapper::new();
        for ch in text.chars() {
            mapper.feed(ch);
        }
        mapper.finish(options)
    }

    fn check(&self, pos: usize) -> Result<(), IndexOutOfRange> {
        IndexOutOfRange::check_inclusive(pos, self.eos)
    }

    /// The cell at `pos`: `LF` at 0, [`Symbol::EndOfStream`] at
    /// [`eos_index`](Self::eos_index).
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`] if `pos > eos_index()`.
    pub fn get_scalar(&self, pos: usize) -> Result<Symbol, IndexOutOfRange> {
        self.check(pos)?;
        Ok(self.symbol(pos))
    }

    /// # Errors
    ///
    /// [`IndexOutOfRange`] if `pos > eos_index()`.
    pub fn get_line(&self, pos: usize) -> Result<usize, IndexOutOfRange> {
        self.check(pos)?;
        Ok(self.lines[pos])
    }

    /// # Errors
    ///
    /// [`IndexOutOfRange`] if `pos > eos_index()`.
    pub fn get_column(&self, pos: usize) -> Result<usize, IndexOutOfRange> {
        self.check(pos)?;
        Ok(self.columns[pos])
    }

    pub(crate) fn symbol(&self, pos: usize) -> Symbol {
        self.scalars
            .get(pos)
            .map_or(Symbol::EndOfStream, |&ch| Symbol::Char(ch))
    }

    pub(crate) fn line_at(&self, pos: usize) -> usize {
        self.lines[pos.min(self.eos)]
    }

    pub(crate) fn column_at(&self, pos: usize) -> usize {
        self.columns[pos.min(self.eos)]
    }

    /// Position of the end-of-stream sentinel.
    #[must_use]
    pub fn eos_index(&self) -> usize {
        self.eos
    }

    /// The filename from the construction options.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.options.filename.as_deref()
    }

    /// The options in effect, with context sizes already coerced to at least
    /// one line.
    #[must_use]
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Number of content scalars, i.e. `eos_index() - 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.eos - 1
    }

    /// Whether nothing but line feeds was read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eos == 1
    }

    /// The content scalars, positions `1..eos_index()`.
    #[must_use]
    pub fn content(&self) -> &[char] {
        &self.scalars[1..]
    }

    /// Line of the end-of-stream slot, the highest line number in the
    /// document.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines[self.eos]
    }

    /// Renders the source around `pos` for diagnostics.
    ///
    /// The snippet is made of, in order:
    /// - `In file <name>` when a filename is set;
    /// - `message` when it is not empty;
    /// - up to `context_before` lines preceding the line of `pos`, and that
    ///   line itself;
    /// - a caret line: `column - 1` spaces then `^__ Line <line>`;
    /// - up to `context_after` following lines.
    ///
    /// Lines are separated by `\n` and the result never ends with one.
    /// Content scalars are copied as they are, a leading `U+FEFF` included,
    /// so the caret stays under the column it reports.
    ///
    /// ```text
    /// Expected: 'i'
    /// line number 2
    /// lane number 3
    ///  ^__ Line 3
    /// ```
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`] if `pos > eos_index()`.
    pub fn render_debug(&self, message: &str, pos: usize) -> Result<String, IndexOutOfRange> {
        self.check(pos)?;
        Ok(self.snippet(message, pos))
    }

    /// First position shown above the reported line.
    fn context_start(&self, line: usize, pos: usize) -> usize {
        if line <= self.options.context_before + 1 {
            return 1;
        }
        let first_line = line - self.options.context_before;
        // lines[0] is 0, so the search always stops.
        (0..pos)
            .rev()
            .find(|&i| self.lines[i] < first_line)
            .map_or(1, |i| i + 1)
    }

    pub(crate) fn snippet(&self, message: &str, pos: usize) -> String {
        let pos = pos.min(self.eos);
        let line = self.lines[pos];
        let column = self.columns[pos];
        let last_line = line + self.options.context_after;

        let mut out = String::new();
        if let Some(name) = &self.options.filename {
            out.push_str("In file ");
            out.push_str(name);
            out.push(LF);
        }
        if !message.is_empty() {
            out.push_str(message);
            out.push(LF);
        }

        let mut i = self.context_start(line, pos);
        while i < self.eos && self.lines[i] <= line {
            out.push(self.scalars[i]);
            i += 1;
        }
        // The reported line is the last one and has no LF of its own.
        if i > 0 && self.scalars[i - 1] != LF {
            out.push(LF);
        }

        out.extend(core::iter::repeat_n(' ', column.saturating_sub(1)));
        out.push_str("^__ Line ");
        out.push_str(&line.to_string());
        out.push(LF);

        while i < self.eos && self.lines[i] <= last_line {
            out.push(self.scalars[i]);
            i += 1;
        }

        if out.ends_with(LF) {
            out.pop();
        }
        out
    }
}
