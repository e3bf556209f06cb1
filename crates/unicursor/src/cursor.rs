//! Backtrackable, position-based traversal of a [`MappedDocument`].
//!
//! A [`Cursor`] starts before the first scalar (position 0, line 0, column 0)
//! and moves one slot at a time. Positions can be saved on a stack with
//! [`Cursor::mark`] and restored with [`Cursor::reset`], which is what a
//! recursive-descent parser needs to try an alternative and back off.
//!
//! Failed moves never change the position. Their errors carry the debug
//! snippet of the position the cursor stayed at.

use alloc::{string::String, sync::Arc, vec::Vec};

use crate::{
    document::{MappedDocument, Symbol},
    encoding::Encoding,
    error::{CursorError, DocumentError, IndexOutOfRange},
    options::DocumentOptions,
    source::ByteSource,
};

/// A read position over a shared document, plus a stack of saved positions.
#[derive(Debug, Clone)]
pub struct Cursor {
    document: Arc<MappedDocument>,
    position: usize,
    marks: Vec<usize>,
}

impl Cursor {
    /// Creates a cursor before the first scalar of `document`.
    pub fn new(document: impl Into<Arc<MappedDocument>>) -> Self {
        Self {
            document: document.into(),
            position: 0,
            marks: Vec::new(),
        }
    }

    /// Maps a decoded byte source and opens a cursor over it. See
    /// [`MappedDocument::decode`].
    ///
    /// # Errors
    ///
    /// As [`MappedDocument::decode`].
    pub fn decode<S: ByteSource>(
        encoding: Encoding,
        source: S,
        options: DocumentOptions,
    ) -> Result<Self, DocumentError> {
        MappedDocument::decode(encoding, source, options).map(Self::new)
    }

    /// # Errors
    ///
    /// As [`MappedDocument::from_bytes`].
    pub fn from_bytes(
        encoding: Encoding,
        bytes: &[u8],
        options: DocumentOptions,
    ) -> Result<Self, DocumentError> {
        MappedDocument::from_bytes(encoding, bytes, options).map(Self::new)
    }

    /// # Errors
    ///
    /// As [`MappedDocument::from_scalars`].
    pub fn from_scalars(scalars: &[char], options: DocumentOptions) -> Result<Self, DocumentError> {
        MappedDocument::from_scalars(scalars, options).map(Self::new)
    }

    /// # Errors
    ///
    /// As [`MappedDocument::from_text`].
    pub fn from_text(text: &str, options: DocumentOptions) -> Result<Self, DocumentError> {
        MappedDocument::from_text(text, options).map(Self::new)
    }

    fn context(&self) -> String {
        self.document.snippet("", self.position)
    }

    /// Moves to the next slot and returns it. Reaching the end-of-stream
    /// slot succeeds once and yields [`Symbol::EndOfStream`].
    ///
    /// # Errors
    ///
    /// [`CursorError::EndOfStream`] if the cursor already is at the end of
    /// the stream.
    pub fn read(&mut self) -> Result<Symbol, CursorError> {
        if self.position >= self.document.eos_index() {
            return Err(CursorError::EndOfStream {
                context: self.context(),
            });
        }
        self.position += 1;
        Ok(self.document.symbol(self.position))
    }

    /// Steps back one slot.
    ///
    /// # Errors
    ///
    /// [`CursorError::NothingToUnread`] at position 0.
    pub fn unread(&mut self) -> Result<(), CursorError> {
        if self.position == 0 {
            return Err(CursorError::NothingToUnread {
                context: self.context(),
            });
        }
        self.position -= 1;
        Ok(())
    }

    /// Steps back one slot unless that would leave the first scalar.
    ///
    /// Unlike [`unread`](Self::unread) this never fails, and it never moves
    /// the cursor below position 1: from position 1 (or 0) it does nothing.
    pub fn unread_lenient(&mut self) {
        if self.position > 1 {
            self.position -= 1;
        }
    }

    /// The next slot, without moving.
    ///
    /// # Errors
    ///
    /// [`CursorError::EndOfStream`] if the cursor is at the end of the
    /// stream.
    pub fn peek(&self) -> Result<Symbol, CursorError> {
        if self.position + 1 > self.document.eos_index() {
            return Err(CursorError::EndOfStream {
                context: self.context(),
            });
        }
        Ok(self.document.symbol(self.position + 1))
    }

    /// Saves the current position on top of the mark stack.
    pub fn mark(&mut self) {
        self.marks.push(self.position);
    }

    /// Returns to the most recent mark and drops it.
    ///
    /// # Errors
    ///
    /// [`CursorError::NoMarkSaved`] if the stack is empty.
    pub fn reset(&mut self) -> Result<(), CursorError> {
        let Some(mark) = self.marks.pop() else {
            return Err(CursorError::NoMarkSaved {
                context: self.context(),
            });
        };
        trace_event!(
            message = "cursor reset",
            from = self.position,
            to = mark,
            marks_left = self.marks.len(),
        );
        self.position = mark;
        Ok(())
    }

    /// Returns to the oldest mark and empties the stack. Does nothing when no
    /// mark is saved.
    pub fn full_reset(&mut self) {
        if let Some(&oldest) = self.marks.first() {
            trace_event!(
                message = "cursor fully reset",
                from = self.position,
                to = oldest,
                marks_dropped = self.marks.len(),
            );
            self.position = oldest;
        }
        self.marks.clear();
    }

    /// Empties the mark stack without moving.
    pub fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /// Whether the mark stack is empty.
    #[must_use]
    pub fn has_no_marks(&self) -> bool {
        self.marks.is_empty()
    }

    /// Line of the current position (0 before the first scalar).
    #[must_use]
    pub fn line(&self) -> usize {
        self.document.line_at(self.position)
    }

    /// Column of the current position (0 before the first scalar).
    #[must_use]
    pub fn column(&self) -> usize {
        self.document.column_at(self.position)
    }

    /// Current position, `0` before the first scalar.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Name of the file the document was read from, if any.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.document.filename()
    }

    /// The shared document under the cursor.
    #[must_use]
    pub fn document(&self) -> &Arc<MappedDocument> {
        &self.document
    }

    /// Debug snippet at the current position.
    /// See [`MappedDocument::render_debug`].
    #[must_use]
    pub fn debug(&self, message: &str) -> String {
        self.document.snippet(message, self.position)
    }

    /// Debug snippet at `pos`.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`] if `pos` is past the end of the stream.
    pub fn debug_at(&self, message: &str, pos: usize) -> Result<String, IndexOutOfRange> {
        self.document.render_debug(message, pos)
    }
}

/// Yields content scalars until the end of the stream.
impl Iterator for Cursor {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.read().ok().and_then(Symbol::as_char)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::{
        document::{EOS_VALUE, LF},
        tests::fixtures::THREE_LINES,
    };

    fn cursor(text: &str) -> Cursor {
        Cursor::from_text(text, DocumentOptions::default()).unwrap()
    }

    fn at(cursor: &Cursor) -> (usize, usize) {
        (cursor.line(), cursor.column())
    }

    #[test]
    fn starts_before_the_stream() {
        let cursor = cursor("a");
        assert_eq!(cursor.position(), 0);
        assert_eq!(at(&cursor), (0, 0));
        assert!(cursor.has_no_marks());
    }

    #[test]
    fn reads_scalars_then_end_of_stream() {
        let mut cursor = cursor("a");
        assert_eq!(cursor.read(), Ok(Symbol::Char('a')));
        assert_eq!(at(&cursor), (1, 1));
        let eos = cursor.read().unwrap();
        assert_eq!(eos.to_i32(), EOS_VALUE);
        assert_eq!(at(&cursor), (1, 2));
    }

    #[test]
    fn reading_past_the_end_keeps_the_position() {
        let mut cursor = cursor("a");
        cursor.read().unwrap();
        cursor.read().unwrap();
        let err = cursor.read().unwrap_err();
        assert_eq!(
            err.to_string(),
            "end of stream reached, no more character to read\na\n ^__ Line 1"
        );
        assert_eq!(cursor.position(), 2);
        assert_eq!(at(&cursor), (1, 2));
        assert!(cursor.read().is_err());
        assert!(matches!(cursor.peek(), Err(CursorError::EndOfStream { .. })));
    }

    #[test]
    fn unread_before_start_fails() {
        let mut cursor = cursor("a");
        assert_eq!(
            cursor.unread(),
            Err(CursorError::NothingToUnread {
                context: "^__ Line 0\na".into(),
            })
        );
    }

    #[test]
    fn unread_across_a_line_feed() {
        let mut cursor = cursor("abc\nxyz");
        for _ in 0..5 {
            cursor.read().unwrap();
        }
        assert_eq!(at(&cursor), (2, 1));
        cursor.unread().unwrap();
        assert_eq!(cursor.peek(), Ok(Symbol::Char('x')));
        assert_eq!(at(&cursor), (1, 4));
        cursor.unread().unwrap();
        assert_eq!(cursor.read(), Ok(Symbol::Char(LF)));
        assert_eq!(at(&cursor), (1, 4));
    }

    #[test]
    fn lenient_unread_stops_at_the_first_scalar() {
        let mut cursor = cursor("ab");
        cursor.read().unwrap();
        cursor.read().unwrap();
        cursor.unread_lenient();
        assert_eq!(cursor.position(), 1);
        cursor.unread_lenient();
        assert_eq!(cursor.position(), 1);
        cursor.unread().unwrap();
        cursor.unread_lenient();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn peek_is_idempotent() {
        let mut cursor = cursor("abc\nxyz");
        assert_eq!(cursor.peek(), Ok(Symbol::Char('a')));
        assert_eq!(cursor.peek(), Ok(Symbol::Char('a')));
        assert_eq!(at(&cursor), (0, 0));
        cursor.read().unwrap();
        assert_eq!(at(&cursor), (1, 1));
    }

    #[test]
    fn marks_restore_in_reverse_order() {
        let mut cursor = cursor("abc");
        cursor.read().unwrap();
        cursor.mark();
        cursor.read().unwrap();
        cursor.mark();
        cursor.read().unwrap();
        cursor.reset().unwrap();
        assert_eq!(cursor.read(), Ok(Symbol::Char('c')));
        cursor.reset().unwrap();
        assert_eq!(cursor.read(), Ok(Symbol::Char('b')));
        assert!(matches!(cursor.reset(), Err(CursorError::NoMarkSaved { .. })));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn full_reset_returns_to_the_oldest_mark() {
        let mut cursor = cursor("abc\nxyz");
        cursor.full_reset();
        assert_eq!(cursor.position(), 0);

        cursor.read().unwrap();
        cursor.mark();
        cursor.read().unwrap();
        cursor.mark();
        cursor.read().unwrap();
        cursor.mark();
        cursor.full_reset();
        assert!(cursor.has_no_marks());
        assert_eq!(cursor.read(), Ok(Symbol::Char('b')));

        cursor.mark();
        cursor.clear_marks();
        assert!(cursor.has_no_marks());
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn debug_follows_the_position() {
        let mut cursor = Cursor::from_text(THREE_LINES, DocumentOptions::named("file.txt")).unwrap();
        cursor.read().unwrap();
        cursor.read().unwrap();
        cursor.read().unwrap();
        cursor.read().unwrap();
        cursor.unread().unwrap();
        cursor.unread().unwrap();
        assert_eq!(
            cursor.debug("This is an exception."),
            "In file file.txt\nThis is an exception.\nline number 1\n ^__ Line 1\nline number 2"
        );
        assert_eq!(cursor.filename(), Some("file.txt"));
        assert_eq!(
            cursor.debug_at("", 0).unwrap(),
            "In file file.txt\n^__ Line 0\nline number 1"
        );
        assert!(cursor.debug_at("", 43).is_err());
    }

    #[test]
    fn cursors_share_one_document() {
        let first = cursor("shared");
        let mut second = Cursor::new(Arc::clone(first.document()));
        assert_eq!(second.read(), Ok(Symbol::Char('s')));
        assert_eq!(first.position(), 0);
        assert_eq!(Arc::strong_count(first.document()), 2);
    }

    #[test]
    fn iterates_over_content() {
        let text: String = cursor("a\r\nb\n\n").collect();
        assert_eq!(text, "a\nb");
    }

    #[test]
    fn empty_text_cannot_be_read() {
        assert_eq!(
            Cursor::from_text("", DocumentOptions::default()).unwrap_err(),
            DocumentError::EmptySource { filename: None }
        );
    }
}
