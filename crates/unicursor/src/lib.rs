//! Unicode input front-end for hand-written scanners and parsers.
//!
//! Three layers, each usable on its own:
//!
//! - [`transcode`]: strict conversion between bytes and scalar values for
//!   UTF-8 (with or without byte-order mark), UTF-16 and UTF-32 in both byte
//!   orders.
//! - [`MappedDocument`]: a decoded input with line terminators normalized and
//!   every position mapped to its line and column, able to render
//!   caret-annotated debug snippets.
//! - [`Cursor`]: a backtrackable read position over a shared document.
//!
//! ```
//! use unicursor::{Cursor, DocumentOptions, Encoding, Symbol};
//!
//! let mut cursor =
//!     Cursor::from_bytes(Encoding::Utf8, b"let x\r\n= 1;", DocumentOptions::named("a.txt"))?;
//! cursor.mark();
//! assert_eq!(cursor.read()?, Symbol::Char('l'));
//! cursor.reset()?;
//! for _ in 0..7 {
//!     cursor.read()?;
//! }
//! assert_eq!((cursor.line(), cursor.column()), (2, 1));
//! assert_eq!(
//!     cursor.debug("unexpected '='"),
//!     "In file a.txt\nunexpected '='\nlet x\n= 1;\n^__ Line 2"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

/// Emits a `tracing` debug event when the `tracing` feature is enabled, and
/// nothing otherwise.
macro_rules! trace_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
    };
}

mod cursor;
mod document;
mod encoding;
mod error;
mod options;
mod scalar_buffer;
mod source;
pub mod transcode;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use document::{BOM_SCALAR, CR, EOS_VALUE, LF, MappedDocument, Symbol};
pub use encoding::{
    Encoding, UTF8_BOM, UTF16BE_BOM, UTF16LE_BOM, UTF32BE_BOM, UTF32LE_BOM,
};
pub use error::{
    Bound, ConfigError, CursorError, DocumentError, IndexOutOfRange, SourceError, TranscodeError,
};
pub use options::DocumentOptions;
pub use scalar_buffer::ScalarBuffer;
#[cfg(feature = "std")]
pub use source::ReaderSource;
pub use source::{ByteSource, SliceSource};
pub use transcode::{
    Decoder, decode_all, decode_one, detect_bom, encode_all, encode_one, read_bom,
    transcode_bytes, write_bom,
};
