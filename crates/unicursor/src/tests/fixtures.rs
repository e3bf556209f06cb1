//! Sample inputs shared by the unit tests.

use alloc::vec::Vec;

use crate::encoding::Encoding;

/// One scalar from each UTF-8 length class: ASCII, two Devanagari letters, a
/// CJK ideograph and a Linear B ideogram outside the BMP.
pub(crate) const SCALARS: [char; 5] = ['a', '\u{928}', '\u{93F}', '\u{4E9C}', '\u{10083}'];

const UTF8: &[u8] = &[
    0x61, 0xE0, 0xA4, 0xA8, 0xE0, 0xA4, 0xBF, 0xE4, 0xBA, 0x9C, 0xF0, 0x90, 0x82, 0x83,
];
const UTF16_BE: &[u8] = &[
    0x00, 0x61, 0x09, 0x28, 0x09, 0x3F, 0x4E, 0x9C, 0xD8, 0x00, 0xDC, 0x83,
];
const UTF16_LE: &[u8] = &[
    0x61, 0x00, 0x28, 0x09, 0x3F, 0x09, 0x9C, 0x4E, 0x00, 0xD8, 0x83, 0xDC,
];
const UTF32_BE: &[u8] = &[
    0x00, 0x00, 0x00, 0x61, 0x00, 0x00, 0x09, 0x28, 0x00, 0x00, 0x09, 0x3F, 0x00, 0x00, 0x4E,
    0x9C, 0x00, 0x01, 0x00, 0x83,
];
const UTF32_LE: &[u8] = &[
    0x61, 0x00, 0x00, 0x00, 0x28, 0x09, 0x00, 0x00, 0x3F, 0x09, 0x00, 0x00, 0x9C, 0x4E, 0x00,
    0x00, 0x83, 0x00, 0x01, 0x00,
];

/// [`SCALARS`] encoded without any byte-order mark.
pub(crate) fn body(encoding: Encoding) -> &'static [u8] {
    match encoding {
        Encoding::Utf8 | Encoding::Utf8Bom => UTF8,
        Encoding::Utf16Be => UTF16_BE,
        Encoding::Utf16Le => UTF16_LE,
        Encoding::Utf32Be => UTF32_BE,
        Encoding::Utf32Le => UTF32_LE,
    }
}

/// [`SCALARS`] encoded with the mark of `encoding` in front.
pub(crate) fn with_bom(encoding: Encoding) -> Vec<u8> {
    let mut bytes = encoding.bom().to_vec();
    bytes.extend_from_slice(body(encoding));
    bytes
}

pub(crate) const THREE_LINES: &str = "line number 1\nline number 2\nline number 3\n";

pub(crate) const FIVE_LINES: &str =
    "line number 1\nline number 2\nline number 3\nline number 4\nline number 5\n";

pub(crate) const SEVEN_LINES: &str = "line number 1\nline number 2\nline number 3\nline number 4\n\
                                      line number 5\nline number 6\nline number 7\n";
