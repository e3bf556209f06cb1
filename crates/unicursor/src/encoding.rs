//! The six supported Unicode transfer encodings and their byte-order marks.

use alloc::string::ToString;
use core::{fmt, str::FromStr};

use crate::error::ConfigError;

/// UTF-8 byte-order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 big-endian byte-order mark.
pub const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-16 little-endian byte-order mark.
pub const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-32 big-endian byte-order mark.
pub const UTF32BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];
/// UTF-32 little-endian byte-order mark.
pub const UTF32LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];

/// A Unicode transfer encoding.
///
/// Every variant except [`Encoding::Utf8`] carries a byte-order mark: it is
/// always emitted when encoding, always required when decoding UTF-16 and
/// UTF-32, and optional when decoding [`Encoding::Utf8Bom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Encoding {
    /// UTF-8 without a mark.
    Utf8,
    /// UTF-8 preceded by `EF BB BF`.
    Utf8Bom,
    /// UTF-16, big-endian.
    Utf16Be,
    /// UTF-16, little-endian.
    Utf16Le,
    /// UTF-32, big-endian.
    Utf32Be,
    /// UTF-32, little-endian.
    Utf32Le,
}

impl Encoding {
    /// All supported encodings, in declaration order.
    pub const ALL: [Encoding; 6] = [
        Encoding::Utf8,
        Encoding::Utf8Bom,
        Encoding::Utf16Be,
        Encoding::Utf16Le,
        Encoding::Utf32Be,
        Encoding::Utf32Le,
    ];

    /// The byte-order mark emitted for this encoding (empty for plain UTF-8).
    #[must_use]
    pub const fn bom(self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[],
            Encoding::Utf8Bom => &UTF8_BOM,
            Encoding::Utf16Be => &UTF16BE_BOM,
            Encoding::Utf16Le => &UTF16LE_BOM,
            Encoding::Utf32Be => &UTF32BE_BOM,
            Encoding::Utf32Le => &UTF32LE_BOM,
        }
    }

    /// The display name used in diagnostics, e.g. `UTF-16-BE`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf8Bom => "UTF-8-BOM",
            Encoding::Utf16Be => "UTF-16-BE",
            Encoding::Utf16Le => "UTF-16-LE",
            Encoding::Utf32Be => "UTF-32-BE",
            Encoding::Utf32Le => "UTF-32-LE",
        }
    }

    /// Whether the reader must find a byte-order mark before any content.
    #[must_use]
    pub const fn requires_bom(self) -> bool {
        !matches!(self, Encoding::Utf8 | Encoding::Utf8Bom)
    }

    /// Guesses the encoding of `bytes` from a leading byte-order mark.
    ///
    /// UTF-32-LE is checked before UTF-16-LE since its mark starts with the
    /// UTF-16-LE one. Returns `None` when no mark is present.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Option<Encoding> {
        [
            Encoding::Utf32Le,
            Encoding::Utf32Be,
            Encoding::Utf8Bom,
            Encoding::Utf16Le,
            Encoding::Utf16Be,
        ]
        .into_iter()
        .find(|encoding| bytes.starts_with(encoding.bom()))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = ConfigError;

    /// Parses a case-insensitive encoding name. Dashes and underscores are
    /// ignored, so `UTF-16-BE`, `utf16be` and `utf_16_be` are equivalent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut key = [0u8; 16];
        let mut len = 0;
        for b in s.bytes().filter(|b| !matches!(b, b'-' | b'_')) {
            if len == key.len() {
                return Err(ConfigError::UnknownEncoding(s.to_string()));
            }
            key[len] = b.to_ascii_lowercase();
            len += 1;
        }
        match &key[..len] {
            b"utf8" => Ok(Encoding::Utf8),
            b"utf8bom" => Ok(Encoding::Utf8Bom),
            b"utf16be" => Ok(Encoding::Utf16Be),
            b"utf16le" => Ok(Encoding::Utf16Le),
            b"utf32be" => Ok(Encoding::Utf32Be),
            b"utf32le" => Ok(Encoding::Utf32Le),
            _ => Err(ConfigError::UnknownEncoding(s.to_string())),
        }
    }
}
