//! Pure classification of integers against the Unicode codespace.

/// Number of code points in the Unicode codespace (`U+0000..=U+10FFFF`).
pub const UNICODE_CODESPACE_SIZE: u32 = 0x11_0000;
/// 32 in `U+FDD0..=U+FDEF` plus the last two code points of all 17 planes.
pub const NUMBER_OF_NONCHARACTERS: usize = 66;
/// Code points in the three private use areas.
pub const NUMBER_OF_CODEPOINTS_IN_PRIVATE_USE_AREA: usize = 137_468;
/// Code points that are not surrogates.
pub const NUMBER_OF_VALID_SCALAR_VALUES: usize = 1_112_064;

const MAX_SCALAR: u32 = 0x10_FFFF;

/// `U+D800..=U+DFFF`.
#[must_use]
pub const fn is_surrogate(value: u32) -> bool {
    matches!(value, 0xD800..=0xDFFF)
}

/// `U+D800..=U+DBFF`, the first unit of a UTF-16 pair.
#[must_use]
pub const fn is_high_surrogate(value: u32) -> bool {
    matches!(value, 0xD800..=0xDBFF)
}

/// `U+DC00..=U+DFFF`, the second unit of a UTF-16 pair.
#[must_use]
pub const fn is_low_surrogate(value: u32) -> bool {
    matches!(value, 0xDC00..=0xDFFF)
}

/// `U+FDD0..=U+FDEF` and every `U+xxFFFE` / `U+xxFFFF` of the 17 planes.
#[must_use]
pub const fn is_noncharacter(value: u32) -> bool {
    matches!(value, 0xFDD0..=0xFDEF) || (value <= MAX_SCALAR && value & 0xFFFE == 0xFFFE)
}

/// `U+E000..=U+F8FF`, `U+F0000..=U+FFFFD` and `U+100000..=U+10FFFD`.
#[must_use]
pub const fn is_in_private_use_area(value: u32) -> bool {
    matches!(
        value,
        0xE000..=0xF8FF | 0xF_0000..=0xF_FFFD | 0x10_0000..=0x10_FFFD
    )
}

/// Whether `value` is in the codespace and not a surrogate, i.e. whether it
/// converts to a [`char`].
#[must_use]
pub const fn is_valid_scalar_value(value: u32) -> bool {
    value <= MAX_SCALAR && !is_surrogate(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(range: core::ops::Range<u32>, predicate: fn(u32) -> bool) -> usize {
        range.filter(|&v| predicate(v)).count()
    }

    #[test]
    fn surrogate_boundaries() {
        assert!(!is_surrogate(0xD7FF));
        assert!(is_surrogate(0xD800) && is_high_surrogate(0xD800));
        assert!(is_surrogate(0xDBFF) && is_high_surrogate(0xDBFF));
        assert!(is_surrogate(0xDC00) && is_low_surrogate(0xDC00));
        assert!(is_surrogate(0xDFFF) && is_low_surrogate(0xDFFF));
        assert!(!is_high_surrogate(0xDC00));
        assert!(!is_low_surrogate(0xDBFF));
        assert!(!is_surrogate(0xE000));
    }

    #[test]
    fn codespace_counts() {
        assert_eq!(
            count(0..UNICODE_CODESPACE_SIZE, is_noncharacter),
            NUMBER_OF_NONCHARACTERS
        );
        assert_eq!(
            count(0..0xFF_FFFF, is_in_private_use_area),
            NUMBER_OF_CODEPOINTS_IN_PRIVATE_USE_AREA
        );
        assert_eq!(
            count(0..0xFF_FFFF, is_valid_scalar_value),
            NUMBER_OF_VALID_SCALAR_VALUES
        );
    }

    #[test]
    fn surrogate_and_valid_partition_the_codespace() {
        for v in 0..UNICODE_CODESPACE_SIZE {
            assert!(is_surrogate(v) != is_valid_scalar_value(v), "0x{v:X}");
            assert_eq!(is_valid_scalar_value(v), char::from_u32(v).is_some());
        }
    }

    #[test]
    fn noncharacters_outside_the_codespace_are_not_counted() {
        assert!(is_noncharacter(0x10_FFFF));
        assert!(!is_noncharacter(0x11_FFFF));
        assert!(is_noncharacter(0xFFFE));
        assert!(!is_noncharacter(0xFFFD));
    }
}
