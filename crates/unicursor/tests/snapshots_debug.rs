#![allow(missing_docs)]

mod common;

use unicursor::{
    Cursor, CursorError, DocumentOptions, Encoding, MappedDocument, SliceSource, Symbol,
};

use crate::common::{CONFIG, LANE, encode_without_mark};

/// Reads `key = value` lines and reports the first malformed one.
fn parse_config(cursor: &mut Cursor) -> Result<Vec<(String, String)>, String> {
    let mut entries = Vec::new();
    loop {
        let mut key = String::new();
        loop {
            match cursor.read().map_err(|e| e.to_string())? {
                Symbol::EndOfStream => return Ok(entries),
                Symbol::Char(' ') => break,
                Symbol::Char(ch) => key.push(ch),
            }
        }
        cursor.mark();
        if cursor.read() != Ok(Symbol::Char('=')) {
            cursor.reset().map_err(|e| e.to_string())?;
            return Err(cursor.debug("Expected: '='"));
        }
        cursor.clear_marks();
        cursor.read().map_err(|e| e.to_string())?;
        let mut value = String::new();
        loop {
            match cursor.read().map_err(|e| e.to_string())? {
                Symbol::Char('\n') => break,
                Symbol::EndOfStream => {
                    entries.push((key, value));
                    return Ok(entries);
                }
                Symbol::Char(ch) => value.push(ch),
            }
        }
        entries.push((key, value));
    }
}

#[test]
fn snapshot_lane_scenario() {
    let doc = MappedDocument::from_bytes(
        Encoding::Utf8,
        LANE.as_bytes(),
        DocumentOptions::default(),
    )
    .unwrap();
    insta::assert_snapshot!(doc.render_debug("Expected: 'i'", 30).unwrap(), @r"
    Expected: 'i'
    line number 2
    lane number 3
     ^__ Line 3
    ");
}

#[test]
fn snapshot_config_error_in_every_encoding() {
    for encoding in Encoding::ALL {
        let bytes = encode_without_mark(CONFIG, encoding);
        let mut cursor = Cursor::decode(
            encoding,
            SliceSource::new(&bytes),
            DocumentOptions::named("Cargo.conf"),
        )
        .unwrap();
        let err = parse_config(&mut cursor).unwrap_err();
        insta::allow_duplicates! {
        insta::assert_snapshot!(err, @r"
        In file Cargo.conf
        Expected: '='
        version = 0.1.0
        edition 2024
               ^__ Line 3
        license = MIT
        ");
        }
    }
}

#[test]
fn snapshot_valid_config() {
    let mut cursor = Cursor::from_text(
        "a = 1\nb = two\n",
        DocumentOptions::default(),
    )
    .unwrap();
    let entries = parse_config(&mut cursor).unwrap();
    insta::assert_snapshot!(format!("{entries:?}"), @r#"[("a", "1"), ("b", "two")]"#);
}

#[test]
fn snapshot_end_of_stream_error() {
    let mut cursor = Cursor::from_text("key", DocumentOptions::named("short.conf")).unwrap();
    while cursor.read() != Ok(Symbol::EndOfStream) {}
    let err = cursor.read().unwrap_err();
    assert!(matches!(err, CursorError::EndOfStream { .. }));
    insta::assert_snapshot!(err, @r"
    end of stream reached, no more character to read
    In file short.conf
    key
       ^__ Line 1
    ");
}

#[test]
fn snapshot_wide_context() {
    let text: String = (1..=9).map(|n| format!("entry {n}\n")).collect();
    let doc = MappedDocument::from_text(
        &text,
        DocumentOptions::named("entries.txt").with_context(3, 2),
    )
    .unwrap();
    // Line 6, column 7 is the digit.
    let pos = 5 * 8 + 7;
    assert_eq!(doc.get_scalar(pos), Ok(Symbol::Char('6')));
    insta::assert_snapshot!(doc.render_debug("unexpected digit", pos).unwrap(), @r"
    In file entries.txt
    unexpected digit
    entry 3
    entry 4
    entry 5
    entry 6
          ^__ Line 6
    entry 7
    entry 8
    ");
}
