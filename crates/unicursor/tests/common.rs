#![allow(missing_docs, dead_code)]

pub const LANE: &str = "line number 1\nline number 2\nlane number 3\n";

pub const CONFIG: &str = "name = unicursor\r\nversion = 0.1.0\r\nedition 2024\r\nlicense = MIT\r\n";

/// Encodes `text` in `encoding` without any byte-order mark.
pub fn encode_without_mark(text: &str, encoding: unicursor::Encoding) -> Vec<u8> {
    let mut bytes = Vec::new();
    for ch in text.chars() {
        unicursor::encode_one(u32::from(ch), encoding, &mut bytes).unwrap();
    }
    bytes
}
