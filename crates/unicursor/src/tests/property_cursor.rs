use alloc::{string::String, vec::Vec};

use quickcheck::{QuickCheck, TestResult};

use super::quickcheck_tests;
use crate::{Cursor, DocumentOptions};

/// Property: a cursor driven by arbitrary moves behaves like a plain
/// position plus a stack, and failed moves leave it untouched.
#[test]
fn cursor_matches_stack_model_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, moves: Vec<u8>) -> TestResult {
        let Ok(mut cursor) = Cursor::from_text(&text, DocumentOptions::default()) else {
            return TestResult::discard();
        };
        let eos = cursor.document().eos_index();
        let mut position = 0usize;
        let mut marks: Vec<usize> = Vec::new();

        for step in moves {
            let before = (cursor.line(), cursor.column());
            let ok = match step % 8 {
                0 | 1 => {
                    let expected = position < eos;
                    if expected {
                        position += 1;
                    }
                    cursor.read().is_ok() == expected
                }
                2 => {
                    let ok = cursor.unread().is_ok();
                    let expected = position > 0;
                    position = position.saturating_sub(1);
                    ok == expected
                }
                3 => {
                    cursor.unread_lenient();
                    if position > 1 {
                        position -= 1;
                    }
                    true
                }
                4 => {
                    let first = cursor.peek();
                    first == cursor.peek()
                        && first.is_ok() == (position < eos)
                        && before == (cursor.line(), cursor.column())
                }
                5 => {
                    cursor.mark();
                    marks.push(position);
                    true
                }
                6 => {
                    let ok = cursor.reset().is_ok();
                    let expected = match marks.pop() {
                        Some(mark) => {
                            position = mark;
                            true
                        }
                        None => false,
                    };
                    ok == expected
                }
                _ => {
                    cursor.full_reset();
                    if let Some(&oldest) = marks.first() {
                        position = oldest;
                    }
                    marks.clear();
                    true
                }
            };
            if !ok || cursor.position() != position || cursor.has_no_marks() != marks.is_empty() {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(String, Vec<u8>) -> TestResult);
}

/// Property: reading a whole document yields its content, and a failed read
/// at the end does not move the line or column.
#[test]
fn reading_to_the_end_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> TestResult {
        let Ok(mut cursor) = Cursor::from_text(&text, DocumentOptions::default()) else {
            return TestResult::discard();
        };
        let content = cursor.document().content().to_vec();
        let read: Vec<char> = cursor.by_ref().collect();
        if read != content || cursor.position() != cursor.document().eos_index() {
            return TestResult::failed();
        }
        let at_end = (cursor.line(), cursor.column());
        TestResult::from_bool(cursor.read().is_err() && at_end == (cursor.line(), cursor.column()))
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(String) -> TestResult);
}
