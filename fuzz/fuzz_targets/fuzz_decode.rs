#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unicursor::{
    Cursor, DocumentOptions, Encoding, MappedDocument, Symbol, decode_all, encode_all,
    transcode_bytes,
};

#[derive(Debug, Arbitrary)]
enum Step {
    Read,
    Unread,
    Mark,
    Reset,
    FullReset,
    Debug,
}

#[derive(Debug, Arbitrary)]
struct Input {
    encoding: u8,
    target: u8,
    before: u8,
    after: u8,
    steps: Vec<Step>,
    bytes: Vec<u8>,
}

fn pick(n: u8) -> Encoding {
    Encoding::ALL[usize::from(n) % Encoding::ALL.len()]
}

fuzz_target!(|input: Input| {
    let encoding = pick(input.encoding);

    // Anything that decodes must survive a trip through every other encoding.
    if let Ok(scalars) = decode_all(encoding, &input.bytes) {
        assert_eq!(decode_all(encoding, &encode_all(&scalars, encoding)).unwrap(), scalars);
        let target = pick(input.target);
        let moved = transcode_bytes(&input.bytes, encoding, target).unwrap();
        assert_eq!(decode_all(target, &moved).unwrap(), scalars);
    }

    let options = DocumentOptions::named("fuzz.txt")
        .with_context(usize::from(input.before % 8), usize::from(input.after % 8));
    let Ok(document) = MappedDocument::from_bytes(encoding, &input.bytes, options) else {
        return;
    };
    let eos = document.eos_index();
    assert!(eos >= 1);
    for pos in 0..=eos {
        let line = document.get_line(pos).unwrap();
        let column = document.get_column(pos).unwrap();
        assert!(pos == 0 || (line >= 1 && column >= 1));
        assert_eq!(document.get_scalar(pos).unwrap() == Symbol::EndOfStream, pos == eos);
    }
    assert!(document.get_scalar(eos + 1).is_err());

    let mut cursor = Cursor::new(document);
    for step in input.steps {
        match step {
            Step::Read => {
                let before = cursor.position();
                let read = cursor.read();
                assert_eq!(read.is_ok(), before < eos);
            }
            Step::Unread => {
                let before = cursor.position();
                assert_eq!(cursor.unread().is_ok(), before > 0);
            }
            Step::Mark => cursor.mark(),
            Step::Reset => {
                let had_marks = !cursor.has_no_marks();
                assert_eq!(cursor.reset().is_ok(), had_marks);
            }
            Step::FullReset => {
                cursor.full_reset();
                assert!(cursor.has_no_marks());
            }
            Step::Debug => {
                assert!(cursor.debug("fuzz").starts_with("In file fuzz.txt\nfuzz\n"));
            }
        }
        assert!(cursor.position() <= eos);
    }
});
