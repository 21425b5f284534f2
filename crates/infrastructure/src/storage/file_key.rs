//! Reversible mapping between device ids and file names.
//!
//! Only what a file name cannot hold is escaped as `%XX`: path separators,
//! characters reserved on common filesystems, control characters, `%` itself
//! and a leading `.`. Everything else, non-ASCII text included, is kept as
//! written, so ids created by hand (`esp.01.txt`) map to themselves.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

const FILE_NAME: &AsciiSet = &CONTROLS
    .add(b'/')
    .add(b'\\')
    .add(b'%')
    .add(b':')
    .add(b'*')
    .add(b'?')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'|');

pub fn encode(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, c) in key.char_indices() {
        if i == 0 && c == '.' {
            out.push_str("%2E");
        } else if c.is_ascii() {
            let mut buf = [0u8; 4];
            out.extend(utf8_percent_encode(c.encode_utf8(&mut buf), FILE_NAME));
        } else {
            // utf8_percent_encode always escapes non-ASCII bytes
            out.push(c);
        }
    }
    out
}

/// Inverse of [`encode`]. `None` for names this module would not produce.
pub fn decode(name: &str) -> Option<String> {
    let key = percent_decode_str(name).decode_utf8().ok()?;
    (encode(&key) == name).then(|| key.into_owned())
}
