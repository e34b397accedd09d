//! Byte decoding with a fixed encoding fallback list.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Encodings tried in order; the first that decodes without malformed
/// sequences wins. Windows-1252 maps every byte, so it doubles as the
/// latin-1-style last resort.
const ENCODINGS: &[&Encoding] = &[UTF_8, WINDOWS_1252];

/// Decodes raw feed bytes to text.
///
/// Strips a leading byte-order mark and returns the name of the encoding
/// used. `None` means no configured encoding succeeded.
pub fn decode_bytes(bytes: &[u8]) -> Option<(String, &'static str)> {
    for encoding in ENCODINGS {
        let (text, used, malformed) = encoding.decode(bytes);
        if malformed {
            continue;
        }
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text).to_owned();
        return Some((text, used.name()));
    }
    None
}
