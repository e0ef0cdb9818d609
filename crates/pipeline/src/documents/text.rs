//! Plain text decoding
//!
//! Decoders are tried in order and the first that accepts the bytes wins.
//! Latin-1 maps every byte, so in practice anything that is not valid UTF-8
//! decodes as Latin-1; the later entries only matter if the list is reordered.

type Decoder = fn(&[u8]) -> Option<String>;

const DECODERS: &[(&str, Decoder)] = &[
    ("utf-8", decode_utf8),
    ("latin-1", decode_latin1),
    ("ascii", decode_ascii),
    ("windows-1252", decode_windows_1252),
];

/// Decode bytes with the first decoder that accepts them, falling back to
/// lossy UTF-8
pub fn decode_text(bytes: &[u8]) -> String {
    for (name, decoder) in DECODERS {
        if let Some(text) = decoder(bytes) {
            tracing::trace!(encoding = name, "Decoded text upload");
            return text;
        }
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn decode_utf8(bytes: &[u8]) -> Option<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes).ok().map(str::to_string)
}

fn decode_latin1(bytes: &[u8]) -> Option<String> {
    Some(bytes.iter().map(|&b| b as char).collect())
}

fn decode_ascii(bytes: &[u8]) -> Option<String> {
    bytes
        .is_ascii()
        .then(|| bytes.iter().map(|&b| b as char).collect())
}

/// Code points for 0x80..=0x9F; `None` marks bytes undefined in Windows-1252
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
            _ => Some(b as char),
        })
        .collect()
}
