//! RTF text extraction
//!
//! Strips control words and skips non-text destinations (font and colour
//! tables, stylesheets, metadata, pictures and any `{\*...}` group).
//! Paragraph and line controls become newlines; `\'hh` escapes go through
//! the plain text decoders and `\uN` is read as a Unicode code point.

use super::{text::decode_text, ExtractionError};

const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "header",
    "footer",
    "themedata",
    "datastore",
    "xmlnstbl",
    "listtable",
    "listoverridetable",
    "rsidtbl",
    "generator",
];

pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let source = decode_text(bytes);
    if !source.trim_start().starts_with("{\\rtf") {
        return Err(ExtractionError::Rtf("missing {\\rtf header".to_string()));
    }

    let text = strip(&source);
    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }
    Ok(text.to_string())
}

fn strip(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::new();
    // One entry per open group: whether its content is skipped
    let mut groups: Vec<bool> = Vec::new();
    let mut skipping = false;
    // Fallback characters still to drop after a `\uN`
    let mut pending_fallback = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '{' => {
                groups.push(skipping);
                if chars.get(i + 1) == Some(&'\\') && chars.get(i + 2) == Some(&'*') {
                    skipping = true;
                }
                i += 1;
            }
            '}' => {
                skipping = groups.pop().unwrap_or(false);
                i += 1;
            }
            '\\' => {
                i += 1;
                let Some(&next) = chars.get(i) else { break };

                if next.is_ascii_alphabetic() {
                    let start = i;
                    while i < chars.len() && chars[i].is_ascii_alphabetic() {
                        i += 1;
                    }
                    let word: String = chars[start..i].iter().collect();

                    let param_start = i;
                    if chars.get(i) == Some(&'-') {
                        i += 1;
                    }
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                    let param: Option<i32> = chars[param_start..i]
                        .iter()
                        .collect::<String>()
                        .parse()
                        .ok();
                    if chars.get(i) == Some(&' ') {
                        i += 1;
                    }

                    if SKIPPED_DESTINATIONS.contains(&word.as_str()) {
                        skipping = true;
                        continue;
                    }
                    if skipping {
                        continue;
                    }

                    match word.as_str() {
                        "par" | "line" | "sect" | "page" => out.push('\n'),
                        "tab" | "cell" => out.push('\t'),
                        "row" => out.push('\n'),
                        "emdash" => out.push('\u{2014}'),
                        "endash" => out.push('\u{2013}'),
                        "bullet" => out.push('\u{2022}'),
                        "lquote" => out.push('\u{2018}'),
                        "rquote" => out.push('\u{2019}'),
                        "ldblquote" => out.push('\u{201C}'),
                        "rdblquote" => out.push('\u{201D}'),
                        "u" => {
                            if let Some(code) = param {
                                let code = if code < 0 { code + 65_536 } else { code };
                                if let Some(ch) = char::from_u32(code as u32) {
                                    out.push(ch);
                                }
                                pending_fallback = 1;
                            }
                        }
                        _ => {}
                    }
                } else if next == '\'' {
                    let hex: String = chars.iter().skip(i + 1).take(2).collect();
                    i += 1 + hex.len();
                    if skipping {
                        continue;
                    }
                    if pending_fallback > 0 {
                        pending_fallback -= 1;
                        continue;
                    }
                    if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                        out.push_str(&decode_text(&[byte]));
                    }
                } else {
                    i += 1;
                    if skipping {
                        continue;
                    }
                    match next {
                        '\\' | '{' | '}' => out.push(next),
                        '~' => out.push('\u{00A0}'),
                        '\n' | '\r' => out.push('\n'),
                        _ => {}
                    }
                }
            }
            '\r' | '\n' => i += 1,
            _ => {
                i += 1;
                if skipping {
                    continue;
                }
                if pending_fallback > 0 {
                    pending_fallback -= 1;
                    continue;
                }
                out.push(c);
            }
        }
    }

    out
}
