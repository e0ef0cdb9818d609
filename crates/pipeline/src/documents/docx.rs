//! Word (OOXML) text extraction
//!
//! Reads `word/document.xml` out of the package and walks its tags. Body
//! paragraphs come first, one per block; table rows follow, with the
//! non-empty cells of each row joined by ` | `.

use std::io::{Cursor, Read};

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Word(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Word(format!("{}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Word(e.to_string()))?;

    let body = scan_document(&xml);

    let mut text = String::new();
    for paragraph in &body.paragraphs {
        text.push_str(paragraph);
        text.push_str("\n\n");
    }
    for row in &body.rows {
        text.push_str(&row.join(" | "));
        text.push('\n');
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }
    Ok(text.to_string())
}

#[derive(Debug, Default, PartialEq)]
struct DocumentBody {
    /// Non-blank paragraphs outside tables
    paragraphs: Vec<String>,
    /// Rows of top-level tables that have at least one non-blank cell
    rows: Vec<Vec<String>>,
}

#[derive(Default)]
struct Scanner {
    body: DocumentBody,
    table_depth: usize,
    in_text_run: bool,
    paragraph: String,
    cell: String,
    row: Vec<String>,
}

impl Scanner {
    fn push_text(&mut self, text: &str) {
        if self.table_depth == 0 {
            self.paragraph.push_str(text);
        } else {
            self.cell.push_str(text);
        }
    }

    fn open(&mut self, name: &str, self_closing: bool) {
        match name {
            "w:t" if !self_closing => self.in_text_run = true,
            "w:tab" => self.push_text("\t"),
            "w:br" | "w:cr" => self.push_text("\n"),
            "w:tbl" if !self_closing => self.table_depth += 1,
            "w:tr" if self.table_depth == 1 => self.row.clear(),
            "w:tc" if self.table_depth == 1 => self.cell.clear(),
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "w:t" => self.in_text_run = false,
            "w:p" if self.table_depth == 0 => {
                let paragraph = std::mem::take(&mut self.paragraph);
                if !paragraph.trim().is_empty() {
                    self.body.paragraphs.push(paragraph);
                }
            }
            "w:p" => self.cell.push('\n'),
            "w:tc" if self.table_depth == 1 => {
                let cell = std::mem::take(&mut self.cell);
                let cell = cell.trim();
                if !cell.is_empty() {
                    self.row.push(cell.to_string());
                }
            }
            "w:tr" if self.table_depth == 1 => {
                let row = std::mem::take(&mut self.row);
                if !row.is_empty() {
                    self.body.rows.push(row);
                }
            }
            "w:tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            _ => {}
        }
    }
}

fn scan_document(xml: &str) -> DocumentBody {
    let mut scanner = Scanner::default();
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        if scanner.in_text_run && open > 0 {
            scanner.push_text(&unescape(&rest[..open]));
        }

        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        if tag.starts_with('?') || tag.starts_with('!') {
            continue;
        }

        if let Some(name) = tag.strip_prefix('/') {
            scanner.close(name.trim());
        } else {
            let self_closing = tag.ends_with('/');
            let name = tag
                .trim_end_matches('/')
                .split_whitespace()
                .next()
                .unwrap_or_default();
            scanner.open(name, self_closing);
        }
    }

    scanner.body
}

/// Resolve the predefined XML entities and numeric character references
fn unescape(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];

        let decoded = after.find(';').and_then(|semi| {
            let entity = &after[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
