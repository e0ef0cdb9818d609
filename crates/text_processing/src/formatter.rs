//! Response formatting
//!
//! Converts markdown-like model output into a flat sequence of presentation
//! blocks and renders them as HTML fragments:
//!
//! - `## Title` lines become `<h3>` headings
//! - `- item`, `• item` and `1. item` lines become `<li>` entries inside `<ul>`
//! - any other non-blank line becomes a `<p>` paragraph
//! - emphasis markers are stripped; a single `*span*` becomes `<strong>`
//!
//! Text content is not HTML-escaped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMPHASIS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{2,}").unwrap());
static EMPHASIS_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:-|•|\d+\.)\s*").unwrap());

/// One unit of formatted output, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum FormattedBlock {
    Heading(String),
    ListStart,
    ListItem(String),
    ListEnd,
    Paragraph(String),
}

impl FormattedBlock {
    fn render(&self) -> String {
        match self {
            FormattedBlock::Heading(text) => format!("<h3>{}</h3>", text),
            FormattedBlock::ListStart => "<ul>".to_string(),
            FormattedBlock::ListItem(text) => format!("<li>{}</li>", text),
            FormattedBlock::ListEnd => "</ul>".to_string(),
            FormattedBlock::Paragraph(text) => format!("<p>{}</p>", text),
        }
    }
}

fn normalize_emphasis(raw: &str) -> String {
    let text = EMPHASIS_RUN.replace_all(raw, "");
    let text = EMPHASIS_SPAN.replace_all(&text, "<strong>$1</strong>");
    text.replace('*', "")
}

fn close_list(blocks: &mut Vec<FormattedBlock>, in_list: &mut bool) {
    if *in_list {
        blocks.push(FormattedBlock::ListEnd);
        *in_list = false;
    }
}

fn is_list_item(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("• ") || NUMBERED_ITEM.is_match(line)
}

/// Split raw model output into blocks
pub fn format_blocks(raw: &str) -> Vec<FormattedBlock> {
    let text = normalize_emphasis(raw);
    let mut blocks = Vec::new();
    let mut in_list = false;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            close_list(&mut blocks, &mut in_list);
        } else if line.starts_with("##") {
            close_list(&mut blocks, &mut in_list);
            let heading = line.replace('#', "");
            blocks.push(FormattedBlock::Heading(heading.trim().to_string()));
        } else if is_list_item(line) {
            if !in_list {
                blocks.push(FormattedBlock::ListStart);
                in_list = true;
            }
            let item = LIST_MARKER.replace(line, "");
            blocks.push(FormattedBlock::ListItem(item.into_owned()));
        } else {
            close_list(&mut blocks, &mut in_list);
            blocks.push(FormattedBlock::Paragraph(line.to_string()));
        }
    }
    close_list(&mut blocks, &mut in_list);

    blocks
}

/// Render blocks one element per line
pub fn render_blocks(blocks: &[FormattedBlock]) -> String {
    blocks
        .iter()
        .map(FormattedBlock::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format raw model output as HTML markup
///
/// When nothing survives formatting the trimmed input itself, emphasis
/// markers included, is wrapped in a single paragraph. Empty input yields
/// `<p></p>`.
pub fn format_response(raw: &str) -> String {
    let markup = render_blocks(&format_blocks(raw));
    if markup.trim().is_empty() {
        format!("<p>{}</p>", raw.trim())
    } else {
        markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FormattedBlock::*;

    #[test]
    fn test_heading_list_paragraph() {
        let blocks = format_blocks("## Title\n- a\n- b\nEnd");
        assert_eq!(
            blocks,
            vec![
                Heading("Title".into()),
                ListStart,
                ListItem("a".into()),
                ListItem("b".into()),
                ListEnd,
                Paragraph("End".into()),
            ]
        );
    }

    #[test]
    fn test_single_paragraph() {
        let blocks = format_blocks("  Solar panels convert sunlight into electricity.  ");
        assert_eq!(
            blocks,
            vec![Paragraph("Solar panels convert sunlight into electricity.".into())]
        );
    }

    #[test]
    fn test_numbered_and_bullet_markers() {
        let blocks = format_blocks("1. First\n12. Twelfth\n• Dot");
        assert_eq!(
            blocks,
            vec![
                ListStart,
                ListItem("First".into()),
                ListItem("Twelfth".into()),
                ListItem("Dot".into()),
                ListEnd,
            ]
        );
    }

    #[test]
    fn test_blank_line_closes_list() {
        let blocks = format_blocks("- a\n\n- b");
        assert_eq!(
            blocks,
            vec![
                ListStart,
                ListItem("a".into()),
                ListEnd,
                ListStart,
                ListItem("b".into()),
                ListEnd,
            ]
        );
    }

    #[test]
    fn test_emphasis_handling() {
        assert_eq!(
            format_response("Use *less* plastic and **more** glass"),
            "<p>Use <strong>less</strong> plastic and more glass</p>"
        );
        assert_eq!(format_response("stray * star"), "<p>stray  star</p>");
    }

    #[test]
    fn test_heading_strips_all_hashes() {
        assert_eq!(format_blocks("### Deep #dive"), vec![Heading("Deep dive".into())]);
    }

    #[test]
    fn test_render_joins_with_newlines() {
        assert_eq!(
            format_response("## Steps\n1. Sort\n2. Rinse\nDone"),
            "<h3>Steps</h3>\n<ul>\n<li>Sort</li>\n<li>Rinse</li>\n</ul>\n<p>Done</p>"
        );
    }

    #[test]
    fn test_fallback_for_empty_markup() {
        assert_eq!(format_response(""), "<p></p>");
        assert_eq!(format_response("   \n  "), "<p></p>");
        assert_eq!(format_response("****"), "<p>****</p>");
    }

    #[test]
    fn test_dash_without_space_is_paragraph() {
        assert_eq!(format_blocks("-not a list"), vec![Paragraph("-not a list".into())]);
    }
}
