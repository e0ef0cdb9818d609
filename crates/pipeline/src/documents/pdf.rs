//! PDF text extraction via `lopdf`

use lopdf::Document;

use super::ExtractionError;

/// Extract text page by page, each page under a `--- Page N ---` marker.
/// A page that fails to decode contributes an inline error note instead.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let mut text = String::new();
    let mut found_text = false;

    for (index, page_number) in doc.get_pages().keys().enumerate() {
        let ordinal = index + 1;
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => {
                found_text |= !page_text.trim().is_empty();
                text.push_str(&format!("\n--- Page {} ---\n{}\n", ordinal, page_text));
            }
            Err(e) => {
                tracing::debug!(page = ordinal, error = %e, "PDF page unreadable");
                text.push_str(&format!("\n[Error reading page {}: {}]\n", ordinal, e));
            }
        }
    }

    if !found_text {
        return Err(ExtractionError::EmptyPdf);
    }

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in pages {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
            ];
            if !line.is_empty() {
                operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            }
            operations.push(Operation::new("ET", vec![]));

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_page_markers() {
        let text = extract(&build_pdf(&["Plant trees", "Save water"])).unwrap();
        assert!(text.starts_with("--- Page 1 ---"));
        assert!(text.contains("Plant trees"));
        assert!(text.contains("--- Page 2 ---"));
        assert!(text.contains("Save water"));
        assert!(text.find("Plant trees") < text.find("Save water"));
    }

    #[test]
    fn test_blank_pdf_is_empty_error() {
        assert_eq!(extract(&build_pdf(&[""])), Err(ExtractionError::EmptyPdf));
    }

    #[test]
    fn test_garbage_is_read_error() {
        let err = extract(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
        assert!(err.to_string().starts_with("Error reading PDF file: "));
    }
}
