//! # rentlaw-pdf: PDF Page Loader
//!
//! This crate provides the `DocumentLoader` for PDF files. It extracts the text
//! of every page with `lopdf`, decoding strings through each font's encoding
//! (including ToUnicode maps), and hands it to the segmentation pipeline either
//! page by page or as one block with pages joined by a form feed.

use lopdf::content::Content;
use lopdf::{Document, Encoding, Object, ObjectId};
use rentlaw::{DocumentLoader, LoadError, TextBlock, PAGE_DELIMITER};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Kerning adjustments (in thousandths of a text unit) at or below this value
/// are rendered as a space.
const WORD_GAP_ADJUSTMENT: f32 = -200.0;

/// Loads PDF files through `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    fn load_single(&self, path: &Path) -> Result<TextBlock, LoadError> {
        let pages = read_pages(path)?;
        Ok(TextBlock::single(pages.join(PAGE_DELIMITER)))
    }

    fn load_pages(&self, path: &Path) -> Result<Vec<TextBlock>, LoadError> {
        let pages = read_pages(path)?;
        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| TextBlock::page(i as u32, text))
            .collect())
    }
}

#[instrument]
fn read_pages(path: &Path) -> Result<Vec<String>, LoadError> {
    let data = std::fs::read(path)?;
    let pages = extract_pages(&data)?;
    info!(
        "Extracted {} pages from '{}'.",
        pages.len(),
        path.display()
    );
    Ok(pages)
}

fn parse_error(e: lopdf::Error) -> LoadError {
    LoadError::PdfParse(e.to_string())
}

/// Extracts the text of every page of a PDF, in page order.
///
/// Text-showing operators are concatenated; a line break (`T*`, `'`, `"`, a
/// `Td`/`TD` that moves vertically, or the end of a text object) adds a
/// single newline.
pub fn extract_pages(pdf_data: &[u8]) -> Result<Vec<String>, LoadError> {
    let document = Document::load_mem(pdf_data).map_err(parse_error)?;
    document
        .page_iter()
        .enumerate()
        .map(|(page_num, page_id)| page_text(&document, page_num, page_id))
        .collect()
}

fn page_text(
    document: &Document,
    page_num: usize,
    page_id: ObjectId,
) -> Result<String, LoadError> {
    let mut encodings: BTreeMap<Vec<u8>, Encoding> = BTreeMap::new();
    for (name, font) in document.get_page_fonts(page_id).map_err(parse_error)? {
        match font.get_font_encoding(document) {
            Ok(encoding) => {
                encodings.insert(name, encoding);
            }
            Err(e) => warn!(
                "Page {}: font '{}' has no usable encoding: {}",
                page_num,
                String::from_utf8_lossy(&name),
                e
            ),
        }
    }

    let content = document.get_page_content(page_id).map_err(parse_error)?;
    let content = Content::decode(&content).map_err(parse_error)?;

    let mut text = String::new();
    let mut encoding: Option<&Encoding> = None;
    for op in &content.operations {
        match op.operator.as_str() {
            "Tf" => {
                encoding = op
                    .operands
                    .first()
                    .and_then(|font| font.as_name().ok())
                    .and_then(|font| encodings.get(font));
            }
            "Tj" => push_strings(&mut text, encoding, &op.operands, page_num),
            "TJ" => {
                for operand in &op.operands {
                    if let Object::Array(items) = operand {
                        for item in items {
                            match item {
                                Object::String(..) => push_strings(
                                    &mut text,
                                    encoding,
                                    std::slice::from_ref(item),
                                    page_num,
                                ),
                                gap => {
                                    if gap.as_float().is_ok_and(|g| g <= WORD_GAP_ADJUSTMENT) {
                                        text.push(' ');
                                    }
                                }
                            }
                        }
                    }
                }
            }
            "'" | "\"" => {
                push_line_break(&mut text);
                push_strings(&mut text, encoding, &op.operands, page_num);
            }
            "T*" | "ET" => push_line_break(&mut text),
            "Td" | "TD" => {
                let moves_down = op
                    .operands
                    .get(1)
                    .and_then(|y| y.as_float().ok())
                    .is_some_and(|y| y != 0.0);
                if moves_down {
                    push_line_break(&mut text);
                }
            }
            _ => {}
        }
    }

    // The break emitted by the last text object belongs to no line.
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn push_strings(
    text: &mut String,
    encoding: Option<&Encoding>,
    operands: &[Object],
    page_num: usize,
) {
    let Some(encoding) = encoding else {
        if operands.iter().any(|o| matches!(o, Object::String(..))) {
            debug!("Page {}: text drawn without a decodable font.", page_num);
        }
        return;
    };
    for operand in operands {
        if let Object::String(bytes, _) = operand {
            match Document::decode_text(encoding, bytes) {
                Ok(decoded) => text.push_str(&decoded),
                Err(e) => warn!("Page {}: could not decode text: {}", page_num, e),
            }
        }
    }
}

fn push_line_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Operation;
    use lopdf::{dictionary, Stream};

    /// Builds a one-page PDF with a WinAnsi-encoded Type1 font.
    fn simple_font_pdf(operations: Vec<Operation>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
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
    fn test_win_ansi_text_and_line_breaks() {
        let pdf = simple_font_pdf(vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 800.into()]),
            Operation::new(
                "Tj",
                vec![Object::string_literal(b"\xa7 1. \x93Leje\x94".to_vec())],
            ),
            Operation::new("Td", vec![0.into(), (-14).into()]),
            Operation::new(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal(b"100".to_vec()),
                    (-250).into(),
                    Object::string_literal(b"\x80 \x96 K\xf8benhavn".to_vec()),
                ])],
            ),
            Operation::new("ET", vec![]),
        ]);

        let pages = extract_pages(&pdf).unwrap();

        assert_eq!(
            pages,
            vec!["§ 1. \u{201c}Leje\u{201d}\n100 \u{20ac} \u{2013} København"]
        );
    }

    #[test]
    fn test_line_breaks_do_not_stack() {
        let mut text = String::new();
        push_line_break(&mut text);
        assert_eq!(text, "");

        text.push_str("§ 1.");
        push_line_break(&mut text);
        push_line_break(&mut text);
        assert_eq!(text, "§ 1.\n");
    }

    #[test]
    fn test_strings_without_font_are_skipped() {
        let mut text = String::new();
        push_strings(&mut text, None, &[Object::string_literal("§ 1.")], 0);
        assert_eq!(text, "");
    }

    #[test]
    fn test_invalid_pdf_is_a_parse_error() {
        let result = extract_pages(b"not a pdf");
        assert!(matches!(result, Err(LoadError::PdfParse(_))));
    }
}
