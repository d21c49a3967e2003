use rentlaw::{DocumentLoader, LoadError, TextBlock, PAGE_DELIMITER};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// --- Mock Loader ---

/// An in-memory `DocumentLoader` serving a fixed list of page texts.
#[derive(Clone, Debug)]
pub struct MockLoader {
    pages: Option<Vec<String>>,
    calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl MockLoader {
    pub fn new<S: AsRef<str>>(pages: &[S]) -> Self {
        Self {
            pages: Some(pages.iter().map(|p| p.as_ref().to_string()).collect()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A loader for which every path is missing.
    pub fn missing() -> Self {
        Self {
            pages: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Retrieves the recorded calls (method name and path) for assertion.
    pub fn get_calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &str, path: &Path) -> Result<&[String], LoadError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_path_buf()));

        self.pages.as_deref().ok_or_else(|| {
            LoadError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("MockLoader: no document at '{}'", path.display()),
            ))
        })
    }
}

impl DocumentLoader for MockLoader {
    fn load_single(&self, path: &Path) -> Result<TextBlock, LoadError> {
        let pages = self.record("load_single", path)?;
        Ok(TextBlock::single(pages.join(PAGE_DELIMITER)))
    }

    fn load_pages(&self, path: &Path) -> Result<Vec<TextBlock>, LoadError> {
        let pages = self.record("load_pages", path)?;
        Ok(pages
            .iter()
            .enumerate()
            .map(|(i, text)| TextBlock::page(i as u32, text.as_str()))
            .collect())
    }
}

// --- Fixtures ---

pub mod fixtures {
    use rentlaw::{TextBlock, PAGE_DELIMITER};

    /// A three-page excerpt of a rental act: 3 chapters and 6 paragraphs.
    ///
    /// Page 0 opens with front matter, § 2 runs across the first page break,
    /// § 5 starts right at the top of page 2, and "Stk. 2." mentions "§ 2."
    /// mid-sentence.
    pub const SAMPLE_LAW_PAGES: [&str; 3] = [
        "Bekendtgørelse af lov om leje\n\nKapitel 1\nLovens område\n§ 1. Loven gælder for leje af lokaler.\nStk. 2. Reglerne i § 2. gælder også for fremleje.\n§ 2. Aftaler kan ikke fraviges til skade",
        "for lejeren.\n§ 3. Lejeaftalen skal oprettes skriftligt.\n\nKapitel 2\nDepositum\n§ 4. Udlejeren kan kræve depositum.",
        "§ 5. Depositum må højst udgøre 3 måneders leje.\nKapitel 3\nVedligeholdelse\n§ 6. Lejeren skal vedligeholde\n  låse og nøgler.",
    ];

    /// Pages of each paragraph in `SAMPLE_LAW_PAGES`, § 1 first.
    pub const SAMPLE_LAW_PARAGRAPH_PAGES: [u32; 6] = [0, 0, 1, 1, 2, 2];

    pub fn sample_law_pages() -> Vec<TextBlock> {
        SAMPLE_LAW_PAGES
            .iter()
            .enumerate()
            .map(|(i, text)| TextBlock::page(i as u32, *text))
            .collect()
    }

    /// A two-page law written into generated PDFs: 2 chapters and 3
    /// paragraphs, with Danish letters to exercise font decoding.
    pub const PDF_LAW_PAGES: [&str; 2] = [
        "Lov om leje\nKapitel 1\nLovens område\n§ 1. Loven gælder for leje af lokaler.\n§ 2. Aftaler kan ikke fraviges.",
        "Kapitel 2\nDepositum\n§ 3. Udlejeren kan kræve depositum.",
    ];

    pub fn sample_law_document() -> TextBlock {
        TextBlock::single(SAMPLE_LAW_PAGES.join(PAGE_DELIMITER))
    }
}

// --- Test-Specific Helpers ---
#[cfg(feature = "pdf")]
pub mod helpers {
    use anyhow::Result;
    use printpdf::{
        BuiltinFont, Layer, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, Pt,
        TextItem, TextMatrix, TextRenderingMode,
    };

    /// Generates a PDF with one page per entry of `pages`.
    ///
    /// Every line of a page is written in its own text section, so a text
    /// extractor sees one line break per line.
    pub fn generate_test_pdf_pages(pages: &[&str]) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new("Test PDF");
        let layer_def = Layer::new("Layer 1");
        let layer_id = doc.add_layer(&layer_def);

        let font_bytes = BuiltinFont::Helvetica.get_subset_font().bytes;
        let font = ParsedFont::from_bytes(&font_bytes, 0, &mut Vec::new())
            .ok_or_else(|| anyhow::anyhow!("Failed to parse built-in font"))?;
        let font_id = doc.add_font(&font);

        for text in pages {
            let mut ops = vec![Op::BeginLayer {
                layer_id: layer_id.clone(),
            }];

            for (i, line) in text.lines().enumerate() {
                let y = 280.0 - 6.0 * i as f32;
                ops.extend([
                    Op::StartTextSection,
                    Op::SetFontSize {
                        size: Pt(12.0),
                        font: font_id.clone(),
                    },
                    Op::SetTextMatrix {
                        matrix: TextMatrix::Translate(Mm(10.0).into(), Mm(y).into()),
                    },
                    Op::SetTextRenderingMode {
                        mode: TextRenderingMode::Fill,
                    },
                    Op::WriteText {
                        items: vec![TextItem::Text(line.to_string())],
                        font: font_id.clone(),
                    },
                    Op::EndTextSection,
                ]);
            }
            ops.push(Op::EndLayer {
                layer_id: layer_id.clone(),
            });

            let mut page = PdfPage::new(Mm(210.0), Mm(297.0), vec![]);
            page.ops = ops;
            doc.pages.push(page);
        }

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            // In a test context, it's fine to just print warnings.
            eprintln!("PDF generation warnings: {warnings:?}");
        }

        Ok(bytes)
    }
}
