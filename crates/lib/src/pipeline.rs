//! # Segmentation Pipeline
//!
//! Runs the stages in order: chapters from the whole text, paragraphs from the
//! chapters, then page numbers from the per-page text. The pipeline holds only
//! its compiled patterns, so one instance can be shared across threads and a
//! run never depends on a previous one.

use crate::errors::{IndexError, SegmentError};
use crate::loader::DocumentLoader;
use crate::pages;
use crate::patterns::HeadingPatterns;
use crate::segment;
use crate::types::{Segment, SegmentedLaw, TextBlock};
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default)]
pub struct SegmentationPipeline {
    patterns: HeadingPatterns,
}

impl SegmentationPipeline {
    pub fn new(patterns: HeadingPatterns) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &HeadingPatterns {
        &self.patterns
    }

    pub fn segment_by_chapter(&self, document: &TextBlock) -> Vec<Segment> {
        segment::segment_by_chapter(document, &self.patterns.chapter)
    }

    pub fn segment_by_paragraph(&self, chapters: &[Segment]) -> Vec<Segment> {
        segment::segment_by_paragraph(chapters, &self.patterns.paragraph)
    }

    pub fn annotate_pages(
        &self,
        paragraphs: Vec<Segment>,
        pages: &[TextBlock],
    ) -> Result<Vec<Segment>, SegmentError> {
        pages::annotate_pages(paragraphs, pages, &self.patterns.paragraph)
    }

    /// Runs all stages over text that has already been extracted.
    ///
    /// `document` and `pages` must come from the same source document.
    pub fn run(
        &self,
        document: &TextBlock,
        pages: &[TextBlock],
    ) -> Result<SegmentedLaw, SegmentError> {
        let chapters = self.segment_by_chapter(document);
        let paragraphs = self.segment_by_paragraph(&chapters);
        let paragraphs = self.annotate_pages(paragraphs, pages)?;
        Ok(SegmentedLaw {
            chapters,
            paragraphs,
        })
    }

    /// Runs chapter and paragraph segmentation only; pages stay unset.
    pub fn run_without_pages(&self, document: &TextBlock) -> SegmentedLaw {
        let chapters = self.segment_by_chapter(document);
        let paragraphs = self.segment_by_paragraph(&chapters);
        SegmentedLaw {
            chapters,
            paragraphs,
        }
    }

    /// Loads a document through `loader` in both modes and runs all stages.
    #[instrument(skip(self, loader))]
    pub fn index_document(
        &self,
        loader: &dyn DocumentLoader,
        path: &Path,
    ) -> Result<SegmentedLaw, IndexError> {
        let document = loader.load_single(path)?;
        let pages = loader.load_pages(path)?;
        info!(
            "Loaded '{}': {} pages, {} characters.",
            path.display(),
            pages.len(),
            document.content.chars().count()
        );

        let law = self.run(&document, &pages)?;
        info!(
            "Indexed '{}' into {} chapters and {} paragraphs.",
            path.display(),
            law.chapters.len(),
            law.paragraphs.len()
        );
        Ok(law)
    }
}
