//! # Chapter and Paragraph Segmentation
//!
//! The two structural passes over a legal document: the whole text is split
//! into chapters, then every chapter is split into its numbered paragraphs.

use crate::patterns::HeadingPattern;
use crate::splitter::RegexSplitter;
use crate::types::{Segment, TextBlock};
use tracing::{debug, info, warn};

/// Splits a whole-document block into chapter segments, in document order.
///
/// Chapters carry an empty `parent_title`. Chapter numbering is not validated
/// here; see `report::SegmentationReport`.
pub fn segment_by_chapter(document: &TextBlock, pattern: &HeadingPattern) -> Vec<Segment> {
    let parent_title = document.title.as_deref().unwrap_or_default();
    let chapters = RegexSplitter::new(pattern).split(&document.content, parent_title);

    if chapters.is_empty() {
        warn!("No chapter headings matched `{}`.", pattern.as_str());
    } else {
        info!("Split document into {} chapters.", chapters.len());
    }
    chapters
}

/// Splits every chapter into paragraph segments and flattens the result.
///
/// Each paragraph's `parent_title` is the title of the chapter it came from.
/// Chapter order and in-chapter paragraph order are preserved.
pub fn segment_by_paragraph(chapters: &[Segment], pattern: &HeadingPattern) -> Vec<Segment> {
    let splitter = RegexSplitter::new(pattern);

    let paragraphs: Vec<Segment> = chapters
        .iter()
        .flat_map(|chapter| {
            let paragraphs = splitter.split(&chapter.content, &chapter.title);
            debug!("{}: {} paragraphs", chapter.title, paragraphs.len());
            paragraphs
        })
        .collect();

    if paragraphs.is_empty() && !chapters.is_empty() {
        warn!("No paragraph headings matched `{}`.", pattern.as_str());
    } else {
        info!(
            "Split {} chapters into {} paragraphs.",
            chapters.len(),
            paragraphs.len()
        );
    }
    paragraphs
}
