//! # Page Annotation
//!
//! Maps paragraph ordinals to the physical page their heading is printed on
//! and attaches that page to the paragraph segments.

use crate::errors::SegmentError;
use crate::patterns::{heading_ordinal, HeadingPattern};
use crate::types::{Segment, TextBlock};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Mapping from paragraph ordinal to the page its heading was found on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    pages: HashMap<u32, u32>,
}

impl PageIndex {
    /// Scans every page for headings and records the page of each ordinal.
    ///
    /// When an ordinal occurs on several pages (a table of contents, or a
    /// heading repeated around a page break) the page scanned last wins.
    /// Blocks without a `page_index` are skipped.
    pub fn build(pages: &[TextBlock], pattern: &HeadingPattern) -> Result<Self, SegmentError> {
        let mut index = Self::default();

        for block in pages {
            let Some(page_index) = block.page_index else {
                warn!("Skipping text block without a page index during page scan.");
                continue;
            };

            for heading in pattern.headings(&block.content) {
                let ordinal = heading_ordinal(heading.as_str())?;
                if let Some(previous) = index.pages.insert(ordinal, page_index) {
                    if previous != page_index {
                        debug!(
                            "Heading {} seen on page {} and again on page {}; keeping the later page.",
                            heading.as_str().trim(),
                            previous,
                            page_index
                        );
                    }
                }
            }
        }
        Ok(index)
    }

    pub fn get(&self, ordinal: u32) -> Option<u32> {
        self.pages.get(&ordinal).copied()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Sets `page` on every paragraph from the headings found in `pages`.
///
/// A paragraph whose heading was not found on any page gets `page = None`.
/// A paragraph title without an ordinal aborts the annotation.
pub fn annotate_pages(
    mut paragraphs: Vec<Segment>,
    pages: &[TextBlock],
    pattern: &HeadingPattern,
) -> Result<Vec<Segment>, SegmentError> {
    let index = PageIndex::build(pages, pattern)?;
    info!(
        "Found {} paragraph headings across {} pages.",
        index.len(),
        pages.len()
    );

    let mut missing = 0;
    for paragraph in &mut paragraphs {
        let ordinal = heading_ordinal(&paragraph.title)?;
        paragraph.page = index.get(ordinal);
        if paragraph.page.is_none() {
            missing += 1;
            warn!("No page found for paragraph {}.", paragraph.title);
        }
    }

    if missing > 0 {
        warn!("{missing} of {} paragraphs have no page.", paragraphs.len());
    }
    Ok(paragraphs)
}
