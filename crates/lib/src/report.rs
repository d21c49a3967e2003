//! # Segmentation Report
//!
//! Structural checks over a segmented document. The segmenters never validate
//! numbering themselves; callers use this report to decide whether a document
//! matched the expected conventions (chapters and paragraphs numbered from 1
//! without gaps, every paragraph linked to a chapter and placed on a page, and
//! pages never going backwards).

use crate::errors::SegmentError;
use crate::patterns::heading_ordinal;
use crate::types::{Segment, SegmentedLaw};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Gaps and repeats in a sequence of heading ordinals expected to run 1..=N.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrdinalCheck {
    pub count: usize,
    /// Number of ordinals in 1..=max that never occur.
    pub missing_count: u64,
    /// The first missing ordinals, at most `count` of them.
    pub missing: Vec<u32>,
    /// Ordinals that occur more than once.
    pub repeated: Vec<u32>,
    /// Positions where the ordinal is not the previous ordinal plus one.
    pub out_of_order: Vec<usize>,
}

impl OrdinalCheck {
    fn new(segments: &[Segment]) -> Result<Self, SegmentError> {
        let ordinals = segments
            .iter()
            .map(|s| heading_ordinal(&s.title))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = BTreeSet::new();
        let mut repeated = BTreeSet::new();
        for &ordinal in &ordinals {
            if !seen.insert(ordinal) {
                repeated.insert(ordinal);
            }
        }

        // Only gaps between distinct ordinals are walked; at most `count`
        // missing ordinals are listed.
        let mut missing_count = 0u64;
        let mut missing = Vec::new();
        let mut next = 1u64;
        for &ordinal in &seen {
            let ordinal = u64::from(ordinal);
            if ordinal > next {
                missing_count += ordinal - next;
                let room = ordinals.len().saturating_sub(missing.len()) as u64;
                let listed = (ordinal - next).min(room);
                missing.extend((next..next + listed).map(|o| o as u32));
            }
            next = next.max(ordinal + 1);
        }

        let out_of_order = ordinals
            .iter()
            .enumerate()
            .filter(|&(i, &ordinal)| {
                let expected = if i == 0 {
                    Some(1)
                } else {
                    ordinals[i - 1].checked_add(1)
                };
                expected != Some(ordinal)
            })
            .map(|(i, _)| i)
            .collect();

        Ok(Self {
            count: ordinals.len(),
            missing_count,
            missing,
            repeated: repeated.into_iter().collect(),
            out_of_order,
        })
    }

    pub fn is_continuous(&self) -> bool {
        self.missing_count == 0 && self.repeated.is_empty() && self.out_of_order.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SegmentationReport {
    pub chapters: OrdinalCheck,
    pub paragraphs: OrdinalCheck,
    /// Paragraph titles whose parent is not one of the chapter titles.
    pub orphaned_paragraphs: Vec<String>,
    /// Paragraph titles without a page.
    pub paragraphs_without_page: Vec<String>,
    /// Paragraph titles whose page is lower than the page of the paragraph before.
    pub page_regressions: Vec<String>,
}

impl SegmentationReport {
    pub fn new(law: &SegmentedLaw) -> Result<Self, SegmentError> {
        let chapter_titles: HashSet<&str> =
            law.chapters.iter().map(|c| c.title.as_str()).collect();

        let orphaned_paragraphs = law
            .paragraphs
            .iter()
            .filter(|p| !chapter_titles.contains(p.parent_title.as_str()))
            .map(|p| p.title.clone())
            .collect();

        let paragraphs_without_page = law
            .paragraphs
            .iter()
            .filter(|p| p.page.is_none())
            .map(|p| p.title.clone())
            .collect();

        let mut page_regressions = Vec::new();
        let mut last_page = None;
        for paragraph in &law.paragraphs {
            if let Some(page) = paragraph.page {
                if last_page.is_some_and(|last| page < last) {
                    page_regressions.push(paragraph.title.clone());
                }
                last_page = Some(page);
            }
        }

        Ok(Self {
            chapters: OrdinalCheck::new(&law.chapters)?,
            paragraphs: OrdinalCheck::new(&law.paragraphs)?,
            orphaned_paragraphs,
            paragraphs_without_page,
            page_regressions,
        })
    }

    /// True when the document has chapters and paragraphs and every check passes.
    pub fn is_well_formed(&self) -> bool {
        self.chapters.count > 0
            && self.paragraphs.count > 0
            && self.chapters.is_continuous()
            && self.paragraphs.is_continuous()
            && self.orphaned_paragraphs.is_empty()
            && self.paragraphs_without_page.is_empty()
            && self.page_regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(n: u32, chapter: &str, page: Option<u32>) -> Segment {
        let mut segment = Segment::new(format!("§ {n}. Tekst."), format!("§ {n}."), chapter);
        segment.page = page;
        segment
    }

    fn chapter(n: u32) -> Segment {
        Segment::new(format!("Kapitel {n} Tekst"), format!("Kapitel {n}"), "")
    }

    #[test]
    fn test_well_formed_document() {
        let law = SegmentedLaw {
            chapters: vec![chapter(1), chapter(2)],
            paragraphs: vec![
                paragraph(1, "Kapitel 1", Some(0)),
                paragraph(2, "Kapitel 1", Some(0)),
                paragraph(3, "Kapitel 2", Some(1)),
            ],
        };

        let report = SegmentationReport::new(&law).unwrap();

        assert!(report.is_well_formed());
        assert_eq!(report.chapters.count, 2);
        assert_eq!(report.paragraphs.count, 3);
    }

    #[test]
    fn test_detects_gaps_repeats_and_pages() {
        let law = SegmentedLaw {
            chapters: vec![chapter(1), chapter(3)],
            paragraphs: vec![
                paragraph(1, "Kapitel 1", Some(2)),
                paragraph(3, "Kapitel 1", Some(1)),
                paragraph(3, "Kapitel 9", None),
            ],
        };

        let report = SegmentationReport::new(&law).unwrap();

        assert!(!report.is_well_formed());
        assert_eq!(report.chapters.missing, vec![2]);
        assert_eq!(report.chapters.missing_count, 1);
        assert_eq!(report.paragraphs.missing, vec![2]);
        assert_eq!(report.paragraphs.repeated, vec![3]);
        assert_eq!(report.paragraphs.out_of_order, vec![1, 2]);
        assert_eq!(report.orphaned_paragraphs, vec!["§ 3."]);
        assert_eq!(report.paragraphs_without_page, vec!["§ 3."]);
        assert_eq!(report.page_regressions, vec!["§ 3."]);
    }

    #[test]
    fn test_empty_document_is_not_well_formed() {
        let report = SegmentationReport::new(&SegmentedLaw::default()).unwrap();
        assert!(!report.is_well_formed());
        assert!(report.chapters.is_continuous());
    }

    #[test]
    fn test_huge_ordinals_are_reported_without_listing_every_gap() {
        let law = SegmentedLaw {
            chapters: vec![chapter(1), chapter(200_000_000), chapter(u32::MAX)],
            paragraphs: vec![paragraph(1, "Kapitel 1", Some(0))],
        };

        let report = SegmentationReport::new(&law).unwrap();

        assert!(!report.is_well_formed());
        assert_eq!(report.chapters.missing, vec![2, 3, 4]);
        assert_eq!(report.chapters.missing_count, u64::from(u32::MAX) - 3);
        assert_eq!(report.chapters.out_of_order, vec![1, 2]);
    }

    #[test]
    fn test_heading_after_the_largest_ordinal_is_out_of_order() {
        let law = SegmentedLaw {
            chapters: vec![],
            paragraphs: vec![
                paragraph(u32::MAX, "Kapitel 1", None),
                paragraph(u32::MAX, "Kapitel 1", None),
            ],
        };

        let report = SegmentationReport::new(&law).unwrap();

        assert_eq!(report.paragraphs.out_of_order, vec![0, 1]);
        assert_eq!(report.paragraphs.repeated, vec![u32::MAX]);
    }
}
