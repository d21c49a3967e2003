//! # Shared Types
//!
//! The data structures that flow through the segmentation pipeline: raw text
//! blocks coming out of a loader and the heading-delimited segments produced
//! from them.

use serde::{Deserialize, Serialize};

/// Raw text extracted from a document.
///
/// A block either holds the whole document (`page_index` is `None`) or a single
/// physical page (`page_index` is the 0-based page position).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TextBlock {
    /// A block holding a whole document.
    pub fn single(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            page_index: None,
            title: None,
        }
    }

    /// A block holding one physical page.
    pub fn page(page_index: u32, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            page_index: Some(page_index),
            title: None,
        }
    }
}

/// A heading-delimited unit of text.
///
/// Chapter segments have an empty `parent_title`; paragraph segments carry the
/// title of the chapter they were split from. `page` is only set by page
/// annotation and stays `None` when the heading was not found on any page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub content: String,
    pub title: String,
    #[serde(default)]
    pub parent_title: String,
    #[serde(default)]
    pub page: Option<u32>,
}

impl Segment {
    pub fn new(
        content: impl Into<String>,
        title: impl Into<String>,
        parent_title: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            title: title.into(),
            parent_title: parent_title.into(),
            page: None,
        }
    }

    /// A human readable reference, e.g. `§ 23. (Kapitel 4, s. 12)`.
    ///
    /// Pages are printed 1-based.
    pub fn citation(&self) -> String {
        let mut parts = Vec::new();
        if !self.parent_title.is_empty() {
            parts.push(self.parent_title.clone());
        }
        if let Some(page) = self.page {
            parts.push(format!("s. {}", page + 1));
        }

        if parts.is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, parts.join(", "))
        }
    }
}

/// The output of a full pipeline run over one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentedLaw {
    pub chapters: Vec<Segment>,
    pub paragraphs: Vec<Segment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_variants() {
        let mut segment = Segment::new("§ 23. Lejen betales.", "§ 23.", "Kapitel 4");
        assert_eq!(segment.citation(), "§ 23. (Kapitel 4)");

        segment.page = Some(11);
        assert_eq!(segment.citation(), "§ 23. (Kapitel 4, s. 12)");

        let chapter = Segment::new("Kapitel 4 Lejens betaling", "Kapitel 4", "");
        assert_eq!(chapter.citation(), "Kapitel 4");
    }

    #[test]
    fn test_missing_page_serializes_as_null() {
        let segment = Segment::new("§ 1. Loven gælder.", "§ 1.", "Kapitel 1");
        let value = serde_json::to_value(&segment).unwrap();
        assert!(value["page"].is_null());
        assert_eq!(value["parent_title"], "Kapitel 1");
    }
}
