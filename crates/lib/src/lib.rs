//! # Rental Law Segmentation
//!
//! This crate splits a statutory text into addressable legal units: chapters
//! ("Kapitel N") and the numbered paragraphs ("§ N.") inside them, each tagged
//! with its parent chapter and the page its heading is printed on. The
//! resulting units are the atoms a retrieval index embeds and cites.
//!
//! Text extraction is delegated to a `DocumentLoader`; the segmentation itself
//! is a pure, synchronous transformation over already-extracted text.

pub mod context;
pub mod errors;
pub mod loader;
pub mod pages;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod segment;
pub mod splitter;
pub mod types;

pub use context::format_context;
pub use errors::{IndexError, LoadError, SegmentError};
pub use loader::DocumentLoader;
pub use pages::{annotate_pages, PageIndex};
pub use patterns::{heading_ordinal, HeadingPattern, HeadingPatterns, PAGE_DELIMITER};
pub use pipeline::SegmentationPipeline;
pub use report::SegmentationReport;
pub use segment::{segment_by_chapter, segment_by_paragraph};
pub use splitter::RegexSplitter;
pub use types::{Segment, SegmentedLaw, TextBlock};
