//! # Regex Splitter
//!
//! Partitions a block of text at successive heading matches. Every heading
//! becomes one `Segment` holding the heading and the text up to the next
//! heading; text in front of the first heading (front matter) is dropped.

use crate::patterns::HeadingPattern;
use crate::types::Segment;

/// Splits text into heading-delimited segments with a `HeadingPattern`.
#[derive(Debug, Clone, Copy)]
pub struct RegexSplitter<'p> {
    pattern: &'p HeadingPattern,
}

impl<'p> RegexSplitter<'p> {
    pub fn new(pattern: &'p HeadingPattern) -> Self {
        Self { pattern }
    }

    /// Splits `text` into segments tagged with `parent_title`.
    ///
    /// A segment's content is the trimmed heading followed by a single space and
    /// the trimmed body. Whitespace inside the body is kept verbatim. A heading
    /// without a body yields just the heading.
    pub fn split(&self, text: &str, parent_title: &str) -> Vec<Segment> {
        let headings: Vec<_> = self.pattern.headings(text).collect();

        headings
            .iter()
            .enumerate()
            .map(|(i, heading)| {
                let body_end = headings.get(i + 1).map_or(text.len(), |next| next.start());
                let title = heading.as_str().trim();
                let body = text[heading.end()..body_end].trim();

                let content = if body.is_empty() {
                    title.to_string()
                } else {
                    format!("{title} {body}")
                };
                Segment::new(content, title, parent_title)
            })
            .collect()
    }
}
