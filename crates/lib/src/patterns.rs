//! # Heading Patterns
//!
//! Compiled heading patterns and the scanner that finds heading matches in a
//! block of text. The default patterns describe the Danish rental act
//! ("Kapitel N" chapters and "§ N." paragraphs); other legal dialects can be
//! supported by passing different patterns to `HeadingPatterns::new`.

use crate::errors::SegmentError;
use regex::{Match, Regex};

/// Chapter heading: the keyword at a line start or right after a page-break
/// form feed, optionally indented, terminated by the line break.
pub const CHAPTER_HEADING_PATTERN: &str = r"(?m)(?:^|\x0c)[ \t]*(Kapitel [0-9]+)\n";

/// Paragraph heading: `§`, one to three ASCII digits and a period. The heading starts
/// the text, follows a form feed, or follows a word/period character and a
/// single newline (headings glued to the previous paragraph's last line).
pub const PARAGRAPH_HEADING_PATTERN: &str = r"(?:^|\x0c|[\w.]\n)(§ [0-9]{1,3}\.)";

/// Separator placed between page texts when a document is loaded as one block.
pub const PAGE_DELIMITER: &str = "\n\x0c";

/// A regular expression with exactly one capture group that marks a heading.
#[derive(Debug, Clone)]
pub struct HeadingPattern {
    regex: Regex,
}

impl HeadingPattern {
    pub fn new(pattern: &str) -> Result<Self, SegmentError> {
        let regex = Regex::new(pattern)?;
        // `captures_len` counts the implicit whole-match group.
        let found = regex.captures_len() - 1;
        if found != 1 {
            return Err(SegmentError::CaptureGroups {
                pattern: pattern.to_string(),
                found,
            });
        }
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Iterates over the captured headings in `text`, in reading order.
    pub fn headings<'r, 't>(&'r self, text: &'t str) -> Headings<'r, 't> {
        Headings {
            regex: &self.regex,
            text,
            pos: 0,
            last_end: 0,
        }
    }
}

/// Iterator over the heading captures of a `HeadingPattern`.
///
/// The context a pattern matches in front of its heading (a form feed, or the
/// last character of the previous line) may overlap the tail of the previous
/// heading, so scanning resumes one character into the previous heading rather
/// than after the whole match. Headings never overlap each other.
pub struct Headings<'r, 't> {
    regex: &'r Regex,
    text: &'t str,
    pos: usize,
    last_end: usize,
}

impl<'r, 't> Headings<'r, 't> {
    fn next_boundary(&self, from: usize) -> usize {
        self.text[from..]
            .chars()
            .next()
            .map_or(self.text.len() + 1, |c| from + c.len_utf8())
    }
}

impl<'r, 't> Iterator for Headings<'r, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Match<'t>> {
        while self.pos <= self.text.len() {
            let caps = self.regex.captures_at(self.text, self.pos)?;
            let whole = caps.get(0)?;

            match caps.get(1) {
                Some(heading) if !heading.is_empty() && heading.start() >= self.last_end => {
                    self.pos = self.next_boundary(heading.start());
                    self.last_end = heading.end();
                    return Some(heading);
                }
                Some(heading) if !heading.is_empty() => {
                    self.pos = self.next_boundary(heading.start());
                }
                _ => {
                    self.pos = if whole.end() > self.pos {
                        whole.end()
                    } else {
                        self.next_boundary(self.pos)
                    };
                }
            }
        }
        None
    }
}

/// The pair of heading patterns used to segment a legal document.
#[derive(Debug, Clone)]
pub struct HeadingPatterns {
    pub chapter: HeadingPattern,
    pub paragraph: HeadingPattern,
}

impl HeadingPatterns {
    pub fn new(chapter: &str, paragraph: &str) -> Result<Self, SegmentError> {
        Ok(Self {
            chapter: HeadingPattern::new(chapter)?,
            paragraph: HeadingPattern::new(paragraph)?,
        })
    }
}

impl Default for HeadingPatterns {
    fn default() -> Self {
        Self {
            chapter: HeadingPattern {
                regex: Regex::new(CHAPTER_HEADING_PATTERN)
                    .expect("default chapter pattern is valid"),
            },
            paragraph: HeadingPattern {
                regex: Regex::new(PARAGRAPH_HEADING_PATTERN)
                    .expect("default paragraph pattern is valid"),
            },
        }
    }
}

/// Extracts the ordinal of a heading title: its first run of ASCII digits.
///
/// `"§ 23."` yields 23 and `"Kapitel 4"` yields 4. Numbers beyond `u32::MAX`
/// saturate.
pub fn heading_ordinal(title: &str) -> Result<u32, SegmentError> {
    let start = title
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| SegmentError::MalformedHeading(title.to_string()))?;

    Ok(title[start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |ordinal, digit| {
            ordinal
                .saturating_mul(10)
                .saturating_add(u32::from(digit - b'0'))
        }))
}
