use thiserror::Error;

/// Errors raised while compiling heading patterns or segmenting text.
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Invalid heading pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Heading pattern `{pattern}` must have exactly one capture group, found {found}")]
    CaptureGroups { pattern: String, found: usize },
    /// A heading title without a parsable ordinal. Titles are produced by the
    /// splitter from pattern matches, so this is an internal consistency fault.
    #[error("Heading '{0}' does not contain an ordinal")]
    MalformedHeading(String),
}

/// Errors raised by a `DocumentLoader` while reading a source document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse PDF content: {0}")]
    PdfParse(String),
}

/// Errors raised by the end-to-end indexing of a document.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Segmentation failed: {0}")]
    Segment(#[from] SegmentError),
    #[error("Loading failed: {0}")]
    Load(#[from] LoadError),
}
