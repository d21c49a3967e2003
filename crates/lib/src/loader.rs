use crate::errors::LoadError;
use crate::types::TextBlock;
use std::path::Path;

/// A source of document text.
///
/// Implementations wrap a text-extraction library (see `rentlaw-pdf`). Both
/// methods must read the same document version; the pipeline cannot detect
/// pages taken from a different document.
pub trait DocumentLoader: Send + Sync {
    /// Loads the whole document as one block without a page index.
    fn load_single(&self, path: &Path) -> Result<TextBlock, LoadError>;

    /// Loads the document as one block per physical page, in page order.
    fn load_pages(&self, path: &Path) -> Result<Vec<TextBlock>, LoadError>;
}
