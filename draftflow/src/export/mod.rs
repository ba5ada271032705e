//! Document export.
//!
//! Renders finished drafts as plain text or as HTML documents that Word
//! opens directly, and derives download file names from titles.

mod document;
mod markdown;

pub use document::{
    article_document, outline_document, plain_text, script_document, script_text, word_document, BOM,
};
pub use markdown::{markdown_to_html, MarkdownFlavor};

/// Longest file stem produced by [`export_filename`].
pub const MAX_FILENAME_STEM: usize = 50;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain text.
    Text,
    /// HTML that Word opens as a document.
    Word,
}

impl ExportFormat {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Word => "doc",
        }
    }

    /// MIME type for downloads.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Word => "application/msword",
        }
    }
}

/// File name for `title`: every character outside `[A-Za-z0-9]` becomes
/// `_`, the stem is cut to [`MAX_FILENAME_STEM`] characters and `fallback`
/// stands in for an empty title.
#[must_use]
pub fn export_filename(title: &str, fallback: &str, ext: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_FILENAME_STEM)
        .collect();
    let stem = if stem.is_empty() { fallback } else { stem.as_str() };
    format!("{stem}.{ext}")
}
