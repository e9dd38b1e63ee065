//! Turning an uploaded PDF into the plain text handed back to clients.
//!
//! Page text is folded onto a single line (newlines become spaces) and each
//! non-empty page is followed by one space. The full character count is kept
//! alongside the text so callers can report how much was cut off.

use crate::backend::{BackendError, PdfBackend};

/// Maximum number of characters returned to clients and forwarded as context.
pub const MAX_CONTEXT_CHARS: usize = 12_000;

/// Signature every well-formed PDF starts with.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Plain text extracted from a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    /// Untruncated text of all pages.
    pub text: String,
    /// Length of `text` in characters (not bytes).
    pub content_length: usize,
}

impl ExtractedText {
    pub fn new(text: String) -> Self {
        let content_length = text.chars().count();
        Self {
            text,
            content_length,
        }
    }

    /// The first `max` characters of the text.
    pub fn truncated(&self, max: usize) -> &str {
        truncate_chars(&self.text, max)
    }
}

/// Cut `s` after `max` characters. No attempt is made to respect word
/// boundaries.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Join per-page text into one string.
pub fn assemble_text<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        let page = page.as_ref();
        if page.is_empty() {
            continue;
        }
        text.push_str(&page.replace('\n', " "));
        text.push(' ');
    }
    text
}

/// Run `backend` over `data` and assemble the result.
pub fn extract_document(
    backend: &dyn PdfBackend,
    data: &[u8],
) -> Result<ExtractedText, BackendError> {
    let pages = backend.extract_pages(data)?;
    let text = assemble_text(&pages);
    tracing::debug!(
        pages = pages.len(),
        chars = text.chars().count(),
        "extracted document text"
    );
    Ok(ExtractedText::new(text))
}

/// Naive upload check: the filename must end in the literal `.pdf` suffix.
///
/// Case-sensitive, and says nothing about the actual content.
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.ends_with(".pdf")
}

/// Check the PDF magic bytes.
pub fn looks_like_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}
