use mupdf::{Document, TextPageFlags};

use finsight_core::{BackendError, PdfBackend};

/// MIME type handed to MuPDF when opening a document from memory.
const PDF_MAGIC: &str = "application/pdf";

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island. It isolates the mupdf dependency
/// (which is AGPL-3.0) so that the core and the HTTP layer do not
/// transitively depend on it.
///
/// Every page is kept, headers and footers included. Lines inside a page are
/// separated by `\n`; folding them is left to
/// [`finsight_core::document::assemble_text`].
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, BackendError> {
        let document = Document::from_bytes(data, PDF_MAGIC)
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let mut lines = Vec::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    lines.push(line_text);
                }
            }

            // A page whose lines are all blank yields no text at all.
            let page_text = lines.join("\n");
            if page_text.trim().is_empty() {
                pages_text.push(String::new());
            } else {
                pages_text.push(page_text);
            }
        }

        Ok(pages_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One page, one line of Helvetica text. No xref table; MuPDF repairs it.
    const HELLO_PDF: &[u8] = b"%PDF-1.4
1 0 obj <</Type/Catalog/Pages 2 0 R>> endobj
2 0 obj <</Type/Pages/Kids[3 0 R]/Count 1>> endobj
3 0 obj <</Type/Page/Parent 2 0 R/MediaBox[0 0 612 792]/Contents 4 0 R/Resources<</Font<</F1 5 0 R>>>>>> endobj
4 0 obj <</Length 42>> stream
BT /F1 24 Tf 72 700 Td (Hello World) Tj ET
endstream endobj
5 0 obj <</Type/Font/Subtype/Type1/BaseFont/Helvetica>> endobj
trailer <</Root 1 0 R>>
%%EOF
";

    #[test]
    fn single_page_text() {
        let pages = MupdfBackend::new().extract_pages(HELLO_PDF).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].trim(), "Hello World");
    }

    #[test]
    fn garbage_bytes_fail_to_open() {
        let err = MupdfBackend::new()
            .extract_pages(b"this is not a pdf")
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::OpenError(_) | BackendError::ExtractionError(_)
        ));
    }
}
