pub mod layout;
pub mod pdftotext;
pub mod recognition;
pub mod staging;

use crate::error::RostraError;
use crate::model::DetectedTable;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

impl PageContent {
    /// Build a page from a text blob, one entry per line.
    pub fn from_text(page_number: usize, text: &str) -> Self {
        PageContent {
            page_number,
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    /// Number of non-whitespace characters on the page.
    pub fn text_chars(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|l| l.chars())
            .filter(|c| !c.is_whitespace())
            .count()
    }
}

/// Trait for flat-text extraction backends (text layer or OCR).
pub trait TextExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RostraError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for structural (cell-grid) table extraction backends.
pub trait TableExtractor: Send + Sync {
    /// Extract every cell grid found in the document, in page order.
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<DetectedTable>, RostraError>;

    fn backend_name(&self) -> &str;
}

/// Split pdftotext output into pages on form feeds.
///
/// Trailing empty pages are dropped, but page 1 is always kept.
pub fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent::from_text(i + 1, page_text))
        .filter(|p| !p.lines.is_empty() || p.page_number == 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("AWARDS\nGold: Ann\x0cBOARD\n\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines, vec!["AWARDS", "Gold: Ann"]);
        assert_eq!(pages[1].page_number, 2);
    }

    #[test]
    fn test_text_chars_ignores_whitespace() {
        let page = PageContent::from_text(1, "  a b \n\n c ");
        assert_eq!(page.text_chars(), 3);
    }

    #[test]
    fn test_empty_text_keeps_first_page() {
        let pages = split_pages("");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text_chars(), 0);
    }
}
