use crate::error::RostraError;
use crate::extraction::{split_pages, PageContent, TextExtractor};
use std::io::Write;
use std::process::Command;
use tracing::debug;

/// Text extraction backend using pdftotext (from poppler-utils).
///
/// Reads the PDF's native text layer. Scanned documents without one come
/// back (nearly) empty; see `recognition` for the OCR backends.
pub struct PdftotextExtractor {
    layout: bool,
}

impl PdftotextExtractor {
    /// Reading-order extraction, the right input for line classification.
    pub fn new() -> Self {
        PdftotextExtractor { layout: false }
    }

    /// `pdftotext -layout`: keeps column alignment as runs of spaces.
    pub fn with_layout() -> Self {
        PdftotextExtractor { layout: true }
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RostraError> {
        let text = run_pdftotext(pdf_bytes, self.layout)?;
        let pages = split_pages(&text);
        debug!(pages = pages.len(), layout = self.layout, "pdftotext finished");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        if self.layout {
            "pdftotext-layout"
        } else {
            "pdftotext"
        }
    }
}

/// Run pdftotext on in-memory PDF bytes and return its stdout.
pub(crate) fn run_pdftotext(pdf_bytes: &[u8], layout: bool) -> Result<String, RostraError> {
    let mut tmpfile =
        tempfile::NamedTempFile::new().map_err(|e| RostraError::Extraction(e.to_string()))?;
    tmpfile
        .write_all(pdf_bytes)
        .map_err(|e| RostraError::Extraction(e.to_string()))?;

    let mut cmd = Command::new("pdftotext");
    if layout {
        cmd.arg("-layout");
    }
    let output = cmd
        .arg(tmpfile.path())
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RostraError::PdftotextNotFound
            } else {
                RostraError::Extraction(format!("pdftotext failed: {}", e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(RostraError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
