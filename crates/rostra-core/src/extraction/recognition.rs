//! Text recognition (OCR) backends for scanned documents.
//!
//! Two flavours, both exposed as [`TextExtractor`]:
//! - [`TesseractRecognizer`] rasterizes pages locally with `pdftoppm` and
//!   runs `tesseract` on each page image.
//! - [`StagedRecognizer`] drives an asynchronous recognition service through
//!   a [`StagingStore`]: the document is uploaded under a per-document
//!   prefix, the service writes JSON annotation files next to it, and the
//!   page texts are read back from those files.

use crate::error::RostraError;
use crate::extraction::staging::{StagingKeys, StagingStore};
use crate::extraction::{PageContent, TextExtractor};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Default DPI for rendering PDF pages to images for OCR.
pub const DEFAULT_OCR_DPI: u32 = 300;

/// Local OCR: `pdftoppm` + `tesseract`.
pub struct TesseractRecognizer {
    dpi: u32,
    language: String,
}

impl TesseractRecognizer {
    pub fn new() -> Self {
        TesseractRecognizer {
            dpi: DEFAULT_OCR_DPI,
            language: "eng".into(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    fn rasterize(&self, pdf_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, RostraError> {
        let output = Command::new("pdftoppm")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(pdf_path)
            .arg(out_dir.join("page"))
            .output()
            .map_err(|e| tool_error("pdftoppm", e))?;

        if !output.status.success() {
            return Err(RostraError::Recognition(format!(
                "pdftoppm failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mut images: Vec<(usize, PathBuf)> = std::fs::read_dir(out_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter_map(|path| page_image_number(&path).map(|n| (n, path)))
            .collect();
        images.sort_by_key(|(n, _)| *n);
        Ok(images.into_iter().map(|(_, p)| p).collect())
    }

    fn recognize_image(&self, image: &Path) -> Result<String, RostraError> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("-") // output to stdout
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| tool_error("tesseract", e))?;

        if !output.status.success() {
            return Err(RostraError::Recognition(format!(
                "tesseract failed on {}: {}",
                image.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for TesseractRecognizer {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RostraError> {
        let dir = tempfile::tempdir()?;
        let pdf_path = dir.path().join("input.pdf");
        std::fs::write(&pdf_path, pdf_bytes)?;

        let images = self.rasterize(&pdf_path, dir.path())?;
        info!(pages = images.len(), dpi = self.dpi, "running tesseract");

        images
            .iter()
            .enumerate()
            .map(|(i, image)| -> Result<PageContent, RostraError> {
                let text = self.recognize_image(image)?;
                Ok(PageContent::from_text(i + 1, &text))
            })
            .collect()
    }

    fn backend_name(&self) -> &str {
        "tesseract"
    }
}

/// `page-1.png`, `page-01.png`, ... -> page number.
fn page_image_number(path: &Path) -> Option<usize> {
    if path.extension()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix("page-")?.parse().ok()
}

fn tool_error(tool: &str, e: std::io::Error) -> RostraError {
    if e.kind() == std::io::ErrorKind::NotFound {
        RostraError::Recognition(format!(
            "{tool} not found. Install poppler-utils and tesseract-ocr"
        ))
    } else {
        RostraError::Recognition(format!("{tool} failed: {e}"))
    }
}

/// A recognition service that reads a staged document and writes JSON
/// annotation files under an output prefix of the same store.
pub trait AnnotationBackend: Send + Sync {
    /// Annotate the document at `input_key`; returns once all output files
    /// are written under `output_prefix`.
    fn annotate(&self, input_key: &str, output_prefix: &str) -> Result<(), RostraError>;
}

pub struct StagedRecognizer<S, B> {
    store: S,
    backend: B,
    correlation_id: Option<String>,
}

impl<S: StagingStore, B: AnnotationBackend> StagedRecognizer<S, B> {
    pub fn new(store: S, backend: B) -> Self {
        StagedRecognizer {
            store,
            backend,
            correlation_id: None,
        }
    }

    /// Use a caller-supplied id instead of a generated one.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn keys(&self) -> StagingKeys {
        match &self.correlation_id {
            Some(id) => StagingKeys::new(id.clone()),
            None => StagingKeys::generate(),
        }
    }
}

impl<S: StagingStore, B: AnnotationBackend> TextExtractor for StagedRecognizer<S, B> {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RostraError> {
        let keys = self.keys();
        self.store.put(&keys.upload_key, pdf_bytes)?;
        debug!(key = %keys.upload_key, "staged document");

        self.backend
            .annotate(&keys.upload_key, &keys.output_prefix)?;

        let mut outputs: Vec<String> = self
            .store
            .list(&keys.output_prefix)?
            .into_iter()
            .filter(|key| key.ends_with(".json"))
            .collect();
        // Page order, not key order: output-10 sorts after output-2.
        outputs.sort_by_cached_key(|key| {
            let range = output_page_range(key).unwrap_or((usize::MAX, usize::MAX));
            (range, key.clone())
        });

        let mut texts = Vec::new();
        for key in outputs {
            let bytes = self.store.get(&key)?;
            let json = String::from_utf8_lossy(&bytes);
            texts.extend(parse_annotation_output(&json)?);
        }
        info!(
            correlation_id = %keys.correlation_id,
            pages = texts.len(),
            "read recognition output"
        );

        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, text)| PageContent::from_text(i + 1, text))
            .collect())
    }

    fn backend_name(&self) -> &str {
        "staged-recognition"
    }
}

/// `.../output-3-to-4.json` -> `(3, 4)`.
fn output_page_range(key: &str) -> Option<(usize, usize)> {
    let name = key.rsplit('/').next()?;
    let range = name.strip_prefix("output-")?.strip_suffix(".json")?;
    let (start, end) = range.split_once("-to-")?;
    Some((start.parse().ok()?, end.parse().ok()?))
}

#[derive(Debug, Deserialize)]
struct AnnotationOutput {
    #[serde(default)]
    responses: Vec<AnnotationResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotationResponse {
    #[serde(default)]
    full_text_annotation: Option<FullTextAnnotation>,
}

#[derive(Debug, Deserialize)]
struct FullTextAnnotation {
    #[serde(default)]
    text: String,
}

/// Page texts from one annotation output file:
/// `{"responses":[{"fullTextAnnotation":{"text":"..."}}]}`.
///
/// Responses without text are skipped; the rest are trimmed.
pub fn parse_annotation_output(json: &str) -> Result<Vec<String>, RostraError> {
    let output: AnnotationOutput = serde_json::from_str(json)
        .map_err(|e| RostraError::Recognition(format!("malformed annotation output: {e}")))?;

    Ok(output
        .responses
        .into_iter()
        .filter_map(|r| r.full_text_annotation)
        .map(|a| a.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::staging::FsStagingStore;
    use std::sync::Mutex;

    #[test]
    fn test_parse_annotation_output() {
        let json = r#"{
            "inputConfig": {"mimeType": "application/pdf"},
            "responses": [
                {"fullTextAnnotation": {"text": "AWARDS\nGold: Ann Lee\n"}},
                {"fullTextAnnotation": {"text": "   "}},
                {"context": {"pageNumber": 3}},
                {"fullTextAnnotation": {"text": "BOARD"}}
            ]
        }"#;
        let pages = parse_annotation_output(json).unwrap();
        assert_eq!(pages, vec!["AWARDS\nGold: Ann Lee", "BOARD"]);
    }

    #[test]
    fn test_parse_annotation_output_without_responses() {
        assert!(parse_annotation_output("{}").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_annotation_output() {
        assert!(matches!(
            parse_annotation_output("not json"),
            Err(RostraError::Recognition(_))
        ));
    }

    #[test]
    fn test_output_page_range() {
        assert_eq!(output_page_range("ocr_results/x/output-10-to-12.json"), Some((10, 12)));
        assert_eq!(output_page_range("output-1-to-1.json"), Some((1, 1)));
        assert_eq!(output_page_range("ocr_results/x/summary.json"), None);
    }

    #[test]
    fn test_page_image_number() {
        assert_eq!(page_image_number(Path::new("/tmp/x/page-07.png")), Some(7));
        assert_eq!(page_image_number(Path::new("/tmp/x/page-1.png")), Some(1));
        assert_eq!(page_image_number(Path::new("/tmp/x/input.pdf")), None);
    }

    /// Writes canned annotation files next to the staged input.
    struct CannedBackend {
        root: PathBuf,
        outputs: Vec<(&'static str, &'static str)>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl AnnotationBackend for CannedBackend {
        fn annotate(&self, input_key: &str, output_prefix: &str) -> Result<(), RostraError> {
            assert!(self.root.join(input_key).exists());
            let store = FsStagingStore::new(&self.root);
            for (name, body) in &self.outputs {
                store.put(&format!("{output_prefix}{name}"), body.as_bytes())?;
            }
            self.seen
                .lock()
                .unwrap()
                .push((input_key.to_string(), output_prefix.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_staged_recognizer_reads_outputs_in_page_order() {
        let dir = tempfile::tempdir().unwrap();
        let backend = CannedBackend {
            root: dir.path().to_path_buf(),
            outputs: vec![
                (
                    "output-2-to-2.json",
                    r#"{"responses":[{"fullTextAnnotation":{"text":"page two"}}]}"#,
                ),
                (
                    "output-10-to-10.json",
                    r#"{"responses":[{"fullTextAnnotation":{"text":"page ten"}}]}"#,
                ),
                (
                    "output-1-to-1.json",
                    r#"{"responses":[{"fullTextAnnotation":{"text":"page one"}}]}"#,
                ),
                ("notes.txt", "ignored"),
            ],
            seen: Mutex::new(Vec::new()),
        };
        let recognizer = StagedRecognizer::new(FsStagingStore::new(dir.path()), backend)
            .with_correlation_id("doc-1");

        let pages = recognizer.extract_pages(b"%PDF-1.4").unwrap();
        let texts: Vec<&str> = pages.iter().map(|p| p.lines[0].as_str()).collect();
        assert_eq!(texts, vec!["page one", "page two", "page ten"]);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(
            recognizer.store().get("uploads/doc-1.pdf").unwrap(),
            b"%PDF-1.4"
        );
        assert_eq!(
            recognizer.backend.seen.lock().unwrap()[0],
            ("uploads/doc-1.pdf".to_string(), "ocr_results/doc-1/".to_string())
        );
    }

    struct FailingBackend;

    impl AnnotationBackend for FailingBackend {
        fn annotate(&self, _input_key: &str, _output_prefix: &str) -> Result<(), RostraError> {
            Err(RostraError::Recognition("deadline exceeded".into()))
        }
    }

    #[test]
    fn test_staged_recognizer_propagates_backend_failure() {
        let dir = tempfile::tempdir().unwrap();
        let recognizer = StagedRecognizer::new(FsStagingStore::new(dir.path()), FailingBackend);
        let err = recognizer.extract_pages(b"%PDF").unwrap_err();
        assert!(err.to_string().contains("deadline exceeded"));
    }
}
