pub mod assemble;
pub mod classify;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod normalize;
pub mod output;
pub mod tables;

use assemble::assemble;
use classify::Classifier;
use config::HeuristicsConfig;
use extraction::{PageContent, TableExtractor, TextExtractor};
use model::{ClassifiedLine, DetectedTable, Line, Record, Warning, WarningKind};
use output::Sheet;
use serde::Serialize;
use tables::{scan_tables, TableScan};
use tracing::{info, warn};

/// External collaborators used to read one PDF.
#[derive(Clone, Copy)]
pub struct DocumentSources<'a> {
    /// Text-layer extraction (e.g. pdftotext).
    pub text: &'a dyn TextExtractor,
    /// Structural table extraction; `None` skips straight to text classification.
    pub tables: Option<&'a dyn TableExtractor>,
    /// OCR used when the text layer is (nearly) empty.
    pub recognizer: Option<&'a dyn TextExtractor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// Heuristic line classification produced the records.
    Structured,
    /// Raw tables from structural extraction; classification did not run.
    Tables,
    /// No text and no tables.
    Empty,
}

/// Result of converting one document. Never an error: degraded stages are
/// reported in `warnings`.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub mode: ConversionMode,
    pub records: Vec<Record>,
    pub tables: Vec<DetectedTable>,
    /// Per-line classification (one entry per non-empty line).
    pub classified: Vec<ClassifiedLine>,
    pub headers: Vec<usize>,
    pub suppressed: Vec<usize>,
    pub warnings: Vec<Warning>,
}

impl Conversion {
    fn empty(mut warnings: Vec<Warning>) -> Self {
        warnings.push(Warning::new(
            WarningKind::EmptyResult,
            "no text extracted from the document",
        ));
        Conversion {
            mode: ConversionMode::Empty,
            records: Vec::new(),
            tables: Vec::new(),
            classified: Vec::new(),
            headers: Vec::new(),
            suppressed: Vec::new(),
            warnings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mode == ConversionMode::Empty
    }

    /// Output sheets for the spreadsheet writer. The structured and raw table
    /// schemas are never mixed.
    pub fn sheets(&self, config: &HeuristicsConfig) -> Vec<Sheet> {
        match self.mode {
            ConversionMode::Structured => vec![output::records_sheet(&self.records)],
            ConversionMode::Tables => output::table_sheets(&self.tables, config.table.header),
            ConversionMode::Empty => Vec::new(),
        }
    }
}

/// Main API entry point: convert a PDF into records or raw tables.
///
/// Structural tables win whenever present. Otherwise the text layer (or OCR,
/// if the text layer is too small) is classified line by line.
pub fn convert_pdf(
    pdf_bytes: &[u8],
    sources: &DocumentSources<'_>,
    config: &HeuristicsConfig,
) -> Conversion {
    let mut warnings = Vec::new();

    if let Some(extractor) = sources.tables {
        match scan_tables(extractor, pdf_bytes) {
            TableScan::Found(tables) => {
                return Conversion {
                    mode: ConversionMode::Tables,
                    records: Vec::new(),
                    tables,
                    classified: Vec::new(),
                    headers: Vec::new(),
                    suppressed: Vec::new(),
                    warnings,
                };
            }
            TableScan::Empty => {}
            TableScan::Failed(reason) => warnings.push(Warning::new(
                WarningKind::TableExtractionFailed,
                format!("table extraction failed, using text classification: {reason}"),
            )),
        }
    }

    let pages = extract_text(pdf_bytes, sources, config, &mut warnings);
    convert_lines(normalize::normalize_pages(&pages), config, warnings)
}

/// Convert already-extracted plain text (text path only).
pub fn convert_text(text: &str, config: &HeuristicsConfig) -> Conversion {
    convert_lines(normalize::normalize_text(text), config, Vec::new())
}

/// Per-line classification mode: one classified line per non-empty line.
pub fn classify_text(text: &str, config: &HeuristicsConfig) -> Vec<ClassifiedLine> {
    let lines = normalize::normalize_text(text);
    Classifier::new(config).classify_all(&lines)
}

fn convert_lines(lines: Vec<Line>, config: &HeuristicsConfig, warnings: Vec<Warning>) -> Conversion {
    if lines.is_empty() {
        warn!("document produced no text");
        return Conversion::empty(warnings);
    }

    let classified = Classifier::new(config).classify_all(&lines);
    let assembly = assemble(&classified);
    info!(
        lines = lines.len(),
        records = assembly.records.len(),
        headers = assembly.headers.len(),
        suppressed = assembly.suppressed.len(),
        "classified document"
    );

    Conversion {
        mode: ConversionMode::Structured,
        records: assembly.records,
        tables: Vec::new(),
        classified,
        headers: assembly.headers,
        suppressed: assembly.suppressed,
        warnings,
    }
}

/// Text layer first; OCR when it is missing, failed, or too small.
fn extract_text(
    pdf_bytes: &[u8],
    sources: &DocumentSources<'_>,
    config: &HeuristicsConfig,
    warnings: &mut Vec<Warning>,
) -> Vec<PageContent> {
    let primary = match sources.text.extract_pages(pdf_bytes) {
        Ok(pages) => pages,
        Err(e) => {
            warn!(backend = sources.text.backend_name(), error = %e, "text extraction failed");
            warnings.push(Warning::new(WarningKind::TextExtractionFailed, e.to_string()));
            Vec::new()
        }
    };

    let chars: usize = primary.iter().map(PageContent::text_chars).sum();
    let recognizer = match sources.recognizer {
        Some(r) if chars < config.min_text_chars => r,
        _ => return primary,
    };

    info!(
        chars,
        backend = recognizer.backend_name(),
        "text layer too small, running recognition"
    );
    match recognizer.extract_pages(pdf_bytes) {
        Ok(pages) if pages.iter().map(PageContent::text_chars).sum::<usize>() >= chars => pages,
        Ok(_) => primary,
        Err(e) => {
            warn!(backend = recognizer.backend_name(), error = %e, "recognition failed");
            warnings.push(Warning::new(
                WarningKind::RecognitionFailed,
                format!("no text extracted by recognition: {e}"),
            ));
            primary
        }
    }
}
