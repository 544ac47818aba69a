use clap::ValueEnum;
use rostra_core::error::RostraError;
use rostra_core::extraction::layout::LayoutTableExtractor;
use rostra_core::extraction::pdftotext::PdftotextExtractor;
use rostra_core::extraction::recognition::TesseractRecognizer;
use rostra_core::extraction::{TableExtractor, TextExtractor};
use rostra_core::output::csv::CsvWriter;
use rostra_core::output::json::JsonWriter;
use rostra_core::output::SheetWriter;
use rostra_core::{Conversion, ConversionMode, DocumentSources};
use std::path::{Path, PathBuf};

use super::{is_pdf, load_heuristics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SheetFormat {
    /// One `<sheet>.csv` per sheet in a directory
    Csv,
    /// A single JSON workbook file
    Json,
}

/// Which optional extraction stages to run.
pub struct Backends {
    pub tables: bool,
    pub ocr: Option<OcrOptions>,
}

/// Tesseract settings, present only with `--ocr`.
pub struct OcrOptions {
    pub language: String,
    pub dpi: u32,
}

pub fn run(
    input_file: PathBuf,
    out: Option<PathBuf>,
    format: SheetFormat,
    backends: Backends,
    config_file: Option<PathBuf>,
) -> Result<(), RostraError> {
    let config = load_heuristics(config_file)?;

    let conversion = if is_pdf(&input_file) {
        let pdf_bytes = std::fs::read(&input_file)?;
        let text = PdftotextExtractor::new();
        let tables = LayoutTableExtractor::new(&config.table);
        let ocr = backends.ocr.map(|opts| {
            TesseractRecognizer::new()
                .with_language(opts.language)
                .with_dpi(opts.dpi)
        });
        let sources = DocumentSources {
            text: &text,
            tables: backends.tables.then_some(&tables as &dyn TableExtractor),
            recognizer: ocr.as_ref().map(|r| r as &dyn TextExtractor),
        };
        rostra_core::convert_pdf(&pdf_bytes, &sources, &config)
    } else {
        let text = std::fs::read_to_string(&input_file)?;
        rostra_core::convert_text(&text, &config)
    };

    for w in &conversion.warnings {
        eprintln!("  warning: {w}");
    }

    if conversion.is_empty() {
        eprintln!("No text or tables found in {}, nothing written", input_file.display());
        return Ok(());
    }

    let sheets = conversion.sheets(&config);
    let target = match format {
        SheetFormat::Json => {
            let path = out.unwrap_or_else(|| input_file.with_extension("json"));
            JsonWriter::new(&path).write(&sheets)?;
            path
        }
        SheetFormat::Csv => {
            let dir = out.unwrap_or_else(|| default_csv_dir(&input_file));
            CsvWriter::new(&dir).write(&sheets)?;
            dir
        }
    };

    eprintln!("{}, written to {}", summary(&conversion), target.display());
    Ok(())
}

/// `report.pdf` -> `report_sheets/`, never the input path itself.
fn default_csv_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rostra".into());
    input.with_file_name(format!("{stem}_sheets"))
}

fn summary(conversion: &Conversion) -> String {
    match conversion.mode {
        ConversionMode::Tables => format!("Extracted {} table(s)", conversion.tables.len()),
        _ => format!(
            "Classified {} line(s) into {} record(s)",
            conversion.classified.len(),
            conversion.records.len()
        ),
    }
}
