use crate::extraction::TableExtractor;
use crate::model::DetectedTable;
use tracing::{info, warn};

/// Outcome of whole-document structural table extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableScan {
    /// At least one table with a non-empty cell; the document is tabular.
    Found(Vec<DetectedTable>),
    /// Extraction worked but produced no usable table.
    Empty,
    /// The backend could not read the document.
    Failed(String),
}

/// Run structural extraction and decide whether the document is tabular.
///
/// Tables without a single non-empty cell are discarded before deciding.
pub fn scan_tables(extractor: &dyn TableExtractor, pdf_bytes: &[u8]) -> TableScan {
    match extractor.extract_tables(pdf_bytes) {
        Ok(tables) => {
            let tables: Vec<DetectedTable> =
                tables.into_iter().filter(DetectedTable::has_content).collect();
            if tables.is_empty() {
                info!(backend = extractor.backend_name(), "no tables found");
                TableScan::Empty
            } else {
                info!(
                    backend = extractor.backend_name(),
                    tables = tables.len(),
                    "document is tabular"
                );
                TableScan::Found(tables)
            }
        }
        Err(e) => {
            warn!(
                backend = extractor.backend_name(),
                error = %e,
                "table extraction failed, falling back to text classification"
            );
            TableScan::Failed(e.to_string())
        }
    }
}
