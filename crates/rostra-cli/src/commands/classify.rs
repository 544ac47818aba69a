use rostra_core::error::RostraError;
use rostra_core::extraction::pdftotext::PdftotextExtractor;
use rostra_core::DocumentSources;
use std::path::PathBuf;

use super::{is_pdf, load_heuristics};
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    config_file: Option<PathBuf>,
) -> Result<(), RostraError> {
    let config = load_heuristics(config_file)?;

    // Line view only: structural tables are never consulted here.
    let classified = if is_pdf(&input_file) {
        let pdf_bytes = std::fs::read(&input_file)?;
        let text = PdftotextExtractor::new();
        let sources = DocumentSources {
            text: &text,
            tables: None,
            recognizer: None,
        };
        let conversion = rostra_core::convert_pdf(&pdf_bytes, &sources, &config);
        for w in &conversion.warnings {
            eprintln!("  warning: {w}");
        }
        conversion.classified
    } else {
        let text = std::fs::read_to_string(&input_file)?;
        rostra_core::classify_text(&text, &config)
    };

    match output_format {
        "json" => output::json::print(&classified)?,
        _ => output::table::print(&classified),
    }

    Ok(())
}
