pub mod classify;
pub mod config;
pub mod convert;

use rostra_core::config::{load_config, HeuristicsConfig};
use rostra_core::error::RostraError;
use std::path::{Path, PathBuf};

fn load_heuristics(path: Option<PathBuf>) -> Result<HeuristicsConfig, RostraError> {
    match path {
        Some(path) => load_config(&path),
        None => Ok(HeuristicsConfig::default()),
    }
}

/// Anything not ending in `.pdf` is read as already-extracted text.
fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
