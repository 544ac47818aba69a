use crate::error::RostraError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable constants for line classification and table detection.
///
/// Only thresholds and marker sets are configurable; the rule order is fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Leading glyphs that mark a list item.
    pub bullet_markers: Vec<String>,
    /// A title-case line needs strictly more words than this to be a header.
    pub header_min_words: usize,
    /// Comma lines with more words than this are not name/organization pairs.
    pub name_org_max_words: usize,
    /// Lines with strictly more words than this are narrative.
    pub narrative_min_words: usize,
    /// Case-insensitive substrings marking contact lines.
    pub contact_markers: Vec<String>,
    /// Case-insensitive substrings marking address lines.
    pub address_keywords: Vec<String>,
    /// Fewer non-whitespace characters than this means the PDF has no text layer.
    pub min_text_chars: usize,
    pub table: TableConfig,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        HeuristicsConfig {
            bullet_markers: ["•", "●", "▪", "◦", "‣", "·"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            header_min_words: 2,
            name_org_max_words: 8,
            narrative_min_words: 10,
            contact_markers: vec!["@".into(), "email:".into()],
            address_keywords: ["address", "street", "city", "zip"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_text_chars: 50,
            table: TableConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub min_rows: usize,
    pub min_columns: usize,
    pub header: HeaderMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            min_rows: 2,
            min_columns: 2,
            header: HeaderMode::FirstRow,
        }
    }
}

/// How column names are chosen for raw table sheets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    #[default]
    FirstRow,
    Positional,
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<HeuristicsConfig, RostraError> {
    let content = std::fs::read_to_string(path).map_err(|e| RostraError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: HeuristicsConfig =
        serde_json::from_str(&content).map_err(|e| RostraError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<HeuristicsConfig, RostraError> {
    let config: HeuristicsConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &HeuristicsConfig) -> Result<(), RostraError> {
    if config.bullet_markers.iter().any(|m| m.trim().is_empty()) {
        return Err(RostraError::ConfigInvalid(
            "bullet markers must not be blank".into(),
        ));
    }

    if config.contact_markers.iter().any(|m| m.is_empty()) {
        return Err(RostraError::ConfigInvalid(
            "contact markers must not be empty".into(),
        ));
    }

    if config.address_keywords.iter().any(|k| k.is_empty()) {
        return Err(RostraError::ConfigInvalid(
            "address keywords must not be empty".into(),
        ));
    }

    if config.name_org_max_words == 0 {
        return Err(RostraError::ConfigInvalid(
            "name_org_max_words must be at least 1".into(),
        ));
    }

    if config.table.min_rows == 0 {
        return Err(RostraError::ConfigInvalid(
            "table.min_rows must be at least 1".into(),
        ));
    }

    if config.table.min_columns < 2 {
        return Err(RostraError::ConfigInvalid(format!(
            "table.min_columns must be at least 2 (got {})",
            config.table.min_columns
        )));
    }

    Ok(())
}
