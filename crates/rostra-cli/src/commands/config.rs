use rostra_core::config::{load_config, HeuristicsConfig};
use rostra_core::error::RostraError;
use std::path::Path;

pub fn show() -> Result<(), RostraError> {
    let json = serde_json::to_string_pretty(&HeuristicsConfig::default())?;
    println!("{json}");
    Ok(())
}

pub fn schema() -> Result<(), RostraError> {
    print!(
        r#"Heuristics Configuration
========================

A heuristics file tunes how `rostra convert` and `rostra classify` read
documents. Every field is optional; omitted fields keep their default
(run `rostra config show` to print the defaults). The order in which
line rules are tried is fixed and cannot be configured.

Top-level fields:
  bullet_markers      (array of strings)  Leading glyphs that mark a list item.
                                          Default: ["•", "●", "▪", "◦", "‣", "·"]
  header_min_words    (integer)           A Title Case line without a colon is a
                                          section header only if it has MORE
                                          words than this. ALL CAPS lines are
                                          always headers. Default: 2
  name_org_max_words  (integer)           A "Name, Organization" line may have
                                          at most this many words. Default: 8
  narrative_min_words (integer)           Lines with MORE words than this are
                                          narrative text. Default: 10
  contact_markers     (array of strings)  Case-insensitive substrings that mark
                                          contact details. Default: ["@", "email:"]
  address_keywords    (array of strings)  Case-insensitive substrings that mark
                                          address lines.
                                          Default: ["address", "street", "city", "zip"]
  min_text_chars      (integer)           With --ocr, a text layer with fewer
                                          non-whitespace characters than this is
                                          replaced by OCR output. Default: 50
  table               (object)            Table detection (see below)

Fields of "table":
  min_rows            (integer)           Rows needed to call a run of aligned
                                          lines a table. Two-column runs need
                                          one more row. Default: 2
  min_columns         (integer)           Cells per row needed, at least 2.
                                          Default: 2
  header              (string)            "first_row": the first row names the
                                          columns. "positional": columns are
                                          named "Column 1", "Column 2", ...
                                          Default: "first_row"

Example:
{{
  "bullet_markers": ["•", "-", "*"],
  "header_min_words": 3,
  "address_keywords": ["address", "street", "avenue", "suite", "zip"],
  "table": {{
    "min_rows": 3,
    "header": "positional"
  }}
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), RostraError> {
    let config = load_config(file)?;

    println!("Configuration '{}' is valid.", file.display());
    println!("  Bullet markers: {}", config.bullet_markers.join(" "));
    println!(
        "  Words: header > {}, name/org <= {}, narrative > {}",
        config.header_min_words, config.name_org_max_words, config.narrative_min_words
    );
    println!(
        "  Tables: >= {} rows x {} columns",
        config.table.min_rows, config.table.min_columns
    );

    // Markers that would swallow ordinary text (warnings, not errors)
    let mut warnings = Vec::new();
    for marker in &config.bullet_markers {
        if marker.chars().any(char::is_alphanumeric) {
            warnings.push(format!("bullet marker '{marker}' contains letters or digits"));
        }
    }
    if config.contact_markers.is_empty() {
        warnings.push("no contact markers: contact lines will never be detected".into());
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }

    Ok(())
}
