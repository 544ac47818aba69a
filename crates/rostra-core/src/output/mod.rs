pub mod csv;
pub mod json;

use crate::config::HeaderMode;
use crate::error::RostraError;
use crate::model::{DetectedTable, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Spreadsheet formats cap sheet names at 31 characters.
pub const MAX_SHEET_NAME: usize = 31;

pub const RECORDS_SHEET: &str = "Records";

/// One named worksheet of string cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Destination for a converted workbook.
pub trait SheetWriter {
    fn write(&self, sheets: &[Sheet]) -> Result<(), RostraError>;
}

/// Make a string usable as a sheet name: drop forbidden characters and
/// truncate to 31 characters.
pub fn sheet_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect();
    let name: String = cleaned.trim().chars().take(MAX_SHEET_NAME).collect();
    if name.trim().is_empty() {
        "Sheet".to_string()
    } else {
        name.trim_end().to_string()
    }
}

/// Sanitize every name and suffix duplicates (`Name (2)`), staying within
/// the length limit.
pub fn unique_sheet_names<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for name in raw {
        let base = sheet_name(name);
        let mut candidate = base.clone();
        let mut n = 2;
        while seen.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
            let stem: String = base.chars().take(keep).collect();
            candidate = format!("{}{}", stem.trim_end(), suffix);
            n += 1;
        }
        seen.insert(candidate.to_lowercase());
        out.push(candidate);
    }

    out
}

/// The single sheet of the structured (heuristic) schema.
pub fn records_sheet(records: &[Record]) -> Sheet {
    Sheet {
        name: RECORDS_SHEET.to_string(),
        columns: Record::COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: records.iter().map(Record::to_row).collect(),
    }
}

/// One sheet per detected table, named `Page <p> Table <n>`.
pub fn table_sheets(tables: &[DetectedTable], header: HeaderMode) -> Vec<Sheet> {
    let raw_names: Vec<String> = tables
        .iter()
        .map(|t| format!("Page {} Table {}", t.page_number, t.table_number))
        .collect();
    let names = unique_sheet_names(raw_names.iter().map(String::as_str));

    tables
        .iter()
        .zip(names)
        .map(|(table, name)| table_sheet(table, name, header))
        .collect()
}

fn table_sheet(table: &DetectedTable, name: String, header: HeaderMode) -> Sheet {
    let width = table.column_count();
    let pad = |row: &Vec<String>| {
        let mut row = row.clone();
        row.resize(width, String::new());
        row
    };
    let positional = || (1..=width).map(|i| format!("Column {i}")).collect();

    match (header, table.rows.split_first()) {
        (HeaderMode::FirstRow, Some((first, rest))) => {
            let columns: Vec<String> = pad(first)
                .into_iter()
                .enumerate()
                .map(|(i, c)| {
                    if c.trim().is_empty() {
                        format!("Column {}", i + 1)
                    } else {
                        c.trim().to_string()
                    }
                })
                .collect();
            Sheet {
                name,
                columns,
                rows: rest.iter().map(pad).collect(),
            }
        }
        _ => Sheet {
            name,
            columns: positional(),
            rows: table.rows.iter().map(pad).collect(),
        },
    }
}
