//! Cell-grid recovery from `pdftotext -layout` output.
//!
//! pdftotext -layout preserves column alignment using spaces. A run of
//! consecutive lines that split into the same number of gap-separated cells,
//! with every cell starting or ending in the same character column as the
//! run's first row, is reported as one table.

use crate::config::TableConfig;
use crate::error::RostraError;
use crate::extraction::pdftotext::run_pdftotext;
use crate::extraction::{split_pages, PageContent, TableExtractor};
use crate::model::DetectedTable;
use tracing::debug;

/// Cells may drift this many character columns and still count as aligned.
const COLUMN_TOLERANCE: usize = 2;

pub struct LayoutTableExtractor {
    min_rows: usize,
    min_columns: usize,
}

impl LayoutTableExtractor {
    pub fn new(config: &TableConfig) -> Self {
        LayoutTableExtractor {
            min_rows: config.min_rows.max(1),
            min_columns: config.min_columns.max(2),
        }
    }
}

impl Default for LayoutTableExtractor {
    fn default() -> Self {
        Self::new(&TableConfig::default())
    }
}

impl TableExtractor for LayoutTableExtractor {
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<DetectedTable>, RostraError> {
        let text = run_pdftotext(pdf_bytes, true)?;
        let pages = split_pages(&text);
        Ok(find_tables(&pages, self.min_rows, self.min_columns))
    }

    fn backend_name(&self) -> &str {
        "pdftotext-layout"
    }
}

/// Find aligned cell grids on each page.
///
/// Two-column runs need one row more than `min_rows`: a heading with a
/// right-aligned date or page number splits into two cells as well.
pub fn find_tables(pages: &[PageContent], min_rows: usize, min_columns: usize) -> Vec<DetectedTable> {
    let mut tables = Vec::new();

    for page in pages {
        let mut run: Vec<Vec<String>> = Vec::new();
        let mut anchor: Vec<Span> = Vec::new();
        let mut found_on_page = 0;

        let mut close_run = |run: &mut Vec<Vec<String>>, found_on_page: &mut usize| {
            let columns = run.first().map_or(0, Vec::len);
            let needed = if columns <= 2 { min_rows + 1 } else { min_rows };
            if run.len() >= needed {
                *found_on_page += 1;
                tables.push(DetectedTable {
                    page_number: page.page_number,
                    table_number: *found_on_page,
                    rows: std::mem::take(run),
                });
            } else {
                run.clear();
            }
        };

        for line in &page.lines {
            let cells = split_cells(line);
            if cells.len() < min_columns {
                close_run(&mut run, &mut found_on_page);
                continue;
            }

            let spans: Vec<Span> = cells.iter().map(|(span, _)| *span).collect();
            let continues = !run.is_empty()
                && spans.len() == anchor.len()
                && spans.iter().zip(&anchor).all(|(a, b)| a.aligned_with(b));
            if !continues {
                close_run(&mut run, &mut found_on_page);
                anchor = spans;
            }
            run.push(cells.into_iter().map(|(_, text)| text.to_string()).collect());
        }
        close_run(&mut run, &mut found_on_page);

        if found_on_page > 0 {
            debug!(page = page.page_number, tables = found_on_page, "layout tables found");
        }
    }

    tables
}

/// Character columns occupied by one cell, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Left- or right-aligned with `other`.
    fn aligned_with(&self, other: &Span) -> bool {
        self.start.abs_diff(other.start) <= COLUMN_TOLERANCE
            || self.end.abs_diff(other.end) <= COLUMN_TOLERANCE
    }
}

/// Split a line by gaps of 2+ whitespace characters.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    split_cells(line).into_iter().map(|(_, text)| text).collect()
}

fn split_cells(line: &str) -> Vec<(Span, &str)> {
    let mut cells = Vec::new();
    // (byte offset, char column) of the open cell
    let mut start: Option<(usize, usize)> = None;
    let mut end = (0, 0);
    let mut gap = 0;

    for (column, (i, c)) in line.char_indices().enumerate() {
        if c.is_whitespace() {
            gap += 1;
            if gap == 2 {
                if let Some((s, s_col)) = start.take() {
                    cells.push((Span { start: s_col, end: end.1 }, &line[s..end.0]));
                }
            }
        } else {
            if start.is_none() {
                start = Some((i, column));
            }
            gap = 0;
            end = (i + c.len_utf8(), column + 1);
        }
    }

    if let Some((s, s_col)) = start {
        cells.push((Span { start: s_col, end: end.1 }, &line[s..end.0]));
    }

    cells
}
