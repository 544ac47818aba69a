use crate::extraction::PageContent;
use crate::model::Line;

/// Split raw extracted text into trimmed, non-empty lines.
///
/// Order is preserved and no other transformation is applied: case and
/// punctuation are left as-is because the classifier depends on them.
/// Form feeds (page separators) are treated as line breaks.
pub fn normalize_text(text: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    push_lines(&mut lines, text.split(['\n', '\x0c']));
    lines
}

/// Collapse all pages into one continuous line stream.
pub fn normalize_pages(pages: &[PageContent]) -> Vec<Line> {
    let mut lines = Vec::new();
    for page in pages {
        push_lines(&mut lines, page.lines.iter().map(String::as_str));
    }
    lines
}

fn push_lines<'a>(out: &mut Vec<Line>, raw: impl Iterator<Item = &'a str>) {
    for raw_line in raw {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let index = out.len();
        out.push(Line::new(index, trimmed));
    }
}
