use rostra_core::model::{ClassifiedLine, LineKind};

const MAX_TEXT: usize = 60;

pub fn print(lines: &[ClassifiedLine]) {
    if lines.is_empty() {
        println!("No lines to classify.");
        return;
    }

    let kind_width = lines
        .iter()
        .map(|l| l.kind.label().len())
        .max()
        .unwrap_or(10);

    for line in lines {
        if line.kind == LineKind::SectionHeader && line.consumed_by.is_none() {
            if line.index > 0 {
                println!();
            }
            println!("=== {} ===\n", line.original);
            continue;
        }

        let text = truncate(&line.original, MAX_TEXT);
        println!(
            "  {:>4}  {:<width$}  {:<6}  {}",
            line.index + 1,
            line.kind.label(),
            line.confidence.to_string(),
            text,
            width = kind_width
        );

        if let Some(by) = line.consumed_by {
            println!("        -> organization of line {}", by + 1);
            continue;
        }

        let fields: Vec<String> = [
            ("name", &line.name),
            ("title", &line.title),
            ("organization", &line.organization),
        ]
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{label}: {v}"))
        })
        .collect();
        if !fields.is_empty() {
            println!("        {}", fields.join(" | "));
        }
    }

    let consumed = lines.iter().filter(|l| l.consumed_by.is_some()).count();
    let unclassified = lines
        .iter()
        .filter(|l| l.kind == LineKind::Unclassified && l.consumed_by.is_none())
        .count();
    println!();
    println!(
        "  {} line(s), {} folded into the line above, {} unclassified",
        lines.len(),
        consumed,
        unclassified
    );
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
