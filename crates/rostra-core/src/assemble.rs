use crate::model::{ClassifiedLine, LineKind, Record};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Records built from a classified line stream, plus the line indices that
/// did not become records of their own.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Assembly {
    pub records: Vec<Record>,
    /// Section header lines (they only update section state).
    pub headers: Vec<usize>,
    /// Lines folded into the preceding record as its organization.
    pub suppressed: Vec<usize>,
}

impl Assembly {
    /// Every input line lands in exactly one of the three buckets.
    pub fn accounted_lines(&self) -> usize {
        self.records.len() + self.headers.len() + self.suppressed.len()
    }
}

/// Turn classified lines into output records.
///
/// A successor line is skipped only when a preceding board-member line
/// actually consumed it by index; lines with identical text are unaffected.
pub fn assemble(classified: &[ClassifiedLine]) -> Assembly {
    let mut assembly = Assembly::default();
    let mut consumed: HashSet<usize> = HashSet::new();

    for line in classified {
        if consumed.remove(&line.index) {
            debug!(index = line.index, "suppressed consumed organization line");
            assembly.suppressed.push(line.index);
            continue;
        }

        if line.kind == LineKind::SectionHeader {
            assembly.headers.push(line.index);
            continue;
        }

        if let Some(org_line) = line.organization_line {
            consumed.insert(org_line);
        }

        assembly.records.push(to_record(line));
    }

    assembly
}

fn to_record(line: &ClassifiedLine) -> Record {
    Record {
        line_index: line.index,
        section: line.section.clone(),
        kind: line.kind,
        confidence: line.confidence,
        name: line.name.clone().unwrap_or_default(),
        title: line.title.clone().unwrap_or_default(),
        organization: line.organization.clone().unwrap_or_default(),
        original: line.original.clone(),
    }
}
