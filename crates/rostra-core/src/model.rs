use serde::{Deserialize, Serialize};
use std::fmt;

/// A single trimmed, non-empty line and its position in the document-wide
/// line sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub index: usize,
    pub text: String,
}

impl Line {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Line {
            index,
            text: text.into(),
        }
    }
}

/// Classification outcome for one line. Exactly one kind per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    SectionHeader,
    /// `Title: Name` lines, covering award listings and generic key/value pairs.
    KeyValue,
    /// Bulleted `Name, Title` followed by an organization line.
    BoardMember,
    /// Bulleted `Name, Title` without an organization line.
    LeadershipRole,
    NameOrgPair,
    ContactInfo,
    AddressBlock,
    NarrativeMessage,
    Unclassified,
}

impl LineKind {
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::SectionHeader => "Section Header",
            LineKind::KeyValue => "Award / Key-Value",
            LineKind::BoardMember => "Board Member",
            LineKind::LeadershipRole => "Leadership Role",
            LineKind::NameOrgPair => "Name + Organization",
            LineKind::ContactInfo => "Contact Info",
            LineKind::AddressBlock => "Address",
            LineKind::NarrativeMessage => "Narrative",
            LineKind::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Heuristic certainty of a classification. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "Low"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// Position of the source line.
    pub index: usize,
    /// Section active when this line was processed (the line itself for headers).
    pub section: Option<String>,
    pub kind: LineKind,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Index of the following line when it was folded in as the organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_line: Option<usize>,
    /// Index of the bulleted line that consumed this line, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_by: Option<usize>,
    pub original: String,
}

/// One output row of the structured (heuristic) schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub line_index: usize,
    pub section: Option<String>,
    pub kind: LineKind,
    pub confidence: Confidence,
    pub name: String,
    pub title: String,
    pub organization: String,
    pub original: String,
}

impl Record {
    pub const COLUMNS: [&'static str; 8] = [
        "Section",
        "Kind",
        "Name",
        "Title",
        "Organization",
        "Confidence",
        "Line",
        "Original",
    ];

    /// Cell values in `COLUMNS` order. Line numbers are one-based.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.section.clone().unwrap_or_default(),
            self.kind.label().to_string(),
            self.name.clone(),
            self.title.clone(),
            self.organization.clone(),
            self.confidence.to_string(),
            (self.line_index + 1).to_string(),
            self.original.clone(),
        ]
    }
}

/// A cell grid recovered by structural table extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedTable {
    pub page_number: usize,
    /// One-based position of this table on its page.
    pub table_number: usize,
    pub rows: Vec<Vec<String>>,
}

impl DetectedTable {
    pub fn has_content(&self) -> bool {
        self.rows
            .iter()
            .flatten()
            .any(|cell| !cell.trim().is_empty())
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    TableExtractionFailed,
    TextExtractionFailed,
    RecognitionFailed,
    EmptyResult,
}

/// A degraded stage, surfaced to the caller instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Warning {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
