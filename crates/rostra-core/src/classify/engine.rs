use crate::classify::rules::{
    contains_any_ci, is_all_upper, is_title_case, split_first, starts_with_bullet, strip_bullet,
    word_count,
};
use crate::classify::section::SectionTracker;
use crate::config::HeuristicsConfig;
use crate::model::{ClassifiedLine, Confidence, Line, LineKind};
use tracing::debug;

/// Per-document classifier: the rule chain plus the document's section state.
///
/// Create one per document. Instances hold no state shared with other
/// documents, so separate documents can be classified concurrently.
pub struct Classifier<'a> {
    config: &'a HeuristicsConfig,
    sections: SectionTracker,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a HeuristicsConfig) -> Self {
        Classifier {
            config,
            sections: SectionTracker::new(),
        }
    }

    pub fn current_section(&self) -> Option<&str> {
        self.sections.current()
    }

    /// Classify one line with one line of lookahead, updating section state
    /// when the line is a header.
    pub fn classify(&mut self, line: &Line, next: Option<&Line>) -> ClassifiedLine {
        let classified = classify_line(line, next, self.sections.current(), self.config);
        if classified.kind == LineKind::SectionHeader {
            self.sections.enter(&classified.original);
        }
        classified
    }

    /// Classify a whole document, one output per input line, in order.
    ///
    /// A line folded into the previous record as its organization is still
    /// classified, but is marked `consumed_by` and never changes the section.
    pub fn classify_all(&mut self, lines: &[Line]) -> Vec<ClassifiedLine> {
        self.sections.reset();
        let mut out: Vec<ClassifiedLine> = Vec::with_capacity(lines.len());

        for (pos, line) in lines.iter().enumerate() {
            let next = lines.get(pos + 1);
            let consumer = out
                .last()
                .filter(|prev| prev.organization_line == Some(line.index))
                .map(|prev| prev.index);

            let classified = match consumer {
                Some(owner) => {
                    let mut c = classify_line(line, next, self.sections.current(), self.config);
                    c.consumed_by = Some(owner);
                    if c.kind == LineKind::SectionHeader {
                        c.section = self.sections.current().map(str::to_string);
                    }
                    c
                }
                None => self.classify(line, next),
            };

            debug!(
                index = classified.index,
                kind = ?classified.kind,
                consumed = classified.consumed_by.is_some(),
                "classified line"
            );
            out.push(classified);
        }

        out
    }
}

/// The priority-ordered rule chain. The first matching rule decides.
///
/// Pure function of the line, its successor and the active section.
pub fn classify_line(
    line: &Line,
    next: Option<&Line>,
    section: Option<&str>,
    config: &HeuristicsConfig,
) -> ClassifiedLine {
    let text = line.text.trim();
    let bullets = &config.bullet_markers;
    let words = word_count(text);
    let bulleted = starts_with_bullet(text, bullets);

    let base = ClassifiedLine {
        index: line.index,
        section: section.map(str::to_string),
        kind: LineKind::Unclassified,
        confidence: Confidence::Low,
        name: None,
        title: None,
        organization: None,
        organization_line: None,
        consumed_by: None,
        original: line.text.clone(),
    };

    // 1. Section header
    if is_all_upper(text)
        || (is_title_case(text)
            && !text.contains(':')
            && !bulleted
            && words > config.header_min_words)
    {
        return ClassifiedLine {
            section: Some(text.to_string()),
            kind: LineKind::SectionHeader,
            confidence: Confidence::High,
            ..base
        };
    }

    // 2. Title: Name
    if !bulleted {
        if let Some((left, right)) = split_first(text, ':') {
            if right.chars().count() > 1 {
                return ClassifiedLine {
                    kind: LineKind::KeyValue,
                    confidence: Confidence::High,
                    title: Some(left.to_string()),
                    name: Some(right.to_string()),
                    ..base
                };
            }
        }
    }

    // 3. Bulleted "Name, Title", organization on the following line
    if bulleted && text.contains(',') {
        let stripped = strip_bullet(text, bullets);
        let (name, title) = split_first(stripped, ',').unwrap_or((stripped, ""));
        let organization = next.filter(|n| {
            let n = n.text.trim();
            !starts_with_bullet(n, bullets) && word_count(n) > 1
        });

        return match organization {
            Some(org) => ClassifiedLine {
                kind: LineKind::BoardMember,
                confidence: Confidence::High,
                name: Some(name.to_string()),
                title: Some(title.to_string()),
                organization: Some(org.text.trim().to_string()),
                organization_line: Some(org.index),
                ..base
            },
            None => ClassifiedLine {
                kind: LineKind::LeadershipRole,
                confidence: Confidence::Medium,
                name: Some(name.to_string()),
                title: Some(title.to_string()),
                ..base
            },
        };
    }

    // 4. "Name, Organization"
    if words <= config.name_org_max_words {
        if let Some((name, org)) = split_first(text, ',') {
            return ClassifiedLine {
                kind: LineKind::NameOrgPair,
                confidence: Confidence::Medium,
                name: Some(name.to_string()),
                organization: Some(org.to_string()),
                ..base
            };
        }
    }

    // 5. Contact details
    if contains_any_ci(text, &config.contact_markers) {
        return ClassifiedLine {
            kind: LineKind::ContactInfo,
            confidence: Confidence::High,
            ..base
        };
    }

    // 6. Address
    if contains_any_ci(text, &config.address_keywords) {
        return ClassifiedLine {
            kind: LineKind::AddressBlock,
            confidence: Confidence::Medium,
            ..base
        };
    }

    // 7. Narrative
    if words > config.narrative_min_words {
        return ClassifiedLine {
            kind: LineKind::NarrativeMessage,
            confidence: Confidence::Medium,
            ..base
        };
    }

    base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Line::new(i, *t))
            .collect()
    }

    fn one(text: &str) -> ClassifiedLine {
        classify_line(&Line::new(0, text), None, None, &HeuristicsConfig::default())
    }

    #[test]
    fn test_all_caps_header() {
        let c = one("TEAM ROSTER");
        assert_eq!(c.kind, LineKind::SectionHeader);
        assert_eq!(c.confidence, Confidence::High);
        assert_eq!(c.section.as_deref(), Some("TEAM ROSTER"));
    }

    #[test]
    fn test_title_case_header_needs_three_words() {
        assert_eq!(one("Board Of Directors").kind, LineKind::SectionHeader);
        assert_eq!(one("Rotary Club").kind, LineKind::Unclassified);
    }

    #[test]
    fn test_title_case_with_colon_is_not_header() {
        let c = one("Volunteer Of The Year: Maria Lopez");
        assert_eq!(c.kind, LineKind::KeyValue);
        assert_eq!(c.title.as_deref(), Some("Volunteer Of The Year"));
        assert_eq!(c.name.as_deref(), Some("Maria Lopez"));
    }

    #[test]
    fn test_key_value_splits_on_first_colon() {
        let c = one("Meeting time: 10:30 AM");
        assert_eq!(c.kind, LineKind::KeyValue);
        assert_eq!(c.title.as_deref(), Some("Meeting time"));
        assert_eq!(c.name.as_deref(), Some("10:30 AM"));
    }

    #[test]
    fn test_colon_beats_narrative() {
        let c = one(
            "Outstanding service award: presented to the volunteers who gave more than one hundred hours",
        );
        assert!(word_count(&c.original) > 10);
        assert_eq!(c.kind, LineKind::KeyValue);
    }

    #[test]
    fn test_short_value_after_colon_falls_through() {
        assert_eq!(one("Notes: x").kind, LineKind::Unclassified);
        assert_eq!(one("Email:").kind, LineKind::ContactInfo);
        let c = one("Dana Price, Chair:");
        assert_eq!(c.kind, LineKind::NameOrgPair);
        assert_eq!(c.organization.as_deref(), Some("Chair:"));
    }

    #[test]
    fn test_bullet_with_organization() {
        let ls = lines(&["• John Smith, Treasurer", "Rotary Club"]);
        let c = classify_line(&ls[0], ls.get(1), None, &HeuristicsConfig::default());
        assert_eq!(c.kind, LineKind::BoardMember);
        assert_eq!(c.confidence, Confidence::High);
        assert_eq!(c.name.as_deref(), Some("John Smith"));
        assert_eq!(c.title.as_deref(), Some("Treasurer"));
        assert_eq!(c.organization.as_deref(), Some("Rotary Club"));
        assert_eq!(c.organization_line, Some(1));
    }

    #[test]
    fn test_bullet_without_organization() {
        let ls = lines(&["• John Smith, Treasurer", "• Ann Lee, Secretary"]);
        let c = classify_line(&ls[0], ls.get(1), None, &HeuristicsConfig::default());
        assert_eq!(c.kind, LineKind::LeadershipRole);
        assert_eq!(c.confidence, Confidence::Medium);
        assert_eq!(c.organization, None);
        assert_eq!(c.organization_line, None);

        let ls = lines(&["• John Smith, Treasurer", "Emeritus"]);
        let c = classify_line(&ls[0], ls.get(1), None, &HeuristicsConfig::default());
        assert_eq!(c.kind, LineKind::LeadershipRole);

        let c = one("• John Smith, Treasurer");
        assert_eq!(c.kind, LineKind::LeadershipRole);
    }

    #[test]
    fn test_bulleted_colon_line_is_not_key_value() {
        let c = one("• Award: Best Delegate");
        assert_eq!(c.kind, LineKind::Unclassified);
    }

    #[test]
    fn test_bullet_pair_beats_name_org() {
        let c = one("• Ann Lee, Springfield Library");
        assert_eq!(c.kind, LineKind::LeadershipRole);
        assert_eq!(c.name.as_deref(), Some("Ann Lee"));
        assert_eq!(c.title.as_deref(), Some("Springfield Library"));
    }

    #[test]
    fn test_name_org_pair() {
        let c = one("Ann Lee, Friends of the Library");
        assert_eq!(c.kind, LineKind::NameOrgPair);
        assert_eq!(c.name.as_deref(), Some("Ann Lee"));
        assert_eq!(c.organization.as_deref(), Some("Friends of the Library"));
    }

    #[test]
    fn test_title_case_comma_line_is_header() {
        assert_eq!(
            one("Ann Lee, Springfield Public Library").kind,
            LineKind::SectionHeader
        );
    }

    #[test]
    fn test_name_org_beats_address() {
        let c = one("Ann Lee, city of Springfield");
        assert_eq!(c.kind, LineKind::NameOrgPair);
    }

    #[test]
    fn test_long_comma_line_is_not_name_org() {
        let c = one("we thank our sponsors, partners and the many families who supported the event");
        assert_eq!(c.kind, LineKind::NarrativeMessage);
    }

    #[test]
    fn test_contact_and_address() {
        assert_eq!(one("jane.doe@example.org").kind, LineKind::ContactInfo);
        assert_eq!(one("Mailing address 123 Elm").kind, LineKind::AddressBlock);
        assert_eq!(one("Zip 90210").kind, LineKind::AddressBlock);
    }

    #[test]
    fn test_unclassified_default() {
        let c = one("thank you");
        assert_eq!(c.kind, LineKind::Unclassified);
        assert_eq!(c.confidence, Confidence::Low);
        assert_eq!(c.original, "thank you");
        assert!(c.name.is_none() && c.title.is_none() && c.organization.is_none());
    }

    #[test]
    fn test_section_is_stamped_on_following_lines() {
        let config = HeuristicsConfig::default();
        let mut classifier = Classifier::new(&config);
        let out = classifier.classify_all(&lines(&["TEAM ROSTER", "Jane Doe: Captain"]));
        assert_eq!(out[1].section.as_deref(), Some("TEAM ROSTER"));
        assert_eq!(out[1].title.as_deref(), Some("Jane Doe"));
        assert_eq!(out[1].name.as_deref(), Some("Captain"));
    }

    #[test]
    fn test_no_section_before_first_header() {
        let config = HeuristicsConfig::default();
        let mut classifier = Classifier::new(&config);
        let out = classifier.classify_all(&lines(&["Gold: Ann Lee", "SILVER", "Bronze: Bo"]));
        assert_eq!(out[0].section, None);
        assert_eq!(out[2].section.as_deref(), Some("SILVER"));
    }

    #[test]
    fn test_consumed_line_keeps_section() {
        let config = HeuristicsConfig::default();
        let mut classifier = Classifier::new(&config);
        let out = classifier.classify_all(&lines(&[
            "BOARD",
            "• John Smith, Treasurer",
            "ROTARY CLUB INTERNATIONAL",
            "Gold: Ann Lee",
        ]));
        assert_eq!(out.len(), 4);
        assert_eq!(out[2].consumed_by, Some(1));
        assert_eq!(out[2].kind, LineKind::SectionHeader);
        assert_eq!(out[2].section.as_deref(), Some("BOARD"));
        assert_eq!(out[3].section.as_deref(), Some("BOARD"));
        assert_eq!(classifier.current_section(), Some("BOARD"));
    }

    #[test]
    fn test_classify_all_resets_between_documents() {
        let config = HeuristicsConfig::default();
        let mut classifier = Classifier::new(&config);
        classifier.classify_all(&lines(&["FIRST DOCUMENT"]));
        let out = classifier.classify_all(&lines(&["Gold: Ann Lee"]));
        assert_eq!(out[0].section, None);
    }

    #[test]
    fn test_reclassifying_original_is_stable() {
        let config = HeuristicsConfig::default();
        let ls = lines(&["AWARDS", "• John Smith, Treasurer", "Rotary Club", "Ann Lee, ACME"]);
        let mut classifier = Classifier::new(&config);
        let out = classifier.classify_all(&ls);
        for (pos, c) in out.iter().enumerate() {
            let again = classify_line(
                &Line::new(c.index, c.original.clone()),
                ls.get(pos + 1),
                c.section.as_deref(),
                &config,
            );
            assert_eq!(again.kind, c.kind);
            assert_eq!(again.name, c.name);
            assert_eq!(again.title, c.title);
            assert_eq!(again.organization, c.organization);
        }
    }

    #[test]
    fn test_custom_bullet_markers() {
        let config = HeuristicsConfig {
            bullet_markers: vec!["-".into()],
            ..HeuristicsConfig::default()
        };
        let ls = lines(&["- Ann Lee, Chair", "City Council"]);
        let c = classify_line(&ls[0], ls.get(1), None, &config);
        assert_eq!(c.kind, LineKind::BoardMember);
        assert_eq!(c.name.as_deref(), Some("Ann Lee"));
    }
}
