//! Line-shape predicates used by the classification rule chain.
//!
//! All checks look only at punctuation, letter case and word counts.

/// Number of whitespace-separated words.
pub fn word_count(line: &str) -> usize {
    line.split_whitespace().count()
}

/// True if the line has at least one cased letter and no lowercase letters.
pub fn is_all_upper(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// True if every cased run starts with an uppercase letter followed only by
/// lowercase letters, and the line has at least one cased letter.
///
/// Digits and punctuation break runs, so `"Class Of 2024"` and `"O'Neil"`
/// qualify while `"McDonald"` and `"Board of Directors"` do not.
pub fn is_title_case(line: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;
    for c in line.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }
    cased
}

/// Returns the bullet marker the line starts with, if any.
pub fn bullet_marker<'a>(line: &str, markers: &'a [String]) -> Option<&'a str> {
    markers
        .iter()
        .map(String::as_str)
        .find(|m| !m.is_empty() && line.starts_with(m))
}

pub fn starts_with_bullet(line: &str, markers: &[String]) -> bool {
    bullet_marker(line, markers).is_some()
}

/// Remove a leading bullet marker and surrounding whitespace.
pub fn strip_bullet<'a>(line: &'a str, markers: &[String]) -> &'a str {
    match bullet_marker(line, markers) {
        Some(marker) => line[marker.len()..].trim(),
        None => line.trim(),
    }
}

/// Split on the first occurrence of `sep`, trimming both halves.
pub fn split_first(line: &str, sep: char) -> Option<(&str, &str)> {
    line.split_once(sep)
        .map(|(left, right)| (left.trim(), right.trim()))
}

/// Case-insensitive substring check against any of `needles`.
pub fn contains_any_ci(line: &str, needles: &[String]) -> bool {
    let lower = line.to_lowercase();
    needles
        .iter()
        .any(|n| !n.is_empty() && lower.contains(&n.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullets() -> Vec<String> {
        vec!["•".into(), "▪".into()]
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("Jane   Doe\tCaptain"), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_is_all_upper() {
        assert!(is_all_upper("TEAM ROSTER"));
        assert!(is_all_upper("2024 AWARDS:"));
        assert!(is_all_upper("ÅRSMÖTE"));
        assert!(!is_all_upper("Team ROSTER"));
        assert!(!is_all_upper("2024 - 25"));
    }

    #[test]
    fn test_is_title_case() {
        assert!(is_title_case("Board Of Directors"));
        assert!(is_title_case("Class Of 2024"));
        assert!(is_title_case("O'Neil Family Award"));
        assert!(!is_title_case("Board of Directors"));
        assert!(!is_title_case("McDonald Scholarship"));
        assert!(!is_title_case("2024"));
    }

    #[test]
    fn test_bullet_handling() {
        let m = bullets();
        assert!(starts_with_bullet("• John Smith", &m));
        assert!(!starts_with_bullet("John • Smith", &m));
        assert_eq!(strip_bullet("▪  John Smith, Chair", &m), "John Smith, Chair");
        assert_eq!(strip_bullet("John Smith", &m), "John Smith");
    }

    #[test]
    fn test_split_first_only_once() {
        assert_eq!(
            split_first("Time: 10:30 AM", ':'),
            Some(("Time", "10:30 AM"))
        );
        assert_eq!(split_first("no separator", ':'), None);
        assert_eq!(split_first(", Treasurer", ','), Some(("", "Treasurer")));
    }

    #[test]
    fn test_contains_any_ci() {
        let needles = vec!["email:".to_string()];
        assert!(contains_any_ci("EMAIL: jane@example.org", &needles));
        assert!(!contains_any_ci("e-mail jane", &needles));
    }
}
