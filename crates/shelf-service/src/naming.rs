//! Parsing of the metadata embedded in drive item names.
//!
//! A raw name may carry a numeric sort prefix (`3 - Intro`), a trailing
//! tag segment (`Intro | guide, beta`), a home marker (`Team Home`) and a
//! file extension (`intro.docx`). Each helper here extracts or strips
//! exactly one of those pieces.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[-–—_\s]*").expect("valid leading number pattern"));

static TRAILING_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\s*([^|]+)$").expect("valid trailing segment pattern"));

static HOME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^A-Za-z0-9_]+home$").expect("valid home suffix pattern"));

static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^.]+$").expect("valid extension pattern"));

static TAG_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|\s*([^|]+)$").expect("valid tag segment pattern"));

static HOME_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bhome(?:,|$)").expect("valid home marker pattern"));

static SORT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)").expect("valid sort prefix pattern"));

/// Display name with the sort prefix, tag segment, home suffix and
/// extension removed.
///
/// ```
/// use shelf_service::naming::clean_name;
/// assert_eq!(clean_name("3 - Getting Started | Team A Home.docx"), "Getting Started");
/// ```
pub fn clean_name(name: &str) -> String {
    let name = name.trim();
    let name = LEADING_NUMBER.replace(name, "");
    let name = TRAILING_SEGMENT.replace(&name, "");
    let name = HOME_SUFFIX.replace(&name, "");
    EXTENSION.replace(&name, "").into_owned()
}

/// Lowercase, hyphen-joined URL token.
pub fn slugify(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Slug of a team drive name, as used for the drive's URL prefix.
pub fn drive_slug(name: &str) -> String {
    clean_name(&slugify(name))
}

/// Tags from the trailing `| a, b` segment, lowercased and deduplicated.
pub fn parse_tags(name: &str) -> Vec<String> {
    let Some(segment) = TAG_SEGMENT.captures(name).and_then(|c| c.get(1)) else {
        return Vec::new();
    };

    let mut tags: Vec<String> = Vec::new();
    for tag in segment.as_str().split(',') {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Sort key: the leading digits of the raw name, or the pretty name.
pub fn determine_sort(name: &str, pretty_name: &str) -> String {
    SORT_PREFIX
        .captures(name.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| pretty_name.to_string())
}

/// Whether the raw name marks the item as its folder's home file.
pub fn matches_home(name: &str) -> bool {
    HOME_MARKER.is_match(name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_strips_each_piece() {
        assert_eq!(clean_name("3 - Getting Started | Team A Home.docx"), "Getting Started");
        assert_eq!(clean_name("12_Intro"), "Intro");
        assert_eq!(clean_name("07 — Setup"), "Setup");
        assert_eq!(clean_name("Intro | guide, beta"), "Intro");
        assert_eq!(clean_name("Team A Home"), "Team A");
        assert_eq!(clean_name("report.pdf"), "report");
        assert_eq!(clean_name("  Plain  "), "Plain");
    }

    #[test]
    fn test_clean_name_strips_at_most_once() {
        assert_eq!(clean_name("1 2 Intro"), "2 Intro");
        assert_eq!(clean_name("a | b | c"), "a | b");
        assert_eq!(clean_name("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("  Q&A: Read me!  "), "q-a-read-me");
        assert_eq!(slugify("snake_case name"), "snake-case-name");
        assert_eq!(slugify("Café"), "caf");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for input in ["Getting Started", "--a--b--", "Q&A", "ÜBER alles 2024", "x_y"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
            assert!(
                once.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            );
        }
    }

    #[test]
    fn test_drive_slug() {
        assert_eq!(drive_slug("Engineering Docs"), "engineering-docs");
        assert_eq!(drive_slug("01 Newsroom"), "newsroom");
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("B | numbers"), vec!["numbers"]);
        assert_eq!(
            parse_tags("Intro | Guide, beta , , guide"),
            vec!["guide", "beta"]
        );
        assert!(parse_tags("No tags").is_empty());
        assert!(parse_tags("Trailing |").is_empty());
    }

    #[test]
    fn test_determine_sort() {
        assert_eq!(determine_sort("10 - Setup", "Setup"), "10");
        assert_eq!(determine_sort("Setup", "Setup"), "Setup");
        assert_eq!(determine_sort("Part 2", "Part 2"), "Part 2");
    }

    #[test]
    fn test_matches_home() {
        assert!(matches_home("2-c home"));
        assert!(matches_home("Team Home "));
        assert!(matches_home("Intro | home, guide"));
        assert!(!matches_home("homework"));
        assert!(!matches_home("Homepage"));
        assert!(!matches_home("athome"));
    }
}
