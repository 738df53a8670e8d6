//! Numbered-heading recognition
//!
//! A single documented pattern decides whether a line opens a section, so
//! alternate heading formats can be added here without touching the parsing
//! control flow.

use regex::Regex;
use std::sync::LazyLock;

/// Numbered-heading grammar, applied to one line at a time.
///
/// A line matches if, after an optional Markdown heading marker (a `#` run)
/// and an optional literal "Section"/"Step" token (case-insensitive), it
/// starts with dot-separated integers followed by a period, colon, or
/// whitespace, followed by a non-empty label on the same line:
///
/// - `1. INTRODUCTION`
/// - `2.1 Subsection`
/// - `Section 3: Reagents`
/// - `## 3.1 Gibson Assembly`
/// - `Step 4.2.1 Incubate`
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:#{1,6}\s+)?(?:(?:section|step)\s+)?(\d+(?:\.\d+)*)[.:\s]\s*(\S.*)$")
        .expect("heading pattern is valid")
});

/// A recognized heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    /// Dotted hierarchical number, verbatim from the source (e.g. "2.1.3")
    pub number: String,
    /// Heading label with the number and any markers stripped
    pub heading: String,
}

impl HeadingMatch {
    /// Nesting depth implied by the number (count of dotted components)
    pub fn depth(&self) -> usize {
        self.number.split('.').count()
    }

    /// Number and label joined, e.g. "3.1 Gibson Assembly"
    pub fn full_heading(&self) -> String {
        format!("{} {}", self.number, self.heading)
    }
}

/// Match a single line against the numbered-heading grammar.
///
/// Only line-initial matches count: a section number quoted mid-line in body
/// text never opens a section. That leaves one known ambiguity, inherited
/// from the source documents themselves: a line that legitimately starts
/// with a quantity ("1.5 mL of buffer") is indistinguishable from a heading.
pub fn match_heading(line: &str) -> Option<HeadingMatch> {
    let caps = HEADING.captures(line)?;
    Some(HeadingMatch {
        number: caps[1].to_string(),
        heading: caps[2].trim().to_string(),
    })
}
