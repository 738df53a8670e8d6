//! Section parsing
//!
//! Splits one document's normalized text into an ordered, flat sequence of
//! numbered sections. Headings are detected line by line; each section's
//! content runs from the end of its heading line to the start of the next
//! recognized heading line, whatever its depth, or to the end of text.
//!
//! Numbering is trusted verbatim: nothing is renumbered, reordered, or
//! checked for monotonicity, and duplicate numbers are kept as separate
//! sections in source order. A document with no recognizable headings parses
//! to an empty list, which is data rather than an error.

mod heading;

pub use heading::{match_heading, HeadingMatch};

use crate::suggest::CalculatorTag;
use serde::{Deserialize, Serialize};

/// A contiguous, independently retrievable span of a source document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Id of the owning document
    pub document_id: String,
    /// Dotted hierarchical number, verbatim from the source
    pub number: String,
    /// Heading label without the number
    pub heading: String,
    /// Number and label joined, e.g. "3.1 Gibson Assembly"
    pub full_heading: String,
    /// Section body, trimmed of leading and trailing blank lines
    pub content: String,
    /// Calculators suggested for this section, ordered by first keyword match
    pub suggested_calculators: Vec<CalculatorTag>,
    /// Byte offset of the heading line in the normalized text
    pub start_offset: usize,
    /// Byte offset one past the section's span; equals the next section's
    /// `start_offset`, or the text length for the last section
    pub end_offset: usize,
}

/// Split normalized text into ordered sections.
///
/// `suggested_calculators` is left empty; the index annotates sections before
/// caching them.
pub fn parse(document_id: &str, text: &str) -> Vec<Section> {
    let mut marks: Vec<(usize, usize, HeadingMatch)> = Vec::new();
    let mut pos = 0usize;

    for line in text.split_inclusive('\n') {
        let stripped = line.strip_suffix('\n').unwrap_or(line);
        if let Some(m) = heading::match_heading(stripped) {
            marks.push((pos, pos + line.len(), m));
        }
        pos += line.len();
    }

    let mut sections = Vec::with_capacity(marks.len());
    for (i, (line_start, body_start, m)) in marks.iter().enumerate() {
        let end = marks
            .get(i + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(text.len());

        sections.push(Section {
            document_id: document_id.to_string(),
            number: m.number.clone(),
            heading: m.heading.clone(),
            full_heading: m.full_heading(),
            content: trim_blank_lines(&text[*body_start..end]).to_string(),
            suggested_calculators: Vec::new(),
            start_offset: *line_start,
            end_offset: end,
        });
    }

    tracing::debug!(id = %document_id, sections = sections.len(), "parsed document");

    sections
}

/// Drop leading and trailing blank lines, keeping internal formatting verbatim
fn trim_blank_lines(body: &str) -> &str {
    let mut start = 0usize;
    for line in body.split_inclusive('\n') {
        if line.trim().is_empty() {
            start += line.len();
        } else {
            break;
        }
    }

    let tail = &body[start..];
    let mut end = tail.len();
    for line in tail.split_inclusive('\n').rev() {
        if line.trim().is_empty() {
            end -= line.len();
        } else {
            break;
        }
    }

    tail[..end].trim_end_matches('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOP: &str = "\
1. PURPOSE

This SOP describes plasmid assembly.

2. MATERIALS

2.1 Reagents

Gibson master mix.
Keep on ice.

2.2 Equipment

Thermocycler.

3. PROCEDURE
";

    #[test]
    fn test_sections_are_flat_and_ordered() {
        let sections = parse("demo", SOP);
        let numbers: Vec<&str> = sections.iter().map(|s| s.number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "2.1", "2.2", "3"]);
        assert_eq!(sections[0].full_heading, "1 PURPOSE");
        assert_eq!(sections[0].content, "This SOP describes plasmid assembly.");
    }

    #[test]
    fn test_content_stops_at_next_heading_of_any_depth() {
        let sections = parse("demo", SOP);
        // "2. MATERIALS" ends at "2.1 Reagents", a deeper heading
        assert_eq!(sections[1].content, "");
        assert_eq!(sections[2].content, "Gibson master mix.\nKeep on ice.");
    }

    #[test]
    fn test_spans_tile_the_text() {
        let sections = parse("demo", SOP);
        for pair in sections.windows(2) {
            assert_eq!(pair[0].end_offset, pair[1].start_offset);
        }
        assert_eq!(sections.last().unwrap().end_offset, SOP.len());
    }

    #[test]
    fn test_concatenated_content_is_a_subsequence() {
        let sections = parse("demo", SOP);
        let joined: String = sections.iter().map(|s| s.content.as_str()).collect();

        let mut source = SOP.chars();
        let all_found = joined.chars().all(|c| source.any(|s| s == c));
        assert!(all_found, "section content must come from the source in order");
    }

    #[test]
    fn test_no_headings_yields_empty_list() {
        let sections = parse("demo", "Just prose.\nNo numbering anywhere.\n");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_duplicate_numbers_are_kept_in_order() {
        let text = "1. First pass\nalpha\n1. Second pass\nbeta\n";
        let sections = parse("demo", text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "First pass");
        assert_eq!(sections[1].heading, "Second pass");
        assert_eq!(sections[0].content, "alpha");
        assert_eq!(sections[1].content, "beta");
    }

    #[test]
    fn test_numbering_gaps_are_trusted() {
        let text = "2. Start here\nbody\n7.4 Jump ahead\nmore\n";
        let numbers: Vec<String> = parse("demo", text).into_iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec!["2", "7.4"]);
    }

    #[test]
    fn test_embedded_numbers_stay_in_body() {
        let text = "2.4 Ligation\nUse the mix from 3.1 above.\n3.1 Master mix\nbody\n";
        let sections = parse("demo", text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, "Use the mix from 3.1 above.");
    }

    #[test]
    fn test_markdown_headings() {
        let text = "## 3.1 Gibson Assembly\n\nCombine fragments.\n\n## 3.2 Cleanup\n\nColumn purify.\n";
        let sections = parse("gibson", text);
        assert_eq!(sections[0].full_heading, "3.1 Gibson Assembly");
        assert_eq!(sections[0].content, "Combine fragments.");
        assert_eq!(sections[1].full_heading, "3.2 Cleanup");
    }

    #[test]
    fn test_trailing_section_runs_to_end_of_text() {
        let sections = parse("demo", SOP);
        let last = sections.last().unwrap();
        assert_eq!(last.full_heading, "3 PROCEDURE");
        assert_eq!(last.content, "");
    }

    #[test]
    fn test_trim_blank_lines() {
        assert_eq!(trim_blank_lines("\n\n  \nbody\nmore\n \n\n"), "body\nmore");
        assert_eq!(trim_blank_lines("\n \n"), "");
        assert_eq!(trim_blank_lines("solo"), "solo");
    }
}
