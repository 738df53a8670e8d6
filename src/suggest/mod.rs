//! Calculator suggestion
//!
//! Maps section text to zero or more downstream calculators by keyword
//! matching. The keyword table is a static mapping rather than scattered
//! conditionals, so it is independently testable and new calculators are a
//! one-line addition.

use serde::{Deserialize, Serialize};

/// Identifier for a downstream numeric tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorTag {
    /// Annealing temperature calculator
    Pcr,
    /// Gibson assembly volume calculator
    Gibson,
    /// Restriction digest calculator
    Restriction,
    /// Insert:vector ratio calculator
    Ligation,
    /// Oligo annealing calculator
    Oligo,
}

impl std::fmt::Display for CalculatorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CalculatorTag::Pcr => "pcr",
            CalculatorTag::Gibson => "gibson",
            CalculatorTag::Restriction => "restriction",
            CalculatorTag::Ligation => "ligation",
            CalculatorTag::Oligo => "oligo",
        };
        write!(f, "{name}")
    }
}

/// Keyword table: a calculator is suggested when any of its keywords occurs
/// in the section text (case-insensitive substring)
const CALCULATOR_KEYWORDS: &[(CalculatorTag, &[&str])] = &[
    (
        CalculatorTag::Pcr,
        &["pcr", "primer", "annealing", "thermocycler", "amplification"],
    ),
    (
        CalculatorTag::Gibson,
        &["gibson", "assembly", "gibson assembly", "fragment"],
    ),
    (
        CalculatorTag::Restriction,
        &["restriction", "digest", "restriction enzyme", "cut"],
    ),
    (
        CalculatorTag::Ligation,
        &["ligation", "ligate", "insert", "vector", "clone"],
    ),
    (
        CalculatorTag::Oligo,
        &["oligo", "annealing", "oligonucleotide"],
    ),
];

/// Suggest calculators for a section's text.
///
/// The result is deduplicated and ordered by the position of each
/// calculator's earliest keyword match, which keeps the output deterministic
/// without implying any ranking beyond "mentioned first".
pub fn suggest(text: &str) -> Vec<CalculatorTag> {
    let haystack = text.to_lowercase();

    let mut matches: Vec<(usize, CalculatorTag)> = CALCULATOR_KEYWORDS
        .iter()
        .filter_map(|(tag, keywords)| {
            keywords
                .iter()
                .filter_map(|keyword| haystack.find(keyword))
                .min()
                .map(|first| (first, *tag))
        })
        .collect();

    matches.sort_by_key(|(first, _)| *first);
    matches.into_iter().map(|(_, tag)| tag).collect()
}
