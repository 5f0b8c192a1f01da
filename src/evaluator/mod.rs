//! Manuscript evaluation core: length estimation, journal profiles, and the
//! submission-readiness report. Pure and synchronous; callers hand in plain
//! text plus an optional section mapping and get a [`Report`] back.

use std::fmt;

use serde::Serialize;

mod report;
mod sections;

pub use report::render_report;
pub use sections::{Paragraph, Sections, extract_sections};

/// Words assumed per typeset page when estimating manuscript length.
pub const WORDS_PER_PAGE: f64 = 250.0;

const MIN_KEYWORDS: usize = 3;

/// Word and page estimate derived from manuscript text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormatInfo {
    pub word_count: usize,
    pub pages_estimate: f64,
}

/// Submission limits and scope description for one target journal.
///
/// Five built-in profiles cover the supported management journals; ad-hoc
/// profiles can also be assembled from a remote guidelines lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalProfile {
    pub id: String,
    pub name: String,
    pub focus: String,
    pub max_abstract_words: usize,
    pub max_pages: f64,
    pub formatting: String,
    pub reference_style: String,
}

/// Evaluation output for one manuscript against one journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub journal: String,
    pub format: FormatInfo,
    pub keywords: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Returned when a journal identifier matches none of the built-in profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownJournal {
    name: String,
}

impl UnknownJournal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnknownJournal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" is not one of the supported journals.",
            self.name
        )
    }
}

impl std::error::Error for UnknownJournal {}

/// Count words and estimate page length for the given text.
///
/// A word is a maximal run of alphanumeric or underscore characters; the
/// whole string is counted, section headings included. Empty input yields
/// zero words and zero pages.
pub fn estimate_format(text: &str) -> FormatInfo {
    let word_count = text
        .split(|ch: char| !is_word_char(ch))
        .filter(|run| !run.is_empty())
        .count();

    FormatInfo {
        word_count,
        pages_estimate: word_count as f64 / WORDS_PER_PAGE,
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Evaluate a manuscript against a built-in journal, failing with
/// [`UnknownJournal`] when the identifier matches no profile.
pub fn evaluate(
    format: &FormatInfo,
    sections: Option<&Sections>,
    journal: &str,
) -> Result<Report, UnknownJournal> {
    let profile = builtin_profile(journal).ok_or_else(|| UnknownJournal::new(journal))?;
    Ok(evaluate_with_profile(format, sections, &profile))
}

/// Evaluate against an already-resolved profile (built-in or remote).
///
/// Warnings and suggestions are emitted in a fixed order so identical inputs
/// always produce identical reports.
pub fn evaluate_with_profile(
    format: &FormatInfo,
    sections: Option<&Sections>,
    profile: &JournalProfile,
) -> Report {
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();

    match sections.and_then(|sections| sections.get("Abstract")) {
        Some(body) => {
            let abstract_words = estimate_format(body).word_count;
            if abstract_words > profile.max_abstract_words {
                warnings.push(format!(
                    "Your abstract is {} words; {} allows at most {}. Consider tightening it.",
                    abstract_words, profile.name, profile.max_abstract_words
                ));
            }
        }
        None => {
            warnings.push("No abstract section was found in the manuscript.".to_string());
        }
    }

    if format.pages_estimate > profile.max_pages {
        warnings.push(format!(
            "Your manuscript is estimated at {:.1} pages, above the {} maximum of {:.0} pages. Consider reducing content.",
            format.pages_estimate, profile.name, profile.max_pages
        ));
    }

    let keyword_body = sections.and_then(|sections| sections.get("Keywords"));
    let keywords = keyword_body.map(split_keywords).unwrap_or_default();

    if keyword_body.is_none() {
        suggestions.push(
            "Add a keywords section with 3\u{2013}5 relevant keywords that reflect the core themes of your manuscript.".to_string(),
        );
    } else if keywords.len() < MIN_KEYWORDS {
        suggestions.push(
            "Include at least 3\u{2013}5 relevant keywords that reflect the core themes of your manuscript.".to_string(),
        );
    }

    suggestions.push(format!("Formatting: use {}.", profile.formatting));
    suggestions.push(format!(
        "References: follow {} style for citations and references.",
        profile.reference_style
    ));

    Report {
        journal: profile.name.clone(),
        format: *format,
        keywords,
        warnings,
        suggestions,
    }
}

fn split_keywords(body: &str) -> Vec<String> {
    body.split(',')
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Look up a built-in profile by short id or display name, case-insensitively.
pub fn builtin_profile(journal: &str) -> Option<JournalProfile> {
    let journal = journal.trim();
    builtin_profiles().into_iter().find(|profile| {
        profile.id.eq_ignore_ascii_case(journal) || profile.name.eq_ignore_ascii_case(journal)
    })
}

/// The fixed table of supported journals.
pub fn builtin_profiles() -> Vec<JournalProfile> {
    vec![
        JournalProfile {
            id: "amj".to_string(),
            name: "Academy of Management Journal (AMJ)".to_string(),
            focus: "Organizational behavior, leadership, strategy, HR, innovation, or entrepreneurship.".to_string(),
            max_abstract_words: 150,
            max_pages: 40.0,
            formatting: default_formatting(),
            reference_style: default_reference_style(),
        },
        JournalProfile {
            id: "asq".to_string(),
            name: "Administrative Science Quarterly (ASQ)".to_string(),
            focus: "Interdisciplinary insights into organizational behavior, institutional dynamics, or organizational theory.".to_string(),
            max_abstract_words: 150,
            max_pages: 40.0,
            formatting: default_formatting(),
            reference_style: default_reference_style(),
        },
        JournalProfile {
            id: "smj".to_string(),
            name: "Strategic Management Journal (SMJ)".to_string(),
            focus: "Business strategy, competitive advantage, or strategic management.".to_string(),
            max_abstract_words: 200,
            max_pages: 40.0,
            formatting: default_formatting(),
            reference_style: default_reference_style(),
        },
        JournalProfile {
            id: "jom".to_string(),
            name: "Journal of Management (JOM)".to_string(),
            focus: "Organizational behavior, leadership, HR, or entrepreneurship.".to_string(),
            max_abstract_words: 200,
            max_pages: 40.0,
            formatting: default_formatting(),
            reference_style: default_reference_style(),
        },
        JournalProfile {
            id: "orgsci".to_string(),
            name: "Organization Science".to_string(),
            focus: "Interdisciplinary research on organizational science, including design, culture, innovation, or group dynamics.".to_string(),
            max_abstract_words: 200,
            max_pages: 40.0,
            formatting: default_formatting(),
            reference_style: default_reference_style(),
        },
    ]
}

fn default_formatting() -> String {
    "Times New Roman, size 12, double-spaced, with 1-inch margins".to_string()
}

fn default_reference_style() -> String {
    "APA (7th edition)".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    #[test]
    fn estimate_counts_word_runs() {
        let info = estimate_format("Hello world");
        assert_eq!(info.word_count, 2);
        assert_eq!(info.pages_estimate, 0.008);
    }

    #[test]
    fn estimate_of_empty_text_is_zero() {
        let info = estimate_format("");
        assert_eq!(info.word_count, 0);
        assert_eq!(info.pages_estimate, 0.0);
    }

    #[test]
    fn estimate_treats_punctuation_as_separators() {
        let info = estimate_format("one,two;three_four\n(five)");
        assert_eq!(info.word_count, 4);
        assert_eq!(info.pages_estimate, 4.0 / WORDS_PER_PAGE);
    }

    #[test]
    fn unknown_journal_is_rejected() {
        let info = estimate_format("some manuscript text");
        let err = evaluate(&info, None, "Journal of Nonexistence").unwrap_err();
        assert_eq!(err.name(), "Journal of Nonexistence");
    }

    #[test]
    fn builtin_lookup_accepts_id_and_name() {
        assert!(builtin_profile("AMJ").is_some());
        assert!(builtin_profile("Organization Science").is_some());
        assert!(builtin_profile("nature").is_none());
    }

    #[test]
    fn long_abstract_triggers_warning() {
        let mut sections = Sections::default();
        sections.insert("Abstract", &words(151));
        let info = estimate_format("body text");

        let report = evaluate(&info, Some(&sections), "amj").unwrap();
        assert!(
            report
                .warnings
                .iter()
                .any(|warning| warning.contains("abstract is 151 words"))
        );
    }

    #[test]
    fn short_abstract_passes() {
        let mut sections = Sections::default();
        sections.insert("Abstract", &words(80));
        let info = estimate_format("body text");

        let report = evaluate(&info, Some(&sections), "amj").unwrap();
        assert!(
            !report
                .warnings
                .iter()
                .any(|warning| warning.contains("abstract"))
        );
    }

    #[test]
    fn missing_abstract_is_reported() {
        let info = estimate_format("body text");
        let report = evaluate(&info, None, "amj").unwrap();
        assert!(
            report
                .warnings
                .iter()
                .any(|warning| warning.contains("No abstract section"))
        );
    }

    #[test]
    fn excessive_length_triggers_warning() {
        let info = estimate_format(&words(11_000));
        let report = evaluate(&info, None, "smj").unwrap();
        assert!(
            report
                .warnings
                .iter()
                .any(|warning| warning.contains("44.0 pages"))
        );
    }

    #[test]
    fn missing_keywords_section_suggests_adding_one() {
        let info = estimate_format("body text");
        let report = evaluate(&info, None, "amj").unwrap();
        assert!(report.keywords.is_empty());
        assert!(
            report
                .suggestions
                .iter()
                .any(|suggestion| suggestion.starts_with("Add a keywords section"))
        );
    }

    #[test]
    fn two_keywords_suggest_more() {
        let mut sections = Sections::default();
        sections.insert("Keywords", "a, b");
        let info = estimate_format("body text");

        let report = evaluate(&info, Some(&sections), "amj").unwrap();
        assert_eq!(report.keywords, vec!["a", "b"]);
        assert!(
            report
                .suggestions
                .iter()
                .any(|suggestion| suggestion.starts_with("Include at least"))
        );
    }

    #[test]
    fn three_keywords_are_enough() {
        let mut sections = Sections::default();
        sections.insert("Keywords", "a, b, c");
        let info = estimate_format("body text");

        let report = evaluate(&info, Some(&sections), "amj").unwrap();
        assert_eq!(report.keywords, vec!["a", "b", "c"]);
        assert!(
            !report
                .suggestions
                .iter()
                .any(|suggestion| suggestion.starts_with("Include at least"))
        );
    }

    #[test]
    fn keyword_splitting_trims_and_drops_empty_tokens() {
        let mut sections = Sections::default();
        sections.insert("Keywords", " leadership ,, strategy ,");
        let info = estimate_format("body text");

        let report = evaluate(&info, Some(&sections), "jom").unwrap();
        assert_eq!(report.keywords, vec!["leadership", "strategy"]);
    }

    #[test]
    fn fixed_suggestions_are_always_present_and_last() {
        let info = estimate_format("body text");
        let report = evaluate(&info, None, "orgsci").unwrap();
        let count = report.suggestions.len();
        assert!(report.suggestions[count - 2].starts_with("Formatting:"));
        assert!(report.suggestions[count - 1].starts_with("References:"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut sections = Sections::default();
        sections.insert("Abstract", &words(120));
        sections.insert("Keywords", "a, b, c, d");
        let info = estimate_format(&words(9_000));

        let first = evaluate(&info, Some(&sections), "asq").unwrap();
        let second = evaluate(&info, Some(&sections), "asq").unwrap();
        assert_eq!(first, second);
    }
}
