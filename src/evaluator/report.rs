//! Plain-text rendering of an evaluation report.

use super::Report;

/// Render a report as markdown-friendly plain text: a header line, a rule of
/// `=` characters, then format info, keywords, warnings, and suggestions.
pub fn render_report(report: &Report) -> String {
    let header = format!("Evaluation for {}", report.journal);
    let mut out = String::new();

    out.push_str(&header);
    out.push('\n');
    out.push_str(&"=".repeat(header.len()));
    out.push_str("\n\n");

    out.push_str(&format!(
        "- Estimated word count: {}\n",
        report.format.word_count
    ));
    out.push_str(&format!(
        "- Estimated page count: {:.1} pages\n",
        report.format.pages_estimate
    ));
    if report.keywords.is_empty() {
        out.push_str("- Keywords: none found\n");
    } else {
        out.push_str(&format!(
            "- Keywords ({}): {}\n",
            report.keywords.len(),
            report.keywords.join(", ")
        ));
    }

    out.push_str("\nWarnings:\n");
    if report.warnings.is_empty() {
        out.push_str("- None.\n");
    } else {
        for warning in &report.warnings {
            out.push_str(&format!("- {}\n", warning));
        }
    }

    out.push_str("\nSuggestions:\n");
    for suggestion in &report.suggestions {
        out.push_str(&format!("- {}\n", suggestion));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{Sections, estimate_format, evaluate};

    #[test]
    fn report_starts_with_header_and_rule() {
        let info = estimate_format("a few words of text");
        let report = evaluate(&info, None, "amj").unwrap();

        let text = render_report(&report);
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        let rule = lines.next().unwrap();
        assert_eq!(header, "Evaluation for Academy of Management Journal (AMJ)");
        assert_eq!(rule, "=".repeat(header.len()));
    }

    #[test]
    fn report_lists_keywords_and_sections() {
        let mut sections = Sections::default();
        sections.insert("Keywords", "alpha, beta, gamma");
        let info = estimate_format("short text");
        let report = evaluate(&info, Some(&sections), "smj").unwrap();

        let text = render_report(&report);
        assert!(text.contains("- Keywords (3): alpha, beta, gamma"));
        assert!(text.contains("Warnings:"));
        assert!(text.contains("Suggestions:"));
    }
}
