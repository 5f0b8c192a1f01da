//! Heading-keyed section mapping built from an ordered paragraph sequence.

/// One paragraph of the source document plus its heading flag, as supplied
/// by the document extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub heading: bool,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, heading: bool) -> Self {
        Self {
            text: text.into(),
            heading,
        }
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }
}

/// Ordered mapping from section heading to accumulated body text.
///
/// Keys are unique and iteration follows document order. Lookups compare
/// headings case-insensitively so "ABSTRACT" and "Abstract" resolve to the
/// same section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<(String, String)>,
}

impl Sections {
    pub fn get(&self, heading: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(heading))
            .map(|(_, body)| body.as_str())
    }

    pub fn insert(&mut self, heading: &str, body: &str) {
        match self.position(heading) {
            Some(index) => self.entries[index].1 = body.to_string(),
            None => self.entries.push((heading.to_string(), body.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(heading, body)| (heading.as_str(), body.as_str()))
    }

    fn position(&self, heading: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == heading)
    }
}

/// Scan paragraphs in order and group body text under the most recent
/// heading. Paragraphs before the first heading are dropped. A repeated
/// heading reopens its section with an empty body, so the last occurrence
/// wins.
pub fn extract_sections(paragraphs: &[Paragraph]) -> Sections {
    let mut sections = Sections::default();
    let mut open: Option<usize> = None;

    for paragraph in paragraphs {
        if paragraph.heading {
            let heading = paragraph.text.trim();
            if heading.is_empty() {
                continue;
            }
            match sections.position(heading) {
                Some(index) => {
                    sections.entries[index].1.clear();
                    open = Some(index);
                }
                None => {
                    sections.entries.push((heading.to_string(), String::new()));
                    open = Some(sections.entries.len() - 1);
                }
            }
            continue;
        }

        let Some(index) = open else {
            continue;
        };
        let body = &mut sections.entries[index].1;
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(&paragraph.text);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_before_first_heading_are_dropped() {
        let paragraphs = [
            Paragraph::body("preamble"),
            Paragraph::heading("Abstract"),
            Paragraph::body("first line"),
        ];

        let sections = extract_sections(&paragraphs);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get("Abstract"), Some("first line"));
    }

    #[test]
    fn body_paragraphs_are_joined_with_newlines() {
        let paragraphs = [
            Paragraph::heading("Introduction"),
            Paragraph::body("one"),
            Paragraph::body("two"),
        ];

        let sections = extract_sections(&paragraphs);
        assert_eq!(sections.get("Introduction"), Some("one\ntwo"));
    }

    #[test]
    fn sections_keep_document_order() {
        let paragraphs = [
            Paragraph::heading("Abstract"),
            Paragraph::body("a"),
            Paragraph::heading("Keywords"),
            Paragraph::body("k"),
            Paragraph::heading("Introduction"),
            Paragraph::body("i"),
        ];

        let sections = extract_sections(&paragraphs);
        let headings: Vec<&str> = sections.iter().map(|(heading, _)| heading).collect();
        assert_eq!(headings, vec!["Abstract", "Keywords", "Introduction"]);
    }

    #[test]
    fn repeated_heading_overwrites_earlier_body() {
        let paragraphs = [
            Paragraph::heading("Notes"),
            Paragraph::body("old"),
            Paragraph::heading("Notes"),
            Paragraph::body("new"),
        ];

        let sections = extract_sections(&paragraphs);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get("Notes"), Some("new"));
    }

    #[test]
    fn lookup_ignores_heading_case() {
        let paragraphs = [Paragraph::heading("ABSTRACT"), Paragraph::body("text")];

        let sections = extract_sections(&paragraphs);
        assert_eq!(sections.get("Abstract"), Some("text"));
    }
}
