//! Document segmentation
//!
//! Splits markdown into `(heading, body)` sections at level-2 headings, once
//! per parse. Field extractors then work on a single section body instead of
//! rescanning the whole document.

use regex::Regex;
use std::sync::LazyLock;

/// `## Heading` but not `### Heading`; up to three leading spaces like CommonMark
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}##([^#].*)?$").unwrap());

/// A level-2 section of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text with the `##` marker and surrounding whitespace removed
    pub heading: String,
    /// Everything up to the next level-2 heading, trimmed
    pub body: String,
}

/// A markdown document split into ordered level-2 sections
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Text before the first level-2 heading
    pub preamble: String,
    /// Sections in document order
    pub sections: Vec<Section>,
}

impl Document {
    /// Segment a markdown document
    pub fn parse(text: &str) -> Self {
        let mut preamble = Vec::new();
        let mut sections = Vec::new();
        let mut current: Option<(String, Vec<&str>)> = None;

        for line in text.lines() {
            if let Some(caps) = HEADING_RE.captures(line) {
                if let Some((heading, body)) = current.take() {
                    sections.push(Section::new(heading, &body));
                }
                let heading = caps.get(1).map_or("", |m| m.as_str()).trim();
                current = Some((heading.to_string(), Vec::new()));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line);
            } else {
                preamble.push(line);
            }
        }

        // Heading at end of file still yields a (possibly empty) section
        if let Some((heading, body)) = current {
            sections.push(Section::new(heading, &body));
        }

        Document {
            preamble: preamble.join("\n").trim().to_string(),
            sections,
        }
    }

    /// First section whose heading equals `heading`, ignoring case
    pub fn section(&self, heading: &str) -> Option<&Section> {
        let wanted = heading.trim();
        self.sections
            .iter()
            .find(|s| s.heading.eq_ignore_ascii_case(wanted))
    }

    /// Body of the named section, or an empty string
    pub fn section_body(&self, heading: &str) -> &str {
        self.section(heading).map_or("", |s| s.body.as_str())
    }
}

impl Section {
    fn new(heading: String, lines: &[&str]) -> Self {
        Section {
            heading,
            body: lines.join("\n").trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_level_two_headings() {
        let doc = Document::parse("intro\n## First\nalpha\n\n## Second\nbeta\n");
        assert_eq!(doc.preamble, "intro");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].heading, "First");
        assert_eq!(doc.sections[0].body, "alpha");
        assert_eq!(doc.sections[1].heading, "Second");
        assert_eq!(doc.sections[1].body, "beta");
    }

    #[test]
    fn test_level_three_headings_stay_in_body() {
        let doc = Document::parse("## Events\n### Notes\n- x\n");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].body, "### Notes\n- x");
    }

    #[test]
    fn test_heading_at_end_of_file() {
        let doc = Document::parse("## Events\n- a\n## Trailing");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[1].heading, "Trailing");
        assert_eq!(doc.sections[1].body, "");
    }

    #[test]
    fn test_heading_without_space_and_crlf() {
        let doc = Document::parse("##Contract Name\r\nToken\r\n");
        assert_eq!(doc.section_body("contract name"), "Token");
    }

    #[test]
    fn test_missing_section_is_empty() {
        let doc = Document::parse("no headings here");
        assert!(doc.sections.is_empty());
        assert_eq!(doc.section_body("Events"), "");
    }
}
