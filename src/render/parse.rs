//! Consumer-side parser for the page exchange format

use crate::error::{Result, TypesetError};
use crate::render::wire::{PAGE_END_MARKER, PAGE_HEADER_PREFIX, PAGE_START_MARKER};

/// A page recovered from formatted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub number: usize,
    pub lines: Vec<String>,
}

/// Parse text produced by [`crate::render::format_pages`].
///
/// Parsing follows the header and marker lines rather than blank-line
/// separators, so pages that contain blank lines are recovered exactly.
pub fn parse_pages(text: &str) -> Result<Vec<ParsedPage>> {
    let mut pages = Vec::new();
    let mut lines = text.split('\n').enumerate();

    loop {
        let Some((row, header)) = lines.by_ref().find(|(_, line)| !line.is_empty()) else {
            break;
        };

        let number = header
            .strip_prefix(PAGE_HEADER_PREFIX)
            .and_then(|n| n.trim().parse::<usize>().ok())
            .ok_or_else(|| malformed(row, format!("expected page header, found {header:?}")))?;

        match lines.next() {
            Some((_, line)) if line == PAGE_START_MARKER => {}
            Some((row, line)) => {
                return Err(malformed(row, format!("expected {PAGE_START_MARKER:?}, found {line:?}")))
            }
            None => return Err(malformed(row, format!("page {number} has no start marker"))),
        }

        let mut body = Vec::new();
        let mut closed = false;
        for (_, line) in lines.by_ref() {
            if line == PAGE_END_MARKER {
                closed = true;
                break;
            }
            body.push(line.to_string());
        }
        if !closed {
            return Err(malformed(row, format!("page {number} has no end marker")));
        }

        pages.push(ParsedPage { number, lines: body });
    }

    Ok(pages)
}

fn malformed(row: usize, detail: String) -> TypesetError {
    TypesetError::MalformedDocument(format!("line {}: {}", row + 1, detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::layout;
    use crate::render::format_pages;

    #[test]
    fn test_round_trip() {
        let config = LayoutConfig::new(3, 6).unwrap();
        let pages = layout("first line\n\nsecond\n\n\nthird line here\n", &config);
        let parsed = parse_pages(&format_pages(&pages)).unwrap();

        assert_eq!(parsed.len(), pages.len());
        for (page, recovered) in pages.iter().zip(&parsed) {
            assert_eq!(recovered.number, page.absolute_number);
            let expected: Vec<_> = page.line_texts().collect();
            assert_eq!(recovered.lines, expected);
        }
    }

    #[test]
    fn test_blank_line_sections_without_blank_content() {
        let config = LayoutConfig::new(2, 80).unwrap();
        let pages = layout("a\nb\nc", &config);
        let text = format_pages(&pages);

        // Naive consumer: one blank-line separated section per page
        let sections: Vec<_> = text.split("\n\n").filter(|s| !s.is_empty()).collect();
        assert_eq!(sections.len(), pages.len());
        for (section, page) in sections.iter().zip(&pages) {
            let rows: Vec<_> = section.lines().collect();
            let body = &rows[2..rows.len() - 1];
            let expected: Vec<_> = page.line_texts().collect();
            assert_eq!(body, expected.as_slice());
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_pages("").unwrap(), vec![]);
        assert_eq!(parse_pages("\n\n").unwrap(), vec![]);
    }

    #[test]
    fn test_page_with_single_empty_line() {
        let parsed = parse_pages("Page 1\n--- Page Start ---\n\n--- Page End ---\n\n").unwrap();
        assert_eq!(parsed, vec![ParsedPage { number: 1, lines: vec![String::new()] }]);
    }

    #[test]
    fn test_malformed_input() {
        let missing_header = parse_pages("--- Page Start ---\nx\n--- Page End ---\n");
        assert!(matches!(missing_header, Err(TypesetError::MalformedDocument(_))));

        let missing_start = parse_pages("Page 1\nx\n--- Page End ---\n");
        assert!(matches!(missing_start, Err(TypesetError::MalformedDocument(_))));

        let missing_end = parse_pages("Page 1\n--- Page Start ---\nx\n");
        assert!(matches!(missing_end, Err(TypesetError::MalformedDocument(_))));

        let bad_number = parse_pages("Page one\n--- Page Start ---\nx\n--- Page End ---\n");
        assert!(matches!(bad_number, Err(TypesetError::MalformedDocument(_))));
    }
}
