//! Heading recognition for chapter boundaries

use crate::config::ScanOptions;

/// Numerals accepted between `第` and the chapter suffix
const CJK_NUMERALS: &str = "零〇一二三四五六七八九十百千万两";

/// Suffixes that close a numbered heading (`第三章`, `第十回`, ...)
const CHAPTER_SUFFIXES: &str = "章回节卷";

/// Longest line still considered a numbered heading, in code points
const MAX_NUMBERED_HEADING_CHARS: usize = 50;

/// The kind of heading a line was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    /// `#` heading with level (1-6)
    Markdown { level: u8 },
    /// `第N章` style heading
    Numbered,
}

impl HeadingKind {
    /// Heading level; numbered headings count as top level
    pub fn level(&self) -> u8 {
        match self {
            HeadingKind::Markdown { level } => *level,
            HeadingKind::Numbered => 1,
        }
    }
}

/// A line that starts a chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    pub kind: HeadingKind,
    pub title: &'a str,
}

/// Recognise a chapter heading. `line` must not contain its `\n` terminator.
pub fn parse_heading<'a>(line: &'a str, options: &ScanOptions) -> Option<Heading<'a>> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if let Some(heading) = parse_markdown_heading(line) {
        return match heading.kind {
            HeadingKind::Markdown { level } if level <= options.max_heading_level => Some(heading),
            _ => None,
        };
    }

    if options.numbered_headings {
        return parse_numbered_heading(line);
    }

    None
}

fn parse_markdown_heading(line: &str) -> Option<Heading<'_>> {
    let rest = line.trim_start_matches(' ');
    if line.len() - rest.len() > 3 {
        return None;
    }

    let level = rest.bytes().take_while(|b| *b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let after = &rest[level..];
    if !after.starts_with(char::is_whitespace) {
        return None;
    }

    let mut title = after.trim();
    // Closing `#` run, only when separated from the title
    let stripped = title.trim_end_matches('#');
    if stripped.len() < title.len() && (stripped.is_empty() || stripped.ends_with(char::is_whitespace)) {
        title = stripped.trim_end();
    }

    if title.is_empty() {
        return None;
    }

    Some(Heading {
        kind: HeadingKind::Markdown { level: level as u8 },
        title,
    })
}

fn parse_numbered_heading(line: &str) -> Option<Heading<'_>> {
    let title = line.trim();
    if title.chars().count() > MAX_NUMBERED_HEADING_CHARS {
        return None;
    }

    let rest = title.strip_prefix('第')?;
    let numeral_len: usize = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || CJK_NUMERALS.contains(*c))
        .map(char::len_utf8)
        .sum();
    if numeral_len == 0 {
        return None;
    }

    let mut tail = rest[numeral_len..].chars();
    if !tail.next().is_some_and(|c| CHAPTER_SUFFIXES.contains(c)) {
        return None;
    }

    let remainder = tail.as_str();
    if !remainder.is_empty() && !remainder.starts_with(char::is_whitespace) {
        return None;
    }

    Some(Heading {
        kind: HeadingKind::Numbered,
        title,
    })
}
