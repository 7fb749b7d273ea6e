//! Chapter scanning: splits raw text into contiguous heading-delimited chapters

mod heading;

pub use heading::{parse_heading, Heading, HeadingKind};

use crate::config::ScanOptions;
use std::ops::Range;

/// A contiguous span of the document started by a heading (or by the
/// document start for the implicit leading chapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Ordinal position in the document
    pub index: usize,
    pub title: String,
    /// Byte range covered by this chapter, heading line included.
    /// Consecutive chapters tile the whole document.
    pub source_range: Range<usize>,
    /// Byte range that is laid out: the heading line and trailing blank
    /// lines are excluded
    pub body_range: Range<usize>,
}

impl Chapter {
    /// Text that gets paginated for this chapter
    ///
    /// # Panics
    ///
    /// Panics if `document` is not the text this chapter was scanned from and
    /// the range falls outside it or off a character boundary. Use
    /// [`Chapter::try_body`] when the document may have changed.
    pub fn body<'a>(&self, document: &'a str) -> &'a str {
        &document[self.body_range.clone()]
    }

    /// Full source text, heading included
    ///
    /// # Panics
    ///
    /// Same precondition as [`Chapter::body`].
    pub fn source<'a>(&self, document: &'a str) -> &'a str {
        &document[self.source_range.clone()]
    }

    /// Body text, or `None` when the range does not fit `document`
    pub fn try_body<'a>(&self, document: &'a str) -> Option<&'a str> {
        document.get(self.body_range.clone())
    }
}

/// Chapter being accumulated during a scan
struct OpenChapter {
    title: String,
    start: usize,
    body_start: usize,
    /// End of the last non-blank line seen in the body
    content_end: usize,
    /// Whether this chapter was opened by a heading
    has_heading: bool,
}

impl OpenChapter {
    fn has_content(&self) -> bool {
        self.content_end > self.body_start
    }

    fn close(self, index: usize, end: usize) -> Chapter {
        Chapter {
            index,
            title: self.title,
            source_range: self.start..end,
            body_range: self.body_start..self.content_end.max(self.body_start),
        }
    }
}

/// Split `document` into chapters. Always returns at least one chapter.
pub fn scan(document: &str, options: &ScanOptions) -> Vec<Chapter> {
    let mut chapters = Vec::new();
    let mut open = OpenChapter {
        title: options.untitled_title.clone(),
        start: 0,
        body_start: 0,
        content_end: 0,
        has_heading: false,
    };

    let mut offset = 0;
    for raw_line in document.split_inclusive('\n') {
        let line = raw_line.strip_suffix('\n').unwrap_or(raw_line);
        let line_end = offset + raw_line.len();

        if let Some(heading) = parse_heading(line, options) {
            log::trace!("heading {:?} at byte {}", heading.title, offset);

            // Whitespace before the first heading joins the first chapter
            let absorb = !open.has_heading && !open.has_content();
            let next = OpenChapter {
                title: heading.title.to_string(),
                start: if absorb { 0 } else { offset },
                body_start: line_end,
                content_end: line_end,
                has_heading: true,
            };
            let previous = std::mem::replace(&mut open, next);
            if !absorb {
                let index = chapters.len();
                chapters.push(previous.close(index, offset));
            }
        } else if !line.trim().is_empty() {
            open.content_end = line_end;
        }

        offset = line_end;
    }

    let index = chapters.len();
    chapters.push(open.close(index, document.len()));

    log::debug!(
        "scanned {} chapter(s) from {} bytes",
        chapters.len(),
        document.len()
    );

    chapters
}

/// Ordered chapter titles
pub fn chapter_titles(document: &str, options: &ScanOptions) -> Vec<String> {
    scan(document, options)
        .into_iter()
        .map(|chapter| chapter.title)
        .collect()
}
