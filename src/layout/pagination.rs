//! Pages and the greedy page-filling rules

use crate::config::LayoutConfig;

/// One physical line on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    /// True for the second and later pieces of a wrapped logical line
    pub continuation: bool,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            continuation: false,
        }
    }
}

/// A page of at most `max_lines_per_page` lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based index within the chapter
    pub local_number: usize,
    /// 1-based index within the whole document
    pub absolute_number: usize,
    /// Chapter this page belongs to
    pub chapter_index: usize,
    pub lines: Vec<Line>,
}

impl Page {
    /// Create an empty, locally numbered page
    pub fn new(local_number: usize) -> Self {
        Self {
            local_number,
            absolute_number: local_number,
            chapter_index: 0,
            lines: Vec::new(),
        }
    }

    /// Get total line count
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line texts in order
    pub fn line_texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|line| line.text.as_str())
    }

    /// Place this page after `preceding_pages` pages of earlier chapters
    pub fn offset_by(&mut self, chapter_index: usize, preceding_pages: usize) {
        self.chapter_index = chapter_index;
        self.absolute_number = preceding_pages + self.local_number;
    }
}

/// Greedy page-break decisions shared by full layout and page counting,
/// so both always agree on where pages end.
#[derive(Debug, Clone)]
pub(crate) struct PageFiller {
    max_lines: usize,
    keep_together: bool,
    /// Lines already placed on the current page
    used: usize,
    pages: usize,
}

impl PageFiller {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            max_lines: config.max_lines_per_page(),
            keep_together: config.keep_wrapped_lines_together(),
            used: 0,
            pages: 1,
        }
    }

    /// Called once per logical line before its pieces are placed. Returns
    /// true when the line has to open a new page.
    pub fn break_before_line(&mut self, pieces: usize) -> bool {
        let moves = self.keep_together
            && pieces > 1
            && self.used > 0
            && self.used + pieces > self.max_lines
            && pieces <= self.max_lines;
        if moves {
            self.next_page();
        }
        moves
    }

    /// Called for every physical piece. Returns true when the piece opens a
    /// new page.
    pub fn break_before_piece(&mut self) -> bool {
        let full = self.used == self.max_lines;
        if full {
            self.next_page();
        }
        self.used += 1;
        full
    }

    /// Pages opened so far, including the current one
    pub fn page_count(&self) -> usize {
        self.pages
    }

    fn next_page(&mut self) {
        self.used = 0;
        self.pages += 1;
    }
}
