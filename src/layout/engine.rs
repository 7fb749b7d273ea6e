//! Page layout engine: a pure function of (text, configuration)

use crate::config::LayoutConfig;
use crate::layout::line_break::{piece_count, wrap_line};
use crate::layout::pagination::{Line, Page, PageFiller};
use std::mem;

/// Lays text out into locally numbered pages.
///
/// Holds nothing but its configuration, so the same text always produces
/// the same pages regardless of what surrounds it in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageLayoutEngine {
    config: LayoutConfig,
}

impl PageLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Get config
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `text` into pages numbered from 1. Never returns an empty vec.
    pub fn layout(&self, text: &str) -> Vec<Page> {
        let max_chars = self.config.max_chars_per_line();
        let unit = self.config.wrap_unit();

        let mut filler = PageFiller::new(&self.config);
        let mut pages = Vec::new();
        let mut current = Page::new(1);

        for logical in logical_lines(text) {
            let pieces = wrap_line(logical, max_chars, unit);

            if filler.break_before_line(pieces.len()) {
                pages.push(mem::replace(&mut current, Page::new(filler.page_count())));
            }

            for (i, piece) in pieces.iter().enumerate() {
                if filler.break_before_piece() {
                    pages.push(mem::replace(&mut current, Page::new(filler.page_count())));
                }
                current.lines.push(Line {
                    text: (*piece).to_string(),
                    continuation: i > 0,
                });
            }
        }
        pages.push(current);

        log::trace!("laid out {} bytes into {} page(s)", text.len(), pages.len());
        pages
    }

    /// Page count of `layout(text)` without materialising any line
    pub fn count_pages(&self, text: &str) -> usize {
        let max_chars = self.config.max_chars_per_line();
        let unit = self.config.wrap_unit();

        let mut filler = PageFiller::new(&self.config);
        for logical in logical_lines(text) {
            let pieces = piece_count(logical, max_chars, unit);
            filler.break_before_line(pieces);
            for _ in 0..pieces {
                filler.break_before_piece();
            }
        }

        filler.page_count()
    }
}

/// Lay out `text` with `config`
pub fn layout(text: &str, config: &LayoutConfig) -> Vec<Page> {
    PageLayoutEngine::new(*config).layout(text)
}

/// Number of pages `layout(text, config)` produces
pub fn count_pages(text: &str, config: &LayoutConfig) -> usize {
    PageLayoutEngine::new(*config).count_pages(text)
}

/// Logical lines of `text`; a trailing newline ends the last line rather
/// than opening another one
fn logical_lines(text: &str) -> std::str::Lines<'_> {
    // Empty text still yields one empty line
    if text.is_empty() {
        "\n".lines()
    } else {
        text.lines()
    }
}
