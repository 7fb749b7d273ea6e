//! Typeset engine: chapter-aware pagination for plain and markdown-like text
//!
//! This crate provides the core typesetting pipeline with:
//! - Chapter scanning on heading lines
//! - Pure per-chapter layout into fixed-capacity pages
//! - Global page numbering via prefix sums, so one chapter can be rendered
//!   alone with the same numbers a full-document pass gives it
//! - A textual page exchange format and its parser

pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod layout;
pub mod render;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmTypesetter;

// Re-export primary types
pub use config::{LayoutConfig, ScanOptions, WrapUnit};
pub use document::{scan, Chapter};
pub use error::{Result, TypesetError};
pub use index::{
    paginate_chapter, paginate_document, ChapterIndex, ChapterPagination, ChapterStart,
    PageCountCache, PaginationResult,
};
pub use layout::{count_pages, layout, Line, Page, PageLayoutEngine};
pub use render::{format_pages, parse_pages, ParsedPage};

/// Layout configuration and scan options bundled for repeated calls.
///
/// Stateless: every call re-derives chapters and page counts from the text
/// it is given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Typesetter {
    config: LayoutConfig,
    options: ScanOptions,
}

impl Typesetter {
    /// Create a typesetter with default scan options
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            options: ScanOptions::default(),
        }
    }

    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn scan_options(&self) -> &ScanOptions {
        &self.options
    }

    /// Split a document into chapters
    pub fn chapters(&self, document: &str) -> Vec<Chapter> {
        scan(document, &self.options)
    }

    /// Ordered chapter titles
    pub fn chapter_titles(&self, document: &str) -> Vec<String> {
        document::chapter_titles(document, &self.options)
    }

    /// Chapters with page counts, without rendering any page
    pub fn index(&self, document: &str) -> ChapterIndex {
        ChapterIndex::build(document, &self.config, &self.options)
    }

    /// Ordered (title, absolute start page) pairs
    pub fn chapter_page_map(&self, document: &str) -> Vec<ChapterStart> {
        self.index(document).chapter_page_map()
    }

    /// Lay out the whole document
    pub fn paginate_document(&self, document: &str) -> PaginationResult {
        paginate_document(document, &self.config, &self.options)
    }

    /// Lay out one chapter with document-wide page numbers
    pub fn paginate_chapter(&self, document: &str, chapter_index: usize) -> Result<ChapterPagination> {
        paginate_chapter(document, &self.config, &self.options, chapter_index)
    }

    /// Same as `paginate_chapter`, reusing page counts kept in `cache`
    pub fn paginate_chapter_cached(
        &self,
        cache: &mut PageCountCache,
        document: &str,
        chapter_index: usize,
    ) -> Result<ChapterPagination> {
        cache.paginate_chapter(document, &self.config, &self.options, chapter_index)
    }
}
