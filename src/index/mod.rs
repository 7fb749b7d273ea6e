//! Chapter index coordinator
//!
//! Chapters are laid out independently; absolute page numbers come from
//! prefix sums over per-chapter page counts. Single-chapter pagination only
//! counts pages for the other chapters and renders the requested one, which
//! yields exactly the pages a full-document pass assigns to that chapter.

mod cache;

pub use cache::PageCountCache;

use crate::config::{LayoutConfig, ScanOptions};
use crate::document::{scan, Chapter};
use crate::error::{Result, TypesetError};
use crate::layout::{Page, PageLayoutEngine};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Absolute first page of a chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterStart {
    pub title: String,
    pub start_page: usize,
}

/// Full-document pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationResult {
    /// All pages, absolutely numbered from 1
    pub pages: Vec<Page>,
    pub chapter_page_map: Vec<ChapterStart>,
    pub total_page_count: usize,
}

/// Pages of one chapter, numbered as in the full document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPagination {
    pub chapter_index: usize,
    pub title: String,
    pub pages: Vec<Page>,
    pub absolute_start_page: usize,
    pub total_page_count: usize,
}

/// Scanned chapters with their page counts and absolute start pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterIndex {
    chapters: Vec<Chapter>,
    page_counts: Vec<usize>,
    /// 1-based absolute first page per chapter
    start_pages: Vec<usize>,
    total_page_count: usize,
    config: LayoutConfig,
    document_len: usize,
    document_hash: u64,
}

impl ChapterIndex {
    /// Scan `document` and count the pages of every chapter
    pub fn build(document: &str, config: &LayoutConfig, options: &ScanOptions) -> Self {
        Self::from_chapters(document, scan(document, options), config)
    }

    fn from_chapters(document: &str, chapters: Vec<Chapter>, config: &LayoutConfig) -> Self {
        let engine = PageLayoutEngine::new(*config);

        let page_counts: Vec<usize> = chapters
            .iter()
            .map(|chapter| engine.count_pages(chapter.body(document)))
            .collect();

        let mut start_pages = Vec::with_capacity(page_counts.len());
        let mut preceding = 0;
        for count in &page_counts {
            start_pages.push(preceding + 1);
            preceding += count;
        }

        log::debug!(
            "indexed {} chapter(s), {} page(s) total",
            chapters.len(),
            preceding
        );

        Self {
            chapters,
            page_counts,
            start_pages,
            total_page_count: preceding,
            config: *config,
            document_len: document.len(),
            document_hash: hash_text(document),
        }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Get chapter by index
    pub fn chapter(&self, index: usize) -> Result<&Chapter> {
        self.chapters
            .get(index)
            .ok_or(TypesetError::InvalidChapterIndex {
                index,
                chapter_count: self.chapters.len(),
            })
    }

    pub fn page_count(&self, index: usize) -> Option<usize> {
        self.page_counts.get(index).copied()
    }

    /// Absolute first page of chapter `index`
    pub fn start_page(&self, index: usize) -> Option<usize> {
        self.start_pages.get(index).copied()
    }

    pub fn total_page_count(&self) -> usize {
        self.total_page_count
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Ordered (title, absolute start page) pairs
    pub fn chapter_page_map(&self) -> Vec<ChapterStart> {
        self.chapters
            .iter()
            .zip(&self.start_pages)
            .map(|(chapter, &start_page)| ChapterStart {
                title: chapter.title.clone(),
                start_page,
            })
            .collect()
    }

    /// Chapter containing absolute page `page`
    pub fn chapter_for_page(&self, page: usize) -> Option<usize> {
        if page == 0 || page > self.total_page_count {
            return None;
        }
        Some(self.start_pages.partition_point(|&start| start <= page) - 1)
    }

    /// Render chapter `index` of `document`, which must be the document this
    /// index was built from
    pub fn paginate_chapter(&self, document: &str, index: usize) -> Result<ChapterPagination> {
        let chapter = self.chapter(index)?;

        if document.len() != self.document_len || hash_text(document) != self.document_hash {
            return Err(TypesetError::MalformedDocument(format!(
                "document ({} bytes) is not the one this chapter index was built from ({} bytes)",
                document.len(),
                self.document_len
            )));
        }
        let body = chapter.try_body(document).ok_or_else(|| {
            TypesetError::MalformedDocument(format!(
                "chapter {index} range {:?} does not fall on character boundaries",
                chapter.body_range
            ))
        })?;

        let preceding = self.start_pages[index] - 1;
        let mut pages = PageLayoutEngine::new(self.config).layout(body);
        if pages.len() != self.page_counts[index] {
            return Err(TypesetError::MalformedDocument(format!(
                "chapter {index} laid out into {} page(s), index counted {}",
                pages.len(),
                self.page_counts[index]
            )));
        }
        for page in &mut pages {
            page.offset_by(index, preceding);
        }

        log::debug!(
            "chapter {} ({:?}): pages {}..={} of {}",
            index,
            chapter.title,
            preceding + 1,
            preceding + pages.len(),
            self.total_page_count
        );

        Ok(ChapterPagination {
            chapter_index: index,
            title: chapter.title.clone(),
            pages,
            absolute_start_page: preceding + 1,
            total_page_count: self.total_page_count,
        })
    }
}

/// Hash text content for document identity checks and cache lookups
pub(crate) fn hash_text(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Lay out every chapter of `document` and number pages across the whole document
pub fn paginate_document(
    document: &str,
    config: &LayoutConfig,
    options: &ScanOptions,
) -> PaginationResult {
    let chapters = scan(document, options);
    let engine = PageLayoutEngine::new(*config);

    let mut pages = Vec::new();
    let mut chapter_page_map = Vec::with_capacity(chapters.len());
    let mut preceding = 0;

    for chapter in &chapters {
        let mut chapter_pages = engine.layout(chapter.body(document));
        for page in &mut chapter_pages {
            page.offset_by(chapter.index, preceding);
        }

        chapter_page_map.push(ChapterStart {
            title: chapter.title.clone(),
            start_page: preceding + 1,
        });
        preceding += chapter_pages.len();
        pages.extend(chapter_pages);
    }

    log::debug!(
        "paginated {} chapter(s) into {} page(s)",
        chapters.len(),
        preceding
    );

    PaginationResult {
        pages,
        chapter_page_map,
        total_page_count: preceding,
    }
}

/// Lay out one chapter, numbered consistently with `paginate_document`
pub fn paginate_chapter(
    document: &str,
    config: &LayoutConfig,
    options: &ScanOptions,
    chapter_index: usize,
) -> Result<ChapterPagination> {
    let chapters = scan(document, options);
    if chapter_index >= chapters.len() {
        return Err(TypesetError::InvalidChapterIndex {
            index: chapter_index,
            chapter_count: chapters.len(),
        });
    }

    ChapterIndex::from_chapters(document, chapters, config).paginate_chapter(document, chapter_index)
}
