//! Command surface used by UI shells
//!
//! Each command is a pure function of the document text and a [`Typesetter`].
//! The WASM bindings and the CLI both go through here, so every front end
//! sees the same page text and the same numbering.

use crate::error::Result;
use crate::index::{ChapterPagination, ChapterStart, PageCountCache};
use crate::render::format_pages;
use crate::Typesetter;
use serde::Serialize;

/// Reply of `typeset_document_with_chapter_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesetWithChapters {
    /// Whole document in the page exchange format
    pub content: String,
    /// (title, absolute start page) per chapter
    pub chapters: Vec<(String, usize)>,
}

/// Reply of `load_chapter_content_with_offset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterContent {
    pub content: String,
    pub absolute_start_page: usize,
    pub total_page_count: usize,
}

impl From<ChapterStart> for (String, usize) {
    fn from(start: ChapterStart) -> Self {
        (start.title, start.start_page)
    }
}

fn into_pairs(map: Vec<ChapterStart>) -> Vec<(String, usize)> {
    map.into_iter().map(Into::into).collect()
}

/// Typeset the whole document and render it in the page exchange format
pub fn typeset_document(content: &str, typesetter: &Typesetter) -> String {
    let result = typesetter.paginate_document(content);
    format_pages(&result.pages)
}

/// Ordered chapter titles
pub fn parse_document_chapters(content: &str, typesetter: &Typesetter) -> Vec<String> {
    typesetter.chapter_titles(content)
}

/// Ordered (title, absolute start page) pairs, computed from page counts only
pub fn get_document_chapter_page_mapping(
    content: &str,
    typesetter: &Typesetter,
) -> Vec<(String, usize)> {
    into_pairs(typesetter.chapter_page_map(content))
}

/// Typeset the whole document and report where each chapter starts
pub fn typeset_document_with_chapter_info(
    content: &str,
    typesetter: &Typesetter,
) -> TypesetWithChapters {
    let result = typesetter.paginate_document(content);
    TypesetWithChapters {
        content: format_pages(&result.pages),
        chapters: into_pairs(result.chapter_page_map),
    }
}

/// Render one chapter with document-wide page numbers
pub fn load_chapter_content_with_offset(
    content: &str,
    chapter_index: usize,
    typesetter: &Typesetter,
) -> Result<ChapterContent> {
    let chapter = typesetter.paginate_chapter(content, chapter_index)?;
    Ok(chapter_reply(chapter))
}

/// Same reply as `load_chapter_content_with_offset`, reusing page counts kept in `cache`
pub fn load_chapter_content_cached(
    content: &str,
    chapter_index: usize,
    typesetter: &Typesetter,
    cache: &mut PageCountCache,
) -> Result<ChapterContent> {
    let chapter = typesetter.paginate_chapter_cached(cache, content, chapter_index)?;
    Ok(chapter_reply(chapter))
}

fn chapter_reply(chapter: ChapterPagination) -> ChapterContent {
    ChapterContent {
        content: format_pages(&chapter.pages),
        absolute_start_page: chapter.absolute_start_page,
        total_page_count: chapter.total_page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, ScanOptions};
    use crate::error::TypesetError;
    use crate::render::parse_pages;

    const DOC: &str = "# A\nline1\nline2\n\n# B\nline3";

    fn typesetter() -> Typesetter {
        Typesetter::new(LayoutConfig::new(2, 80).unwrap())
    }

    #[test]
    fn test_typeset_document() {
        let text = typeset_document(DOC, &typesetter());
        assert_eq!(
            text,
            "Page 1\n--- Page Start ---\nline1\nline2\n--- Page End ---\n\n\
             Page 2\n--- Page Start ---\nline3\n--- Page End ---\n\n"
        );
    }

    #[test]
    fn test_chapter_titles_and_mapping() {
        let t = typesetter();
        assert_eq!(parse_document_chapters(DOC, &t), vec!["A", "B"]);
        assert_eq!(
            get_document_chapter_page_mapping(DOC, &t),
            vec![("A".to_string(), 1), ("B".to_string(), 2)]
        );
    }

    #[test]
    fn test_with_chapter_info_agrees() {
        let t = typesetter();
        let reply = typeset_document_with_chapter_info(DOC, &t);
        assert_eq!(reply.content, typeset_document(DOC, &t));
        assert_eq!(reply.chapters, get_document_chapter_page_mapping(DOC, &t));
    }

    #[test]
    fn test_load_chapter_with_offset() {
        let reply = load_chapter_content_with_offset(DOC, 1, &typesetter()).unwrap();
        assert_eq!(reply.absolute_start_page, 2);
        assert_eq!(reply.total_page_count, 2);

        let pages = parse_pages(&reply.content).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 2);
        assert_eq!(pages[0].lines, vec!["line3"]);
    }

    #[test]
    fn test_cached_reply_matches() {
        let t = typesetter();
        let mut cache = PageCountCache::new();
        for i in 0..2 {
            assert_eq!(
                load_chapter_content_cached(DOC, i, &t, &mut cache).unwrap(),
                load_chapter_content_with_offset(DOC, i, &t).unwrap()
            );
        }
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_load_chapter_out_of_range() {
        let err = load_chapter_content_with_offset(DOC, 5, &typesetter()).unwrap_err();
        assert!(matches!(
            err,
            TypesetError::InvalidChapterIndex {
                index: 5,
                chapter_count: 2
            }
        ));
    }

    #[test]
    fn test_numbered_headings_through_commands() {
        let t = Typesetter::default()
            .with_scan_options(ScanOptions::default().with_numbered_headings(true));
        let doc = "第一章 初入\n正文\n第二章 离乡\n正文";
        assert_eq!(parse_document_chapters(doc, &t), vec!["第一章 初入", "第二章 离乡"]);
    }

    #[test]
    fn test_replies_serialize_camel_case() {
        let reply = load_chapter_content_with_offset(DOC, 0, &typesetter()).unwrap();
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["absoluteStartPage"], 1);
        assert_eq!(json["totalPageCount"], 2);

        let info = typeset_document_with_chapter_info(DOC, &typesetter());
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["chapters"][1][0], "B");
        assert_eq!(json["chapters"][1][1], 2);
    }
}
