//! WASM bindings for the typesetter

use crate::commands;
use crate::config::{LayoutConfig, ScanOptions, WrapUnit};
use crate::index::PageCountCache;
use crate::layout::Page;
use crate::Typesetter;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-exposed typesetter wrapper.
///
/// Keeps a page count cache so paging through one document chapter by
/// chapter does not recount every chapter on each request.
#[wasm_bindgen]
pub struct WasmTypesetter {
    typesetter: Typesetter,
    cache: PageCountCache,
}

#[wasm_bindgen]
impl WasmTypesetter {
    /// Create a typesetter with the default page size (30 lines of 80 characters)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_typesetter(Typesetter::default())
    }

    /// Create a typesetter with custom page dimensions
    #[wasm_bindgen(js_name = withDimensions)]
    pub fn with_dimensions(
        max_lines_per_page: usize,
        max_chars_per_line: usize,
    ) -> Result<WasmTypesetter, JsError> {
        let config = LayoutConfig::new(max_lines_per_page, max_chars_per_line)?;
        Ok(Self::from_typesetter(Typesetter::new(config)))
    }

    /// Create a typesetter from a layout configuration JSON object
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> Result<WasmTypesetter, JsError> {
        let config = LayoutConfig::from_json(config_json)?;
        Ok(Self::from_typesetter(Typesetter::new(config)))
    }

    /// Deepest `#` heading level that starts a chapter; 0 disables them
    #[wasm_bindgen(js_name = setMaxHeadingLevel)]
    pub fn set_max_heading_level(&mut self, level: u8) {
        let options = self.typesetter.scan_options().clone().with_max_heading_level(level);
        self.set_scan_options(options);
    }

    /// Also start chapters on `第N章` style lines
    #[wasm_bindgen(js_name = setNumberedHeadings)]
    pub fn set_numbered_headings(&mut self, enabled: bool) {
        let options = self.typesetter.scan_options().clone().with_numbered_headings(enabled);
        self.set_scan_options(options);
    }

    /// Count line width in grapheme clusters instead of code points
    #[wasm_bindgen(js_name = setGraphemeWrapping)]
    pub fn set_grapheme_wrapping(&mut self, enabled: bool) {
        let unit = if enabled {
            WrapUnit::Grapheme
        } else {
            WrapUnit::CodePoint
        };
        let config = self.typesetter.config().with_wrap_unit(unit);
        self.set_config(config);
    }

    /// Never split one wrapped line across two pages
    #[wasm_bindgen(js_name = setKeepWrappedLinesTogether)]
    pub fn set_keep_wrapped_lines_together(&mut self, keep: bool) {
        let config = self.typesetter.config().with_keep_wrapped_lines_together(keep);
        self.set_config(config);
    }

    /// Get the layout configuration (returns JSON)
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.typesetter.config())?)
    }

    /// Whole document in the page exchange format
    #[wasm_bindgen(js_name = typesetDocument)]
    pub fn typeset_document(&self, content: &str) -> String {
        commands::typeset_document(content, &self.typesetter)
    }

    /// Chapter titles (returns JSON array)
    #[wasm_bindgen(js_name = parseDocumentChapters)]
    pub fn parse_document_chapters(&self, content: &str) -> Result<String, JsError> {
        Ok(serde_json::to_string(&commands::parse_document_chapters(
            content,
            &self.typesetter,
        ))?)
    }

    /// [title, startPage] pairs (returns JSON)
    #[wasm_bindgen(js_name = getDocumentChapterPageMapping)]
    pub fn get_document_chapter_page_mapping(&self, content: &str) -> Result<String, JsError> {
        Ok(serde_json::to_string(
            &commands::get_document_chapter_page_mapping(content, &self.typesetter),
        )?)
    }

    /// Page text plus chapter start pages (returns JSON)
    #[wasm_bindgen(js_name = typesetDocumentWithChapterInfo)]
    pub fn typeset_document_with_chapter_info(&self, content: &str) -> Result<String, JsError> {
        Ok(serde_json::to_string(
            &commands::typeset_document_with_chapter_info(content, &self.typesetter),
        )?)
    }

    /// One chapter with document-wide page numbers (returns JSON)
    #[wasm_bindgen(js_name = loadChapterContentWithOffset)]
    pub fn load_chapter_content_with_offset(
        &mut self,
        content: &str,
        chapter_index: usize,
    ) -> Result<String, JsError> {
        let reply = commands::load_chapter_content_cached(
            content,
            chapter_index,
            &self.typesetter,
            &mut self.cache,
        )?;
        Ok(serde_json::to_string(&reply)?)
    }

    /// Structured pages of one chapter for direct rendering (returns JSON)
    #[wasm_bindgen(js_name = getChapterPages)]
    pub fn get_chapter_pages(&mut self, content: &str, chapter_index: usize) -> Result<String, JsError> {
        let chapter = self
            .typesetter
            .paginate_chapter_cached(&mut self.cache, content, chapter_index)?;
        let pages: Vec<PageRenderData> = chapter.pages.iter().map(PageRenderData::from).collect();
        Ok(serde_json::to_string(&pages)?)
    }

    /// Get total page count
    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&mut self, content: &str) -> usize {
        let config = *self.typesetter.config();
        self.cache
            .index(content, &config, self.typesetter.scan_options())
            .total_page_count()
    }
}

impl WasmTypesetter {
    fn from_typesetter(typesetter: Typesetter) -> Self {
        Self {
            typesetter,
            cache: PageCountCache::new(),
        }
    }

    fn set_config(&mut self, config: LayoutConfig) {
        let options = self.typesetter.scan_options().clone();
        self.typesetter = Typesetter::new(config).with_scan_options(options);
    }

    fn set_scan_options(&mut self, options: ScanOptions) {
        self.typesetter = self.typesetter.clone().with_scan_options(options);
    }
}

impl Default for WasmTypesetter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole document in the page exchange format, with an optional layout
/// configuration JSON object
#[wasm_bindgen(js_name = typesetDocument)]
pub fn typeset_document(content: &str, config_json: Option<String>) -> Result<String, JsError> {
    let config = match config_json {
        Some(json) => LayoutConfig::from_json(&json)?,
        None => LayoutConfig::default(),
    };
    Ok(commands::typeset_document(content, &Typesetter::new(config)))
}

/// Chapter titles with default settings (returns JSON array)
#[wasm_bindgen(js_name = parseDocumentChapters)]
pub fn parse_document_chapters(content: &str) -> Result<String, JsError> {
    WasmTypesetter::new().parse_document_chapters(content)
}

/// [title, startPage] pairs with default settings (returns JSON)
#[wasm_bindgen(js_name = getDocumentChapterPageMapping)]
pub fn get_document_chapter_page_mapping(content: &str) -> Result<String, JsError> {
    WasmTypesetter::new().get_document_chapter_page_mapping(content)
}

/// Page text plus chapter start pages with default settings (returns JSON)
#[wasm_bindgen(js_name = typesetDocumentWithChapterInfo)]
pub fn typeset_document_with_chapter_info(content: &str) -> Result<String, JsError> {
    WasmTypesetter::new().typeset_document_with_chapter_info(content)
}

/// One chapter with document-wide page numbers, default settings (returns JSON)
#[wasm_bindgen(js_name = loadChapterContentWithOffset)]
pub fn load_chapter_content_with_offset(content: &str, chapter_index: usize) -> Result<String, JsError> {
    WasmTypesetter::new().load_chapter_content_with_offset(content, chapter_index)
}

/// Serializable page data for JS
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRenderData {
    pub absolute_number: usize,
    pub local_number: usize,
    pub chapter_index: usize,
    pub lines: Vec<LineRenderData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRenderData {
    pub text: String,
    pub continuation: bool,
}

impl From<&Page> for PageRenderData {
    fn from(page: &Page) -> Self {
        Self {
            absolute_number: page.absolute_number,
            local_number: page.local_number,
            chapter_index: page.chapter_index,
            lines: page
                .lines
                .iter()
                .map(|line| LineRenderData {
                    text: line.text.clone(),
                    continuation: line.continuation,
                })
                .collect(),
        }
    }
}
