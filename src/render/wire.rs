//! Textual page exchange format
//!
//! ```text
//! Page 3
//! --- Page Start ---
//! first line
//! second line
//! --- Page End ---
//!
//! ```
//!
//! The marker lines are a compatibility contract with existing consumers;
//! `tests::test_wire_fixture` pins them.

use crate::layout::Page;

/// Header line prefix, followed by the absolute page number
pub const PAGE_HEADER_PREFIX: &str = "Page ";

/// Line opening a page's content
pub const PAGE_START_MARKER: &str = "--- Page Start ---";

/// Line closing a page's content
pub const PAGE_END_MARKER: &str = "--- Page End ---";

/// Serialize pages in order; every page block is followed by a blank line
pub fn format_pages<'a>(pages: impl IntoIterator<Item = &'a Page>) -> String {
    let mut out = String::new();
    for page in pages {
        format_page(page, &mut out);
    }
    out
}

/// Append one page block to `out`
pub fn format_page(page: &Page, out: &mut String) {
    out.push_str(PAGE_HEADER_PREFIX);
    out.push_str(&page.absolute_number.to_string());
    out.push('\n');
    out.push_str(PAGE_START_MARKER);
    out.push('\n');
    for text in page.line_texts() {
        out.push_str(text);
        out.push('\n');
    }
    out.push_str(PAGE_END_MARKER);
    out.push_str("\n\n");
}
