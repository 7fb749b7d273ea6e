//! Render output: the textual page exchange format and its parser

mod parse;
mod wire;

pub use parse::{parse_pages, ParsedPage};
pub use wire::{format_page, format_pages, PAGE_END_MARKER, PAGE_HEADER_PREFIX, PAGE_START_MARKER};
