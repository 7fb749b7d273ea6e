//! Page layout: hard wrapping and greedy page filling

mod engine;
mod line_break;
mod pagination;

pub use engine::{count_pages, layout, PageLayoutEngine};
pub use line_break::{piece_count, unit_len, wrap_line, LinePieces};
pub use pagination::{Line, Page};
