//! Hard wrapping of logical lines into physical lines

use crate::config::WrapUnit;
use smallvec::{smallvec, SmallVec};
use unicode_segmentation::UnicodeSegmentation;

/// Physical pieces of one logical line; most lines need a single piece
pub type LinePieces<'a> = SmallVec<[&'a str; 4]>;

/// Split `line` into consecutive pieces of at most `max_units` units each.
///
/// Pieces always end on a unit boundary, so a multi-byte character (or a
/// grapheme cluster in grapheme mode) is never split. An empty line yields
/// one empty piece.
pub fn wrap_line(line: &str, max_units: usize, unit: WrapUnit) -> LinePieces<'_> {
    debug_assert!(max_units > 0);
    if line.is_empty() {
        return smallvec![""];
    }

    match unit {
        WrapUnit::CodePoint => split_every(line, max_units, line.char_indices().map(|(i, _)| i)),
        WrapUnit::Grapheme => split_every(
            line,
            max_units,
            line.grapheme_indices(true).map(|(i, _)| i),
        ),
    }
}

/// Number of pieces `wrap_line` would produce, without slicing
pub fn piece_count(line: &str, max_units: usize, unit: WrapUnit) -> usize {
    unit_len(line, unit).div_ceil(max_units).max(1)
}

/// Length of `text` in wrap units
pub fn unit_len(text: &str, unit: WrapUnit) -> usize {
    match unit {
        WrapUnit::CodePoint => text.chars().count(),
        WrapUnit::Grapheme => text.graphemes(true).count(),
    }
}

fn split_every<'a>(
    line: &'a str,
    max_units: usize,
    unit_starts: impl Iterator<Item = usize>,
) -> LinePieces<'a> {
    let mut pieces = SmallVec::new();
    let mut piece_start = 0;

    for (n, byte_idx) in unit_starts.enumerate() {
        if n > 0 && n % max_units == 0 {
            pieces.push(&line[piece_start..byte_idx]);
            piece_start = byte_idx;
        }
    }
    pieces.push(&line[piece_start..]);

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_is_single_piece() {
        let pieces = wrap_line("Hello", 10, WrapUnit::CodePoint);
        assert_eq!(pieces.as_slice(), &["Hello"]);
        assert_eq!(piece_count("Hello", 10, WrapUnit::CodePoint), 1);
    }

    #[test]
    fn test_empty_line() {
        let pieces = wrap_line("", 10, WrapUnit::CodePoint);
        assert_eq!(pieces.as_slice(), &[""]);
        assert_eq!(piece_count("", 10, WrapUnit::CodePoint), 1);
    }

    #[test]
    fn test_exact_fit() {
        let pieces = wrap_line("abcde", 5, WrapUnit::CodePoint);
        assert_eq!(pieces.as_slice(), &["abcde"]);
    }

    #[test]
    fn test_hard_wrap() {
        let pieces = wrap_line("Hello World", 5, WrapUnit::CodePoint);
        assert_eq!(pieces.as_slice(), &["Hello", " Worl", "d"]);
        assert_eq!(piece_count("Hello World", 5, WrapUnit::CodePoint), 3);
    }

    #[test]
    fn test_counts_code_points_not_bytes() {
        let line = "这是第一章的内容";
        let pieces = wrap_line(line, 3, WrapUnit::CodePoint);
        assert_eq!(pieces.as_slice(), &["这是第", "一章的", "内容"]);
        assert_eq!(piece_count(line, 3, WrapUnit::CodePoint), 3);
    }

    #[test]
    fn test_grapheme_mode_keeps_clusters() {
        // "e" + combining acute accent, twice
        let line = "e\u{301}e\u{301}";
        assert_eq!(unit_len(line, WrapUnit::CodePoint), 4);
        assert_eq!(unit_len(line, WrapUnit::Grapheme), 2);

        let pieces = wrap_line(line, 1, WrapUnit::Grapheme);
        assert_eq!(pieces.as_slice(), &["e\u{301}", "e\u{301}"]);

        let pieces = wrap_line(line, 1, WrapUnit::CodePoint);
        assert_eq!(pieces.len(), 4);
    }
}
