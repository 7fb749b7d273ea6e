//! Error types shared by every engine entry point

use thiserror::Error;

/// Errors returned by the typesetting engine.
///
/// A call either returns a complete result or one of these; nothing is
/// partially applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesetError {
    #[error("chapter index {index} out of range (chapter_count={chapter_count})")]
    InvalidChapterIndex { index: usize, chapter_count: usize },
    #[error("invalid layout configuration: {0}")]
    InvalidConfiguration(String),
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

pub type Result<T> = std::result::Result<T, TypesetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TypesetError::InvalidChapterIndex {
            index: 4,
            chapter_count: 2,
        };
        assert_eq!(
            err.to_string(),
            "chapter index 4 out of range (chapter_count=2)"
        );

        let err = TypesetError::InvalidConfiguration("maxLinesPerPage must be positive".into());
        assert_eq!(
            err.to_string(),
            "invalid layout configuration: maxLinesPerPage must be positive"
        );
    }
}
