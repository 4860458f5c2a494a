//! Typemap error types.

/// Errors that can occur while parsing registry tables or size reports.
#[derive(Debug, thiserror::Error)]
pub enum TypemapError {
    /// A registry table row is malformed or duplicated.
    #[error("invalid registry table at line {line}: {detail}")]
    InvalidTable { line: usize, detail: String },

    /// An enum tag in a table or report was not recognized.
    #[error("unknown {field} tag '{value}'")]
    UnknownTag { field: &'static str, value: String },

    /// The size report is not valid JSON of the expected shape.
    #[error("size report parse error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type alias for typemap operations.
pub type Result<T> = std::result::Result<T, TypemapError>;
