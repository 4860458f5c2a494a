//! Codegen error types.

/// Errors that can occur while rendering templates or generating probe source.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// A required template context sequence is absent.
    #[error("malformed template context: missing field '{field}'")]
    MalformedContext { field: &'static str },

    /// A registry entry cannot be embedded safely in generated source.
    #[error("invalid type name '{type_name}': {detail}")]
    InvalidTypeName { type_name: String, detail: String },

    /// Failed to parse a C function signature.
    #[error("invalid C signature: {detail}")]
    InvalidSignature { detail: String },

    /// A bridge declaration file is ill-formed.
    #[error("invalid bridge declaration: {detail}")]
    InvalidDeclaration { detail: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error (writing generated files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;
