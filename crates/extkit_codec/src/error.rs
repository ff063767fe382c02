use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Failures surfaced by the codecs.
///
/// Missing input is never an error, it produces the target's default value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// Malformed JSON input, or a value `serde_json` cannot represent.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::SeError),

    /// Reading the input stream failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Returns `true` for JSON that is malformed, truncated, or does not
    /// fit the target type.
    pub fn is_parse(&self) -> bool {
        match self {
            Self::Json(err) => err.is_syntax() || err.is_eof() || err.is_data(),
            _ => false,
        }
    }
}

pub type Result<T, E = CodecError> = core::result::Result<T, E>;
