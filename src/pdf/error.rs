//! Errors raised while loading or rasterising documents

/// Errors from the document engine
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("PDF engine: {0}")]
    Pdf(String),

    #[error("page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },

    #[error("document has no pages")]
    Empty,

    #[error("built without PDF support")]
    Unsupported,

    #[error("{detail}")]
    Generic { detail: String },
}

#[cfg(feature = "pdf")]
impl From<mupdf::error::Error> for DocumentError {
    fn from(err: mupdf::error::Error) -> Self {
        Self::Pdf(err.to_string())
    }
}

impl DocumentError {
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic { detail: msg.into() }
    }
}
