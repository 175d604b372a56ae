//! Error types for the skin-analysis core.

use thiserror::Error;

/// Failures the analysis core can produce.
///
/// The HTTP layer maps these onto status codes: [`InvalidImage`] is a client
/// error, the rest are server errors. Generation never recovers into a
/// partial report — any failure aborts the whole request.
///
/// [`InvalidImage`]: AnalysisError::InvalidImage
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Uploaded bytes could not be decoded as an image.
    #[error("invalid image data: {0}")]
    InvalidImage(String),

    /// The real-inference path was invoked, but no model is wired in yet.
    #[error(
        "real analysis is not implemented; set DERMALENS_MOCK_MODE=true to use the mock generator"
    )]
    NotImplemented,

    /// A generated mask failed to encode as PNG.
    #[error("failed to encode mask image: {0}")]
    MaskEncoding(#[from] image::ImageError),
}

/// Result type alias for the analysis core.
pub type Result<T> = std::result::Result<T, AnalysisError>;
