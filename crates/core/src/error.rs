//! Error types for PDF to image conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the pdf-to-image library.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Source PDF does not exist.
    #[error("PDF file not found: {0}")]
    InputNotFound(PathBuf),

    /// The document could not be opened or processed as a whole.
    #[error("PDF conversion failed for '{path}': {message}")]
    ConversionFailed { path: PathBuf, message: String },

    /// Pdfium library could not be bound.
    #[error("Pdfium error: {0}")]
    PdfiumError(String),

    /// A single page failed to render.
    #[error("Failed to render page {page}: {message}")]
    PageRenderError { page: usize, message: String },

    /// Image encoding failed.
    #[error("Image encoding failed: {0}")]
    ImageEncodingError(String),

    /// Output directory creation failed.
    #[error("Failed to create output directory '{path}': {message}")]
    OutputDirError { path: PathBuf, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed or out-of-order page range.
    #[error("Invalid page range '{0}', expected 'start-end' or 'start'")]
    InvalidPageRange(String),

    /// Background worker exited without delivering a result.
    #[error("Conversion worker stopped before reporting a result")]
    WorkerLost,

    /// Filesystem error while writing a page.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, ConversionError>;

impl From<image::ImageError> for ConversionError {
    fn from(e: image::ImageError) -> Self {
        ConversionError::ImageEncodingError(e.to_string())
    }
}

impl From<png::EncodingError> for ConversionError {
    fn from(e: png::EncodingError) -> Self {
        ConversionError::ImageEncodingError(e.to_string())
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for ConversionError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        ConversionError::WorkerLost
    }
}
