//! Error types for unocr library.

use std::io;
use thiserror::Error;

/// Result type alias for unocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, recognizing, exporting or
/// visualizing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a supported image nor a PDF.
    #[error("Unknown file format: {0}")]
    UnknownFormat(String),

    /// An image could not be decoded or encoded.
    #[error("Image error: {0}")]
    ImageDecode(String),

    /// A PDF page could not be rasterized.
    #[error("PDF rendering error: {0}")]
    PdfRender(String),

    /// The OCR engine failed or could not be launched.
    #[error("OCR engine error: {0}")]
    Engine(String),

    /// The OCR engine produced output that could not be parsed.
    #[error("Malformed engine output at line {line}: {message}")]
    TsvParse {
        /// 1-indexed line number in the engine output
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// The document source exposes neither an image sequence nor an
    /// image-extraction accessor.
    #[error("Unsupported document type for visualization: {0}")]
    UnsupportedDocument(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The rendered image could not be shown on screen.
    #[error("Display unavailable: {0}")]
    Display(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::ImageDecode(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}
