//! Input format detection.
//!
//! Inputs are classified by content, not by extension: a PDF is recognized
//! by its `%PDF-` header, everything else is handed to the `image` crate's
//! magic-byte sniffing.

use crate::error::{Error, Result};
use image::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Detected input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A PDF document whose pages are rasterized before recognition
    Pdf,
    /// A raster image
    Image(ImageFormat),
}

impl InputFormat {
    /// Check if this is a PDF.
    pub fn is_pdf(&self) -> bool {
        matches!(self, InputFormat::Pdf)
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Pdf => write!(f, "PDF"),
            InputFormat::Image(format) => write!(f, "{:?} image", format),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_LEN: u64 = 16;

/// Detect the format of a file from its leading bytes.
///
/// # Example
/// ```no_run
/// use unocr::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("receipt.jpeg").unwrap();
/// println!("Detected: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    File::open(path)?.take(HEADER_LEN).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
        .map_err(|_| Error::UnknownFormat(path.display().to_string()))
}

/// Detect the format of in-memory data.
///
/// # Returns
/// * `Ok(InputFormat)` if the data starts with a PDF or known image header
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if is_pdf_bytes(data) {
        return Ok(InputFormat::Pdf);
    }

    image::guess_format(data)
        .map(InputFormat::Image)
        .map_err(|_| Error::UnknownFormat("unrecognized header".to_string()))
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Check if a file is a PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(InputFormat::Pdf))
}
