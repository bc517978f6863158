//! Document loading.
//!
//! A document reaches the OCR engine and the visualizer as an ordered
//! sequence of page images. Two source representations exist and are told
//! apart by capability rather than by type:
//!
//! - [`ImageList`] already holds decoded images and exposes them through
//!   [`DocumentSource::image_list`],
//! - [`PdfDocument`] renders pages on demand through
//!   [`DocumentSource::as_images`].
//!
//! # Example
//!
//! ```no_run
//! use unocr::source::{load, page_images, LoadOptions};
//!
//! let doc = load(&["receipt.jpeg"], &LoadOptions::default())?;
//! let images = page_images(doc.as_ref())?;
//! println!("Loaded {} pages", images.len());
//! # Ok::<(), unocr::Error>(())
//! ```

mod images;
mod pdf;

pub use images::{load_image, ImageList};
pub use pdf::PdfDocument;

use crate::detect::{detect_format_from_path, InputFormat};
use crate::error::{Error, Result};
use image::DynamicImage;
use std::path::Path;

/// Something that can produce the page images of a document.
///
/// Implementors expose at least one of the two capabilities. A source that
/// exposes neither is rejected by [`page_images`] and [`page_image`] with
/// [`Error::UnsupportedDocument`].
pub trait DocumentSource {
    /// Human-readable name of the source, used in messages.
    fn name(&self) -> &str;

    /// Number of pages, when known without decoding them.
    fn page_count(&self) -> Option<usize> {
        self.image_list().map(<[DynamicImage]>::len)
    }

    /// Decoded page images held in memory.
    fn image_list(&self) -> Option<&[DynamicImage]> {
        None
    }

    /// Accessor that extracts page images on demand.
    fn as_images(&self) -> Option<Result<Vec<DynamicImage>>> {
        None
    }
}

/// Options for loading documents.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Rasterization scale for PDF pages (1.0 = 72 DPI)
    pub pdf_scale: f32,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PDF rasterization scale.
    pub fn with_pdf_scale(mut self, scale: f32) -> Self {
        self.pdf_scale = scale.max(0.1);
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { pdf_scale: 2.0 }
    }
}

/// Load a document from one or more input paths.
///
/// A single PDF path yields a [`PdfDocument`]; otherwise every path must be
/// an image and the result is an [`ImageList`] with one page per path.
pub fn load<P: AsRef<Path>>(paths: &[P], options: &LoadOptions) -> Result<Box<dyn DocumentSource>> {
    if let [single] = paths {
        let path = single.as_ref();
        if detect_format_from_path(path)?.is_pdf() {
            let pdf = PdfDocument::open(path)?.with_scale(options.pdf_scale);
            return Ok(Box::new(pdf));
        }
    }

    for path in paths {
        let path = path.as_ref();
        if let InputFormat::Pdf = detect_format_from_path(path)? {
            return Err(Error::Other(format!(
                "{} is a PDF; PDFs must be loaded on their own",
                path.display()
            )));
        }
    }

    Ok(Box::new(ImageList::from_paths(paths)?))
}

/// Extract every page image of a source, selecting the extraction path by
/// capability.
pub fn page_images(source: &dyn DocumentSource) -> Result<Vec<DynamicImage>> {
    if let Some(images) = source.image_list() {
        return Ok(images.to_vec());
    }
    if let Some(images) = source.as_images() {
        return images;
    }
    Err(Error::UnsupportedDocument(source.name().to_string()))
}

/// Extract a single page image (0-indexed) from a source.
pub fn page_image(source: &dyn DocumentSource, index: usize) -> Result<DynamicImage> {
    let images = match source.image_list() {
        Some(images) => {
            return images
                .get(index)
                .cloned()
                .ok_or_else(|| out_of_range(index, images.len()));
        }
        None => source
            .as_images()
            .ok_or_else(|| Error::UnsupportedDocument(source.name().to_string()))??,
    };

    let count = images.len();
    images
        .into_iter()
        .nth(index)
        .ok_or_else(|| out_of_range(index, count))
}

pub(crate) fn out_of_range(index: usize, count: usize) -> Error {
    Error::PageOutOfRange(page_number(index), u32::try_from(count).unwrap_or(u32::MAX))
}

/// 1-indexed page number of a 0-indexed page, saturating at `u32::MAX`.
pub(crate) fn page_number(index: usize) -> u32 {
    u32::try_from(index)
        .ok()
        .and_then(|n| n.checked_add(1))
        .unwrap_or(u32::MAX)
}
