//! OCR engine abstraction.
//!
//! The engine is an external black box: given page images it returns the
//! recognized [`Page`] hierarchy. This crate ships one adapter,
//! [`TesseractEngine`], which drives the `tesseract` executable; other
//! engines plug in by implementing [`OcrEngine`].
//!
//! # Example
//!
//! ```no_run
//! use unocr::engine::{OcrEngine, TesseractEngine, TesseractOptions};
//! use unocr::source::{load, page_images, LoadOptions};
//!
//! let doc = load(&["receipt.jpeg"], &LoadOptions::default())?;
//! let engine = TesseractEngine::new(TesseractOptions::new().with_language("eng"));
//! let result = engine.recognize(&page_images(doc.as_ref())?)?;
//! println!("{} words", result.word_count());
//! # Ok::<(), unocr::Error>(())
//! ```

mod tesseract;
mod tsv;

pub use tesseract::{TesseractEngine, TesseractOptions};
pub use tsv::parse_tsv;

use crate::error::Result;
use crate::model::{Document, Page};
use image::DynamicImage;

/// Trait for OCR engines.
pub trait OcrEngine {
    /// Get the name of this engine.
    fn name(&self) -> &str;

    /// Recognize a single page image.
    fn recognize_page(&self, image: &DynamicImage) -> Result<Page>;

    /// Recognize every page image, in order.
    ///
    /// The first failing page aborts the whole document.
    fn recognize(&self, images: &[DynamicImage]) -> Result<Document> {
        let mut document = Document::new();
        for (index, image) in images.iter().enumerate() {
            log::debug!("{}: recognizing page {}", self.name(), index + 1);
            document.add_page(self.recognize_page(image)?);
        }
        Ok(document)
    }
}
