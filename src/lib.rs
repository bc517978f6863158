//! # unocr
//!
//! Run OCR over scanned documents and turn the result into something you can
//! read, store and check.
//!
//! The library loads images or PDFs, hands the page images to an OCR engine,
//! and works with the recognized Page → Block → Line → Word hierarchy:
//! console summaries, an indented JSON export, and bounding-box
//! visualizations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unocr::{render, JsonFormat, Unocr};
//!
//! fn main() -> unocr::Result<()> {
//!     let result = Unocr::new().language("eng").run(&["receipt.jpeg"])?;
//!
//!     print!("{}", render::to_summary(result.document())?);
//!     result.write_json("ocr_output.json", JsonFormat::Pretty)?;
//!     result.save_visualization(0, "ocr_visualization.png")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Inputs**: PNG, JPEG and other raster images, or a PDF rendered with `hayro`
//! - **Engines**: Tesseract out of the box, anything else via [`OcrEngine`]
//! - **Export**: stable nested JSON with literal UTF-8 text
//! - **Visualization**: word, line and block outlines over the page image
//! - **Augmentation**: rotated copies of training images

pub mod augment;
pub mod detect;
pub mod engine;
pub mod error;
pub mod model;
pub mod render;
pub mod source;
pub mod visualize;

// Re-export commonly used types
pub use augment::{augment_dir, AugmentOptions};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, InputFormat};
pub use engine::{OcrEngine, TesseractEngine, TesseractOptions};
pub use error::{Error, Result};
pub use model::{Block, Document, Geometry, Line, Page, Word};
pub use render::{ExportDocument, JsonFormat, PageSelection, PageStats};
pub use source::{DocumentSource, ImageList, LoadOptions, PdfDocument};
pub use visualize::{DisplayOutcome, SystemViewer, Viewer, VisualizeOptions};

use std::path::Path;

/// Recognize a document with Tesseract using default options.
///
/// # Example
///
/// ```no_run
/// use unocr::recognize_files;
///
/// let doc = recognize_files(&["page1.png", "page2.png"]).unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn recognize_files<P: AsRef<Path>>(paths: &[P]) -> Result<Document> {
    Ok(Unocr::new().run(paths)?.document)
}

/// Recognize a document and return its plain text.
pub fn extract_text<P: AsRef<Path>>(paths: &[P]) -> Result<String> {
    Ok(render::to_text(&recognize_files(paths)?))
}

/// Recognize a document and return its JSON export.
///
/// # Example
///
/// ```no_run
/// use unocr::{to_json, JsonFormat};
///
/// let json = to_json(&["receipt.jpeg"], JsonFormat::Pretty).unwrap();
/// std::fs::write("ocr_output.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(paths: &[P], format: JsonFormat) -> Result<String> {
    render::to_json(&recognize_files(paths)?, format)
}

/// Builder for loading and recognizing documents.
///
/// # Example
///
/// ```no_run
/// use unocr::Unocr;
///
/// let result = Unocr::new()
///     .language("eng+deu")
///     .psm(6)
///     .pdf_scale(3.0)
///     .run(&["scan.pdf"])?;
/// println!("{}", result.plain_text());
/// # Ok::<(), unocr::Error>(())
/// ```
pub struct Unocr {
    load_options: LoadOptions,
    tesseract_options: TesseractOptions,
    visualize_options: VisualizeOptions,
}

impl Unocr {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            load_options: LoadOptions::default(),
            tesseract_options: TesseractOptions::default(),
            visualize_options: VisualizeOptions::default(),
        }
    }

    /// Set the Tesseract language model.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.tesseract_options = self.tesseract_options.with_language(language);
        self
    }

    /// Set the Tesseract page segmentation mode.
    pub fn psm(mut self, psm: u8) -> Self {
        self.tesseract_options = self.tesseract_options.with_psm(psm);
        self
    }

    /// Set the Tesseract executable.
    pub fn tesseract_binary(mut self, binary: impl Into<std::path::PathBuf>) -> Self {
        self.tesseract_options = self.tesseract_options.with_binary(binary);
        self
    }

    /// Replace all Tesseract options.
    pub fn with_tesseract_options(mut self, options: TesseractOptions) -> Self {
        self.tesseract_options = options;
        self
    }

    /// Set the PDF rasterization scale.
    pub fn pdf_scale(mut self, scale: f32) -> Self {
        self.load_options = self.load_options.with_pdf_scale(scale);
        self
    }

    /// Set visualization options.
    pub fn with_visualize_options(mut self, options: VisualizeOptions) -> Self {
        self.visualize_options = options;
        self
    }

    /// Load and recognize the given inputs with Tesseract.
    pub fn run<P: AsRef<Path>>(self, paths: &[P]) -> Result<UnocrResult> {
        let engine = TesseractEngine::new(self.tesseract_options.clone());
        self.run_with_engine(paths, &engine)
    }

    /// Load the given inputs and recognize them with a custom engine.
    pub fn run_with_engine<P: AsRef<Path>>(
        self,
        paths: &[P],
        engine: &dyn OcrEngine,
    ) -> Result<UnocrResult> {
        let source = source::load(paths, &self.load_options)?;
        let images = source::page_images(source.as_ref())?;
        log::info!("Loaded {} pages from {}", images.len(), source.name());

        let document = engine.recognize(&images)?;
        Ok(UnocrResult {
            source,
            document,
            visualize_options: self.visualize_options,
        })
    }
}

impl Default for Unocr {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of recognizing a document, together with its source.
pub struct UnocrResult {
    /// The recognized document
    pub document: Document,
    source: Box<dyn DocumentSource>,
    visualize_options: VisualizeOptions,
}

impl UnocrResult {
    /// Get the recognized document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the document source.
    pub fn source(&self) -> &dyn DocumentSource {
        self.source.as_ref()
    }

    /// Per-page structure counts.
    pub fn summary(&self) -> Vec<PageStats> {
        render::summarize(&self.document)
    }

    /// Plain text of the whole document.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Write the JSON export to a file.
    pub fn write_json<P: AsRef<Path>>(&self, path: P, format: JsonFormat) -> Result<()> {
        render::write_json_file(&self.document, path, format)
    }

    /// Save a visualization of page `index` (0-indexed).
    pub fn save_visualization<P: AsRef<Path>>(&self, index: usize, path: P) -> Result<()> {
        visualize::save_visualization(
            self.page(index)?,
            self.source.as_ref(),
            index,
            path,
            &self.visualize_options,
        )
    }

    /// Save a visualization of page `index` (0-indexed) and, when the
    /// visualize options ask for it, show it with `viewer`.
    ///
    /// Returns `None` when display is turned off. A failed display is a
    /// [`DisplayOutcome::Skipped`], never an error.
    pub fn visualize<P: AsRef<Path>>(
        &self,
        index: usize,
        path: P,
        viewer: &dyn Viewer,
    ) -> Result<Option<DisplayOutcome>> {
        visualize::visualize_page(
            self.page(index)?,
            self.source.as_ref(),
            index,
            path,
            &self.visualize_options,
            viewer,
        )
    }

    fn page(&self, index: usize) -> Result<&Page> {
        self.document.pages.get(index).ok_or_else(|| {
            Error::PageOutOfRange(source::page_number(index), self.document.page_count())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let builder = Unocr::new().language("deu").psm(6).pdf_scale(3.0);
        assert_eq!(builder.tesseract_options.language, "deu");
        assert_eq!(builder.tesseract_options.psm, 6);
        assert_eq!(builder.load_options.pdf_scale, 3.0);
    }

    #[test]
    fn test_builder_default() {
        let builder = Unocr::default();
        assert_eq!(builder.tesseract_options.language, "eng");
        assert!(builder.visualize_options.words_only);
    }

    #[test]
    fn test_run_missing_input_fails_before_engine() {
        let result = Unocr::new()
            .tesseract_binary("/nonexistent/bin/tesseract")
            .run(&["/nonexistent/receipt.jpeg"]);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
