//! PDF inputs, rasterized with the pure Rust `hayro` renderer.

use super::{out_of_range, DocumentSource};
use crate::detect::is_pdf_bytes;
use crate::error::{Error, Result};
use hayro::{InterpreterSettings, Pdf, RenderSettings};
use image::{DynamicImage, RgbImage};
use std::path::Path;
use std::sync::Arc;

/// A PDF whose pages are rendered to images on demand.
pub struct PdfDocument {
    pdf: Pdf,
    name: String,
    scale: f32,
}

impl PdfDocument {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut doc = Self::from_bytes(data)?;
        doc.name = path.display().to_string();
        Ok(doc)
    }

    /// Parse a PDF held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if !is_pdf_bytes(&data) {
            return Err(Error::UnknownFormat("not a PDF".to_string()));
        }

        let pdf = Pdf::new(Arc::new(data))
            .map_err(|e| Error::PdfRender(format!("Failed to parse PDF: {:?}", e)))?;

        Ok(Self {
            pdf,
            name: "pdf".to_string(),
            scale: 2.0,
        })
    }

    /// Set the rasterization scale (1.0 = 72 DPI).
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Number of pages in the PDF.
    pub fn len(&self) -> usize {
        self.pdf.pages().len()
    }

    /// Check if the PDF has no pages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render one page (0-indexed) to an RGB image.
    pub fn render_page(&self, index: usize) -> Result<DynamicImage> {
        let pages = self.pdf.pages();
        let page = pages
            .get(index)
            .ok_or_else(|| out_of_range(index, pages.len()))?;

        let settings = RenderSettings {
            x_scale: self.scale,
            y_scale: self.scale,
            ..Default::default()
        };
        let pixmap = hayro::render(page, &InterpreterSettings::default(), &settings);

        // Composite over white so transparent page areas do not read as ink.
        let rgb: Vec<u8> = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .flat_map(|px| {
                let fill = 255 - px[3];
                [
                    px[0].saturating_add(fill),
                    px[1].saturating_add(fill),
                    px[2].saturating_add(fill),
                ]
            })
            .collect();

        let image = RgbImage::from_raw(u32::from(pixmap.width()), u32::from(pixmap.height()), rgb)
            .ok_or_else(|| Error::PdfRender(format!("Page {} has an invalid pixmap", index + 1)))?;

        log::debug!(
            "Rendered page {} of {} at {}x{}",
            index + 1,
            self.name,
            image.width(),
            image.height()
        );
        Ok(DynamicImage::ImageRgb8(image))
    }
}

impl DocumentSource for PdfDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn as_images(&self) -> Option<Result<Vec<DynamicImage>>> {
        Some((0..self.len()).map(|i| self.render_page(i)).collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A one-page PDF with an empty 100x50 pt page.
    pub(crate) fn blank_pdf() -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>",
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>",
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 100 50] >>",
        ];

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }

        let xref = pdf.len();
        pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            pdf.push_str(&format!("{:010} 00000 n \n", offset));
        }
        pdf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        ));
        pdf.into_bytes()
    }

    #[test]
    fn test_render_blank_page() {
        let pdf = PdfDocument::from_bytes(blank_pdf()).unwrap();
        assert_eq!(pdf.len(), 1);
        assert_eq!(pdf.page_count(), Some(1));

        let images = pdf.as_images().unwrap().unwrap();
        assert_eq!(images.len(), 1);

        // Default scale is 2.0; the transparent page is composited over white.
        let page = images[0].to_rgb8();
        assert_eq!(page.dimensions(), (200, 100));
        assert_eq!(*page.get_pixel(100, 50), image::Rgb([255, 255, 255]));
    }

    #[test]
    fn test_render_scale() {
        let pdf = PdfDocument::from_bytes(blank_pdf()).unwrap().with_scale(1.0);
        let page = pdf.render_page(0).unwrap();
        assert_eq!((page.width(), page.height()), (100, 50));
    }

    #[test]
    fn test_render_page_out_of_range() {
        let pdf = PdfDocument::from_bytes(blank_pdf()).unwrap();
        assert!(matches!(pdf.render_page(1), Err(Error::PageOutOfRange(2, 1))));
        assert!(matches!(
            pdf.render_page(usize::MAX),
            Err(Error::PageOutOfRange(u32::MAX, 1))
        ));
    }

    #[test]
    fn test_rejects_non_pdf() {
        let result = PdfDocument::from_bytes(b"\x89PNG\r\n\x1a\n".to_vec());
        assert!(matches!(result, Err(Error::UnknownFormat(_))));
    }

    #[test]
    fn test_missing_pdf_is_io_error() {
        let result = PdfDocument::open("/nonexistent/scan.pdf");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
