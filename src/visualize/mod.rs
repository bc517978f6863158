//! Bounding-box visualization of recognized pages.
//!
//! Boxes are drawn over the page's source image with `imageproc` and the
//! result is saved as a raster file. Showing the file on screen is a
//! separate, best-effort step (see [`show_best_effort`]).
//!
//! # Example
//!
//! ```no_run
//! use unocr::visualize::{save_visualization, VisualizeOptions};
//! # fn run(page: &unocr::Page, source: &dyn unocr::DocumentSource) -> unocr::Result<()> {
//! save_visualization(page, source, 0, "ocr_visualization.png", &VisualizeOptions::default())?;
//! # Ok(())
//! # }
//! ```

mod display;

pub use display::{show_best_effort, DisplayOutcome, SystemViewer, Viewer};

use crate::error::Result;
use crate::model::{Geometry, Page};
use crate::render::write_atomic;
use crate::source::{page_image, DocumentSource};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::io::Cursor;
use std::path::Path;

const WORD_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

const LINE_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

const BLOCK_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const MAX_THICKNESS: u32 = 64;

/// Options for drawing a page.
#[derive(Debug, Clone)]
pub struct VisualizeOptions {
    /// Only outline words; otherwise lines and blocks are outlined too
    pub words_only: bool,

    /// Outline colour for words
    pub word_color: Rgb<u8>,

    /// Outline colour for lines
    pub line_color: Rgb<u8>,

    /// Outline colour for blocks
    pub block_color: Rgb<u8>,

    /// Outline thickness in pixels
    pub thickness: u32,

    /// Try to open the saved image in a viewer
    pub show: bool,
}

impl VisualizeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline lines and blocks as well as words.
    pub fn with_all_levels(mut self) -> Self {
        self.words_only = false;
        self
    }

    /// Set the outline thickness.
    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness.max(1);
        self
    }

    /// Enable or disable the on-screen display step.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
}

impl Default for VisualizeOptions {
    fn default() -> Self {
        Self {
            words_only: true,
            word_color: WORD_COLOR,
            line_color: LINE_COLOR,
            block_color: BLOCK_COLOR,
            thickness: 2,
            show: true,
        }
    }
}

/// Draw a page's bounding boxes over its source image.
pub fn render_page(page: &Page, image: &DynamicImage, options: &VisualizeOptions) -> RgbImage {
    let mut canvas = image.to_rgb8();

    if !options.words_only {
        for block in &page.blocks {
            let words = block.lines.iter().flat_map(|line| &line.words);
            if let Some(geometry) = Geometry::enclosing(words.map(|word| &word.geometry)) {
                draw_geometry(&mut canvas, &geometry, options.block_color, options.thickness);
            }
            for line in &block.lines {
                if let Some(geometry) = line.geometry() {
                    draw_geometry(&mut canvas, &geometry, options.line_color, options.thickness);
                }
            }
        }
    }

    for word in page.lines().flat_map(|line| &line.words) {
        draw_geometry(&mut canvas, &word.geometry, options.word_color, options.thickness);
    }

    canvas
}

/// Render page `index` (0-indexed) of `source` with the boxes of `page` and
/// save it to `path`, replacing any existing file.
///
/// The source image is resolved before anything is written, so an
/// unsupported source leaves no output file behind. The encoding follows
/// the file extension and defaults to PNG.
pub fn save_visualization<P: AsRef<Path>>(
    page: &Page,
    source: &dyn DocumentSource,
    index: usize,
    path: P,
    options: &VisualizeOptions,
) -> Result<()> {
    let path = path.as_ref();
    let image = page_image(source, index)?;
    let rendered = DynamicImage::ImageRgb8(render_page(page, &image, options));

    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    let mut encoded = Cursor::new(Vec::new());
    rendered.write_to(&mut encoded, format)?;
    write_atomic(path, encoded.get_ref())?;

    log::info!("Saved visualization of page {} to {}", index + 1, path.display());
    Ok(())
}

/// Save a visualization like [`save_visualization`], then show it with
/// `viewer` if `options.show` is set.
///
/// Returns `None` when display is turned off. Display failures are
/// reported as [`DisplayOutcome::Skipped`] and never fail the call.
pub fn visualize_page<P: AsRef<Path>>(
    page: &Page,
    source: &dyn DocumentSource,
    index: usize,
    path: P,
    options: &VisualizeOptions,
    viewer: &dyn Viewer,
) -> Result<Option<DisplayOutcome>> {
    let path = path.as_ref();
    save_visualization(page, source, index, path, options)?;

    if !options.show {
        return Ok(None);
    }
    Ok(Some(show_best_effort(viewer, path)))
}

fn draw_geometry(canvas: &mut RgbImage, geometry: &Geometry, color: Rgb<u8>, thickness: u32) {
    let (width, height) = (canvas.width() as f64, canvas.height() as f64);
    let thickness = thickness.min(MAX_THICKNESS);

    match geometry {
        Geometry::Box(_) => {
            let (x0, y0, x1, y1) = geometry.bounds();
            let left = to_pixel(x0, width);
            let top = to_pixel(y0, height);
            let w = (to_pixel(x1, width) - left).max(1) as u32;
            let h = (to_pixel(y1, height) - top).max(1) as u32;

            for t in 0..thickness as i32 {
                let rect = Rect::at(left - t, top - t)
                    .of_size(w + 2 * t as u32, h + 2 * t as u32);
                draw_hollow_rect_mut(canvas, rect, color);
            }
        }
        Geometry::Polygon(points) if points.len() >= 2 => {
            let pixels: Vec<(f32, f32)> = points
                .iter()
                .map(|[x, y]| (to_pixel(*x, width) as f32, to_pixel(*y, height) as f32))
                .collect();

            for t in 0..thickness {
                let offset = t as f32;
                for (i, start) in pixels.iter().enumerate() {
                    let end = pixels[(i + 1) % pixels.len()];
                    draw_line_segment_mut(
                        canvas,
                        (start.0 + offset, start.1 + offset),
                        (end.0 + offset, end.1 + offset),
                        color,
                    );
                }
            }
        }
        Geometry::Polygon(_) => {}
    }
}

/// Scale a relative coordinate to pixels, clamped to just outside the canvas
/// so geometry far off the page cannot overflow the rectangle arithmetic.
fn to_pixel(relative: f64, extent: f64) -> i32 {
    let max = extent.min(i32::MAX as f64 / 2.0);
    let pixel = (relative * extent).round();
    if pixel.is_nan() {
        0
    } else {
        pixel.clamp(-1.0, max + 1.0) as i32
    }
}
