//! Integration tests for the load → recognize → summarize → export →
//! visualize pipeline.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use unocr::error::Result;
use unocr::render::{read_json_file, to_summary};
use unocr::{
    Block, DisplayOutcome, Error, Geometry, JsonFormat, Line, OcrEngine, Page, Unocr, Viewer,
    VisualizeOptions, Word,
};

/// Engine that reports one word per page, naming the image size.
struct SizeEngine;

impl OcrEngine for SizeEngine {
    fn name(&self) -> &str {
        "size"
    }

    fn recognize_page(&self, image: &DynamicImage) -> Result<Page> {
        let (width, height) = image.dimensions();
        let mut page = Page::with_dimensions(width, height);
        page.add_block(Block::from_lines(vec![Line::from_words(vec![
            Word::new(format!("{}x{}", width, height), Geometry::from_box(0.1, 0.1, 0.5, 0.3)),
            Word::new("px", Geometry::from_box(0.55, 0.1, 0.8, 0.3)),
        ])]));
        Ok(page)
    }
}

/// Engine that always fails.
struct BrokenEngine;

impl OcrEngine for BrokenEngine {
    fn name(&self) -> &str {
        "broken"
    }

    fn recognize_page(&self, _image: &DynamicImage) -> Result<Page> {
        Err(Error::Engine("model not loaded".to_string()))
    }
}

fn write_images(dir: &tempfile::TempDir, sizes: &[(u32, u32)]) -> Vec<PathBuf> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| {
            let path = dir.path().join(format!("page{}.png", i + 1));
            RgbImage::from_pixel(w, h, Rgb([255, 255, 255]))
                .save(&path)
                .unwrap();
            path
        })
        .collect()
}

#[test]
fn test_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_images(&dir, &[(64, 32), (40, 40)]);

    let result = Unocr::new().run_with_engine(&inputs, &SizeEngine).unwrap();
    assert_eq!(result.document().page_count(), 2);
    assert_eq!(result.source().page_count(), Some(2));

    let summary = to_summary(result.document()).unwrap();
    assert_eq!(
        summary,
        "Page 1: 1 blocks, 1 lines, 2 words\n\
         Page 2: 1 blocks, 1 lines, 2 words\n\
         \n\
         Recognized Text:\n\
         ------------------------------\n\
         64x32 px\n\
         40x40 px\n"
    );

    let json_path = dir.path().join("ocr_output.json");
    result.write_json(&json_path, JsonFormat::Pretty).unwrap();
    let exported = read_json_file(&json_path).unwrap();
    assert_eq!(exported.pages.len(), 2);
    assert_eq!(exported.pages[1].page, 2);
    assert_eq!(exported.pages[1].blocks[0].lines[0].words[0].value, "40x40");

    let image_path = dir.path().join("ocr_visualization.png");
    result.save_visualization(0, &image_path).unwrap();
    let visual = image::open(&image_path).unwrap();
    assert_eq!(visual.dimensions(), (64, 32));
}

#[test]
fn test_pipeline_visualize_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_images(&dir, &[(16, 16)]);

    let result = Unocr::new().run_with_engine(&inputs, &SizeEngine).unwrap();
    let image_path = dir.path().join("out.png");

    assert!(matches!(
        result.save_visualization(3, &image_path),
        Err(Error::PageOutOfRange(4, 1))
    ));
    assert!(matches!(
        result.save_visualization(usize::MAX, &image_path),
        Err(Error::PageOutOfRange(u32::MAX, 1))
    ));
    assert!(!image_path.exists());
}

#[test]
fn test_missing_input_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let mut inputs = write_images(&dir, &[(16, 16)]);
    inputs.push(dir.path().join("missing.png"));

    let result = Unocr::new().run_with_engine(&inputs, &SizeEngine);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_engine_failure_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_images(&dir, &[(16, 16)]);

    let result = Unocr::new().run_with_engine(&inputs, &BrokenEngine);
    assert!(matches!(result, Err(Error::Engine(_))));
}

#[test]
fn test_empty_recognition_is_not_a_failure() {
    struct Blank;

    impl OcrEngine for Blank {
        fn name(&self) -> &str {
            "blank"
        }

        fn recognize_page(&self, _image: &DynamicImage) -> Result<Page> {
            Ok(Page::new())
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let inputs = write_images(&dir, &[(16, 16)]);
    let result = Unocr::new().run_with_engine(&inputs, &Blank).unwrap();

    let summary = to_summary(result.document()).unwrap();
    assert!(summary.starts_with("Page 1: 0 blocks, 0 lines, 0 words\n"));
    assert_eq!(
        result.to_json(JsonFormat::Compact).unwrap(),
        r#"{"pages":[{"page":1,"blocks":[]}]}"#
    );
}

/// Viewer that counts how often it is asked to show something.
struct CountingViewer(Cell<usize>);

impl Viewer for CountingViewer {
    fn show(&self, _path: &Path) -> Result<()> {
        self.0.set(self.0.get() + 1);
        Err(Error::Display("headless".to_string()))
    }
}

#[test]
fn test_visualize_honours_show_option() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_images(&dir, &[(32, 32)]);
    let image_path = dir.path().join("ocr_visualization.png");
    let viewer = CountingViewer(Cell::new(0));

    let shown = Unocr::new().run_with_engine(&inputs, &SizeEngine).unwrap();
    let outcome = shown.visualize(0, &image_path, &viewer).unwrap();
    assert!(matches!(outcome, Some(DisplayOutcome::Skipped(ref r)) if r.contains("headless")));
    assert_eq!(viewer.0.get(), 1);
    assert!(image_path.exists());

    let hidden = Unocr::new()
        .with_visualize_options(VisualizeOptions::new().with_show(false))
        .run_with_engine(&inputs, &SizeEngine)
        .unwrap();
    assert_eq!(hidden.visualize(0, &image_path, &viewer).unwrap(), None);
    assert_eq!(viewer.0.get(), 1);
}
