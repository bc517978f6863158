//! Raster image inputs.

use super::DocumentSource;
use crate::error::Result;
use image::{DynamicImage, ImageError, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A document made of already decoded page images, one per input file.
#[derive(Debug, Clone, Default)]
pub struct ImageList {
    images: Vec<DynamicImage>,
}

impl ImageList {
    /// Wrap decoded images.
    pub fn from_images(images: Vec<DynamicImage>) -> Self {
        Self { images }
    }

    /// Decode every path in order.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let images = paths
            .iter()
            .map(|path| load_image(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { images })
    }

    /// Get the decoded images.
    pub fn images(&self) -> &[DynamicImage] {
        &self.images
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if there are no pages.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl DocumentSource for ImageList {
    fn name(&self) -> &str {
        "image list"
    }

    fn image_list(&self) -> Option<&[DynamicImage]> {
        Some(&self.images)
    }
}

/// Decode an image, tolerating a file extension that does not match the
/// actual content.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    match image::open(path) {
        Ok(img) => Ok(img),
        Err(err) if should_retry(&err) => {
            log::warn!(
                "Standard decode failed for {} ({err}). Retrying with format sniffing.",
                path.display()
            );
            Ok(decode_with_guessed_format(path)?)
        }
        Err(err) => Err(err.into()),
    }
}

fn should_retry(err: &ImageError) -> bool {
    matches!(err, ImageError::Decoding(_) | ImageError::Unsupported(_))
}

fn decode_with_guessed_format(path: &Path) -> std::result::Result<DynamicImage, ImageError> {
    let file = File::open(path)?;
    let reader = ImageReader::new(BufReader::new(file)).with_guessed_format()?;
    reader.decode()
}
