//! Dataset augmentation with rotated copies.
//!
//! Every JPEG image in a directory gets one rotated sibling named
//! `<stem>_rot<angle>.jpg`, with the angle picked at random from a fixed
//! set. Rotation is about the image centre on a canvas of the original size.

use crate::error::Result;
use crate::render::write_atomic;
use crate::source::load_image;
use image::{DynamicImage, ImageFormat, Rgb};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Default rotation angles in degrees.
pub const DEFAULT_ANGLES: [u32; 6] = [15, 30, 45, 90, 135, 180];

/// Options for augmenting a directory.
#[derive(Debug, Clone)]
pub struct AugmentOptions {
    /// Angles to pick from, in degrees counter-clockwise
    pub angles: Vec<u32>,

    /// Seed for reproducible angle choices
    pub seed: Option<u64>,
}

impl AugmentOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate angles.
    pub fn with_angles(mut self, angles: Vec<u32>) -> Self {
        self.angles = angles;
        self
    }

    /// Use a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            angles: DEFAULT_ANGLES.to_vec(),
            seed: None,
        }
    }
}

/// Rotate an image counter-clockwise about its centre, keeping its size.
/// Uncovered corners are filled with black.
pub fn rotate_image(image: &DynamicImage, degrees: u32) -> DynamicImage {
    let theta = -(degrees as f32).to_radians();
    let rotated = rotate_about_center(&image.to_rgb8(), theta, Interpolation::Bilinear, Rgb([0, 0, 0]));
    DynamicImage::ImageRgb8(rotated)
}

/// Write a rotated copy of every `*.jpg` image in `dir`.
///
/// Files that are themselves rotated copies are skipped, so running twice
/// does not compound rotations. Returns the written paths in file name
/// order.
pub fn augment_dir<P: AsRef<Path>>(dir: P, options: &AugmentOptions) -> Result<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    inputs.retain(|path| is_jpeg(path) && !is_rotated_copy(path));
    inputs.sort();

    let angles = if options.angles.is_empty() {
        DEFAULT_ANGLES.to_vec()
    } else {
        options.angles.clone()
    };
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        let angle = *angles.choose(&mut rng).unwrap_or(&DEFAULT_ANGLES[0]);
        let output = rotated_path(&input, angle);

        let rotated = rotate_image(&load_image(&input)?, angle);
        let mut encoded = Cursor::new(Vec::new());
        rotated.write_to(&mut encoded, ImageFormat::Jpeg)?;
        write_atomic(&output, encoded.get_ref())?;

        log::debug!("Rotated {} by {} degrees", input.display(), angle);
        written.push(output);
    }
    Ok(written)
}

/// Path of the rotated copy of `input`.
pub fn rotated_path(input: &Path, angle: u32) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}_rot{}.jpg", stem, angle))
}

fn is_jpeg(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg"))
}

fn is_rotated_copy(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.rsplit_once("_rot"))
        .is_some_and(|(_, angle)| !angle.is_empty() && angle.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_rotated_path() {
        assert_eq!(
            rotated_path(Path::new("datasets/train/img1.jpg"), 45),
            PathBuf::from("datasets/train/img1_rot45.jpg")
        );
    }

    #[test]
    fn test_is_rotated_copy() {
        assert!(is_rotated_copy(Path::new("a_rot90.jpg")));
        assert!(!is_rotated_copy(Path::new("a_rotten.jpg")));
        assert!(!is_rotated_copy(Path::new("a.jpg")));
    }

    #[test]
    fn test_rotate_keeps_size() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 20, Rgb([255, 255, 255])));
        let rotated = rotate_image(&image, 90);
        assert_eq!((rotated.width(), rotated.height()), (40, 20));

        // Corners of a 40x20 canvas rotated by 90 degrees fall outside the source.
        assert_eq!(*rotated.to_rgb8().get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_augment_dir() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.jpg", "a_rot30.jpg"] {
            RgbImage::from_pixel(16, 16, Rgb([200, 200, 200]))
                .save(dir.path().join(name))
                .unwrap();
        }
        RgbImage::new(4, 4).save(dir.path().join("skip.png")).unwrap();

        let options = AugmentOptions::new().with_angles(vec![90]).with_seed(7);
        let written = augment_dir(dir.path(), &options).unwrap();

        assert_eq!(
            written,
            vec![dir.path().join("a_rot90.jpg"), dir.path().join("b_rot90.jpg")]
        );
        for path in &written {
            let img = image::open(path).unwrap();
            assert_eq!((img.width(), img.height()), (16, 16));
        }
    }

    #[test]
    fn test_seeded_choice_is_deterministic() {
        let make = || {
            let dir = tempfile::tempdir().unwrap();
            RgbImage::new(8, 8).save(dir.path().join("x.jpg")).unwrap();
            let written = augment_dir(dir.path(), &AugmentOptions::new().with_seed(42)).unwrap();
            written[0].file_name().unwrap().to_os_string()
        };
        assert_eq!(make(), make());
    }
}
