//! Adapter for the `tesseract` command-line engine.

use super::{parse_tsv, OcrEngine};
use crate::error::{Error, Result};
use crate::model::Page;
use image::{DynamicImage, ImageFormat};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::Command;

/// Options for running Tesseract.
#[derive(Debug, Clone)]
pub struct TesseractOptions {
    /// Executable name or path
    pub binary: PathBuf,

    /// Language model(s), e.g. "eng" or "eng+deu"
    pub language: String,

    /// Page segmentation mode (3 = fully automatic)
    pub psm: u8,

    /// Custom tessdata directory
    pub tessdata_dir: Option<PathBuf>,

    /// Extra arguments passed before the output format
    pub extra_args: Vec<String>,
}

impl TesseractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the executable.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the language model.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = psm.min(13);
        self
    }

    /// Set the tessdata directory.
    pub fn with_tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }

    /// Add an extra command-line argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    fn command(&self, input: &std::path::Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(input)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.psm.to_string());
        if let Some(ref dir) = self.tessdata_dir {
            cmd.arg("--tessdata-dir").arg(dir);
        }
        cmd.args(&self.extra_args).arg("tsv");
        cmd
    }
}

impl Default for TesseractOptions {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            psm: 3,
            tessdata_dir: None,
            extra_args: Vec::new(),
        }
    }
}

/// OCR engine backed by the `tesseract` executable.
///
/// Each page image is written to a temporary PNG and recognized in a
/// separate process; the TSV written to stdout is parsed with
/// [`parse_tsv`].
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    options: TesseractOptions,
}

impl TesseractEngine {
    /// Create an engine with the given options.
    pub fn new(options: TesseractOptions) -> Self {
        Self { options }
    }

    /// Get the engine options.
    pub fn options(&self) -> &TesseractOptions {
        &self.options
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize_page(&self, image: &DynamicImage) -> Result<Page> {
        let scratch = tempfile::Builder::new()
            .prefix("unocr-")
            .suffix(".png")
            .tempfile()?;
        {
            let mut writer = BufWriter::new(scratch.as_file());
            image.write_to(&mut writer, ImageFormat::Png)?;
            writer.flush()?;
        }

        let mut cmd = self.options.command(scratch.path());
        log::debug!("Running {:?}", cmd);
        let output = cmd.output().map_err(|e| {
            Error::Engine(format!(
                "failed to launch {}: {}",
                self.options.binary.display(),
                e
            ))
        })?;

        if !output.status.success() {
            return Err(Error::Engine(format!(
                "{} exited with {}: {}",
                self.options.binary.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let tsv = String::from_utf8(output.stdout)
            .map_err(|e| Error::Engine(format!("output is not UTF-8: {}", e)))?;
        let mut page = parse_tsv(&tsv)?;
        if page.dimensions.is_none() {
            page.dimensions = Some((image.width(), image.height()));
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_options_builder() {
        let options = TesseractOptions::new()
            .with_language("deu")
            .with_psm(42)
            .with_tessdata_dir("./tessdata")
            .with_arg("--dpi")
            .with_arg("300");

        assert_eq!(options.language, "deu");
        assert_eq!(options.psm, 13);
        assert_eq!(options.tessdata_dir, Some(PathBuf::from("./tessdata")));
        assert_eq!(options.extra_args, vec!["--dpi", "300"]);
    }

    #[test]
    fn test_command_line() {
        let options = TesseractOptions::new().with_tessdata_dir("td").with_arg("--dpi");
        let cmd = options.command(std::path::Path::new("page.png"));
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "page.png", "stdout", "-l", "eng", "--psm", "3", "--tessdata-dir", "td",
                "--dpi", "tsv"
            ]
        );
    }

    #[test]
    fn test_missing_binary_is_engine_error() {
        let engine = TesseractEngine::new(
            TesseractOptions::new().with_binary("/nonexistent/bin/tesseract"),
        );
        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        assert!(matches!(
            engine.recognize_page(&image),
            Err(Error::Engine(_))
        ));
    }
}
