//! JSON export of recognized documents.
//!
//! The export is a plain nested structure, independent of the model types:
//!
//! ```json
//! {"pages": [{"page": 1, "blocks": [{"lines": [{"words": [
//!     {"value": "Hello", "geometry": [[0.1, 0.1], [0.2, 0.2]]}
//! ]}]}]}]}
//! ```

use crate::error::{Error, Result};
use crate::model::{Block, Document, Geometry, Line, Page, Word};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Top-level export structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Exported pages, in document order
    pub pages: Vec<ExportPage>,
}

/// One exported page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPage {
    /// Page number (1-indexed)
    pub page: u32,
    /// Blocks on the page
    pub blocks: Vec<ExportBlock>,
}

/// One exported block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBlock {
    /// Lines in the block
    pub lines: Vec<ExportLine>,
}

/// One exported line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLine {
    /// Words in the line
    pub words: Vec<ExportWord>,
}

/// One exported word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportWord {
    /// Recognized text
    pub value: String,
    /// Geometry as reported by the engine
    pub geometry: Geometry,
}

impl ExportDocument {
    /// Convert back into the document model.
    ///
    /// The export does not carry confidence or page size, so words come back
    /// with full confidence and pages with unknown dimensions.
    pub fn into_document(self) -> Document {
        let pages = self
            .pages
            .into_iter()
            .map(|page| Page {
                dimensions: None,
                blocks: page
                    .blocks
                    .into_iter()
                    .map(|block| {
                        Block::from_lines(
                            block
                                .lines
                                .into_iter()
                                .map(|line| {
                                    Line::from_words(
                                        line.words
                                            .into_iter()
                                            .map(|w| Word::new(w.value, w.geometry))
                                            .collect(),
                                    )
                                })
                                .collect(),
                        )
                    })
                    .collect(),
            })
            .collect();
        Document::from_pages(pages)
    }
}

impl From<&Document> for ExportDocument {
    fn from(doc: &Document) -> Self {
        to_export(doc)
    }
}

/// Build the export structure for a document.
pub fn to_export(doc: &Document) -> ExportDocument {
    let pages = doc
        .pages
        .iter()
        .zip(1..)
        .map(|(page, number)| ExportPage {
            page: number,
            blocks: page
                .blocks
                .iter()
                .map(|block| ExportBlock {
                    lines: block
                        .lines
                        .iter()
                        .map(|line| ExportLine {
                            words: line
                                .words
                                .iter()
                                .map(|word| ExportWord {
                                    value: word.value.clone(),
                                    geometry: word.geometry.clone(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    ExportDocument { pages }
}

/// Convert a document to JSON.
///
/// Non-ASCII text is emitted literally, not as `\u` escapes.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let export = to_export(doc);
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&export),
        JsonFormat::Compact => serde_json::to_string(&export),
    };

    result.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
}

/// Write a document's JSON export to `path`, replacing any existing file.
///
/// The content is written to a temporary file next to `path` and renamed
/// over it only once fully written, so a failed run never leaves a
/// truncated export behind.
pub fn write_json_file<P: AsRef<Path>>(doc: &Document, path: P, format: JsonFormat) -> Result<()> {
    let json = to_json(doc, format)?;
    write_atomic(path.as_ref(), json.as_bytes())?;
    log::info!("Saved OCR export to {}", path.as_ref().display());
    Ok(())
}

/// Read an export file back.
pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<ExportDocument> {
    let data = std::fs::read_to_string(path)?;
    from_json(&data)
}

/// Parse an export from a JSON string.
pub fn from_json(json: &str) -> Result<ExportDocument> {
    Ok(serde_json::from_str(json)?)
}

/// Replace `path` with `data` via a temporary sibling file.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".unocr-")
        .tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
