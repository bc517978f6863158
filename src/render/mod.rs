//! Rendering module for turning recognized documents into console summaries,
//! plain text and JSON exports.

mod json;
mod options;
pub mod summary;
mod text;

pub(crate) use json::write_atomic;
pub use json::{
    from_json, read_json_file, to_export, to_json, write_json_file, ExportBlock, ExportDocument,
    ExportLine, ExportPage, ExportWord, JsonFormat,
};
pub use options::PageSelection;
pub use summary::{recognized_lines, summarize, to_summary, write_summary, PageStats};
pub use text::to_text;
