//! Plain text rendering for recognized documents.

use crate::model::Document;

/// Convert a document to plain text: one recognized line per row, pages
/// separated by a blank line.
pub fn to_text(doc: &Document) -> String {
    doc.plain_text()
}
