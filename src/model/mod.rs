//! Document model types for OCR results.
//!
//! This module defines the read-only hierarchy an OCR engine produces for a
//! document: pages hold blocks, blocks hold lines, lines hold words. Order at
//! every level is reading order as decided by the engine, and nothing in this
//! crate reorders, deduplicates or filters it.

mod document;
mod geometry;
mod line;
mod page;

pub use document::Document;
pub use geometry::Geometry;
pub use line::{Line, Word};
pub use page::{Block, Page};
