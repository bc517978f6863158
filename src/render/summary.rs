//! Console summary of a recognized document.
//!
//! The summary has two passes: per-page structure counts, then the
//! recognized text with one output line per recognized line.

use crate::error::Result;
use crate::model::{Document, Page};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Width of the rule printed under the text header.
const RULE_WIDTH: usize = 30;

/// Structure counts for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStats {
    /// Page number (1-indexed)
    pub page: u32,

    /// Number of blocks on the page
    pub num_blocks: usize,

    /// Number of lines across all blocks
    pub num_lines: usize,

    /// Number of words across all blocks and lines
    pub num_words: usize,
}

impl PageStats {
    /// Count the structure of a page.
    pub fn of(page: &Page, number: u32) -> Self {
        Self {
            page: number,
            num_blocks: page.block_count(),
            num_lines: page.line_count(),
            num_words: page.word_count(),
        }
    }
}

impl std::fmt::Display for PageStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Page {}: {} blocks, {} lines, {} words",
            self.page, self.num_blocks, self.num_lines, self.num_words
        )
    }
}

/// Count the structure of every page, numbering pages from 1.
pub fn summarize(doc: &Document) -> Vec<PageStats> {
    doc.pages
        .iter()
        .zip(1..)
        .map(|(page, number)| PageStats::of(page, number))
        .collect()
}

/// Recognized text, one entry per line in reading order, words joined by a
/// single space.
pub fn recognized_lines(doc: &Document) -> Vec<String> {
    doc.pages
        .iter()
        .flat_map(|page| page.lines())
        .map(|line| line.text())
        .collect()
}

/// Write the per-page counts followed by the recognized text.
pub fn write_summary<W: Write>(doc: &Document, out: &mut W) -> Result<()> {
    for stats in summarize(doc) {
        writeln!(out, "{}", stats)?;
    }

    writeln!(out)?;
    writeln!(out, "Recognized Text:")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for line in recognized_lines(doc) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Render the summary to a string.
pub fn to_summary(doc: &Document) -> Result<String> {
    let mut buf = Vec::new();
    write_summary(doc, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
