//! Page-level types.

use super::Line;
use serde::{Deserialize, Serialize};

/// A single recognized page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Pixel size of the source image as (width, height), when known
    pub dimensions: Option<(u32, u32)>,

    /// Text blocks on the page
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty page for a source image of the given size.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            dimensions: Some((width, height)),
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the page is empty (no blocks).
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get the number of lines across all blocks.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|block| block.lines.len()).sum()
    }

    /// Get the number of words across all blocks and lines.
    pub fn word_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|block| &block.lines)
            .map(|line| line.words.len())
            .sum()
    }

    /// Iterate over every line on the page in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks.iter().flat_map(|block| block.lines.iter())
    }

    /// Get plain text content of the page, one recognized line per row.
    pub fn plain_text(&self) -> String {
        self.lines()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A block of lines that the engine grouped together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Lines in the block
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a new empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block from lines.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Add a line to the block.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Check if the block has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Geometry, Word};

    fn line_of(words: &[&str]) -> Line {
        Line::from_words(
            words
                .iter()
                .map(|w| Word::new(*w, Geometry::from_box(0.0, 0.0, 0.1, 0.1)))
                .collect(),
        )
    }

    #[test]
    fn test_page_new() {
        let page = Page::new();
        assert!(page.is_empty());
        assert_eq!(page.block_count(), 0);
        assert_eq!(page.line_count(), 0);
        assert_eq!(page.word_count(), 0);
        assert!(page.dimensions.is_none());
    }

    #[test]
    fn test_page_counts() {
        let mut page = Page::with_dimensions(800, 600);
        page.add_block(Block::from_lines(vec![
            line_of(&["a", "b"]),
            line_of(&["c"]),
        ]));
        page.add_block(Block::from_lines(vec![line_of(&["d", "e", "f"])]));
        page.add_block(Block::new());

        assert_eq!(page.block_count(), 3);
        assert_eq!(page.line_count(), 3);
        assert_eq!(page.word_count(), 6);
        assert_eq!(page.dimensions, Some((800, 600)));
    }

    #[test]
    fn test_page_plain_text() {
        let mut page = Page::new();
        page.add_block(Block::from_lines(vec![
            line_of(&["Hello", "World"]),
            line_of(&["again"]),
        ]));
        assert_eq!(page.plain_text(), "Hello World\nagain");
    }
}
