//! Parser for Tesseract's TSV output.
//!
//! Each row carries a `level` column: 1 = page, 2 = block, 3 = paragraph,
//! 4 = line, 5 = word. Rows arrive in hierarchy order, so the page can be
//! assembled in a single pass. Paragraphs have no counterpart in the model
//! and their lines are appended straight to the enclosing block.

use crate::error::{Error, Result};
use crate::model::{Block, Geometry, Line, Page, Word};

const COL_LEVEL: usize = 0;
const COL_LEFT: usize = 6;
const COL_TOP: usize = 7;
const COL_WIDTH: usize = 8;
const COL_HEIGHT: usize = 9;
const COL_CONF: usize = 10;
const COL_TEXT: usize = 11;
const MIN_COLUMNS: usize = 11;

/// Parse one page of Tesseract TSV output.
///
/// Words with blank text are dropped, and lines or blocks left without
/// words are dropped with them; Tesseract emits such rows for regions it
/// segmented but could not read.
pub fn parse_tsv(tsv: &str) -> Result<Page> {
    let mut page: Option<Page> = None;

    for (index, raw) in tsv.lines().enumerate() {
        let line_no = index + 1;
        if raw.trim().is_empty() || raw.starts_with("level") {
            continue;
        }

        let cols: Vec<&str> = raw.split('\t').collect();
        if cols.len() < MIN_COLUMNS {
            return Err(parse_error(
                line_no,
                format!("expected at least {} columns, found {}", MIN_COLUMNS, cols.len()),
            ));
        }
        let field = |col: usize| -> Result<u32> {
            cols[col]
                .trim()
                .parse()
                .map_err(|_| parse_error(line_no, format!("invalid number {:?}", cols[col])))
        };

        match field(COL_LEVEL)? {
            1 => {
                if page.is_none() {
                    page = Some(Page::with_dimensions(field(COL_WIDTH)?, field(COL_HEIGHT)?));
                }
            }
            2 => current_page(&mut page, line_no)?.add_block(Block::new()),
            3 => {}
            4 => current_block(&mut page, line_no)?.add_line(Line::new()),
            5 => {
                let text = cols.get(COL_TEXT).copied().unwrap_or("");
                if text.trim().is_empty() {
                    continue;
                }
                let dims = current_page(&mut page, line_no)?
                    .dimensions
                    .unwrap_or((1, 1));
                let geometry = Geometry::from_pixels(
                    field(COL_LEFT)?,
                    field(COL_TOP)?,
                    field(COL_WIDTH)?,
                    field(COL_HEIGHT)?,
                    dims,
                );
                let conf: f32 = cols[COL_CONF]
                    .trim()
                    .parse()
                    .map_err(|_| parse_error(line_no, format!("invalid confidence {:?}", cols[COL_CONF])))?;

                let word = Word::new(text, geometry).with_confidence(conf / 100.0);
                current_line(&mut page, line_no)?.add_word(word);
            }
            other => {
                return Err(parse_error(line_no, format!("unknown level {}", other)));
            }
        }
    }

    let mut page = page.unwrap_or_default();
    for block in &mut page.blocks {
        block.lines.retain(|line| !line.is_empty());
    }
    page.blocks.retain(|block| !block.is_empty());
    Ok(page)
}

fn parse_error(line: usize, message: String) -> Error {
    Error::TsvParse { line, message }
}

fn current_page(page: &mut Option<Page>, line_no: usize) -> Result<&mut Page> {
    page.as_mut()
        .ok_or_else(|| parse_error(line_no, "row before page header".to_string()))
}

fn current_block(page: &mut Option<Page>, line_no: usize) -> Result<&mut Block> {
    current_page(page, line_no)?
        .blocks
        .last_mut()
        .ok_or_else(|| parse_error(line_no, "line outside of a block".to_string()))
}

fn current_line(page: &mut Option<Page>, line_no: usize) -> Result<&mut Line> {
    current_block(page, line_no)?
        .lines
        .last_mut()
        .ok_or_else(|| parse_error(line_no, "word outside of a line".to_string()))
}
