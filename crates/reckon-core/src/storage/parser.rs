//! Parser for .grd file format

use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use reckon_engine::engine::Position;
use std::fs;
use std::path::Path;

/// Parse a .grd file into a new sheet.
pub fn parse_sheet(path: &Path) -> Result<Sheet> {
    let content = fs::read_to_string(path)?;
    parse_sheet_content(&content)
}

/// Parse .grd content from a string.
///
/// Cells are set in file order, so a formula may cite a cell defined on a
/// later line.
pub fn parse_sheet_content(content: &str) -> Result<Sheet> {
    let mut sheet = Sheet::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        // Parse "CELLREF: TEXT" format
        let Some((address, text)) = line.split_once(':') else {
            return Err(SheetError::Parse {
                line: line_num,
                message: "Expected 'CELLREF: TEXT' format".to_string(),
            });
        };

        let address = address.trim();
        let pos = Position::parse(address)
            .filter(Position::is_valid)
            .ok_or_else(|| SheetError::Parse {
                line: line_num,
                message: format!("Invalid cell reference: {}", address),
            })?;

        let text = unescape_grd_text(text.strip_prefix(' ').unwrap_or(text));
        sheet.set_cell(pos, text).map_err(|e| SheetError::Parse {
            line: line_num,
            message: e.to_string(),
        })?;
    }

    Ok(sheet)
}

fn unescape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
