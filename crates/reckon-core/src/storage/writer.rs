//! Writer for .grd file format

use crate::error::Result;
use crate::sheet::Sheet;
use std::fs;
use std::path::Path;

/// Write a sheet to a .grd file.
pub fn write_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    let content = write_sheet_content(sheet);
    fs::write(path, content)?;
    Ok(())
}

/// Write a sheet to a .grd format string, cells in row-major order.
pub fn write_sheet_content(sheet: &Sheet) -> String {
    let mut lines = vec!["# Reckon Spreadsheet".to_string()];

    for cell in sheet.iter() {
        if cell.is_empty() {
            continue;
        }
        lines.push(format!(
            "{}: {}",
            cell.position(),
            escape_grd_text(&cell.text())
        ));
    }

    lines.join("\n") + "\n"
}

fn escape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{parse_sheet, parse_sheet_content};
    use reckon_engine::engine::Position;

    fn p(name: &str) -> Position {
        Position::parse(name).unwrap()
    }

    #[test]
    fn test_sorted_output_skips_placeholders() {
        let mut sheet = Sheet::new();
        sheet.set_cell(p("B2"), "3").unwrap();
        sheet.set_cell(p("A1"), "=C3 + B2").unwrap();
        sheet.set_cell(p("B1"), "'x").unwrap();

        let content = write_sheet_content(&sheet);
        assert_eq!(
            content,
            "# Reckon Spreadsheet\nA1: =C3+B2\nB1: 'x\nB2: 3\n"
        );
    }

    #[test]
    fn test_file_round_trip() {
        let mut sheet = Sheet::new();
        sheet.set_cell(p("A1"), "=B1/2").unwrap();
        sheet.set_cell(p("B1"), "9").unwrap();
        sheet.set_cell(p("C7"), "tab\there").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.grd");
        write_sheet(&path, &sheet).unwrap();
        let loaded = parse_sheet(&path).unwrap();

        assert_eq!(write_sheet_content(&loaded), write_sheet_content(&sheet));
        assert_eq!(loaded.value(p("A1")).unwrap(), sheet.value(p("A1")).unwrap());
        assert_eq!(parse_sheet_content("").unwrap().len(), 0);
    }

    #[test]
    fn test_round_trip_keeps_literal_precision() {
        let mut sheet = Sheet::new();
        sheet.set_cell(p("A1"), "=0.1234567*1000000").unwrap();
        sheet.set_cell(p("A2"), "=1.23456789e20/3").unwrap();
        assert_eq!(sheet.text(p("A1")).unwrap().as_deref(), Some("=0.1234567*1000000"));

        let loaded = parse_sheet_content(&write_sheet_content(&sheet)).unwrap();
        for name in ["A1", "A2"] {
            assert_eq!(loaded.text(p(name)).unwrap(), sheet.text(p(name)).unwrap());
            assert_eq!(loaded.value(p(name)).unwrap(), sheet.value(p(name)).unwrap());
        }
    }
}
