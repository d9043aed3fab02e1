//! Tab-separated dumps of the printable area.

use std::io::{self, Write};

use reckon_engine::engine::Position;

use super::{CellView, Sheet};

impl Sheet {
    /// Write the value of every cell in the printable area, one row per
    /// line, fields separated by tabs. Absent cells print as empty fields.
    pub fn print_values<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, |cell| cell.value().to_string())
    }

    /// Like [`Sheet::print_values`], but prints the text of each cell.
    pub fn print_texts<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, |cell| cell.text())
    }

    fn print_with<W, F>(&self, out: &mut W, render: F) -> io::Result<()>
    where
        W: Write,
        F: Fn(&CellView<'_>) -> String,
    {
        let size = self.printable_size();
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    out.write_all(b"\t")?;
                }
                let pos = Position::new(row, col);
                if let Some(cell) = self.cells.get(&pos) {
                    let view = CellView::new(self, pos, cell);
                    out.write_all(render(&view).as_bytes())?;
                }
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> Position {
        Position::parse(name).unwrap()
    }

    fn dump(sheet: &Sheet, texts: bool) -> String {
        let mut out = Vec::new();
        if texts {
            sheet.print_texts(&mut out).unwrap();
        } else {
            sheet.print_values(&mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_sheet_prints_nothing() {
        let sheet = Sheet::new();
        assert_eq!(dump(&sheet, false), "");
        assert_eq!(dump(&sheet, true), "");
    }

    #[test]
    fn test_print_values_and_texts() {
        let mut sheet = Sheet::new();
        sheet.set_cell(p("A1"), "=(1+2)*3").unwrap();
        sheet.set_cell(p("B1"), "'=text").unwrap();
        sheet.set_cell(p("A2"), "=1/0").unwrap();
        sheet.set_cell(p("C2"), "=A1/4").unwrap();

        assert_eq!(dump(&sheet, false), "9\t=text\t\n#DIV/0!\t\t2.25\n");
        assert_eq!(dump(&sheet, true), "=(1+2)*3\t'=text\t\n=1/0\t\t=A1/4\n");
    }

    #[test]
    fn test_placeholders_print_as_empty_fields() {
        let mut sheet = Sheet::new();
        sheet.set_cell(p("A1"), "=B2").unwrap();
        assert_eq!(dump(&sheet, false), "0\t\n\t\n");
        assert_eq!(dump(&sheet, true), "=B2\t\n\t\n");
    }
}
