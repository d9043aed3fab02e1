//! Cell data structures.
//!
//! - [`Content`] - What a cell holds: nothing, text, or a formula
//! - [`Cell`] - Owned storage for one position of the sheet
//! - [`CellValue`] - The computed value a cell presents to readers

use std::fmt;

use reckon_engine::engine::{FormulaError, ParseError, Position, format_number};

use super::eval::FormulaCell;

/// Leading character that makes the rest of a cell's text literal.
pub const ESCAPE_SIGN: char = '\'';
/// Leading character of a formula.
pub const FORMULA_SIGN: char = '=';

/// The computed value of a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(FormulaError),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Error(e) => f.write_str(e.as_str()),
        }
    }
}

impl From<Result<f64, FormulaError>> for CellValue {
    fn from(result: Result<f64, FormulaError>) -> Self {
        match result {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::Error(e),
        }
    }
}

/// The content stored in a cell.
#[derive(Clone, Debug, Default)]
pub enum Content {
    #[default]
    Empty,
    /// Raw text as entered, including any leading escape sign.
    Text(String),
    Formula(FormulaCell),
}

impl Content {
    /// Classify user input.
    /// - Empty string -> Empty
    /// - `=` followed by anything -> Formula (parsed; syntax errors are returned)
    /// - Otherwise -> Text, kept verbatim
    pub fn parse(text: String) -> Result<Content, ParseError> {
        if text.is_empty() {
            return Ok(Content::Empty);
        }
        match text.strip_prefix(FORMULA_SIGN) {
            Some(expression) if !expression.is_empty() => {
                Ok(Content::Formula(FormulaCell::new(expression)?))
            }
            _ => Ok(Content::Text(text)),
        }
    }

    /// The text a user would enter to reproduce this content.
    pub fn text(&self) -> String {
        match self {
            Content::Empty => String::new(),
            Content::Text(s) => s.clone(),
            Content::Formula(f) => f.text(),
        }
    }

    /// Positions this content cites, sorted and distinct.
    pub fn referenced_cells(&self) -> &[Position] {
        match self {
            Content::Empty | Content::Text(_) => &[],
            Content::Formula(f) => f.referenced_cells(),
        }
    }

    pub fn reset_cache(&mut self) {
        if let Content::Formula(f) = self {
            f.reset_cache();
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }
}

/// Text as shown to readers: the escape sign, if any, is dropped.
pub(crate) fn unescape(text: &str) -> &str {
    text.strip_prefix(ESCAPE_SIGN).unwrap_or(text)
}

/// A cell in the sheet. Its position is the key it is stored under.
#[derive(Clone, Debug, Default)]
pub struct Cell {
    pub(crate) content: Content,
}

impl Cell {
    pub fn new(content: Content) -> Cell {
        Cell { content }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn text(&self) -> String {
        self.content.text()
    }

    pub fn referenced_cells(&self) -> &[Position] {
        self.content.referenced_cells()
    }

    pub(crate) fn reset_cache(&mut self) {
        self.content.reset_cache();
    }
}
