//! Formula error types.

use thiserror::Error;

/// A fault produced while evaluating a formula.
///
/// These are values, not failures: a cell whose formula faults simply holds
/// one of these, and formulas that read it adopt the same error.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FormulaError {
    /// The formula cites an address outside the grid.
    #[error("#REF!")]
    Ref,
    /// A cited cell holds text that is not a number.
    #[error("#VALUE!")]
    Value,
    /// Division by zero, or an arithmetic result that is not finite.
    #[error("#DIV/0!")]
    Div0,
}

impl FormulaError {
    /// The fixed display string for this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormulaError::Ref => "#REF!",
            FormulaError::Value => "#VALUE!",
            FormulaError::Div0 => "#DIV/0!",
        }
    }
}

/// Formula text that could not be turned into an expression tree.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    /// Byte offset into the formula text where parsing stopped.
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            offset,
            message: message.into(),
        }
    }
}
