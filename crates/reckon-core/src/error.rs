//! Error types for Reckon core.

use thiserror::Error;

use reckon_engine::engine::{ParseError, Position};

/// Structural faults reported by sheet operations.
///
/// Formula evaluation faults (`#REF!`, `#VALUE!`, `#DIV/0!`) are never
/// reported here; they are cell values.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid position: row {}, col {}", .0.row, .0.col)]
    InvalidPosition(Position),

    #[error("Circular dependency detected at {0}")]
    CircularDependency(Position),

    #[error("Formula syntax error: {0}")]
    FormulaSyntax(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;
