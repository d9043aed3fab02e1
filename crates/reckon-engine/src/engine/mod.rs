//! Formula engine API.
//!
//! This module provides everything a sheet needs to hold and evaluate formulas:
//!
//! - [`Position`], [`Size`] - Cell addresses (A1 notation ↔ row/col indices)
//! - [`Formula`] - Parsed formula with its referenced cells
//! - [`Expr`], [`Resolver`] - Expression tree and the hook used to read cited cells
//! - [`FormulaError`], [`ParseError`] - Evaluation faults and syntax errors
//! - [`format_number`] - Format numbers for display

mod ast;
mod error;
mod format;
mod formula;
mod lexer;
mod parser;
mod position;

pub use ast::{BinaryOp, Expr, Resolver, UnaryOp};
pub use error::{FormulaError, ParseError};
pub use format::format_number;
pub use formula::Formula;
pub use position::{MAX_COLS, MAX_ROWS, Position, Size};
