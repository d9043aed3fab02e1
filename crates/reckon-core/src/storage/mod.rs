//! Storage for the .grd plain-text sheet format.
//!
//! One `CELLREF: TEXT` line per non-empty cell, where TEXT is exactly what a
//! user would type into the cell. Lines starting with `#` are comments.

mod parser;
mod writer;

pub use parser::{parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};
