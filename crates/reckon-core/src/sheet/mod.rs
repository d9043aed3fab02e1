//! Sheet state and logic (UI-agnostic).

mod cell;
mod eval;
mod graph;
mod ops;
mod print;
mod state;

pub use cell::{Cell, CellValue, Content, ESCAPE_SIGN, FORMULA_SIGN};
pub use eval::FormulaCell;
pub use graph::DependencyGraph;
pub use state::{CellView, Sheet};
