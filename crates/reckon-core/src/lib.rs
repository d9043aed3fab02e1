//! reckon-core - Sheet store, dependency tracking and storage.

pub mod error;
pub mod sheet;
pub mod storage;

pub use error::{Result, SheetError};
pub use sheet::{Cell, CellValue, CellView, Content, DependencyGraph, Sheet};

pub use reckon_engine::engine::{FormulaError, Position, Size};
