use std::collections::HashMap;

use reckon_engine::engine::{Position, Size};

use super::cell::{Cell, CellValue, Content, unescape};
use super::graph::DependencyGraph;
use crate::error::{Result, SheetError};

/// A sparse grid of cells kept consistent under edits.
///
/// The sheet is the only owner of its cells and the only writer of the
/// dependency graph. It is not `Sync`: formula caches fill lazily through
/// shared references, so concurrent hosts must serialize access.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    /// Stored cells, including empty placeholders for cited positions.
    pub(crate) cells: HashMap<Position, Cell>,
    /// Reverse/forward reference edges between positions.
    pub(crate) graph: DependencyGraph,
}

/// Read-only view of a stored cell.
#[derive(Clone, Copy)]
pub struct CellView<'a> {
    sheet: &'a Sheet,
    pos: Position,
    cell: &'a Cell,
}

impl<'a> CellView<'a> {
    pub(crate) fn new(sheet: &'a Sheet, pos: Position, cell: &'a Cell) -> CellView<'a> {
        CellView { sheet, pos, cell }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn content(&self) -> &'a Content {
        self.cell.content()
    }

    /// The computed value, evaluating the formula if nothing is cached.
    pub fn value(&self) -> CellValue {
        match self.cell.content() {
            Content::Empty => CellValue::Text(String::new()),
            Content::Text(text) => CellValue::Text(unescape(text).to_string()),
            Content::Formula(formula) => formula.evaluate(self.sheet).into(),
        }
    }

    /// The text a user would enter to reproduce this cell.
    pub fn text(&self) -> String {
        self.cell.text()
    }

    /// Positions cited by this cell's formula, sorted and distinct.
    pub fn referenced_cells(&self) -> &'a [Position] {
        self.cell.referenced_cells()
    }

    /// Cells whose formulas cite this one, in position order.
    pub fn dependents(&self) -> Vec<Position> {
        self.sheet.graph.dependents(self.pos).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.content().is_empty()
    }
}

impl std::fmt::Debug for CellView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellView")
            .field("pos", &self.pos)
            .field("text", &self.text())
            .finish()
    }
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn check_position(pos: Position) -> Result<()> {
        if pos.is_valid() {
            Ok(())
        } else {
            Err(SheetError::InvalidPosition(pos))
        }
    }

    /// Unchecked lookup.
    pub(crate) fn get(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    /// The cell stored at `pos`, or None if nothing was ever stored there.
    pub fn cell(&self, pos: Position) -> Result<Option<CellView<'_>>> {
        Self::check_position(pos)?;
        Ok(self.cells.get(&pos).map(|cell| CellView::new(self, pos, cell)))
    }

    /// Shorthand for `cell(pos)?.map(|c| c.value())`.
    ///
    /// The first read of a formula evaluates every uncached formula it
    /// depends on, recursing once per link of the chain. Chains tens of
    /// thousands of cells deep can exhaust the thread's stack; reading the
    /// chain front to back keeps each evaluation shallow.
    pub fn value(&self, pos: Position) -> Result<Option<CellValue>> {
        Ok(self.cell(pos)?.map(|c| c.value()))
    }

    /// Shorthand for `cell(pos)?.map(|c| c.text())`.
    pub fn text(&self, pos: Position) -> Result<Option<String>> {
        Ok(self.cell(pos)?.map(|c| c.text()))
    }

    /// Smallest rectangle anchored at A1 covering every stored cell.
    pub fn printable_size(&self) -> Size {
        self.cells.keys().fold(Size::default(), |size, pos| {
            Size::new(size.rows.max(pos.row + 1), size.cols.max(pos.col + 1))
        })
    }

    /// Number of stored cells, placeholders included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Stored positions in row-major order.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self.cells.keys().copied().collect();
        positions.sort();
        positions
    }

    /// Stored cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellView<'_>> + '_ {
        self.positions()
            .into_iter()
            .filter_map(move |pos| self.cells.get(&pos).map(|cell| CellView::new(self, pos, cell)))
    }

    /// The dependency graph, for inspection.
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }
}
