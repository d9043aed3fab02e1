use reckon_engine::engine::Position;
use tracing::debug;

use super::Sheet;
use super::cell::Content;
use crate::error::{Result, SheetError};

impl Sheet {
    /// Reset the cache of `start` and of every cell depending on it transitively.
    fn invalidate(&mut self, start: Position) {
        let order = self.graph.invalidation_order(start);
        debug!(%start, cells = order.len(), "invalidating caches");
        for pos in order {
            if let Some(cell) = self.cells.get_mut(&pos) {
                cell.reset_cache();
            }
        }
    }

    /// Set cell contents from user input.
    ///
    /// Empty input stores an empty cell, `=...` a formula, anything else text.
    /// Either the whole edit is applied or, on error, nothing changes:
    /// - [`SheetError::InvalidPosition`] if `pos` is outside the grid
    /// - [`SheetError::FormulaSyntax`] if the formula does not parse
    /// - [`SheetError::CircularDependency`] if the formula would cite itself,
    ///   directly or through other formulas
    pub fn set_cell(&mut self, pos: Position, text: impl Into<String>) -> Result<()> {
        Self::check_position(pos)?;
        let content = Content::parse(text.into())?;
        let cited = content.referenced_cells().to_vec();

        if self.graph.would_create_cycle(pos, &cited) {
            debug!(%pos, "rejected formula: circular dependency");
            return Err(SheetError::CircularDependency(pos));
        }

        self.graph.replace_edges(pos, &cited);
        self.cells.entry(pos).or_default().content = content;
        for dep in &cited {
            self.cells.entry(*dep).or_default();
        }
        debug!(%pos, cited = cited.len(), "cell set");

        self.invalidate(pos);
        Ok(())
    }

    /// Remove the cell at `pos`. Clearing an absent position is a no-op.
    ///
    /// Formulas citing `pos` are left alone; they read the absent cell as zero.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        Self::check_position(pos)?;
        if self.cells.remove(&pos).is_none() {
            return Ok(());
        }
        self.graph.clear_cell(pos);
        debug!(%pos, "cell cleared");

        self.invalidate(pos);
        Ok(())
    }
}
