//! Dependency graph between formula cells and the cells they cite.
//!
//! # Edge Direction
//!
//! ```text
//! A → B  means  "B's formula cites A"  (B is a dependent of A)
//! ```
//!
//! Edges are keyed by [`Position`], never by cell, so they outlive the cells
//! at either end: clearing a cited position keeps its dependents on record,
//! and writing there again still invalidates them.

use std::collections::{BTreeSet, HashMap, HashSet};

use reckon_engine::engine::Position;

/// Reverse edges ("who cites me") plus the forward edges needed to retract them.
///
/// # Invariants
///
/// 1. If A ∈ precedents[B] then B ∈ dependents[A], and vice versa.
/// 2. Empty sets are removed, not stored.
/// 3. The graph is acyclic; [`DependencyGraph::would_create_cycle`] must be
///    consulted before [`DependencyGraph::replace_edges`] adds edges.
#[derive(Default, Debug, Clone)]
pub struct DependencyGraph {
    /// For each formula cell B, the positions it cites.
    precedents: HashMap<Position, BTreeSet<Position>>,
    /// For each cited position A, the formula cells citing it.
    dependents: HashMap<Position, BTreeSet<Position>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells whose formulas cite `pos`, in position order.
    pub fn dependents(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        self.dependents
            .get(&pos)
            .into_iter()
            .flat_map(|s| s.iter().copied())
    }

    /// Positions cited by the formula at `pos`, in position order.
    pub fn precedents(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        self.precedents
            .get(&pos)
            .into_iter()
            .flat_map(|s| s.iter().copied())
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.precedents.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.precedents.is_empty()
    }

    /// Replace every outgoing edge of `cell` with edges to `cited`.
    ///
    /// Edges to positions `cell` no longer cites are retracted, so a stale
    /// edge can never cause a false cycle report later.
    pub fn replace_edges(&mut self, cell: Position, cited: &[Position]) {
        if let Some(old) = self.precedents.remove(&cell) {
            for pred in old {
                if let Some(deps) = self.dependents.get_mut(&pred) {
                    deps.remove(&cell);
                    if deps.is_empty() {
                        self.dependents.remove(&pred);
                    }
                }
            }
        }

        if cited.is_empty() {
            return;
        }

        for pred in cited {
            self.dependents.entry(*pred).or_default().insert(cell);
        }
        self.precedents.insert(cell, cited.iter().copied().collect());
    }

    /// Drop every outgoing edge of `cell`. Its dependents stay recorded.
    pub fn clear_cell(&mut self, cell: Position) {
        self.replace_edges(cell, &[]);
    }

    /// Would `cell` citing `cited` close a loop?
    ///
    /// Walks the cells that already depend on `cell`, directly or
    /// transitively, starting with `cell` itself; a loop forms exactly when
    /// one of them is about to be cited. Stops at the first hit.
    pub fn would_create_cycle(&self, cell: Position, cited: &[Position]) -> bool {
        if cited.is_empty() {
            return false;
        }
        let cited: HashSet<Position> = cited.iter().copied().collect();
        let mut visited = HashSet::new();
        let mut stack = vec![cell];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if cited.contains(&current) {
                return true;
            }
            stack.extend(self.dependents(current).filter(|dep| !visited.contains(dep)));
        }
        false
    }

    /// `start` followed by everything that depends on it transitively,
    /// each position once.
    pub fn invalidation_order(&self, start: Position) -> Vec<Position> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current);
            stack.extend(self.dependents(current).filter(|dep| !visited.contains(dep)));
        }
        order
    }
}
