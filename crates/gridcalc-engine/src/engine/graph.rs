//! Dependency graph over formula cells.
//!
//! Edges point from a referenced cell to the cells whose formulas reference
//! it ("depends on me"). Walking the edges forward gives the set of cells
//! that must be recomputed after a change.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::cell::CellContent;
use super::cell_ref::CellRef;
use super::deps::extract_dependencies;

/// Reverse dependency map: cell -> cells that depend on it.
///
/// Nodes are kept in row-major order so traversals are reproducible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DependencyGraph {
    dependents: BTreeMap<CellRef, BTreeSet<CellRef>>,
}

impl DependencyGraph {
    /// Build the graph from every non-blank cell of a grid.
    ///
    /// Each formula cell becomes a node even when nothing depends on it, and
    /// every address it references becomes a node even when that cell is
    /// undefined.
    pub fn build<'a, I>(cells: I) -> DependencyGraph
    where
        I: IntoIterator<Item = (CellRef, &'a CellContent)>,
    {
        let mut graph = DependencyGraph::default();
        for (cell_ref, content) in cells {
            if let CellContent::Formula(formula) = content {
                for dep in extract_dependencies(formula) {
                    graph.add_edge(dep, cell_ref.clone());
                }
                graph.dependents.entry(cell_ref).or_default();
            }
        }
        log::debug!("built dependency graph with {} nodes", graph.len());
        graph
    }

    fn add_edge(&mut self, referenced: CellRef, dependent: CellRef) {
        self.dependents.entry(referenced).or_default().insert(dependent);
    }

    /// Direct dependents of a cell; empty if none.
    pub fn dependents_of(&self, cell_ref: &CellRef) -> BTreeSet<CellRef> {
        self.dependents.get(cell_ref).cloned().unwrap_or_default()
    }

    pub(crate) fn direct_dependents(&self, cell_ref: &CellRef) -> Option<&BTreeSet<CellRef>> {
        self.dependents.get(cell_ref)
    }

    /// All nodes in visiting order.
    pub fn nodes(&self) -> impl Iterator<Item = &CellRef> {
        self.dependents.keys()
    }

    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        self.dependents.contains_key(cell_ref)
    }

    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    /// Post-order walk over the transitive dependents of `start`.
    ///
    /// Every node appears after all of its dependents, and `start` comes
    /// last. Reversing the result gives the order in which downstream cells
    /// should be recomputed after `start` changes.
    pub fn topological_order(&self, start: &CellRef) -> Vec<CellRef> {
        let mut visited = HashSet::new();
        let mut result = Vec::new();
        // (node, dependents already scheduled)
        let mut stack = vec![(start.clone(), false)];

        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                result.push(node);
                continue;
            }
            if !visited.insert(node.clone()) {
                continue;
            }
            let deps = self.dependents.get(&node);
            stack.push((node, true));
            if let Some(deps) = deps {
                for dep in deps.iter().rev() {
                    if !visited.contains(dep) {
                        stack.push((dep.clone(), false));
                    }
                }
            }
        }
        result
    }
}
