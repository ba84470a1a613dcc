//! Circular dependency detection for formula cells.
//!
//! A cycle (e.g. A1 references B1, B1 references C1, C1 references A1) would
//! make evaluation recurse forever. This module walks the dependency graph
//! depth-first to find one before that happens.

use std::collections::{HashSet, btree_set};

use super::cell_ref::CellRef;
use super::graph::DependencyGraph;

/// Find a cycle anywhere in the graph.
///
/// Returns `Some(path)` where the path follows dependency edges and starts and
/// ends at the same cell, or `None` if the graph is acyclic. Every component
/// is searched, in node order.
pub fn find_cycle(graph: &DependencyGraph) -> Option<Vec<CellRef>> {
    let mut visited = HashSet::new();

    for node in graph.nodes() {
        if visited.contains(node) {
            continue;
        }
        if let Some(cycle) = find_cycle_from(node, graph, &mut visited) {
            return Some(cycle);
        }
    }
    None
}

/// Depth-first search from `root` on an explicit stack. `path` holds the
/// cells of the current branch, `pending` their unvisited dependents.
fn find_cycle_from<'g>(
    root: &'g CellRef,
    graph: &'g DependencyGraph,
    visited: &mut HashSet<CellRef>,
) -> Option<Vec<CellRef>> {
    visited.insert(root.clone());
    let mut path: Vec<&'g CellRef> = vec![root];
    let mut on_path: HashSet<&'g CellRef> = HashSet::from([root]);
    let mut pending: Vec<Option<btree_set::Iter<'g, CellRef>>> =
        vec![graph.direct_dependents(root).map(|deps| deps.iter())];

    while let Some(frame) = pending.last_mut() {
        let Some(dep) = frame.as_mut().and_then(|deps| deps.next()) else {
            pending.pop();
            if let Some(done) = path.pop() {
                on_path.remove(done);
            }
            continue;
        };

        if on_path.contains(dep) {
            // `dep` is on the path, so position() cannot miss.
            let start = path.iter().position(|c| *c == dep).unwrap_or(0);
            let mut cycle: Vec<CellRef> = path[start..].iter().map(|c| (*c).clone()).collect();
            cycle.push(dep.clone());
            return Some(cycle);
        }
        if visited.insert(dep.clone()) {
            path.push(dep);
            on_path.insert(dep);
            pending.push(graph.direct_dependents(dep).map(|deps| deps.iter()));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CellContent;
    use pretty_assertions::assert_eq;

    fn r(name: &str) -> CellRef {
        CellRef::parse(name).unwrap()
    }

    fn graph_of(cells: &[(&str, &str)]) -> DependencyGraph {
        let contents: Vec<(CellRef, CellContent)> = cells
            .iter()
            .map(|(addr, raw)| (r(addr), CellContent::Formula(raw.to_string())))
            .collect();
        DependencyGraph::build(contents.iter().map(|(c, content)| (c.clone(), content)))
    }

    #[test]
    fn test_three_cell_cycle_is_found() {
        let graph = graph_of(&[("A1", "=B1"), ("B1", "=C1"), ("C1", "=A1")]);
        let cycle = find_cycle(&graph).expect("cycle");

        assert_eq!(cycle, vec![r("A1"), r("C1"), r("B1"), r("A1")]);
        for name in ["A1", "B1", "C1"] {
            assert!(cycle.contains(&r(name)));
        }
    }

    #[test]
    fn test_acyclic_graph_has_no_cycle() {
        let graph = graph_of(&[("B1", "=A1+1"), ("C1", "=A1+B1"), ("D1", "=C1*2")]);
        assert_eq!(find_cycle(&graph), None);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let graph = graph_of(&[("A1", "=A1+1")]);
        assert_eq!(find_cycle(&graph), Some(vec![r("A1"), r("A1")]));
    }

    #[test]
    fn test_cycle_path_excludes_upstream_nodes() {
        // A1 feeds the B1 <-> C1 loop but is not part of it.
        let graph = graph_of(&[("B1", "=A1+C1"), ("C1", "=B1")]);
        let cycle = find_cycle(&graph).expect("cycle");
        assert_eq!(cycle.first(), cycle.last());
        assert!(!cycle.contains(&r("A1")));
        assert_eq!(cycle.len(), 3);
    }

    #[test]
    fn test_cycle_in_later_component_is_found() {
        let graph = graph_of(&[("A1", "=1"), ("D5", "=E5"), ("E5", "=D5")]);
        let cycle = find_cycle(&graph).expect("cycle");
        assert!(cycle.contains(&r("D5")));
        assert!(cycle.contains(&r("E5")));
    }

    #[test]
    fn test_cycle_closing_a_long_chain_is_found() {
        let mut cells: Vec<(String, String)> = (2..=20_000)
            .map(|row| (format!("A{}", row), format!("=A{}", row - 1)))
            .collect();
        cells.push(("A1".to_string(), "=A20000".to_string()));
        let refs: Vec<(&str, &str)> = cells.iter().map(|(a, f)| (a.as_str(), f.as_str())).collect();

        let cycle = find_cycle(&graph_of(&refs)).expect("cycle");
        assert_eq!(cycle.len(), 20_001);
        assert_eq!(cycle.first(), cycle.last());
    }

    #[test]
    fn test_long_acyclic_chain_has_no_cycle() {
        let cells: Vec<(String, String)> = (2..=20_000)
            .map(|row| (format!("A{}", row), format!("=A{}+1", row - 1)))
            .collect();
        let refs: Vec<(&str, &str)> = cells.iter().map(|(a, f)| (a.as_str(), f.as_str())).collect();
        assert_eq!(find_cycle(&graph_of(&refs)), None);
    }
}
