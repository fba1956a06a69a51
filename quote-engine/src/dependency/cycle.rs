//! Cycle detection over the dependency graph
//!
//! Edges run from the dependent factor (`factor_id`) to its controlling
//! factor (`depends_on_factor_id`). Graphs are a few dozen nodes, so a
//! recursive DFS with an explicit path stack is enough.

use serde::{Deserialize, Serialize};
use shared::models::FactorDependencyRule;
use std::collections::{HashMap, HashSet};

/// Outcome of [`detect_cycle`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub has_cycle: bool,
    /// Start node up to and including the repeated node, e.g. `[1, 2, 3, 1]`
    pub path: Vec<i64>,
}

/// Adjacency list plus node order of first appearance (keeps output stable)
struct Graph {
    edges: HashMap<i64, Vec<i64>>,
    nodes: Vec<i64>,
}

impl Graph {
    fn build(rules: &[FactorDependencyRule]) -> Self {
        let mut edges: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut nodes = Vec::new();
        for rule in rules {
            let targets = edges.entry(rule.factor_id).or_insert_with(|| {
                nodes.push(rule.factor_id);
                Vec::new()
            });
            if !targets.contains(&rule.depends_on_factor_id) {
                targets.push(rule.depends_on_factor_id);
            }
        }
        Self { edges, nodes }
    }

    fn next(&self, node: i64) -> &[i64] {
        self.edges.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// DFS state shared across one traversal
#[derive(Default)]
struct Walk {
    visited: HashSet<i64>,
    stack: Vec<i64>,
    on_stack: HashSet<i64>,
}

impl Walk {
    /// First cycle reachable from `node`, as the current stack plus the repeated node
    fn first_cycle(&mut self, graph: &Graph, node: i64) -> Option<Vec<i64>> {
        self.enter(node);
        for &next in graph.next(node) {
            if self.on_stack.contains(&next) {
                let mut path = self.stack.clone();
                path.push(next);
                return Some(path);
            }
            if !self.visited.contains(&next) {
                if let Some(path) = self.first_cycle(graph, next) {
                    return Some(path);
                }
            }
        }
        self.leave(node);
        None
    }

    /// Every back edge reachable from `node`, each as a closed cycle
    fn all_cycles(&mut self, graph: &Graph, node: i64, found: &mut Vec<Vec<i64>>) {
        self.enter(node);
        for &next in graph.next(node) {
            if self.on_stack.contains(&next) {
                if let Some(pos) = self.stack.iter().position(|&n| n == next) {
                    let mut cycle = self.stack[pos..].to_vec();
                    cycle.push(next);
                    found.push(cycle);
                }
            } else if !self.visited.contains(&next) {
                self.all_cycles(graph, next, found);
            }
        }
        self.leave(node);
    }

    fn enter(&mut self, node: i64) {
        self.visited.insert(node);
        self.stack.push(node);
        self.on_stack.insert(node);
    }

    fn leave(&mut self, node: i64) {
        self.stack.pop();
        self.on_stack.remove(&node);
    }
}

/// Look for a cycle reachable from `start_factor_id`.
pub fn detect_cycle(rules: &[FactorDependencyRule], start_factor_id: i64) -> CycleReport {
    let graph = Graph::build(rules);
    match Walk::default().first_cycle(&graph, start_factor_id) {
        Some(path) => CycleReport {
            has_cycle: true,
            path,
        },
        None => CycleReport::default(),
    }
}

/// Every distinct cycle in the rule set.
///
/// Each cycle is reported once, closed on its first node (`[2, 3, 2]`). A
/// cycle whose members were all part of an earlier report is skipped.
pub fn find_all_cycles(rules: &[FactorDependencyRule]) -> Vec<Vec<i64>> {
    let graph = Graph::build(rules);
    let mut walk = Walk::default();
    let mut found = Vec::new();

    for &start in &graph.nodes {
        if !walk.visited.contains(&start) {
            walk.all_cycles(&graph, start, &mut found);
        }
    }

    let mut recorded = HashSet::new();
    found
        .into_iter()
        .filter(|cycle| {
            let new_member = cycle.iter().any(|id| !recorded.contains(id));
            recorded.extend(cycle.iter().copied());
            new_member
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ConditionType;

    fn edge(id: i64, factor_id: i64, depends_on: i64) -> FactorDependencyRule {
        FactorDependencyRule {
            id,
            factor_id,
            depends_on_factor_id: depends_on,
            condition_type: ConditionType::AnySelected,
            condition_value: vec![],
            description: None,
        }
    }

    #[test]
    fn test_three_node_cycle() {
        let rules = vec![edge(1, 1, 2), edge(2, 2, 3), edge(3, 3, 1)];
        let report = detect_cycle(&rules, 1);
        assert!(report.has_cycle);
        assert_eq!(report.path, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_acyclic_chain() {
        let rules = vec![edge(1, 1, 2), edge(2, 2, 3)];
        let report = detect_cycle(&rules, 1);
        assert!(!report.has_cycle);
        assert!(report.path.is_empty());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // 1 → 2 → 4, 1 → 3 → 4
        let rules = vec![edge(1, 1, 2), edge(2, 1, 3), edge(3, 2, 4), edge(4, 3, 4)];
        assert!(!detect_cycle(&rules, 1).has_cycle);
        assert!(find_all_cycles(&rules).is_empty());
    }

    #[test]
    fn test_path_includes_lead_in() {
        // 0 → 1 → 2 → 1
        let rules = vec![edge(1, 0, 1), edge(2, 1, 2), edge(3, 2, 1)];
        let report = detect_cycle(&rules, 0);
        assert_eq!(report.path, vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_unknown_start_has_no_cycle() {
        let rules = vec![edge(1, 1, 2), edge(2, 2, 1)];
        assert!(!detect_cycle(&rules, 42).has_cycle);
    }

    #[test]
    fn test_find_all_cycles_reports_each_once() {
        let rules = vec![
            edge(1, 1, 2),
            edge(2, 2, 1),
            edge(3, 5, 6),
            edge(4, 6, 7),
            edge(5, 7, 5),
            edge(6, 8, 1),
        ];
        let cycles = find_all_cycles(&rules);
        assert_eq!(cycles, vec![vec![1, 2, 1], vec![5, 6, 7, 5]]);
    }

    #[test]
    fn test_find_all_cycles_self_loop() {
        let rules = vec![edge(1, 4, 4)];
        assert_eq!(find_all_cycles(&rules), vec![vec![4, 4]]);
    }
}
