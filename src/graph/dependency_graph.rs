//! Directed dependency graph over opaque identifiers.
//!
//! Edges point from a dependent to its dependency: `add_dependency(b, a)`
//! records that `b` needs `a` first. Adjacency is kept in both directions so
//! dependency and dependent lookups are both a single map access.
//!
//! The graph never refuses an edge. Cycles are representable and reported by
//! `has_cycles` / `find_cycle`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// DFS marks. A node missing from the mark map is unvisited.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    Temp,
    Perm,
}

#[derive(Clone)]
pub struct DependencyGraph<N> {
    /// node -> direct dependencies, first-recorded order
    dependencies: HashMap<N, Vec<N>>,
    /// node -> direct dependents, first-recorded order
    dependents: HashMap<N, Vec<N>>,
    /// Insertion order for deterministic iteration
    insertion_order: Vec<N>,
}

impl<N> Default for DependencyGraph<N> {
    fn default() -> Self {
        Self {
            dependencies: HashMap::new(),
            dependents: HashMap::new(),
            insertion_order: Vec::new(),
        }
    }
}

impl<N> DependencyGraph<N>
where
    N: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.insertion_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insertion_order.is_empty()
    }

    pub fn contains(&self, id: &N) -> bool {
        self.dependencies.contains_key(id)
    }

    /// Insert `id` if absent.
    pub fn add_node(&mut self, id: N) {
        if self.dependencies.contains_key(&id) {
            return;
        }
        self.insertion_order.push(id.clone());
        self.dependents.insert(id.clone(), Vec::new());
        self.dependencies.insert(id, Vec::new());
    }

    /// Record that `dependent` needs `dependency` to run first.
    ///
    /// Missing endpoints are inserted as nodes. Adding an existing edge is a
    /// no-op.
    pub fn add_dependency(&mut self, dependent: N, dependency: N) {
        self.add_node(dependent.clone());
        self.add_node(dependency.clone());

        let deps = self.dependencies.entry(dependent.clone()).or_default();
        if deps.contains(&dependency) {
            return;
        }
        deps.push(dependency.clone());
        self.dependents
            .entry(dependency)
            .or_default()
            .push(dependent);
    }

    /// Direct dependencies of `id`. Empty for unknown ids.
    pub fn get_dependencies(&self, id: &N) -> Vec<N> {
        self.dependencies.get(id).cloned().unwrap_or_default()
    }

    /// Direct dependents of `id`. Empty for unknown ids.
    pub fn get_dependents(&self, id: &N) -> Vec<N> {
        self.dependents.get(id).cloned().unwrap_or_default()
    }

    /// All nodes in insertion order.
    pub fn get_all_operations(&self) -> Vec<N> {
        self.insertion_order.clone()
    }

    /// Borrowing variant of `get_dependencies` for traversals.
    pub(crate) fn dependencies_of(&self, id: &N) -> &[N] {
        self.dependencies.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.insertion_order.iter()
    }

    /// All edges as `(dependent, dependency)`, grouped by dependent in
    /// insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.insertion_order.iter().flat_map(move |node| {
            self.dependencies_of(node)
                .iter()
                .map(move |dep| (node, dep))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(Vec::len).sum()
    }

    /// Nodes with no dependencies.
    pub fn roots(&self) -> Vec<N> {
        self.insertion_order
            .iter()
            .filter(|n| self.dependencies_of(n).is_empty())
            .cloned()
            .collect()
    }

    /// Nodes nothing depends on.
    pub fn leaves(&self) -> Vec<N> {
        self.insertion_order
            .iter()
            .filter(|n| self.dependents.get(*n).is_none_or(Vec::is_empty))
            .cloned()
            .collect()
    }

    /// True iff some node is its own transitive dependency.
    pub fn has_cycles(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Members of one cycle, first node repeated at the end:
    /// `[A, B, A]` for `A -> B -> A`. `None` for an acyclic graph.
    ///
    /// Every node is tried as a DFS root so disconnected components are
    /// covered.
    pub fn find_cycle(&self) -> Option<Vec<N>> {
        fn dfs<N: Clone + Eq + Hash>(
            v: &N,
            graph: &DependencyGraph<N>,
            marks: &mut HashMap<N, Mark>,
            stack: &mut Vec<N>,
        ) -> Option<Vec<N>> {
            match marks.get(v) {
                Some(Mark::Perm) => return None,
                Some(Mark::Temp) => {
                    // v is on the current path => back edge
                    let start = stack.iter().position(|n| n == v).unwrap_or(0);
                    let mut cycle = stack[start..].to_vec();
                    cycle.push(v.clone());
                    return Some(cycle);
                }
                None => {}
            }

            marks.insert(v.clone(), Mark::Temp);
            stack.push(v.clone());

            for dep in graph.dependencies_of(v) {
                if let Some(cycle) = dfs(dep, graph, marks, stack) {
                    return Some(cycle);
                }
            }

            stack.pop();
            marks.insert(v.clone(), Mark::Perm);
            None
        }

        let mut marks = HashMap::<N, Mark>::new();
        let mut stack = Vec::<N>::new();
        for root in &self.insertion_order {
            stack.clear();
            if let Some(cycle) = dfs(root, self, &mut marks, &mut stack) {
                return Some(cycle);
            }
        }
        None
    }

    fn edge_set(&self) -> HashSet<(&N, &N)> {
        self.edges().collect()
    }
}

impl<N> PartialEq for DependencyGraph<N>
where
    N: Clone + Eq + Hash,
{
    /// Order-independent: same node set and same edge set.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() || self.edge_count() != other.edge_count() {
            return false;
        }
        let nodes: HashSet<&N> = self.insertion_order.iter().collect();
        let other_nodes: HashSet<&N> = other.insertion_order.iter().collect();
        nodes == other_nodes && self.edge_set() == other.edge_set()
    }
}

impl<N> Eq for DependencyGraph<N> where N: Clone + Eq + Hash {}

impl<N> fmt::Debug for DependencyGraph<N>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for node in &self.insertion_order {
            map.entry(node, &self.dependencies_of(node));
        }
        map.finish()
    }
}
