//! Index-based adjacency over a display graph.
//!
//! Layout works on dense `usize` node indices (graph node order) rather than
//! string ids. Both outgoing and incoming edges are tracked per node, and
//! edges naming an unknown node are dropped on construction.

use std::collections::HashMap;

use log::debug;

use dialograph_core::{graph::Graph, identifier::Id};

/// Outgoing and incoming edge lists for every node of a [`Graph`].
#[derive(Debug)]
pub(super) struct Adjacency<'g> {
    ids: Vec<&'g Id>,
    children: Vec<Vec<usize>>,
    parents: Vec<Vec<usize>>,
}

impl<'g> Adjacency<'g> {
    /// Builds the adjacency of `graph`, keeping edge declaration order.
    pub(super) fn new(graph: &'g Graph) -> Self {
        let ids: Vec<&Id> = graph.nodes().iter().map(|node| node.id()).collect();
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(ids.len());
        for (idx, id) in ids.iter().enumerate() {
            index.entry(id.as_str()).or_insert(idx);
        }

        let mut children = vec![Vec::new(); ids.len()];
        let mut parents = vec![Vec::new(); ids.len()];
        for edge in graph.edges() {
            let source = index.get(edge.source().as_str());
            let target = index.get(edge.target().as_str());
            let (Some(&source), Some(&target)) = (source, target) else {
                debug!(
                    from = edge.source().as_str(),
                    to = edge.target().as_str();
                    "Ignoring edge with an unknown endpoint"
                );
                continue;
            };
            children[source].push(target);
            parents[target].push(source);
        }

        Self {
            ids,
            children,
            parents,
        }
    }

    /// Number of nodes.
    pub(super) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(super) fn id(&self, idx: usize) -> &'g Id {
        self.ids[idx]
    }

    /// Targets of the outgoing edges of `idx`, in edge order.
    pub(super) fn children(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    /// Sources of the incoming edges of `idx`, in edge order.
    pub(super) fn parents(&self, idx: usize) -> &[usize] {
        &self.parents[idx]
    }

    /// Nodes without incoming edges, in node order.
    ///
    /// A non-empty graph where every node has an incoming edge falls back to
    /// the node with the lexicographically smallest id, so traversal always
    /// has a starting point.
    pub(super) fn roots(&self) -> Vec<usize> {
        let roots: Vec<usize> = (0..self.len())
            .filter(|&idx| self.parents[idx].is_empty())
            .collect();
        if !roots.is_empty() {
            return roots;
        }

        let fallback = (0..self.len()).min_by(|&a, &b| self.ids[a].cmp(self.ids[b]));
        if let Some(idx) = fallback {
            debug!(node_id = self.ids[idx].as_str(); "No root nodes, starting from smallest id");
        }
        fallback.into_iter().collect()
    }

    /// Nodes reachable from `roots` in depth-first pre-order, each paired with
    /// its position among its discoverer's children (or among the roots).
    pub(super) fn preorder(&self, roots: &[usize]) -> Vec<(usize, usize)> {
        let mut visited = vec![false; self.len()];
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<(usize, usize)> = roots
            .iter()
            .enumerate()
            .rev()
            .map(|(position, &idx)| (idx, position))
            .collect();

        while let Some((idx, position)) = stack.pop() {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            order.push((idx, position));
            stack.extend(
                self.children[idx]
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(position, &child)| (child, position)),
            );
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use dialograph_core::graph::{GraphEdge, GraphNode, NodeKind};

    use super::*;

    fn graph(ids: &[&str], edges: &[(&str, &str)]) -> Graph {
        Graph::new(
            ids.iter()
                .map(|id| GraphNode::new(*id, *id, NodeKind::Bot))
                .collect(),
            edges
                .iter()
                .map(|(from, to)| GraphEdge::new(*from, *to))
                .collect(),
        )
    }

    #[test]
    fn test_children_and_parents() {
        let graph = graph(&["a", "b", "c"], &[("a", "b"), ("a", "c"), ("b", "c")]);
        let adjacency = Adjacency::new(&graph);
        assert_eq!(adjacency.children(0), &[1, 2]);
        assert_eq!(adjacency.parents(2), &[0, 1]);
        assert_eq!(adjacency.roots(), vec![0]);
        assert_eq!(adjacency.id(1), "b");
    }

    #[test]
    fn test_edges_to_unknown_nodes_are_ignored() {
        let graph = graph(&["a", "b"], &[("a", "ghost"), ("ghost", "b"), ("a", "b")]);
        let adjacency = Adjacency::new(&graph);
        assert_eq!(adjacency.children(0), &[1]);
        assert_eq!(adjacency.parents(1), &[0]);
        assert_eq!(adjacency.roots(), vec![0]);
    }

    #[test]
    fn test_pure_cycle_falls_back_to_smallest_id() {
        let graph = graph(&["c", "a", "b"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let adjacency = Adjacency::new(&graph);
        assert_eq!(adjacency.roots(), vec![1]);
    }

    #[test]
    fn test_empty_graph_has_no_roots() {
        let graph = graph(&[], &[]);
        assert!(Adjacency::new(&graph).roots().is_empty());
    }

    #[test]
    fn test_preorder_first_discovery_wins() {
        // a -> b -> d, a -> c -> d, d -> a (back edge)
        let graph = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "a")],
        );
        let adjacency = Adjacency::new(&graph);
        let order = adjacency.preorder(&[0]);
        assert_eq!(order, vec![(0, 0), (1, 0), (3, 0), (2, 1)]);
    }

    #[test]
    fn test_preorder_skips_unreachable() {
        let graph = graph(&["a", "b", "x", "y"], &[("a", "b"), ("x", "y"), ("y", "x")]);
        let adjacency = Adjacency::new(&graph);
        let reached: Vec<usize> = adjacency
            .preorder(&adjacency.roots())
            .into_iter()
            .map(|(idx, _)| idx)
            .collect();
        assert_eq!(reached, vec![0, 1]);
    }
}
