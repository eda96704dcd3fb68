//! Edge indexes over a [`ChainGraph`] and the breadth-first linearizer.
//!
//! # Ordering
//!
//! 1. The root is the first node, in input order, that is not the target of
//!    any edge. If every node is a target (cyclic input) the first node is
//!    the root.
//! 2. Nodes reachable from the root follow in breadth-first order, taking
//!    outgoing edges in input order. A node is emitted once, on first
//!    discovery.
//! 3. Nodes never reached are appended in input order.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use docchain_types::{ChainEdge, ChainGraph, ChainNode};

use crate::report::ChainReport;

/// Borrowed index over a chain graph.
#[derive(Clone, Debug)]
pub struct ChainIndex<'a> {
    graph: &'a ChainGraph,
    /// First node carrying each id.
    by_id: HashMap<&'a str, &'a ChainNode>,
    /// Forward-edge index: source -> edges, in input order.
    outgoing: HashMap<&'a str, Vec<&'a ChainEdge>>,
    /// Reverse-edge index: target -> edges, in input order.
    incoming: HashMap<&'a str, Vec<&'a ChainEdge>>,
}

impl<'a> ChainIndex<'a> {
    pub fn new(graph: &'a ChainGraph) -> Self {
        let mut by_id = HashMap::with_capacity(graph.nodes.len());
        for node in &graph.nodes {
            by_id.entry(node.id.as_str()).or_insert(node);
        }

        let mut outgoing: HashMap<&str, Vec<&ChainEdge>> = HashMap::new();
        let mut incoming: HashMap<&str, Vec<&ChainEdge>> = HashMap::new();
        for edge in &graph.edges {
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
            incoming.entry(edge.target.as_str()).or_default().push(edge);
        }

        Self {
            graph,
            by_id,
            outgoing,
            incoming,
        }
    }

    pub fn graph(&self) -> &'a ChainGraph {
        self.graph
    }

    pub fn len(&self) -> usize {
        self.graph.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&'a ChainNode> {
        self.by_id.get(id).copied()
    }

    /// The node the lineage starts from. `None` only for an empty graph.
    pub fn root(&self) -> Option<&'a ChainNode> {
        let first = self.graph.nodes.first()?;
        let root = self
            .graph
            .nodes
            .iter()
            .find(|n| !self.incoming.contains_key(n.id.as_str()));
        if root.is_none() {
            debug!(fallback = %first.id, "every node is an edge target, falling back to first node");
        }
        Some(root.unwrap_or(first))
    }

    /// Outgoing edges of a node, in input order.
    pub fn outgoing(&self, id: &str) -> &[&'a ChainEdge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All incoming edges of a node, in input order.
    pub fn incoming_all(&self, id: &str) -> &[&'a ChainEdge] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The edge that introduced a node: its first incoming edge.
    pub fn incoming(&self, id: &str) -> Option<&'a ChainEdge> {
        self.incoming_all(id).first().copied()
    }

    /// Nodes in timeline order. See the module docs for the rules.
    pub fn linearize(&self) -> Vec<&'a ChainNode> {
        let Some(root) = self.root() else {
            return Vec::new();
        };

        let mut visited: HashSet<&str> = HashSet::with_capacity(self.by_id.len());
        let mut order = Vec::with_capacity(self.graph.nodes.len());
        let mut queue: VecDeque<&str> = VecDeque::new();

        visited.insert(root.id.as_str());
        queue.push_back(root.id.as_str());

        while let Some(current) = queue.pop_front() {
            let Some(node) = self.by_id.get(current) else {
                debug!(id = current, "edge points at a node missing from the graph");
                continue;
            };
            order.push(*node);

            for edge in self.outgoing(current) {
                if visited.insert(edge.target.as_str()) {
                    queue.push_back(edge.target.as_str());
                }
            }
        }

        let orphans: Vec<&ChainNode> = self
            .graph
            .nodes
            .iter()
            .filter(|n| !visited.contains(n.id.as_str()))
            .collect();
        if !orphans.is_empty() {
            debug!(count = orphans.len(), "appending nodes unreachable from the root");
        }
        order.extend(orphans);

        order
    }

    /// Nodes the traversal from the root never reaches, in input order.
    pub fn orphans(&self) -> Vec<&'a ChainNode> {
        let reachable: HashSet<&str> = self.reachable_from_root();
        self.graph
            .nodes
            .iter()
            .filter(|n| !reachable.contains(n.id.as_str()))
            .collect()
    }

    fn reachable_from_root(&self) -> HashSet<&'a str> {
        let mut visited = HashSet::new();
        let Some(root) = self.root() else {
            return visited;
        };
        let mut queue = VecDeque::new();
        visited.insert(root.id.as_str());
        queue.push_back(root.id.as_str());
        while let Some(current) = queue.pop_front() {
            for edge in self.outgoing(current) {
                if visited.insert(edge.target.as_str()) {
                    queue.push_back(edge.target.as_str());
                }
            }
        }
        visited
    }

    /// Whether following outgoing edges can return to a node.
    pub fn has_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Open,
            Done,
        }

        let mut marks: HashMap<&str, Mark> = HashMap::new();
        for start in self.graph.nodes.iter().map(|n| n.id.as_str()) {
            if marks.contains_key(start) {
                continue;
            }
            // Iterative DFS: (node, next edge position).
            let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
            marks.insert(start, Mark::Open);
            while let Some((current, pos)) = stack.pop() {
                let edges = self.outgoing(current);
                if pos < edges.len() {
                    stack.push((current, pos + 1));
                    let next = edges[pos].target.as_str();
                    match marks.get(next) {
                        Some(Mark::Open) => return true,
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(next, Mark::Open);
                            stack.push((next, 0));
                        }
                    }
                } else {
                    marks.insert(current, Mark::Done);
                }
            }
        }
        false
    }

    /// Describe structural anomalies without failing.
    pub fn inspect(&self) -> ChainReport {
        let mut report = ChainReport {
            root: self.root().map(|n| n.id.clone()),
            ..ChainReport::default()
        };

        let mut seen = HashSet::new();
        for node in &self.graph.nodes {
            if !seen.insert(node.id.as_str()) && !report.duplicate_ids.contains(&node.id) {
                report.duplicate_ids.push(node.id.clone());
            }
        }

        for edge in &self.graph.edges {
            if !self.by_id.contains_key(edge.source.as_str())
                || !self.by_id.contains_key(edge.target.as_str())
            {
                report.dangling_edges.push(edge.clone());
            }
        }

        for node in &self.graph.nodes {
            if self.incoming_all(&node.id).len() > 1 && !report.merge_targets.contains(&node.id) {
                report.merge_targets.push(node.id.clone());
            }
        }

        report.orphans = self.orphans().into_iter().map(|n| n.id.clone()).collect();
        report.has_cycle = self.has_cycle();
        report
    }
}

/// Linearize a graph for timeline display.
pub fn linearize(graph: &ChainGraph) -> Vec<&ChainNode> {
    ChainIndex::new(graph).linearize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchain_types::{ChainEdge, DocumentType, Decimal};
    use proptest::prelude::*;

    fn node(id: &str, amount: i64) -> ChainNode {
        ChainNode {
            id: id.into(),
            doc_type: DocumentType::Invoice,
            doc_id: id.into(),
            number: None,
            amount: Decimal::new(amount, 0),
            status: None,
            date: None,
            reason: None,
        }
    }

    fn ids(order: &[&ChainNode]) -> Vec<String> {
        order.iter().map(|n| n.id.clone()).collect()
    }

    /// A --CORRECTION--> B --REVERSAL--> C
    fn linear_chain() -> ChainGraph {
        ChainGraph::new(
            vec![node("A", 1000), node("B", -1000), node("C", 500)],
            vec![ChainEdge::correction("A", "B"), ChainEdge::reversal("B", "C")],
        )
    }

    #[test]
    fn empty_graph_has_empty_order() {
        let graph = ChainGraph::empty();
        assert!(linearize(&graph).is_empty());
        assert!(ChainIndex::new(&graph).root().is_none());
    }

    #[test]
    fn single_node_is_its_own_order() {
        let graph = ChainGraph::new(vec![node("A", 5)], vec![]);
        assert_eq!(ids(&linearize(&graph)), vec!["A"]);
    }

    #[test]
    fn linear_chain_in_link_order() {
        let graph = linear_chain();
        assert_eq!(ids(&linearize(&graph)), vec!["A", "B", "C"]);
    }

    #[test]
    fn input_order_does_not_matter_for_linked_nodes() {
        let graph = ChainGraph::new(
            vec![node("C", 500), node("B", -1000), node("A", 1000)],
            vec![ChainEdge::reversal("B", "C"), ChainEdge::correction("A", "B")],
        );
        assert_eq!(ids(&linearize(&graph)), vec!["A", "B", "C"]);
    }

    #[test]
    fn orphan_is_appended_last() {
        let mut graph = linear_chain();
        graph.nodes.insert(1, node("Z", 1));
        assert_eq!(ids(&linearize(&graph)), vec!["A", "B", "C", "Z"]);
        let index = ChainIndex::new(&graph);
        assert_eq!(ids(&index.orphans()), vec!["Z"]);
    }

    #[test]
    fn cycle_terminates_and_falls_back_to_first_node() {
        let graph = ChainGraph::new(
            vec![node("A", 1), node("B", 2)],
            vec![ChainEdge::correction("A", "B"), ChainEdge::correction("B", "A")],
        );
        let index = ChainIndex::new(&graph);
        assert_eq!(index.root().map(|n| n.id.as_str()), Some("A"));
        assert_eq!(ids(&index.linearize()), vec!["A", "B"]);
        assert!(index.has_cycle());
    }

    #[test]
    fn branching_keeps_first_discovery() {
        // A -> B, A -> C, B -> C: C is discovered from A first.
        let graph = ChainGraph::new(
            vec![node("A", 1), node("B", 1), node("C", 1)],
            vec![
                ChainEdge::correction("A", "B"),
                ChainEdge::correction("A", "C"),
                ChainEdge::correction("B", "C"),
            ],
        );
        let index = ChainIndex::new(&graph);
        assert_eq!(ids(&index.linearize()), vec!["A", "B", "C"]);
        assert_eq!(index.incoming("C").map(|e| e.source.as_str()), Some("A"));
    }

    #[test]
    fn dangling_edge_is_skipped() {
        let graph = ChainGraph::new(
            vec![node("A", 1), node("B", 1)],
            vec![ChainEdge::correction("A", "ghost"), ChainEdge::correction("A", "B")],
        );
        assert_eq!(ids(&linearize(&graph)), vec!["A", "B"]);
        let report = ChainIndex::new(&graph).inspect();
        assert_eq!(report.dangling_edges.len(), 1);
        assert!(!report.is_well_formed());
    }

    #[test]
    fn duplicate_ids_emit_first_occurrence_once() {
        let mut second_a = node("A", 99);
        second_a.number = Some("dup".into());
        let graph = ChainGraph::new(
            vec![node("A", 1), node("B", 2), second_a],
            vec![ChainEdge::correction("A", "B")],
        );
        let order = linearize(&graph);
        assert_eq!(ids(&order), vec!["A", "B"]);
        assert_eq!(order[0].amount, Decimal::ONE);
        assert_eq!(ChainIndex::new(&graph).inspect().duplicate_ids, vec!["A"]);
    }

    #[test]
    fn linear_chain_report_is_clean() {
        let graph = linear_chain();
        let report = ChainIndex::new(&graph).inspect();
        assert!(report.is_well_formed());
        assert_eq!(report.root.as_deref(), Some("A"));
    }

    #[test]
    fn merge_target_is_reported() {
        let graph = ChainGraph::new(
            vec![node("A", 1), node("B", 1), node("C", 1)],
            vec![ChainEdge::correction("A", "C"), ChainEdge::correction("B", "C")],
        );
        let index = ChainIndex::new(&graph);
        // B is a second root and is not reachable from A.
        assert_eq!(ids(&index.linearize()), vec!["A", "C", "B"]);
        assert_eq!(index.inspect().merge_targets, vec!["C"]);
    }

    fn arbitrary_graph() -> impl Strategy<Value = ChainGraph> {
        (1usize..10).prop_flat_map(|n| {
            let edges = proptest::collection::vec((0..n, 0..n), 0..(n * 2));
            (Just(n), edges).prop_map(|(n, edges)| {
                let nodes = (0..n).map(|i| node(&format!("n{i}"), i as i64)).collect();
                let edges = edges
                    .into_iter()
                    .map(|(s, t)| ChainEdge::correction(format!("n{s}"), format!("n{t}")))
                    .collect();
                ChainGraph::new(nodes, edges)
            })
        })
    }

    proptest! {
        #[test]
        fn linearize_is_a_permutation(graph in arbitrary_graph()) {
            let mut out = ids(&linearize(&graph));
            let mut expected: Vec<String> = graph.nodes.iter().map(|n| n.id.clone()).collect();
            out.sort();
            expected.sort();
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn linearize_is_idempotent(graph in arbitrary_graph()) {
            let first = ids(&linearize(&graph));
            let second = ids(&linearize(&graph));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn root_is_emitted_first(graph in arbitrary_graph()) {
            let index = ChainIndex::new(&graph);
            let order = index.linearize();
            prop_assert_eq!(order.first().map(|n| &n.id), index.root().map(|n| &n.id));
        }
    }
}
