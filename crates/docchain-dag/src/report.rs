//! Structural inspection of a chain graph.
//!
//! Chains this system renders are linear. A [`ChainReport`] records every
//! way an incoming graph departs from that shape so callers can log or
//! display it; none of these conditions stops the graph from rendering.

use serde::{Deserialize, Serialize};

use docchain_types::ChainEdge;

/// Anomalies found in a chain graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainReport {
    /// Id of the node the timeline starts from.
    pub root: Option<String>,
    /// Ids carried by more than one node.
    pub duplicate_ids: Vec<String>,
    /// Edges whose source or target is not a node of the graph.
    pub dangling_edges: Vec<ChainEdge>,
    /// Nodes with more than one incoming edge.
    pub merge_targets: Vec<String>,
    /// Nodes unreachable from the root, in input order.
    pub orphans: Vec<String>,
    pub has_cycle: bool,
}

impl ChainReport {
    /// Returns `true` when the graph is a single clean lineage.
    pub fn is_well_formed(&self) -> bool {
        self.duplicate_ids.is_empty()
            && self.dangling_edges.is_empty()
            && self.merge_targets.is_empty()
            && self.orphans.is_empty()
            && !self.has_cycle
    }

    /// One line per anomaly, for logs and CLI output.
    pub fn findings(&self) -> Vec<String> {
        let mut findings = Vec::new();
        for id in &self.duplicate_ids {
            findings.push(format!("duplicate node id {id}"));
        }
        for edge in &self.dangling_edges {
            findings.push(format!(
                "dangling {} edge {} -> {}",
                edge.link_type, edge.source, edge.target
            ));
        }
        for id in &self.merge_targets {
            findings.push(format!("node {id} has more than one incoming edge"));
        }
        for id in &self.orphans {
            findings.push(format!("node {id} is not reachable from the root"));
        }
        if self.has_cycle {
            findings.push("edges form a cycle".into());
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_is_well_formed() {
        let report = ChainReport::default();
        assert!(report.is_well_formed());
        assert!(report.findings().is_empty());
    }

    #[test]
    fn findings_list_each_anomaly() {
        let report = ChainReport {
            root: Some("a".into()),
            duplicate_ids: vec!["a".into()],
            dangling_edges: vec![ChainEdge::reversal("a", "x")],
            merge_targets: vec![],
            orphans: vec!["z".into()],
            has_cycle: true,
        };
        let findings = report.findings();
        assert_eq!(findings.len(), 4);
        assert!(findings[1].contains("REVERSAL"));
        assert!(!report.is_well_formed());
    }
}
