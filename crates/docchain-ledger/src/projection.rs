use rust_decimal::Decimal;
use tracing::debug;

use docchain_dag::ChainIndex;
use docchain_types::{ChainEdge, ChainGraph, ChainNode, ComputedSummary};

use crate::balance::running_balances;

/// Timeline-ready view of a chain: linear order, running balances, and the
/// aggregate summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceProjection<'a> {
    /// Nodes in timeline order.
    pub order: Vec<&'a ChainNode>,
    /// The edge that introduced each node, aligned with `order`.
    pub incoming: Vec<Option<&'a ChainEdge>>,
    /// Running balance after each node, aligned with `order`.
    pub running: Vec<Decimal>,
    /// Aggregate summary; taken from the graph when present.
    pub summary: Option<ComputedSummary>,
    /// `true` when `summary` was derived here rather than supplied.
    pub summary_derived: bool,
}

impl<'a> BalanceProjection<'a> {
    /// Project a graph, keeping only the producer's summary (if any).
    pub fn build(graph: &'a ChainGraph) -> Self {
        let index = ChainIndex::new(graph);
        let order = index.linearize();
        let incoming = order.iter().map(|n| index.incoming(&n.id)).collect();
        let running = running_balances(&order);

        Self {
            order,
            incoming,
            running,
            summary: graph.computed.clone(),
            summary_derived: false,
        }
    }

    /// Project a graph and derive a summary when the producer sent none.
    ///
    /// The derived summary carries the closing balance and node count; VAT
    /// impact is never invented.
    pub fn build_with_derived_summary(graph: &'a ChainGraph) -> Self {
        let mut projection = Self::build(graph);
        if projection.summary.is_none() && !projection.order.is_empty() {
            debug!(nodes = projection.order.len(), "deriving chain summary");
            projection.summary = Some(ComputedSummary {
                balance: projection.closing_balance(),
                vat_net: None,
                node_count: Some(projection.order.len()),
            });
            projection.summary_derived = true;
        }
        projection
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Running balance after the last node; zero for an empty chain.
    pub fn closing_balance(&self) -> Decimal {
        self.running.last().copied().unwrap_or(Decimal::ZERO)
    }

    /// Iterate `(node, incoming edge, running balance)` in order.
    pub fn rows(&self) -> impl Iterator<Item = (&'a ChainNode, Option<&'a ChainEdge>, Decimal)> + '_ {
        self.order
            .iter()
            .zip(self.incoming.iter())
            .zip(self.running.iter())
            .map(|((node, edge), balance)| (*node, *edge, *balance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchain_types::{ChainEdge, DocumentType, LinkType};

    fn invoice_chain() -> ChainGraph {
        ChainGraph::new(
            vec![
                ChainNode::new(DocumentType::Invoice, "24", Decimal::from(10000))
                    .with_number("INV-2026-0053"),
                ChainNode::new(DocumentType::CreditNote, "6", Decimal::from(-10000))
                    .with_number("CN-2026-0001")
                    .with_reason("Price correction"),
                ChainNode::new(DocumentType::DebitNote, "1", Decimal::from(8500))
                    .with_number("DN-2026-0001"),
            ],
            vec![
                ChainEdge::correction("invoice:24", "credit_note:6"),
                ChainEdge::correction("credit_note:6", "debit_note:1"),
            ],
        )
    }

    #[test]
    fn end_to_end_invoice_correction() {
        let graph = invoice_chain().with_computed(ComputedSummary::new(Decimal::from(8500)));
        let projection = BalanceProjection::build(&graph);

        let ids: Vec<&str> = projection.order.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["invoice:24", "credit_note:6", "debit_note:1"]);
        assert_eq!(
            projection.running,
            vec![Decimal::from(10000), Decimal::ZERO, Decimal::from(8500)]
        );
        assert_eq!(projection.summary.as_ref().map(|s| s.balance), Some(Decimal::from(8500)));
        assert!(!projection.summary_derived);
    }

    #[test]
    fn incoming_edges_align_with_order() {
        let graph = invoice_chain();
        let projection = BalanceProjection::build(&graph);
        assert!(projection.incoming[0].is_none());
        assert_eq!(
            projection.incoming[1].map(|e| &e.link_type),
            Some(&LinkType::Correction)
        );
        let rows: Vec<_> = projection.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].2, Decimal::from(8500));
    }

    #[test]
    fn derived_summary_when_missing() {
        let graph = invoice_chain();
        let projection = BalanceProjection::build_with_derived_summary(&graph);
        let summary = projection.summary.clone().unwrap();
        assert!(projection.summary_derived);
        assert_eq!(summary.balance, Decimal::from(8500));
        assert_eq!(summary.node_count, Some(3));
        assert!(summary.vat_net.is_none());
    }

    #[test]
    fn supplied_summary_wins_over_derivation() {
        let mut summary = ComputedSummary::new(Decimal::from(1));
        summary.vat_net = Some(Decimal::from(-425));
        let graph = invoice_chain().with_computed(summary.clone());
        let projection = BalanceProjection::build_with_derived_summary(&graph);
        assert_eq!(projection.summary, Some(summary));
        assert!(!projection.summary_derived);
    }

    #[test]
    fn empty_graph_projects_to_nothing() {
        let graph = ChainGraph::empty();
        let projection = BalanceProjection::build_with_derived_summary(&graph);
        assert!(projection.is_empty());
        assert!(projection.summary.is_none());
        assert_eq!(projection.closing_balance(), Decimal::ZERO);
    }
}
