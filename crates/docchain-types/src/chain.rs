//! Chain graph model: the documents in a correction lineage and the links
//! between them.
//!
//! The wire shape follows the backend's JSON (`docId`, `linkType`,
//! `vatNet`, `nodeCount`), so a response body deserializes directly into a
//! [`ChainGraph`]. Amounts are exact decimals; nothing here rounds.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::document::DocumentType;
use crate::error::{TypeError, TypeResult};
use crate::wire;

/// One concrete document instance inside a lineage.
///
/// Nodes are created upstream when a correction or reversal document is
/// issued and are never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainNode {
    /// Key unique across document types, e.g. `credit_note:6`.
    pub id: String,
    /// Document-type tag.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// The document's own identifier, used for navigation only.
    #[serde(deserialize_with = "wire::string_or_number")]
    pub doc_id: String,
    /// Human-readable reference number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Signed amount; the sign already reflects the direction.
    #[serde(with = "wire::amount")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// ISO calendar date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Why a correction or reversal node exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ChainNode {
    /// Create a node keyed `<type>:<doc_id>` with no optional fields set.
    pub fn new(doc_type: DocumentType, doc_id: impl Into<String>, amount: Decimal) -> Self {
        let doc_id = doc_id.into();
        Self {
            id: doc_type.node_key(&doc_id),
            doc_type,
            doc_id,
            number: None,
            amount,
            status: None,
            date: None,
            reason: None,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// The reference shown in timelines: the number, or the key if absent.
    pub fn reference(&self) -> &str {
        self.number.as_deref().unwrap_or(&self.id)
    }

    /// Parse [`date`](Self::date) as `YYYY-MM-DD`, ignoring a trailing time
    /// component. Returns `None` when absent or malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// The relationship a [`ChainEdge`] encodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LinkType {
    /// Re-charge or re-issue at a corrected value.
    Correction,
    /// Undo the source in full.
    Reversal,
    /// A link kind this version does not know, kept as received.
    Other(String),
}

impl LinkType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Correction => "CORRECTION",
            Self::Reversal => "REVERSAL",
            Self::Other(tag) => tag,
        }
    }

    /// Title-case label for timelines.
    pub fn label(&self) -> String {
        match self {
            Self::Correction => "Correction".into(),
            Self::Reversal => "Reversal".into(),
            Self::Other(tag) => tag.replace('_', " "),
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for LinkType {
    fn from(tag: String) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "CORRECTION" => Self::Correction,
            "REVERSAL" => Self::Reversal,
            _ => Self::Other(tag),
        }
    }
}

impl From<LinkType> for String {
    fn from(link: LinkType) -> Self {
        link.as_str().to_string()
    }
}

/// Directed link from a document to the document that corrects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEdge {
    pub source: String,
    pub target: String,
    pub link_type: LinkType,
}

impl ChainEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, link_type: LinkType) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            link_type,
        }
    }

    pub fn correction(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, LinkType::Correction)
    }

    pub fn reversal(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, LinkType::Reversal)
    }
}

/// Aggregate effect of a whole chain, as precomputed by the producer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedSummary {
    /// Net balance after every document in the chain.
    #[serde(with = "wire::amount")]
    pub balance: Decimal,
    /// Net secondary-tax (VAT) impact, when the producer reports it.
    #[serde(
        default,
        with = "wire::amount_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub vat_net: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_count: Option<usize>,
}

impl ComputedSummary {
    pub fn new(balance: Decimal) -> Self {
        Self {
            balance,
            vat_net: None,
            node_count: None,
        }
    }
}

/// One correction lineage rooted at an original document.
///
/// The core only ever reads a graph; whoever fetched or built it owns it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainGraph {
    #[serde(default)]
    pub nodes: Vec<ChainNode>,
    #[serde(default)]
    pub edges: Vec<ChainEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed: Option<ComputedSummary>,
}

impl ChainGraph {
    /// The graph of an original document with no corrections.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(nodes: Vec<ChainNode>, edges: Vec<ChainEdge>) -> Self {
        Self {
            nodes,
            edges,
            computed: None,
        }
    }

    pub fn with_computed(mut self, computed: ComputedSummary) -> Self {
        self.computed = Some(computed);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` when the graph holds actual correction history, i.e.
    /// more than the original document.
    pub fn has_corrections(&self) -> bool {
        self.nodes.len() > 1
    }

    /// First node with the given key, in input order.
    pub fn node(&self, id: &str) -> Option<&ChainNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Decode a backend response body.
    pub fn from_json(json: &str) -> TypeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> TypeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse a user-supplied amount such as `-1,250.50`.
pub fn parse_amount(raw: &str) -> TypeResult<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).map_err(|e| TypeError::InvalidAmount {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_json() -> &'static str {
        r#"{
            "nodes": [
                {"id": "invoice:24", "type": "invoice", "docId": 24, "number": "INV-2026-0053",
                 "amount": 10000, "status": "issued", "date": "2026-01-10"},
                {"id": "credit_note:6", "type": "credit_note", "docId": "6", "number": "CN-2026-0001",
                 "amount": -10000.0, "status": "issued", "date": "2026-01-12", "reason": "Price correction"}
            ],
            "edges": [
                {"source": "invoice:24", "target": "credit_note:6", "linkType": "CORRECTION"}
            ],
            "computed": {"balance": 0, "vatNet": -500.25, "nodeCount": 2}
        }"#
    }

    #[test]
    fn decodes_backend_shape() {
        let graph = ChainGraph::from_json(sample_json()).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.nodes[0].doc_id, "24");
        assert_eq!(graph.nodes[0].doc_type, DocumentType::Invoice);
        assert_eq!(graph.nodes[1].amount, Decimal::new(-10000, 0));
        assert_eq!(graph.nodes[1].reason.as_deref(), Some("Price correction"));
        assert_eq!(graph.edges[0].link_type, LinkType::Correction);

        let computed = graph.computed.unwrap();
        assert_eq!(computed.balance, Decimal::ZERO);
        assert_eq!(computed.vat_net, Some(Decimal::new(-50025, 2)));
        assert_eq!(computed.node_count, Some(2));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let graph = ChainGraph::from_json("{}").unwrap();
        assert!(graph.is_empty());
        assert!(graph.computed.is_none());
        assert!(!graph.has_corrections());
    }

    #[test]
    fn unknown_link_type_is_preserved() {
        let edge: ChainEdge =
            serde_json::from_str(r#"{"source":"a","target":"b","linkType":"RE_ISSUE"}"#).unwrap();
        assert_eq!(edge.link_type, LinkType::Other("RE_ISSUE".into()));
        assert_eq!(edge.link_type.label(), "RE ISSUE");
    }

    #[test]
    fn reference_falls_back_to_key() {
        let node = ChainNode::new(DocumentType::Grn, "3", Decimal::ONE);
        assert_eq!(node.reference(), "grn:3");
        let node = node.with_number("GRN-0003");
        assert_eq!(node.reference(), "GRN-0003");
    }

    #[test]
    fn parsed_date_tolerates_timestamps_and_garbage() {
        let node = ChainNode::new(DocumentType::Invoice, "1", Decimal::ONE);
        assert!(node.parsed_date().is_none());
        let node = node.with_date("2026-03-04T10:00:00Z");
        assert_eq!(node.parsed_date(), NaiveDate::from_ymd_opt(2026, 3, 4));
        let node = node.with_date("yesterday");
        assert!(node.parsed_date().is_none());
    }

    #[test]
    fn parse_amount_accepts_grouping() {
        assert_eq!(parse_amount("-1,250.50").unwrap(), Decimal::new(-125050, 2));
        assert!(matches!(
            parse_amount("ten"),
            Err(TypeError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn serialized_graph_decodes_back() {
        let graph = ChainGraph::from_json(sample_json()).unwrap();
        let json = graph.to_json_pretty().unwrap();
        assert!(json.contains("\"linkType\": \"CORRECTION\""));
        assert_eq!(ChainGraph::from_json(&json).unwrap(), graph);
    }

    #[test]
    fn reencoded_graph_keeps_every_amount_digit() {
        let amount = Decimal::from_str("-1234567890123456.78").unwrap();
        let mut summary = ComputedSummary::new(amount);
        summary.vat_net = Some(Decimal::from_str("0.1").unwrap());
        let graph = ChainGraph::new(vec![ChainNode::new(DocumentType::Invoice, "1", amount)], vec![])
            .with_computed(summary);

        let json = graph.to_json_pretty().unwrap();
        assert!(json.contains("\"amount\": \"-1234567890123456.78\""));
        assert!(json.contains("\"vatNet\": 0.1"));
        assert_eq!(ChainGraph::from_json(&json).unwrap(), graph);
    }
}
