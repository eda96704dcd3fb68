use serde::Serialize;
use tracing::debug;

use docchain_ledger::{format_amount, format_signed_amount, BalanceProjection};
use docchain_registry::Registry;
use docchain_types::{ChainGraph, DocumentType};

use crate::config::RenderConfig;
use crate::timeline::{AmountTone, NavigationTarget, Timeline, TimelineEntry, TimelineSummary};

/// How a timeline behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Static illustrative data; entries are not clickable.
    Guide,
    /// Backend data; each entry navigates to its document.
    Live,
}

/// Renderer input: a graph and the mode to render it in.
#[derive(Clone, Copy, Debug)]
pub struct ChainView<'a> {
    pub graph: &'a ChainGraph,
    pub mode: RenderMode,
}

impl<'a> ChainView<'a> {
    pub fn guide(graph: &'a ChainGraph) -> Self {
        Self {
            graph,
            mode: RenderMode::Guide,
        }
    }

    pub fn live(graph: &'a ChainGraph) -> Self {
        Self {
            graph,
            mode: RenderMode::Live,
        }
    }
}

/// Render a chain. Returns `None` when there is nothing to show, so hosts
/// never draw an empty container.
pub fn render_chain(view: &ChainView<'_>, config: &RenderConfig) -> Option<Timeline> {
    let projection = BalanceProjection::build(view.graph);
    if projection.is_empty() {
        return None;
    }

    let registry = Registry::new();
    let currency = config.currency.as_str();

    let entries: Vec<TimelineEntry> = projection
        .rows()
        .map(|(node, incoming, running)| {
            let descriptor = registry.lookup(&node.doc_type);
            let target = match view.mode {
                RenderMode::Live => Some(NavigationTarget {
                    doc_type: node.doc_type.clone(),
                    doc_id: node.doc_id.clone(),
                }),
                RenderMode::Guide => None,
            };
            TimelineEntry {
                node_id: node.id.clone(),
                reference: node.reference().to_string(),
                label: descriptor.label.to_string(),
                tone: descriptor.tone,
                icon: descriptor.icon,
                status: node.status.clone().filter(|s| !s.trim().is_empty()),
                amount: node.amount,
                amount_text: format_signed_amount(node.amount, currency),
                amount_tone: AmountTone::of(node.amount),
                running_balance: running,
                running_balance_text: format_amount(running, currency),
                reason: node.reason.clone().filter(|r| !r.trim().is_empty()),
                date: node.date.clone().filter(|d| !d.trim().is_empty()),
                link_label: incoming.map(|edge| edge.link_type.label()),
                target,
            }
        })
        .collect();

    let summary = projection.summary.as_ref().map(|computed| TimelineSummary {
        balance: computed.balance,
        balance_text: format_signed_amount(computed.balance, currency),
        vat_net_text: computed.vat_net.map(|vat| format_signed_amount(vat, currency)),
        document_count: computed.node_count,
    });

    debug!(entries = entries.len(), mode = ?view.mode, "rendered chain timeline");

    Some(Timeline {
        mode: view.mode,
        entries,
        summary,
    })
}

/// Adapt a path sink into the `(type, doc_id)` callback live timelines
/// expect, resolving paths through the registry. Types without a route are
/// silently ignored.
pub fn navigate_via_registry<F>(mut sink: F) -> impl FnMut(&DocumentType, &str)
where
    F: FnMut(&str),
{
    let registry = Registry::new();
    move |doc_type: &DocumentType, doc_id: &str| match registry.navigate(doc_type, doc_id) {
        Some(path) => sink(&path),
        None => debug!(doc_type = %doc_type, doc_id, "no route for document type"),
    }
}
