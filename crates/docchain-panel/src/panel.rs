//! The correction history panel state machine.
//!
//! The panel never performs I/O. Transitions that need data hand back a
//! [`FetchTicket`]; the host (or [`PanelDriver`](crate::PanelDriver)) runs
//! the fetch and feeds the outcome to [`CorrectionHistoryPanel::apply`].
//! Each ticket carries a generation so a retry supersedes fetches that are
//! still in flight.

use serde::Serialize;
use tracing::{debug, warn};

use docchain_render::{render_chain, ChainView, RenderConfig, Timeline};
use docchain_types::{classify, ChainGraph, DocumentType, Posture};

use crate::error::ChainSourceResult;
use crate::props::{AllowedAction, PanelProps};

pub const PANEL_TITLE: &str = "Correction History";
pub const IMMUTABILITY_NOTICE: &str = "This document is posted and cannot be edited. \
     Corrections are made by issuing credit notes, debit notes, or reversals.";
pub const ORIGINAL_DOCUMENT_MESSAGE: &str =
    "No correction history. This is the original document.";
pub const RETRY_LABEL: &str = "Retry";

/// Observable panel state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    /// No document id; nothing is shown.
    Hidden,
    Collapsed,
    Loading,
    Loaded,
    Failed,
}

impl PanelState {
    pub fn is_expanded(self) -> bool {
        matches!(self, Self::Loading | Self::Loaded | Self::Failed)
    }
}

/// A fetch the host must perform on the panel's behalf.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub generation: u64,
    pub doc_type: DocumentType,
    pub doc_id: String,
}

/// Panel body below the header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelBody {
    /// Collapsed or hidden.
    Empty,
    Loading,
    Timeline { timeline: Timeline },
    /// The chain holds this document alone, or none was found.
    OriginalDocument { message: String },
    Error { message: String, retry_label: String },
}

/// Everything a host needs to draw the panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub state: PanelState,
    pub title: String,
    pub compact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub immutability_notice: Option<String>,
    pub body: PanelBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<AllowedAction>,
}

/// Correction history for one document.
#[derive(Clone, Debug)]
pub struct CorrectionHistoryPanel {
    props: PanelProps,
    posture: Posture,
    config: RenderConfig,
    expanded: bool,
    graph: Option<ChainGraph>,
    error: Option<String>,
    in_flight: Option<u64>,
    generation: u64,
}

impl CorrectionHistoryPanel {
    /// Mount a panel. Posted documents open immediately, which yields the
    /// first fetch ticket.
    pub fn mount(props: PanelProps) -> (Self, Option<FetchTicket>) {
        Self::mount_with_config(props, RenderConfig::default())
    }

    pub fn mount_with_config(
        props: PanelProps,
        config: RenderConfig,
    ) -> (Self, Option<FetchTicket>) {
        let posture = classify(props.document_status.as_deref());
        let mut panel = Self {
            props,
            posture,
            config,
            expanded: false,
            graph: None,
            error: None,
            in_flight: None,
            generation: 0,
        };

        if panel.props.id().is_none() {
            return (panel, None);
        }

        let ticket = if posture.is_posted() {
            panel.expanded = true;
            panel.fetch_if_needed()
        } else {
            None
        };
        (panel, ticket)
    }

    pub fn state(&self) -> PanelState {
        if self.props.id().is_none() {
            PanelState::Hidden
        } else if !self.expanded {
            PanelState::Collapsed
        } else if self.graph.is_some() {
            PanelState::Loaded
        } else if self.error.is_some() {
            PanelState::Failed
        } else {
            PanelState::Loading
        }
    }

    pub fn posture(&self) -> Posture {
        self.posture
    }

    pub fn props(&self) -> &PanelProps {
        &self.props
    }

    pub fn graph(&self) -> Option<&ChainGraph> {
        self.graph.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Flip between collapsed and expanded. Opening a panel with no graph
    /// and no fetch in flight requests one.
    pub fn toggle(&mut self) -> Option<FetchTicket> {
        if self.state() == PanelState::Hidden {
            return None;
        }
        self.expanded = !self.expanded;
        if self.expanded {
            self.fetch_if_needed()
        } else {
            None
        }
    }

    /// Refetch from any expanded state. The previous error is cleared at
    /// once and any outstanding fetch is superseded.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if !self.state().is_expanded() {
            return None;
        }
        self.graph = None;
        self.error = None;
        Some(self.issue_ticket())
    }

    /// Apply the outcome of a fetch. Returns `false` when the ticket has
    /// been superseded and the outcome was discarded.
    ///
    /// Outcomes never change whether the panel is expanded; a result that
    /// lands after collapse is kept for the next expansion.
    pub fn apply(&mut self, ticket: &FetchTicket, result: ChainSourceResult<ChainGraph>) -> bool {
        if self.in_flight != Some(ticket.generation) {
            debug!(
                generation = ticket.generation,
                current = ?self.in_flight,
                "discarding stale correction chain result"
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(graph) => {
                debug!(nodes = graph.len(), doc_id = %ticket.doc_id, "correction chain loaded");
                self.graph = Some(graph);
                self.error = None;
            }
            Err(err) if err.is_not_found() => {
                debug!(doc_id = %ticket.doc_id, "no correction chain for document");
                self.graph = Some(ChainGraph::empty());
                self.error = None;
            }
            Err(err) => {
                warn!(
                    doc_type = %ticket.doc_type,
                    doc_id = %ticket.doc_id,
                    error = %err,
                    "failed to load correction chain"
                );
                self.graph = None;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn view(&self) -> PanelView {
        let state = self.state();
        let posted = self.posture.is_posted();

        let body = match state {
            PanelState::Hidden | PanelState::Collapsed => PanelBody::Empty,
            PanelState::Loading => PanelBody::Loading,
            PanelState::Failed => PanelBody::Error {
                message: self.error.clone().unwrap_or_default(),
                retry_label: RETRY_LABEL.into(),
            },
            PanelState::Loaded => self.loaded_body(),
        };

        // Follow-up actions stay reachable while the panel is collapsed.
        let actions = if posted && state != PanelState::Hidden {
            self.props.allowed_actions.clone()
        } else {
            Vec::new()
        };

        PanelView {
            state,
            title: PANEL_TITLE.into(),
            compact: self.props.compact,
            immutability_notice: (state.is_expanded() && posted)
                .then(|| IMMUTABILITY_NOTICE.to_string()),
            body,
            actions,
        }
    }

    fn loaded_body(&self) -> PanelBody {
        let timeline = self
            .graph
            .as_ref()
            .filter(|g| g.has_corrections())
            .and_then(|g| render_chain(&ChainView::live(g), &self.config));
        match timeline {
            Some(timeline) => PanelBody::Timeline { timeline },
            None => PanelBody::OriginalDocument {
                message: ORIGINAL_DOCUMENT_MESSAGE.into(),
            },
        }
    }

    fn fetch_if_needed(&mut self) -> Option<FetchTicket> {
        if self.graph.is_some() || self.in_flight.is_some() {
            return None;
        }
        self.error = None;
        Some(self.issue_ticket())
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        FetchTicket {
            generation: self.generation,
            doc_type: self.props.document_type.clone(),
            doc_id: self.props.id().unwrap_or_default().to_string(),
        }
    }
}
