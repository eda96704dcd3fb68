use tracing::debug;

use crate::panel::{CorrectionHistoryPanel, FetchTicket, PanelView};
use crate::props::PanelProps;
use crate::source::ChainSource;

/// Runs a panel's fetches against a [`ChainSource`].
///
/// The panel stays synchronous; the driver awaits each ticket and applies
/// the outcome, so a host that is already async can drive a panel with
/// plain method calls.
pub struct PanelDriver<S> {
    source: S,
    panel: CorrectionHistoryPanel,
}

impl<S: ChainSource> PanelDriver<S> {
    /// Mount a panel and complete its initial fetch, if any.
    pub async fn mount(source: S, props: PanelProps) -> Self {
        let (panel, ticket) = CorrectionHistoryPanel::mount(props);
        let mut driver = Self { source, panel };
        driver.run(ticket).await;
        driver
    }

    pub fn panel(&self) -> &CorrectionHistoryPanel {
        &self.panel
    }

    pub fn view(&self) -> PanelView {
        self.panel.view()
    }

    pub async fn toggle(&mut self) -> PanelView {
        let ticket = self.panel.toggle();
        self.run(ticket).await;
        self.panel.view()
    }

    pub async fn retry(&mut self) -> PanelView {
        let ticket = self.panel.retry();
        self.run(ticket).await;
        self.panel.view()
    }

    pub fn into_parts(self) -> (S, CorrectionHistoryPanel) {
        (self.source, self.panel)
    }

    async fn run(&mut self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        debug!(
            generation = ticket.generation,
            doc_type = %ticket.doc_type,
            doc_id = %ticket.doc_id,
            "fetching correction chain"
        );
        let result = self
            .source
            .get_correction_chain(&ticket.doc_type, &ticket.doc_id)
            .await;
        self.panel.apply(&ticket, result);
    }
}
