//! Correction history panel.
//!
//! Shown on document detail views. Posted documents open the panel on
//! mount and load their correction chain from a [`ChainSource`]; drafts
//! start collapsed and load on first expansion. A missing chain is a normal
//! outcome and shows the "original document" message, while any other
//! failure surfaces with a retry action.

pub mod driver;
pub mod error;
pub mod panel;
pub mod props;
pub mod source;

pub use driver::PanelDriver;
pub use error::{ChainSourceError, ChainSourceResult};
pub use panel::{
    CorrectionHistoryPanel, FetchTicket, PanelBody, PanelState, PanelView, IMMUTABILITY_NOTICE,
    ORIGINAL_DOCUMENT_MESSAGE, PANEL_TITLE,
};
pub use props::{AllowedAction, PanelProps};
pub use source::{ChainSource, InMemoryChainSource};
