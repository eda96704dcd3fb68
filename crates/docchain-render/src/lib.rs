//! Correction chain renderer.
//!
//! Turns a [`ChainGraph`](docchain_types::ChainGraph) into a [`Timeline`]:
//! linear order, running balances and registry metadata folded into one
//! entry per document, followed by the aggregate summary.
//!
//! Two modes exist. [`RenderMode::Guide`] renders illustrative chains and
//! never navigates. [`RenderMode::Live`] attaches a [`NavigationTarget`] to
//! each entry; hosts resolve it through the document type registry.

pub mod config;
pub mod render;
pub mod timeline;
pub mod writer;

pub use config::RenderConfig;
pub use render::{navigate_via_registry, render_chain, ChainView, RenderMode};
pub use timeline::{AmountTone, NavigationTarget, Timeline, TimelineEntry, TimelineSummary};
pub use writer::TimelineWriter;
