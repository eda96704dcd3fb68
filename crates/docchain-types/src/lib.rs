//! Foundation types for document correction chains.
//!
//! Posted financial and operational documents are never edited in place.
//! They are corrected by issuing new documents linked to their
//! predecessor. This crate holds the vocabulary every other `docchain`
//! crate shares.
//!
//! # Key Types
//!
//! - [`DocumentType`]: Closed set of document-type tags with a fallback variant
//! - [`ChainNode`]: One document instance inside a lineage
//! - [`ChainEdge`] / [`LinkType`]: Correction and reversal links
//! - [`ChainGraph`]: Nodes, edges and the backend's precomputed summary
//! - [`Posture`]: Posted (immutable) vs. editable classification

pub mod chain;
pub mod document;
pub mod error;
pub mod status;
pub mod wire;

pub use chain::{ChainEdge, ChainGraph, ChainNode, ComputedSummary, LinkType};
pub use document::DocumentType;
pub use error::{TypeError, TypeResult};
pub use status::{classify, Posture, POSTED_STATUSES};

pub use rust_decimal::Decimal;
