//! Correction chain graph index and linearizer.
//!
//! A correction lineage arrives as an unordered bag of nodes and edges.
//! [`ChainIndex`] builds the forward and reverse edge maps once;
//! [`linearize`] turns the graph into the single top-to-bottom order a
//! timeline renders, and [`ChainReport`] describes any structural anomaly
//! found along the way.
//!
//! Every function here is total. Graphs are untrusted input: cycles,
//! merges, dangling edges and duplicate ids degrade to a best-effort
//! deterministic order instead of an error.

pub mod index;
pub mod report;

pub use index::{linearize, ChainIndex};
pub use report::ChainReport;
