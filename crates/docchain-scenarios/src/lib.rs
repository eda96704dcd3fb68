//! Static correction scenarios.
//!
//! Each document type has a short list of worked examples: when the
//! correction applies, the steps to take, and an example
//! [`ChainGraph`] that guide timelines render. Examples never touch a
//! backend; their ids only need to be unique within a graph.

mod catalog;

use serde::Serialize;

use docchain_types::{ChainGraph, DocumentType};

/// One worked correction example.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub title: String,
    /// Situation in which this correction applies.
    pub when: String,
    pub steps: Vec<String>,
    pub example: ChainGraph,
}

impl Scenario {
    pub(crate) fn new(title: &str, when: &str, steps: &[&str], example: ChainGraph) -> Self {
        Self {
            title: title.to_string(),
            when: when.to_string(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
            example,
        }
    }
}

/// Scenarios for a document type. Types that share a guide (journal
/// entries and their reversals, receipts and payment reversals) return the
/// same list; unknown types return none.
pub fn scenarios_for(doc_type: &DocumentType) -> Vec<Scenario> {
    match doc_type {
        DocumentType::Invoice => catalog::invoice(),
        DocumentType::CreditNote => catalog::credit_note(),
        DocumentType::DebitNote => catalog::debit_note(),
        DocumentType::SupplierBill => catalog::supplier_bill(),
        DocumentType::JournalEntry | DocumentType::ReversingJournal => catalog::journal_entry(),
        DocumentType::Grn => catalog::grn(),
        DocumentType::DeliveryNote => catalog::delivery_note(),
        DocumentType::PaymentReceipt | DocumentType::PaymentReversal => catalog::payment(),
        DocumentType::Other(_) => Vec::new(),
    }
}

/// The end-to-end invoice example: an issued invoice cancelled in full by a
/// credit note and re-billed at the corrected price by a debit note.
pub fn invoice_correction_example() -> ChainGraph {
    catalog::invoice_rebill()
}

/// Every guide, keyed by the document type it belongs to.
pub fn all() -> Vec<(DocumentType, Vec<Scenario>)> {
    DocumentType::KNOWN
        .iter()
        .map(|t| (t.clone(), scenarios_for(t)))
        .collect()
}
