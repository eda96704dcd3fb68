use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tag identifying the kind of document a chain node stands for.
///
/// The set is closed: every known tag has a variant. Tags the system does
/// not recognise are preserved verbatim in [`DocumentType::Other`] so that
/// parsing never fails and the registry can fall back to a neutral
/// descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    Invoice,
    CreditNote,
    DebitNote,
    SupplierBill,
    JournalEntry,
    ReversingJournal,
    Grn,
    DeliveryNote,
    PaymentReceipt,
    PaymentReversal,
    /// A tag outside the known set, kept as received.
    Other(String),
}

impl DocumentType {
    /// Every known document type, in registry order.
    pub const KNOWN: [DocumentType; 10] = [
        Self::Invoice,
        Self::CreditNote,
        Self::DebitNote,
        Self::SupplierBill,
        Self::JournalEntry,
        Self::ReversingJournal,
        Self::Grn,
        Self::DeliveryNote,
        Self::PaymentReceipt,
        Self::PaymentReversal,
    ];

    /// Resolve a tag. Matching is case-insensitive and accepts `-` as a
    /// separator (`credit-note`), since hosts pass route segments too.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "invoice" => Self::Invoice,
            "credit_note" => Self::CreditNote,
            "debit_note" => Self::DebitNote,
            "supplier_bill" => Self::SupplierBill,
            "journal_entry" => Self::JournalEntry,
            "reversing_journal" => Self::ReversingJournal,
            "grn" => Self::Grn,
            "delivery_note" => Self::DeliveryNote,
            "payment_receipt" => Self::PaymentReceipt,
            "payment_reversal" => Self::PaymentReversal,
            _ => Self::Other(tag.to_string()),
        }
    }

    /// The canonical snake_case tag.
    pub fn tag(&self) -> &str {
        match self {
            Self::Invoice => "invoice",
            Self::CreditNote => "credit_note",
            Self::DebitNote => "debit_note",
            Self::SupplierBill => "supplier_bill",
            Self::JournalEntry => "journal_entry",
            Self::ReversingJournal => "reversing_journal",
            Self::Grn => "grn",
            Self::DeliveryNote => "delivery_note",
            Self::PaymentReceipt => "payment_receipt",
            Self::PaymentReversal => "payment_reversal",
            Self::Other(tag) => tag,
        }
    }

    /// Returns `true` for tags outside the known set.
    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other(_))
    }

    /// Build the globally unique chain node key for a document of this type,
    /// e.g. `invoice:24`.
    pub fn node_key(&self, doc_id: &str) -> String {
        format!("{}:{}", self.tag(), doc_id)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DocumentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for DocumentType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<&str> for DocumentType {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<DocumentType> for String {
    fn from(doc_type: DocumentType) -> Self {
        doc_type.tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_roundtrip() {
        for doc_type in DocumentType::KNOWN {
            assert_eq!(DocumentType::from_tag(doc_type.tag()), doc_type);
        }
    }

    #[test]
    fn route_style_tags_resolve() {
        assert_eq!(DocumentType::from_tag("credit-note"), DocumentType::CreditNote);
        assert_eq!(DocumentType::from_tag("GRN"), DocumentType::Grn);
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let doc_type = DocumentType::from_tag("consignment_note");
        assert!(doc_type.is_other());
        assert_eq!(doc_type.tag(), "consignment_note");
        assert_eq!(doc_type.to_string(), "consignment_note");
    }

    #[test]
    fn node_key_format() {
        assert_eq!(DocumentType::Invoice.node_key("24"), "invoice:24");
    }

    #[test]
    fn serde_uses_tag_strings() {
        let json = serde_json::to_string(&DocumentType::DebitNote).unwrap();
        assert_eq!(json, "\"debit_note\"");
        let parsed: DocumentType = serde_json::from_str("\"mystery\"").unwrap();
        assert_eq!(parsed, DocumentType::Other("mystery".into()));
    }
}
