//! Document type registry.
//!
//! Maps every [`DocumentType`] to its display metadata. Lookups are total:
//! a tag the registry does not know gets a neutral descriptor labelled with
//! the tag itself, so rendering and navigation never fail on new document
//! kinds.

pub mod descriptor;

pub use descriptor::{DocumentTypeDescriptor, Icon, Sign, Tone};

use docchain_types::DocumentType;
use tracing::debug;

/// Static lookup table from document type to descriptor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Registry;

impl Registry {
    pub fn new() -> Self {
        Self
    }

    /// Descriptor for a document type. Never fails.
    pub fn lookup(&self, doc_type: &DocumentType) -> DocumentTypeDescriptor {
        lookup(doc_type)
    }

    /// Descriptor for a raw tag string.
    pub fn lookup_tag(&self, tag: &str) -> DocumentTypeDescriptor {
        lookup(&DocumentType::from_tag(tag))
    }

    /// Descriptors of every known type, in a stable order.
    pub fn all(&self) -> Vec<DocumentTypeDescriptor> {
        DocumentType::KNOWN.iter().map(lookup).collect()
    }

    /// Resolve a navigation path for a document instance, if the type has
    /// a route.
    pub fn navigate(&self, doc_type: &DocumentType, doc_id: &str) -> Option<String> {
        lookup(doc_type).navigate(doc_id)
    }
}

/// Free-function form of [`Registry::lookup`].
pub fn lookup(doc_type: &DocumentType) -> DocumentTypeDescriptor {
    use DocumentType as T;
    use Icon as I;
    use Sign::{Negative, Positive};
    use Tone as C;

    let (label, sign, route, tone, icon) = match doc_type {
        T::Invoice => ("Invoice", Positive, "/app/invoices", C::Blue, I::Receipt),
        T::CreditNote => ("Credit Note", Negative, "/app/credit-notes", C::Red, I::MinusCircle),
        T::DebitNote => ("Debit Note", Positive, "/app/debit-notes", C::Amber, I::PlusCircle),
        T::SupplierBill => ("Supplier Bill", Positive, "/app/supplier-bills", C::Indigo, I::FileText),
        T::JournalEntry => ("Journal Entry", Positive, "/app/finance/journal-entries", C::Slate, I::Book),
        T::ReversingJournal => {
            ("Reversing Journal", Negative, "/app/finance/journal-entries", C::Rose, I::Undo)
        }
        T::Grn => ("Goods Receipt Note", Positive, "/app/purchases/grn", C::Teal, I::PackageIn),
        T::DeliveryNote => ("Delivery Note", Negative, "/app/delivery-notes", C::Cyan, I::Truck),
        T::PaymentReceipt => {
            ("Payment Receipt", Negative, "/app/receivables/payments", C::Green, I::Wallet)
        }
        T::PaymentReversal => {
            ("Payment Reversal", Positive, "/app/receivables/payments", C::Orange, I::Undo)
        }
        T::Other(tag) => {
            debug!(tag = %tag, "no descriptor for document type, using neutral fallback");
            return DocumentTypeDescriptor::neutral(tag);
        }
    };

    DocumentTypeDescriptor {
        doc_type: doc_type.clone(),
        label: label.into(),
        sign,
        route: Some(route),
        tone,
        icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_type_has_a_route() {
        let registry = Registry::new();
        let all = registry.all();
        assert_eq!(all.len(), DocumentType::KNOWN.len());
        for descriptor in &all {
            assert!(descriptor.navigate("1").is_some(), "{}", descriptor.label);
            assert!(!descriptor.doc_type.is_other());
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_neutral() {
        let descriptor = Registry::new().lookup_tag("consignment_note");
        assert_eq!(descriptor.label, "consignment_note");
        assert_eq!(descriptor.sign, Sign::Positive);
        assert_eq!(descriptor.sign.factor(), 1);
        assert_eq!(descriptor.tone, Tone::Neutral);
        assert_eq!(descriptor.navigate("5"), None);
    }

    #[test]
    fn credit_note_reduces() {
        let descriptor = lookup(&DocumentType::CreditNote);
        assert_eq!(descriptor.label, "Credit Note");
        assert_eq!(descriptor.sign.factor(), -1);
        assert_eq!(descriptor.navigate("6").as_deref(), Some("/app/credit-notes/6"));
    }

    #[test]
    fn navigate_through_registry() {
        let registry = Registry::new();
        assert_eq!(
            registry.navigate(&DocumentType::Invoice, "24").as_deref(),
            Some("/app/invoices/24")
        );
        assert_eq!(
            registry.navigate(&DocumentType::Grn, "7").as_deref(),
            Some("/app/purchases/grn/7")
        );
    }

    #[test]
    fn lookup_tag_accepts_route_segments() {
        let descriptor = Registry::new().lookup_tag("delivery-note");
        assert_eq!(descriptor.doc_type, DocumentType::DeliveryNote);
    }
}
