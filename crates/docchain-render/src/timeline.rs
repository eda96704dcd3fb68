use rust_decimal::Decimal;
use serde::Serialize;

use docchain_registry::{Icon, Tone};
use docchain_types::DocumentType;

use crate::render::RenderMode;

/// Direction of an amount, for colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountTone {
    /// Zero or positive.
    Charge,
    /// Negative.
    Reduction,
}

impl AmountTone {
    pub fn of(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            Self::Reduction
        } else {
            Self::Charge
        }
    }
}

/// What a live entry navigates to when activated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationTarget {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub doc_id: String,
}

/// One document in a rendered timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub node_id: String,
    /// Reference number, or the node id when the number is absent.
    pub reference: String,
    /// Registry label of the document type.
    pub label: String,
    pub tone: Tone,
    pub icon: Icon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub amount: Decimal,
    pub amount_text: String,
    pub amount_tone: AmountTone,
    pub running_balance: Decimal,
    pub running_balance_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Label of the link that introduced this document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_label: Option<String>,
    /// Present only in live mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NavigationTarget>,
}

impl TimelineEntry {
    pub fn is_clickable(&self) -> bool {
        self.target.is_some()
    }
}

/// Aggregate figures rendered after the last entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineSummary {
    pub balance: Decimal,
    pub balance_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_net_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_count: Option<usize>,
}

/// A rendered chain. Never empty: zero-node chains render to `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub mode: RenderMode,
    pub entries: Vec<TimelineEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TimelineSummary>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Activate the entry at `index`, as a click on its reference would.
    ///
    /// Calls `on_navigate(type, doc_id)` and returns `true` for live
    /// entries; guide entries and out-of-range indexes do nothing.
    pub fn activate<F>(&self, index: usize, on_navigate: F) -> bool
    where
        F: FnOnce(&DocumentType, &str),
    {
        match self.entries.get(index).and_then(|e| e.target.as_ref()) {
            Some(target) => {
                on_navigate(&target.doc_type, &target.doc_id);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_tone_treats_zero_as_charge() {
        assert_eq!(AmountTone::of(Decimal::ZERO), AmountTone::Charge);
        assert_eq!(AmountTone::of(Decimal::NEGATIVE_ONE), AmountTone::Reduction);
        assert_eq!(AmountTone::of(Decimal::ONE), AmountTone::Charge);
    }
}
