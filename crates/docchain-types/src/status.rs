//! Posted-status classification.
//!
//! A document whose status is in the posted vocabulary is immutable: it can
//! only be corrected by issuing a new linked document. Everything else is
//! still editable in place.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Statuses that make a document immutable, in normalized form.
pub const POSTED_STATUSES: [&str; 4] = ["issued", "posted", "approved", "confirmed"];

/// Namespace prefix some hosts put in front of status values.
const STATUS_PREFIX: &str = "status_";

/// Whether a document may still be edited directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    /// Immutable; corrections must be issued as new documents.
    Posted,
    /// Draft-like; direct edits are allowed.
    Editable,
}

impl Posture {
    pub fn is_posted(self) -> bool {
        matches!(self, Self::Posted)
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posted => write!(f, "posted"),
            Self::Editable => write!(f, "editable"),
        }
    }
}

/// Lowercase a status and strip a leading `status_` namespace.
pub fn normalize_status(status: &str) -> String {
    let lowered = status.trim().to_ascii_lowercase();
    match lowered.strip_prefix(STATUS_PREFIX) {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Classify a free-text status. Absent statuses are editable.
pub fn classify(status: Option<&str>) -> Posture {
    let Some(status) = status else {
        return Posture::Editable;
    };
    let normalized = normalize_status(status);
    if POSTED_STATUSES.contains(&normalized.as_str()) {
        Posture::Posted
    } else {
        Posture::Editable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn prefixed_upper_case_is_posted() {
        assert_eq!(classify(Some("STATUS_ISSUED")), Posture::Posted);
    }

    #[test]
    fn whole_vocabulary_is_posted() {
        for status in POSTED_STATUSES {
            assert!(classify(Some(status)).is_posted(), "{status}");
        }
        assert!(classify(Some("Confirmed")).is_posted());
    }

    #[test]
    fn other_statuses_are_editable() {
        for status in ["draft", "STATUS_DRAFT", "voided", "pending_approval", ""] {
            assert_eq!(classify(Some(status)), Posture::Editable, "{status}");
        }
        assert_eq!(classify(None), Posture::Editable);
    }

    #[test]
    fn prefix_is_only_stripped_once_and_at_the_start() {
        assert_eq!(normalize_status("status_status_issued"), "status_issued");
        assert_eq!(classify(Some("pre_status_issued")), Posture::Editable);
    }

    proptest! {
        #[test]
        fn classification_ignores_case(idx in 0usize..4, mask in proptest::collection::vec(any::<bool>(), 16)) {
            let word = POSTED_STATUSES[idx];
            let mixed: String = format!("status_{word}")
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(classify(Some(&mixed)), Posture::Posted);
        }
    }
}
