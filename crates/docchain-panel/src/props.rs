use serde::{Deserialize, Serialize};

use docchain_types::DocumentType;

/// A follow-up action the host allows on a posted document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedAction {
    pub label: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub href: String,
}

impl AllowedAction {
    pub fn new(
        label: impl Into<String>,
        action_type: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            action_type: action_type.into(),
            href: href.into(),
        }
    }
}

/// Inputs a host passes when mounting a correction history panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelProps {
    pub document_type: DocumentType,
    /// Absent for unsaved documents; the panel is then hidden. Hosts may
    /// send it as a string or an integer.
    #[serde(
        default,
        deserialize_with = "docchain_types::wire::optional_string_or_number"
    )]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document_status: Option<String>,
    #[serde(default)]
    pub allowed_actions: Vec<AllowedAction>,
    #[serde(default)]
    pub compact: bool,
}

impl PanelProps {
    pub fn new(document_type: DocumentType, document_id: impl Into<String>) -> Self {
        Self {
            document_type,
            document_id: Some(document_id.into()),
            document_status: None,
            allowed_actions: Vec::new(),
            compact: false,
        }
    }

    /// Props for a document that has not been saved yet.
    pub fn unsaved(document_type: DocumentType) -> Self {
        Self {
            document_id: None,
            ..Self::new(document_type, "")
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.document_status = Some(status.into());
        self
    }

    pub fn with_action(mut self, action: AllowedAction) -> Self {
        self.allowed_actions.push(action);
        self
    }

    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    /// The document id, treating blank ids as absent.
    pub fn id(&self) -> Option<&str> {
        self.document_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
