use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use docchain_types::DocumentType;

/// Display and navigation metadata for one document type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentTypeDescriptor {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub label: Cow<'static, str>,
    /// Default effect polarity on the underlying ledger or stock quantity.
    pub sign: Sign,
    /// Base path for document pages; `None` disables navigation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<&'static str>,
    pub tone: Tone,
    pub icon: Icon,
}

impl DocumentTypeDescriptor {
    /// Fallback for tags the registry does not know.
    pub fn neutral(tag: &str) -> Self {
        Self {
            doc_type: DocumentType::from_tag(tag),
            label: Cow::Owned(tag.to_string()),
            sign: Sign::Positive,
            route: None,
            tone: Tone::Neutral,
            icon: Icon::File,
        }
    }

    /// Location of a document instance. Pure; `None` when the type has no
    /// route, in which case hosts treat navigation as a no-op.
    pub fn navigate(&self, doc_id: &str) -> Option<String> {
        let route = self.route?;
        let doc_id = doc_id.trim();
        if doc_id.is_empty() {
            return None;
        }
        Some(format!("{route}/{doc_id}"))
    }
}

/// Default polarity of a document type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn factor(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }
}

impl Serialize for Sign {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.factor())
    }
}

/// Colour identity, named after the palette hosts map to actual colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Blue,
    Red,
    Amber,
    Indigo,
    Slate,
    Rose,
    Teal,
    Cyan,
    Green,
    Orange,
    Neutral,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Amber => "amber",
            Self::Indigo => "indigo",
            Self::Slate => "slate",
            Self::Rose => "rose",
            Self::Teal => "teal",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

/// Icon identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Receipt,
    MinusCircle,
    PlusCircle,
    FileText,
    Book,
    Undo,
    PackageIn,
    Truck,
    Wallet,
    File,
}

impl Icon {
    /// Single-glyph stand-in for terminals.
    pub fn glyph(self) -> char {
        match self {
            Self::Receipt => '§',
            Self::MinusCircle => '⊖',
            Self::PlusCircle => '⊕',
            Self::FileText => '▤',
            Self::Book => '≡',
            Self::Undo => '↺',
            Self::PackageIn => '▣',
            Self::Truck => '⇉',
            Self::Wallet => '¤',
            Self::File => '□',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_descriptor_never_navigates() {
        let d = DocumentTypeDescriptor::neutral("mystery");
        assert_eq!(d.navigate("1"), None);
        assert_eq!(d.icon, Icon::File);
    }

    #[test]
    fn blank_ids_do_not_navigate() {
        let d = crate::lookup(&DocumentType::Invoice);
        assert_eq!(d.navigate("  "), None);
    }

    #[test]
    fn serializes_sign_as_factor() {
        let d = crate::lookup(&DocumentType::CreditNote);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["sign"], -1);
        assert_eq!(json["type"], "credit_note");
        assert_eq!(json["tone"], "red");
        assert_eq!(json["icon"], "minus-circle");
    }
}
