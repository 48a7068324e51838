//! Error types for inventory loading

use thiserror::Error;

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Inventory loading errors
///
/// Every variant is fatal: a document that produces one of these did not load.
/// Per-record problems (bad item keyword, bad attribute name, empty label) are
/// logged and skipped instead.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Invalid document structure: expected {expected}")]
    Structure { expected: String },

    #[error("Missing attribute <{element} {attribute}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Invalid attribute <{element} {attribute}>: {reason}")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        reason: String,
    },

    #[error("Invalid date {value:?} in attribute {attribute}: {source}")]
    InvalidDate {
        attribute: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    pub(crate) fn structure(expected: impl Into<String>) -> Self {
        Self::Structure {
            expected: expected.into(),
        }
    }

    /// Whether the error was raised by a structural expectation rather than
    /// by attribute validation or the tokenizer.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structure { .. })
    }
}
