//! Type behaviour registry
//!
//! Every per-type decision (label key, accepted item keywords, ordering and
//! display names) is read from one [`TypeSpec`] table. Types without an entry
//! use [`DEFAULT_SPEC`].

use crate::item::keys;
use crate::sorting::SortStrategy;

/// Item keyword accepted for every type
pub const GENERIC_KEYWORD: &str = "item";

/// Behaviour descriptor for one item type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    /// Type key as written in the document (e.g. `books`)
    pub key: &'static str,
    /// Metadata key holding the display label
    pub label_key: &'static str,
    /// Singular display name
    pub type_label: &'static str,
    /// Plural heading used in catalogues; `None` falls back to the type key
    pub group_label: Option<&'static str>,
    /// Type-specific singular item keywords, in addition to `item`
    pub keywords: &'static [&'static str],
    pub sort: SortStrategy,
}

/// Applied to every type without a registry entry
pub static DEFAULT_SPEC: TypeSpec = TypeSpec {
    key: "",
    label_key: keys::LABEL,
    type_label: "Inventory item",
    group_label: None,
    keywords: &[],
    sort: SortStrategy::Label,
};

static REGISTRY: &[TypeSpec] = &[
    TypeSpec {
        key: "books",
        label_key: keys::TITLE,
        type_label: "Book",
        group_label: Some("Books"),
        keywords: &["book"],
        sort: SortStrategy::SortHintOrTitle,
    },
    TypeSpec {
        key: "games",
        label_key: keys::TITLE,
        type_label: "Game",
        group_label: Some("Games"),
        keywords: &["game"],
        sort: SortStrategy::SeriesOrTitle,
    },
    TypeSpec {
        key: "equipment",
        label_key: keys::LABEL,
        type_label: "Equipment part",
        group_label: Some("Equipment items"),
        keywords: &[],
        sort: SortStrategy::Label,
    },
];

/// Registry entry for a type key
pub fn lookup(type_key: &str) -> &'static TypeSpec {
    REGISTRY
        .iter()
        .find(|spec| spec.key == type_key)
        .unwrap_or(&DEFAULT_SPEC)
}

/// Metadata key consulted for an item's label
pub fn label_key(type_key: &str) -> &'static str {
    lookup(type_key).label_key
}

/// Singular display name of a type (e.g. "Book")
pub fn type_label(type_key: &str) -> &'static str {
    lookup(type_key).type_label
}

/// Catalogue heading for a type; unknown types use the raw key
pub fn group_label(type_key: &str) -> &str {
    lookup(type_key).group_label.unwrap_or(type_key)
}

/// Whether `keyword` may name an item element inside a `type_key` element
pub fn is_item_keyword(keyword: &str, type_key: &str) -> bool {
    keyword == GENERIC_KEYWORD || lookup(type_key).keywords.contains(&keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_keywords() {
        assert!(is_item_keyword("item", "books"));
        assert!(is_item_keyword("item", "plants"));
        assert!(is_item_keyword("book", "books"));
        assert!(is_item_keyword("game", "games"));
        assert!(!is_item_keyword("game", "books"));
        assert!(!is_item_keyword("books", "books"));
        assert!(!is_item_keyword("plant", "plants"));
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(type_label("books"), "Book");
        assert_eq!(type_label("equipment"), "Equipment part");
        assert_eq!(type_label("plants"), "Inventory item");
        assert_eq!(group_label("games"), "Games");
        assert_eq!(group_label("equipment"), "Equipment items");
        assert_eq!(group_label("plants"), "plants");
    }

    #[test]
    fn test_label_keys() {
        assert_eq!(label_key("books"), "title");
        assert_eq!(label_key("games"), "title");
        assert_eq!(label_key("equipment"), "label");
        assert_eq!(label_key("plants"), "label");
    }
}
