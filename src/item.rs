//! Inventory items

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lexical;

/// Dense, zero-based insertion index of an item
pub type ItemId = usize;

/// Well-known metadata keys
pub mod keys {
    /// Label of items whose type has no dedicated label key
    pub const LABEL: &str = "label";
    pub const TITLE: &str = "title";
    pub const TAGS: &str = "tags";
    pub const COLLECTIONS: &str = "collections";
    /// Overrides the title when ordering books
    pub const SORT_HINT: &str = "sortHint";
    pub const SERIES: &str = "series";
}

/// A single inventory entry
///
/// Items are created only by the database during decoding. The label is never
/// empty and the type is always one of the enabled types of the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub type_key: String,
    pub label: String,
    pub metadata: BTreeMap<String, String>,
}

impl Item {
    /// Raw metadata value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Metadata value, treating an empty string as absent
    pub(crate) fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Valid tags of this item, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags = self
            .get(keys::TAGS)
            .map(lexical::filter_word_list)
            .unwrap_or_default();
        tags.sort_unstable();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(metadata: &[(&str, &str)]) -> Item {
        Item {
            id: 0,
            type_key: "books".to_string(),
            label: "Dune".to_string(),
            metadata: metadata
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_tags_are_filtered_and_sorted() {
        let item = item(&[("tags", "scifi, Classic,desert,scifi")]);
        assert_eq!(item.tags(), vec!["desert", "scifi"]);
    }

    #[test]
    fn test_no_tags() {
        assert!(item(&[]).tags().is_empty());
    }

    #[test]
    fn test_serialized_type_field() {
        let json = serde_json::to_value(item(&[("title", "Dune")])).unwrap();
        assert_eq!(json["type"], "books");
        assert_eq!(json["metadata"]["title"], "Dune");
    }
}
