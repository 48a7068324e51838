//! Catalogue composition
//!
//! A catalogue is a read view over database items: items grouped under the
//! plural heading of their type, each group ordered by the type's strategy.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::item::Item;
use crate::sorting::SortStrategy;
use crate::types;

/// Items grouped by type heading
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalogue<'a> {
    groups: BTreeMap<&'a str, Vec<&'a Item>>,
    #[serde(skip)]
    hide_tags: bool,
}

impl<'a> Catalogue<'a> {
    /// Group and order `items`. Returns `None` for an empty input.
    pub fn compose<I>(items: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut by_type: BTreeMap<&'a str, Vec<&'a Item>> = BTreeMap::new();
        for item in items {
            by_type.entry(item.type_key.as_str()).or_default().push(item);
        }
        if by_type.is_empty() {
            return None;
        }

        let mut groups: BTreeMap<&'a str, Vec<&'a Item>> = BTreeMap::new();
        for (type_key, mut members) in by_type {
            SortStrategy::for_type(type_key).sort(&mut members);
            groups
                .entry(types::group_label(type_key))
                .or_default()
                .extend(members);
        }
        Some(Self {
            groups,
            hide_tags: false,
        })
    }

    pub(crate) fn with_hidden_tags(mut self) -> Self {
        self.hide_tags = true;
        self
    }

    /// Groups keyed by heading
    pub fn groups(&self) -> &BTreeMap<&'a str, Vec<&'a Item>> {
        &self.groups
    }

    /// Items of one group, in order
    pub fn group(&self, heading: &str) -> Option<&[&'a Item]> {
        self.groups.get(heading).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of items across groups
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn has_multiple_groups(&self) -> bool {
        self.groups.len() > 1
    }

    /// Whether views of this catalogue should omit per-item tags
    pub fn hides_tags(&self) -> bool {
        self.hide_tags
    }

    /// Sorted union of the tags of every item in the catalogue
    pub fn tags(&self) -> Vec<&'a str> {
        let tags: BTreeSet<&'a str> = self
            .groups
            .values()
            .flatten()
            .copied()
            .flat_map(Item::tags)
            .collect();
        tags.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: usize, type_key: &str, label: &str, tags: &str) -> Item {
        let mut metadata = BTreeMap::new();
        metadata.insert("title".to_string(), label.to_string());
        if !tags.is_empty() {
            metadata.insert("tags".to_string(), tags.to_string());
        }
        Item {
            id,
            type_key: type_key.to_string(),
            label: label.to_string(),
            metadata,
        }
    }

    #[test]
    fn test_empty_input_has_no_catalogue() {
        assert!(Catalogue::compose(Vec::<&Item>::new()).is_none());
    }

    #[test]
    fn test_groups_by_heading_and_sorts() {
        let items = vec![
            item(0, "books", "Neuromancer", "scifi"),
            item(1, "games", "Tetris", "puzzle"),
            item(2, "books", "Dune", "scifi,desert"),
            item(3, "plants", "fern", ""),
        ];
        let catalogue = Catalogue::compose(&items).unwrap();

        assert!(catalogue.has_multiple_groups());
        assert_eq!(catalogue.len(), 4);
        let headings: Vec<_> = catalogue.groups().keys().copied().collect();
        assert_eq!(headings, vec!["Books", "Games", "plants"]);

        let books: Vec<_> = catalogue.group("Books").unwrap().iter().map(|i| i.id).collect();
        assert_eq!(books, vec![2, 0]);
        assert_eq!(catalogue.tags(), vec!["desert", "puzzle", "scifi"]);
        assert!(!catalogue.hides_tags());
    }

    #[test]
    fn test_single_group() {
        let items = vec![item(0, "games", "Myst", "")];
        let catalogue = Catalogue::compose(&items).unwrap().with_hidden_tags();
        assert!(!catalogue.has_multiple_groups());
        assert!(catalogue.hides_tags());
        assert!(catalogue.tags().is_empty());
    }
}
