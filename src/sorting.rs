//! Item ordering strategies
//!
//! Each type is ordered by one [`SortStrategy`], looked up through the type
//! registry. Comparisons are bytewise on the UTF-8 encoding and the sort is
//! stable, so items with equal keys keep their insertion order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::item::{keys, Item};
use crate::types;

/// Ordering rule for items of one type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Display label, ascending
    #[default]
    Label,
    /// `sortHint` if present, otherwise `title`
    SortHintOrTitle,
    /// `series` if present, otherwise `title`; series members gather together
    /// while standalone items interleave by their own title
    SeriesOrTitle,
}

impl SortStrategy {
    /// Strategy registered for a type key (default: [`SortStrategy::Label`])
    pub fn for_type(type_key: &str) -> Self {
        types::lookup(type_key).sort
    }

    fn key<'a>(&self, item: &'a Item) -> &'a str {
        match self {
            SortStrategy::Label => item.label.as_str(),
            SortStrategy::SortHintOrTitle => item
                .non_empty(keys::SORT_HINT)
                .or_else(|| item.non_empty(keys::TITLE))
                .unwrap_or_default(),
            SortStrategy::SeriesOrTitle => item
                .non_empty(keys::SERIES)
                .or_else(|| item.non_empty(keys::TITLE))
                .unwrap_or_default(),
        }
    }

    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        self.key(a).cmp(self.key(b))
    }

    /// Whether `a` orders strictly before `b`
    pub fn less(&self, a: &Item, b: &Item) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Stable sort in place
    pub fn sort(&self, items: &mut [&Item]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

/// Sort items of a single type with the strategy registered for that type
pub fn sort_items(items: &mut [&Item]) {
    if let Some(first) = items.first() {
        SortStrategy::for_type(&first.type_key).sort(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: usize, type_key: &str, label: &str, metadata: &[(&str, &str)]) -> Item {
        Item {
            id,
            type_key: type_key.to_string(),
            label: label.to_string(),
            metadata: metadata
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn labels(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.label.clone()).collect()
    }

    #[test]
    fn test_registry_lookup() {
        assert_eq!(SortStrategy::for_type("books"), SortStrategy::SortHintOrTitle);
        assert_eq!(SortStrategy::for_type("games"), SortStrategy::SeriesOrTitle);
        assert_eq!(SortStrategy::for_type("equipment"), SortStrategy::Label);
        assert_eq!(SortStrategy::for_type("plants"), SortStrategy::Label);
    }

    #[test]
    fn test_books_use_sort_hint_before_title() {
        let a = item(0, "books", "The Hobbit", &[("title", "The Hobbit"), ("sortHint", "Hobbit")]);
        let b = item(1, "books", "Dune", &[("title", "Dune")]);
        let c = item(2, "books", "Neuromancer", &[("title", "Neuromancer")]);
        let mut items = vec![&a, &b, &c];
        sort_items(&mut items);
        assert_eq!(labels(&items), vec!["Dune", "The Hobbit", "Neuromancer"]);
    }

    #[test]
    fn test_games_group_under_series() {
        let a = item(0, "games", "Zelda II", &[("title", "Zelda II"), ("series", "Zelda")]);
        let b = item(1, "games", "Tetris", &[("title", "Tetris")]);
        let c = item(2, "games", "Link's Awakening", &[("title", "Link's Awakening"), ("series", "Zelda")]);
        let d = item(3, "games", "Myst", &[("title", "Myst")]);
        let mut items = vec![&a, &b, &c, &d];
        sort_items(&mut items);
        // equal series keys keep insertion order
        assert_eq!(labels(&items), vec!["Myst", "Tetris", "Zelda II", "Link's Awakening"]);
    }

    #[test]
    fn test_default_is_label_order() {
        let a = item(0, "plants", "fern", &[]);
        let b = item(1, "plants", "Cactus", &[]);
        let c = item(2, "plants", "aloe", &[]);
        let mut items = vec![&a, &b, &c];
        sort_items(&mut items);
        // bytewise: uppercase before lowercase
        assert_eq!(labels(&items), vec!["Cactus", "aloe", "fern"]);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let a = item(0, "books", "B", &[("title", "B")]);
        let b = item(1, "books", "A", &[("title", "A")]);
        let c = item(2, "books", "A", &[("title", "A")]);
        let mut once = vec![&a, &b, &c];
        sort_items(&mut once);
        let mut twice = once.clone();
        sort_items(&mut twice);
        let once: Vec<usize> = once.iter().map(|i| i.id).collect();
        let twice: Vec<usize> = twice.iter().map(|i| i.id).collect();
        assert_eq!(once, twice);
        assert_eq!(once, vec![1, 2, 0]);
    }

    #[test]
    fn test_less() {
        let a = item(0, "equipment", "Anvil", &[]);
        let b = item(1, "equipment", "Bellows", &[]);
        assert!(SortStrategy::Label.less(&a, &b));
        assert!(!SortStrategy::Label.less(&b, &a));
        assert!(!SortStrategy::Label.less(&a, &a));
    }
}
