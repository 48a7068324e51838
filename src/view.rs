//! Renderable data views
//!
//! The presentation layer renders four kinds of data. Each kind answers the
//! same read-only questions so templates can treat them uniformly.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalogue::Catalogue;
use crate::item::Item;

/// One piece of renderable data borrowed from a loaded database
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum DataView<'a> {
    Item(&'a Item),
    Catalogue(Catalogue<'a>),
    TagCounts(BTreeMap<&'a str, usize>),
    CollectionNames(BTreeMap<&'a str, &'a str>),
}

impl<'a> DataView<'a> {
    /// Metadata of a single item
    pub fn properties(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            DataView::Item(item) => Some(&item.metadata),
            _ => None,
        }
    }

    /// Catalogue groups keyed by heading
    pub fn groups(&self) -> Option<&BTreeMap<&'a str, Vec<&'a Item>>> {
        match self {
            DataView::Catalogue(catalogue) => Some(catalogue.groups()),
            _ => None,
        }
    }

    pub fn has_multiple_groups(&self) -> bool {
        match self {
            DataView::Catalogue(catalogue) => catalogue.has_multiple_groups(),
            _ => false,
        }
    }

    /// Sorted tags of the viewed data
    pub fn tags(&self) -> Vec<&'a str> {
        match self {
            DataView::Item(item) => Item::tags(*item),
            DataView::Catalogue(catalogue) => catalogue.tags(),
            DataView::TagCounts(_) | DataView::CollectionNames(_) => Vec::new(),
        }
    }

    pub fn hides_tags(&self) -> bool {
        match self {
            DataView::Item(_) => false,
            DataView::Catalogue(catalogue) => catalogue.hides_tags(),
            DataView::TagCounts(_) | DataView::CollectionNames(_) => true,
        }
    }
}

impl<'a> From<&'a Item> for DataView<'a> {
    fn from(item: &'a Item) -> Self {
        DataView::Item(item)
    }
}

impl<'a> From<Catalogue<'a>> for DataView<'a> {
    fn from(catalogue: Catalogue<'a>) -> Self {
        DataView::Catalogue(catalogue)
    }
}
