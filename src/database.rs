//! Inventory database
//!
//! The store is built by a single decoding pass and is read-only afterwards:
//! every public method takes `&self`, so a loaded [`Database`] can be shared
//! between any number of readers (e.g. behind an `Arc`) without locking.
//! Collection and tag indices hold item ids, never references.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::catalogue::Catalogue;
use crate::decoder;
use crate::error::Result;
use crate::item::{keys, Item, ItemId};
use crate::lexical;
use crate::types;

/// In-memory inventory store with collection and tag indices
#[derive(Debug, Clone)]
pub struct Database {
    created: NaiveDate,
    last_modified: NaiveDate,

    items: Vec<Item>,

    enabled_types: BTreeSet<String>,
    defaults: BTreeMap<String, String>,
    declared_collections: BTreeMap<String, String>,
    hidden_collections: BTreeSet<String>,

    collectioned: BTreeMap<String, Vec<ItemId>>,
    tagged: BTreeMap<String, Vec<ItemId>>,
}

impl Database {
    pub(crate) fn new() -> Self {
        Self {
            created: NaiveDate::MIN,
            last_modified: NaiveDate::MIN,
            items: Vec::new(),
            enabled_types: BTreeSet::new(),
            defaults: BTreeMap::new(),
            declared_collections: BTreeMap::new(),
            hidden_collections: BTreeSet::new(),
            collectioned: BTreeMap::new(),
            tagged: BTreeMap::new(),
        }
    }

    /// Decode an inventory document into a new database.
    ///
    /// The database is returned only if the whole document decoded; there is
    /// no partially loaded state to observe.
    pub fn load<R: BufRead>(source: R) -> Result<Self> {
        let mut db = Self::new();
        decoder::decode(&mut db, source)?;
        info!(
            items = db.items.len(),
            collections = db.collectioned.len(),
            tags = db.tagged.len(),
            "inventory loaded"
        );
        Ok(db)
    }

    // ------------------------------------------------------------------
    // Population (decoder only)
    // ------------------------------------------------------------------

    pub(crate) fn set_timestamps(&mut self, created: NaiveDate, last_modified: NaiveDate) {
        self.created = created;
        self.last_modified = last_modified;
    }

    pub(crate) fn enable_type(&mut self, type_key: &str) {
        self.enabled_types.insert(type_key.to_string());
    }

    pub(crate) fn set_default(&mut self, qualifier: &str, value: &str) {
        self.defaults.insert(qualifier.to_string(), value.to_string());
    }

    pub(crate) fn hide_collection(&mut self, key: &str) {
        self.hidden_collections.insert(key.to_string());
    }

    pub(crate) fn declare_collection(&mut self, key: &str, name: &str) {
        self.declared_collections
            .insert(key.to_string(), name.to_string());
    }

    /// Create an item and index it.
    ///
    /// Returns `None` without touching the store if the item's label would be
    /// empty. The raw `collections` and `tags` values stay in the metadata as
    /// written; only the indices are filtered.
    pub(crate) fn add_item(
        &mut self,
        type_key: &str,
        mut metadata: BTreeMap<String, String>,
    ) -> Option<&Item> {
        let id = self.items.len();

        let label = metadata
            .get(types::label_key(type_key))
            .cloned()
            .unwrap_or_default();
        if label.is_empty() {
            return None;
        }

        let prefix = format!("{}/", type_key);
        for (qualifier, value) in &self.defaults {
            if let Some(key) = qualifier.strip_prefix(&prefix) {
                metadata
                    .entry(key.to_string())
                    .or_insert_with(|| value.clone());
            }
        }

        if let Some(collections) = metadata.get(keys::COLLECTIONS) {
            for key in lexical::filter_word_list(collections) {
                if self.declared_collections.contains_key(key)
                    && !self.hidden_collections.contains(key)
                {
                    self.collectioned.entry(key.to_string()).or_default().push(id);
                }
            }
        }

        if let Some(tags) = metadata.get(keys::TAGS) {
            for tag in lexical::filter_word_list(tags) {
                self.tagged.entry(tag.to_string()).or_default().push(id);
            }
        }

        debug!(id, type_key, label = %label, "item added");
        self.items.push(Item {
            id,
            type_key: type_key.to_string(),
            label,
            metadata,
        });
        self.items.last()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn created(&self) -> NaiveDate {
        self.created
    }

    pub fn last_modified(&self) -> NaiveDate {
        self.last_modified
    }

    /// Highest valid item id, `None` if the database holds no items
    pub fn last_id(&self) -> Option<ItemId> {
        self.items.len().checked_sub(1)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// All items, ordered by id
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn enabled_types(&self) -> impl Iterator<Item = &str> {
        self.enabled_types.iter().map(String::as_str)
    }

    pub fn is_enabled(&self, type_key: &str) -> bool {
        self.enabled_types.contains(type_key)
    }

    /// Default metadata values keyed by `type/metadataKey`
    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }

    /// Every declared collection (key to name), populated or not
    pub fn declared_collections(&self) -> &BTreeMap<String, String> {
        &self.declared_collections
    }

    pub fn collection_name(&self, key: &str) -> Option<&str> {
        self.declared_collections.get(key).map(String::as_str)
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden_collections.contains(key)
    }

    /// Names of the collections that hold at least one item
    pub fn collections(&self) -> BTreeMap<&str, &str> {
        self.collectioned
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .filter_map(|(key, _)| {
                self.collection_name(key)
                    .map(|name| (key.as_str(), name))
            })
            .collect()
    }

    /// Number of items carrying each tag
    pub fn tag_counts(&self) -> BTreeMap<&str, usize> {
        self.tagged
            .iter()
            .map(|(tag, ids)| (tag.as_str(), ids.len()))
            .collect()
    }

    /// Ids of the items in a collection, in insertion order
    pub fn collection_members(&self, key: &str) -> &[ItemId] {
        self.collectioned.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ids of the items carrying a tag, in insertion order
    pub fn tag_members(&self, tag: &str) -> &[ItemId] {
        self.tagged.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    /// Catalogue of a collection, `None` if it has no items
    pub fn collection_catalogue(&self, key: &str) -> Option<Catalogue<'_>> {
        Catalogue::compose(self.resolve(self.collection_members(key)))
    }

    /// Catalogue of the items carrying a tag, `None` if there are none
    pub fn tag_catalogue(&self, tag: &str) -> Option<Catalogue<'_>> {
        Catalogue::compose(self.resolve(self.tag_members(tag))).map(Catalogue::with_hidden_tags)
    }

    /// Catalogue of every item; empty if the database is empty
    pub fn catalogue_of_everything(&self) -> Catalogue<'_> {
        Catalogue::compose(&self.items)
            .unwrap_or_default()
            .with_hidden_tags()
    }

    fn resolve<'a>(&'a self, ids: &'a [ItemId]) -> impl Iterator<Item = &'a Item> + 'a {
        ids.iter().filter_map(move |&id| self.items.get(id))
    }
}
