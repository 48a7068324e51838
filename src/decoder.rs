//! Inventory document decoder
//!
//! Walks the fixed document grammar top to bottom and populates a
//! [`Database`]:
//!
//! ```text
//! <koidatabase created="YYYY-MM-DD" lastModified="YYYY-MM-DD">
//!   <koitypes enabled="books,games">
//!     <metadata key="books/format" default="paperback"/>     0..N
//!   </koitypes>
//!   <collections hidden="attic">
//!     <collection key="favorites" name="Favorites"/>         0..N
//!   </collections>
//!   <data>
//!     <books>                                                0..N
//!       <book title="Dune" tags="scifi"/>                    0..N
//!     </books>
//!   </data>
//! </koidatabase>
//! ```
//!
//! Header constructs describe the schema itself and any violation aborts the
//! load. Data constructs are user records: an unknown or disabled type, an
//! unknown item keyword, a malformed attribute name or an item without a label
//! is logged and skipped.

use std::collections::BTreeMap;
use std::io::BufRead;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::database::Database;
use crate::error::{InventoryError, Result};
use crate::lexical;
use crate::reader::{Element, StructuralReader};
use crate::types;

pub const NODE_DATABASE: &str = "koidatabase";
pub const NODE_TYPES: &str = "koitypes";
pub const NODE_METADATA: &str = "metadata";
pub const NODE_COLLECTIONS: &str = "collections";
pub const NODE_COLLECTION: &str = "collection";
pub const NODE_DATA: &str = "data";

pub const ATTR_CREATED: &str = "created";
pub const ATTR_LAST_MODIFIED: &str = "lastModified";
pub const ATTR_ENABLED: &str = "enabled";
pub const ATTR_HIDDEN: &str = "hidden";
pub const ATTR_KEY: &str = "key";
pub const ATTR_DEFAULT: &str = "default";
pub const ATTR_NAME: &str = "name";

/// Calendar date format of the header timestamps
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decode a whole document into `db`.
///
/// On error `db` is left partially populated and must be discarded;
/// [`Database::load`] never hands such a store out.
pub(crate) fn decode<R: BufRead>(db: &mut Database, source: R) -> Result<()> {
    let mut reader = StructuralReader::new(source);

    decode_header(db, &mut reader)?;
    decode_types(db, &mut reader)?;
    decode_collections(db, &mut reader)?;
    decode_data(db, &mut reader)?;

    reader.expect_end(NODE_DATABASE)
}

fn decode_header<R: BufRead>(db: &mut Database, reader: &mut StructuralReader<R>) -> Result<()> {
    let root = reader.expect_start(NODE_DATABASE)?;
    let created = parse_date(&root, ATTR_CREATED)?;
    let last_modified = parse_date(&root, ATTR_LAST_MODIFIED)?;
    debug!(%created, %last_modified, "decoded database header");
    db.set_timestamps(created, last_modified);
    Ok(())
}

fn parse_date(element: &Element, attribute: &'static str) -> Result<NaiveDate> {
    let value = element.attribute(attribute).unwrap_or_default();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| InventoryError::InvalidDate {
        attribute,
        value: value.to_string(),
        source,
    })
}

fn decode_types<R: BufRead>(db: &mut Database, reader: &mut StructuralReader<R>) -> Result<()> {
    let types = reader.expect_start(NODE_TYPES)?;
    let enabled = types
        .attribute(ATTR_ENABLED)
        .ok_or(InventoryError::MissingAttribute {
            element: NODE_TYPES,
            attribute: ATTR_ENABLED,
        })?;
    let enabled = lexical::split_validated_word_list(enabled).ok_or_else(|| {
        InventoryError::InvalidAttribute {
            element: NODE_TYPES,
            attribute: ATTR_ENABLED,
            reason: "invalid type list format".to_string(),
        }
    })?;
    for type_key in &enabled {
        db.enable_type(type_key);
    }
    debug!(types = %enabled.join(", "), "enabled types");

    while let Some(metadata) = reader.next_start_or_end(NODE_METADATA, NODE_TYPES)? {
        let qualifier = metadata.attribute(ATTR_KEY).unwrap_or_default();
        if !lexical::is_default_qualifier(qualifier) {
            return Err(InventoryError::InvalidAttribute {
                element: NODE_METADATA,
                attribute: ATTR_KEY,
                reason: format!("{:?} is not of the form type/key", qualifier),
            });
        }
        let value = metadata.attribute(ATTR_DEFAULT).unwrap_or_default();
        db.set_default(qualifier, value);
        debug!(qualifier, value, "default metadata value");
        reader.skip(&metadata)?;
    }
    Ok(())
}

fn decode_collections<R: BufRead>(
    db: &mut Database,
    reader: &mut StructuralReader<R>,
) -> Result<()> {
    let collections = reader.expect_start(NODE_COLLECTIONS)?;
    if let Some(hidden) = collections.attribute(ATTR_HIDDEN) {
        let hidden = lexical::split_validated_word_list(hidden).ok_or_else(|| {
            InventoryError::InvalidAttribute {
                element: NODE_COLLECTIONS,
                attribute: ATTR_HIDDEN,
                reason: "invalid key list format".to_string(),
            }
        })?;
        for key in &hidden {
            db.hide_collection(key);
        }
        debug!(collections = %hidden.join(", "), "hidden collections");
    }

    while let Some(collection) = reader.next_start_or_end(NODE_COLLECTION, NODE_COLLECTIONS)? {
        let key = collection.attribute(ATTR_KEY).unwrap_or_default();
        if !lexical::is_bare_word(key) {
            return Err(InventoryError::InvalidAttribute {
                element: NODE_COLLECTION,
                attribute: ATTR_KEY,
                reason: format!("{:?} is not a valid collection key", key),
            });
        }
        let name = collection.attribute(ATTR_NAME).unwrap_or_default();
        db.declare_collection(key, name);
        debug!(key, name, "declared collection");
        reader.skip(&collection)?;
    }
    Ok(())
}

fn decode_data<R: BufRead>(db: &mut Database, reader: &mut StructuralReader<R>) -> Result<()> {
    reader.expect_start(NODE_DATA)?;

    while let Some(type_node) = reader.next_any_start_or_end(NODE_DATA)? {
        let type_key = type_node.name().to_string();
        if !lexical::is_bare_word(&type_key) {
            warn!(type_key = %type_key, "skipping type node entirely: invalid type name format");
            reader.skip(&type_node)?;
            continue;
        }
        if !db.is_enabled(&type_key) {
            warn!(type_key = %type_key, "skipping type node entirely: type is not enabled");
            reader.skip(&type_node)?;
            continue;
        }

        let mut count = 0usize;
        while let Some(item_node) = reader.next_any_start_or_end(&type_key)? {
            if decode_item(db, &type_key, &item_node) {
                count += 1;
            }
            reader.skip(&item_node)?;
        }
        debug!(type_key = %type_key, count, "decoded items");
    }
    Ok(())
}

/// Add one item element to the database. Returns whether an item was created.
fn decode_item(db: &mut Database, type_key: &str, node: &Element) -> bool {
    let keyword = node.name();
    if !types::is_item_keyword(keyword, type_key) {
        warn!(keyword, type_key, "skipping item node entirely: unknown keyword for type");
        return false;
    }

    let mut metadata = BTreeMap::new();
    for (key, value) in node.attributes() {
        if lexical::is_metadata_key(key) {
            metadata.insert(key.to_string(), value.to_string());
        } else {
            warn!(keyword, attribute = key, "skipping attribute: invalid metadata key format");
        }
    }

    if db.add_item(type_key, metadata).is_none() {
        warn!(type_key, "item rejected: empty label, check item metadata");
        return false;
    }
    true
}
