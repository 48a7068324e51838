//! Koipond Inventory
//!
//! Loads a hand-authored XML inventory (books, games, equipment, ...) into a
//! read-only, indexed store and composes grouped, ordered catalogues from it.
//!
//! ## Features
//!
//! - **Streaming Decoder**: A fixed grammar walked element by element
//! - **Two-Tier Validation**: Header errors abort the load, bad records are skipped
//! - **Indices**: Items by id, by declared collection and by tag
//! - **Type Registry**: Per-type label keys, item keywords, ordering and headings
//!
//! ## Document
//!
//! ```text
//! <koidatabase created lastModified>
//! ├── <koitypes enabled>            enabled types + <metadata key default/>
//! ├── <collections hidden>          <collection key name/>
//! └── <data>
//!     └── <TYPE>                    e.g. <books>
//!         └── <ITEM attr=.../>      e.g. <book title="Dune"/>, <item .../>
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use koipond::Database;
//!
//! let file = File::open("data/koidata.xml")?;
//! let db = Database::load(BufReader::new(file))?;
//! if let Some(catalogue) = db.collection_catalogue("favorites") {
//!     for (heading, items) in catalogue.groups() {
//!         println!("{}: {}", heading, items.len());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalogue;
pub mod config;
pub mod database;
pub mod decoder;
pub mod error;
pub mod item;
pub mod lexical;
pub mod reader;
pub mod sorting;
pub mod types;
pub mod view;

pub use catalogue::Catalogue;
pub use config::InventoryConfig;
pub use database::Database;
pub use error::{InventoryError, Result};
pub use item::{Item, ItemId};
pub use sorting::SortStrategy;
pub use types::{group_label, type_label, TypeSpec};
pub use view::DataView;
