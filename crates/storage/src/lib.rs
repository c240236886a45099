//! rowsmith storage - data tables and the host object registry.
//!
//! This crate provides the storage layer including:
//!
//! - `DataTable`: rows keyed by a unique `Name`
//! - `ObjectRegistry`: path → object and path → table lookup
//! - `TableLocator`: the table lookup seam used by the row lifecycle
//! - `TableCache`: per logical name memo of table handles and row schemas
//!
//! # Example
//!
//! ```rust
//! use rowsmith_core::schema::{RecordSchemaBuilder, TypeDescriptor};
//! use rowsmith_memory::RecordBuffer;
//! use rowsmith_storage::{ObjectRegistry, TableCache};
//!
//! let schema = RecordSchemaBuilder::new("ItemRow")
//!     .unwrap()
//!     .add_field("Damage", TypeDescriptor::Int32)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let registry = ObjectRegistry::default();
//! registry.create_table("/Game/Data/DT_Items", schema.clone()).unwrap();
//!
//! let mut cache = TableCache::new();
//! let table = cache.resolve_table("Items", "/Game/Data/DT_Items", &registry).unwrap();
//!
//! let key = registry.names().intern("Sword01");
//! table.write().add_row(key, &RecordBuffer::new(schema).unwrap()).unwrap();
//! assert_eq!(table.read().len(), 1);
//! ```

pub mod cache;
pub mod locator;
pub mod objects;
pub mod table;

pub use cache::TableCache;
pub use locator::{TableHandle, TableLocator};
pub use objects::ObjectRegistry;
pub use table::DataTable;
