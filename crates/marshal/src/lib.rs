//! rowsmith marshal - writes dynamic value trees into reflected records.
//!
//! - [`ValueWriter`]: the recursive, kind-driven dispatcher
//! - [`builders`]: whole-value rebuilds of list and map fields
//! - [`FieldIssue`]: a write that was skipped instead of failing the row
//!
//! # Example
//!
//! ```rust
//! use rowsmith_core::schema::{RecordSchemaBuilder, TypeDescriptor};
//! use rowsmith_core::{DynamicValue, NameTable, ObjectHandle, ObjectResolver};
//! use rowsmith_marshal::ValueWriter;
//! use rowsmith_memory::{FieldValue, RecordBuffer};
//!
//! struct NoObjects;
//! impl ObjectResolver for NoObjects {
//!     fn find_object(&self, _path: &str) -> Option<ObjectHandle> {
//!         None
//!     }
//! }
//!
//! let schema = RecordSchemaBuilder::new("ItemRow")
//!     .unwrap()
//!     .add_field("Damage", TypeDescriptor::Int32)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let mut row = RecordBuffer::new(schema).unwrap();
//!
//! let names = NameTable::new();
//! let mut writer = ValueWriter::new(&names, &NoObjects);
//! writer.write_field(&mut row, "Damage", &DynamicValue::Integer(10));
//! assert!(writer.issues().is_empty());
//! assert_eq!(row.read_field("Damage"), Some(FieldValue::Int32(10)));
//! ```

pub mod builders;
mod issue;
mod writer;

pub use builders::{rebuild_list, rebuild_map, MapEntries};
pub use issue::{FieldIssue, IssueReason};
pub use writer::ValueWriter;
