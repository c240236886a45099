//! Typed record memory.
//!
//! Records live in raw aligned buffers described by a
//! [`RecordSchema`](rowsmith_core::schema::RecordSchema). This crate
//! provides the construct / copy / destroy primitives that make such a
//! buffer behave like an owned Rust value:
//!
//! - [`ops`]: per-descriptor operations on raw memory
//! - [`UninitRecord`] / [`RecordBuffer`]: allocation and ownership
//! - [`FieldValue`]: owned snapshots for inspection
//!
//! # Example
//!
//! ```rust
//! use rowsmith_core::schema::{RecordSchemaBuilder, TypeDescriptor};
//! use rowsmith_memory::{FieldValue, RecordBuffer};
//!
//! let schema = RecordSchemaBuilder::new("ItemRow")
//!     .unwrap()
//!     .add_field("Damage", TypeDescriptor::Int32)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let row = RecordBuffer::new(schema).unwrap();
//! assert_eq!(row.read_field("Damage"), Some(FieldValue::Int32(0)));
//! ```

mod buffer;
pub mod ops;
mod snapshot;

pub use buffer::{RawAllocator, RecordBuffer, SystemAllocator, UninitRecord};
pub use snapshot::{read_struct, read_value, FieldValue};
