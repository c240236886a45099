//! rowsmith core - types shared by every rowsmith crate.
//!
//! - `DynamicValue`: values handed over by the scripting host
//! - `Name` / `NameTable`: interned identifiers
//! - `Text`, `SoftObjectPath`, `ObjectHandle`: in-memory field representations
//! - `ScriptArray` / `ScriptMap`: untyped container storage
//! - `schema`: record schemas and type descriptors
//! - `Error`: operation-level failures
//!
//! # Example
//!
//! ```rust
//! use rowsmith_core::schema::{RecordSchemaBuilder, TypeDescriptor};
//! use rowsmith_core::{DynamicValue, PropertyKind};
//!
//! let schema = RecordSchemaBuilder::new("ItemRow")
//!     .unwrap()
//!     .add_field("Name", TypeDescriptor::Text)
//!     .unwrap()
//!     .add_field("Damage", TypeDescriptor::Int32)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.field("Damage").unwrap().kind(), PropertyKind::Int32);
//!
//! let fields = DynamicValue::mapping([("Damage", 10)]);
//! assert_eq!(fields.table_len(), Some(1));
//! ```

pub mod container;
mod error;
mod name;
mod object;
pub mod schema;
mod types;
mod value;

pub use container::{align_up, ElementLayout, MapLayout, ScriptArray, ScriptMap};
pub use error::{Error, Result};
pub use name::{Name, NameTable};
pub use object::{ObjectHandle, ObjectResolver, SoftObjectPath, Text};
pub use types::PropertyKind;
pub use value::{DynamicValue, Mapping};
