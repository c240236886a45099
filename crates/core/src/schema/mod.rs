//! Schema module for rowsmith.
//!
//! Record schemas describe the reflected layout of table rows and nested
//! structs: every field's name, type descriptor and byte offset.

mod descriptor;
mod field;
mod record;

pub use descriptor::{EnumDef, TypeDescriptor};
pub use field::{FieldDescriptor, ResolvedField};
pub use record::{RecordSchema, RecordSchemaBuilder};
