//! Field definition for record schemas.

use super::descriptor::TypeDescriptor;
use crate::types::PropertyKind;

/// One field of a record: name, type and byte offset within the record.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    descriptor: TypeDescriptor,
    offset: usize,
}

impl FieldDescriptor {
    pub(crate) fn new(name: impl Into<String>, descriptor: TypeDescriptor, offset: usize) -> Self {
        Self {
            name: name.into(),
            descriptor,
            offset,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn kind(&self) -> PropertyKind {
        self.descriptor.kind()
    }

    /// Byte offset relative to the start of the owning record.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.descriptor.size()
    }
}

/// A field located from the root of a record, possibly through nested
/// structs (`Stats.Damage`).
#[derive(Clone, Copy, Debug)]
pub struct ResolvedField<'a> {
    field: &'a FieldDescriptor,
    offset: usize,
}

impl<'a> ResolvedField<'a> {
    pub(crate) fn new(field: &'a FieldDescriptor, offset: usize) -> Self {
        Self { field, offset }
    }

    /// The innermost field.
    #[inline]
    pub fn field(&self) -> &'a FieldDescriptor {
        self.field
    }

    #[inline]
    pub fn descriptor(&self) -> &'a TypeDescriptor {
        self.field.descriptor()
    }

    /// Byte offset relative to the root record.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}
