//! Record schema: the reflected layout of a struct or table row.

use super::descriptor::TypeDescriptor;
use super::field::{FieldDescriptor, ResolvedField};
use crate::container::align_up;
use crate::error::{Error, Result};
use std::alloc::Layout;
use std::sync::Arc;

/// Layout and field table of a record type.
///
/// Fields are laid out C-style in declaration order. A schema built with
/// [`RecordSchemaBuilder::extends`] starts with its parent's fields, so
/// lookups cover the whole inheritance chain.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSchema {
    name: String,
    parent: Option<String>,
    fields: Vec<FieldDescriptor>,
    size: usize,
    align: usize,
}

impl RecordSchema {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the parent schema, if this one extends another.
    #[inline]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Total byte size, padding included.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Minimum alignment.
    #[inline]
    pub fn align(&self) -> usize {
        self.align
    }

    /// Allocation layout for one record.
    pub fn memory_layout(&self) -> Result<Layout> {
        Layout::from_size_align(self.size, self.align)
            .map_err(|_| Error::invalid_schema(format!("Invalid layout for {}", self.name)))
    }

    /// Finds a direct field by name, searching the inheritance chain.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Resolves a dotted path (`Stats.Damage`) through nested structs.
    pub fn resolve(&self, path: &str) -> Option<ResolvedField<'_>> {
        let mut segments = path.split('.');
        let first = self.field(segments.next()?)?;
        let mut resolved = ResolvedField::new(first, first.offset());
        for segment in segments {
            let nested = resolved.descriptor().as_struct()?;
            let field = nested.field(segment)?;
            resolved = ResolvedField::new(field, resolved.offset() + field.offset());
        }
        Some(resolved)
    }

    /// Returns true if records of both schemas can be copied into each other.
    pub fn is_compatible_with(&self, other: &RecordSchema) -> bool {
        core::ptr::eq(self, other) || self == other
    }
}

/// Builder for record schemas.
pub struct RecordSchemaBuilder {
    name: String,
    parent: Option<String>,
    fields: Vec<(String, TypeDescriptor)>,
}

impl RecordSchemaBuilder {
    /// Creates a new builder.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        Ok(Self {
            name,
            parent: None,
            fields: Vec::new(),
        })
    }

    /// Validates a name follows naming rules.
    ///
    /// Dots are reserved for nested lookups.
    fn check_naming_rules(name: &str) -> Result<()> {
        let Some(first) = name.chars().next() else {
            return Err(Error::invalid_schema("Name cannot be empty"));
        };
        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(Error::invalid_schema(format!(
                "Name must start with letter or underscore: {}",
                name
            )));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::invalid_schema(format!(
                "Name contains invalid characters: {}",
                name
            )));
        }
        Ok(())
    }

    /// Inherits the fields of `parent`. Must be called before adding fields.
    pub fn extends(mut self, parent: &RecordSchema) -> Result<Self> {
        if !self.fields.is_empty() || self.parent.is_some() {
            return Err(Error::invalid_schema(format!(
                "{} must extend its parent before declaring fields",
                self.name
            )));
        }
        self.parent = Some(parent.name().to_string());
        self.fields = parent
            .fields()
            .iter()
            .map(|f| (f.name().to_string(), f.descriptor().clone()))
            .collect();
        Ok(self)
    }

    /// Adds a field.
    pub fn add_field(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        if self.fields.iter().any(|(n, _)| *n == name) {
            return Err(Error::invalid_schema(format!("Field already exists: {}", name)));
        }
        if let Some(nested) = descriptor.as_struct() {
            if nested.name() == self.name {
                return Err(Error::invalid_schema(format!(
                    "{} cannot contain itself",
                    self.name
                )));
            }
        }
        self.fields.push((name, descriptor));
        Ok(self)
    }

    /// Computes offsets and builds the schema.
    pub fn build(self) -> Result<Arc<RecordSchema>> {
        let fields: Vec<FieldDescriptor> = self
            .fields
            .into_iter()
            .scan(0usize, |offset, (name, descriptor)| {
                let start = align_up(*offset, descriptor.align());
                *offset = start + descriptor.size();
                Some(FieldDescriptor::new(name, descriptor, start))
            })
            .collect();

        let align = fields
            .iter()
            .map(|f| f.descriptor().align())
            .max()
            .unwrap_or(1);
        let end = fields.last().map(|f| f.offset() + f.size()).unwrap_or(0);
        // Empty records still occupy one byte.
        let size = align_up(end.max(1), align);

        let schema = RecordSchema {
            name: self.name,
            parent: self.parent,
            fields,
            size,
            align,
        };
        schema.memory_layout()?;
        Ok(Arc::new(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyKind;

    fn stats_schema() -> Arc<RecordSchema> {
        RecordSchemaBuilder::new("ItemStats")
            .unwrap()
            .add_field("Damage", TypeDescriptor::Int32)
            .unwrap()
            .add_field("Speed", TypeDescriptor::Float32)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_layout_offsets() {
        let schema = RecordSchemaBuilder::new("Row")
            .unwrap()
            .add_field("Flag", TypeDescriptor::Boolean)
            .unwrap()
            .add_field("Weight", TypeDescriptor::Float64)
            .unwrap()
            .add_field("Count", TypeDescriptor::Int32)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(schema.field("Flag").unwrap().offset(), 0);
        assert_eq!(schema.field("Weight").unwrap().offset(), 8);
        assert_eq!(schema.field("Count").unwrap().offset(), 16);
        assert_eq!(schema.align(), 8);
        assert_eq!(schema.size(), 24);
    }

    #[test]
    fn test_empty_schema_has_size() {
        let schema = RecordSchemaBuilder::new("Empty").unwrap().build().unwrap();
        assert_eq!(schema.size(), 1);
        assert_eq!(schema.align(), 1);
        assert!(schema.memory_layout().is_ok());
    }

    #[test]
    fn test_resolve_dotted_path() {
        let stats = stats_schema();
        let row = RecordSchemaBuilder::new("ItemRow")
            .unwrap()
            .add_field("Count", TypeDescriptor::Int32)
            .unwrap()
            .add_field("Stats", TypeDescriptor::Struct(stats.clone()))
            .unwrap()
            .build()
            .unwrap();

        let resolved = row.resolve("Stats.Speed").unwrap();
        assert_eq!(resolved.descriptor().kind(), PropertyKind::Float32);
        let stats_offset = row.field("Stats").unwrap().offset();
        assert_eq!(resolved.offset(), stats_offset + stats.field("Speed").unwrap().offset());

        assert!(row.resolve("Stats.Missing").is_none());
        assert!(row.resolve("Count.Inner").is_none());
        assert_eq!(row.resolve("Count").unwrap().offset(), 0);
    }

    #[test]
    fn test_extends_parent_chain() {
        let base = RecordSchemaBuilder::new("TableRowBase")
            .unwrap()
            .add_field("Id", TypeDescriptor::Name)
            .unwrap()
            .build()
            .unwrap();
        let row = RecordSchemaBuilder::new("ItemRow")
            .unwrap()
            .extends(&base)
            .unwrap()
            .add_field("Damage", TypeDescriptor::Int32)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(row.parent(), Some("TableRowBase"));
        assert_eq!(row.field("Id").unwrap().offset(), 0);
        assert!(row.field("Damage").is_some());
    }

    #[test]
    fn test_invalid_field_names() {
        let builder = RecordSchemaBuilder::new("Row").unwrap();
        assert!(builder.add_field("Stats.Damage", TypeDescriptor::Int32).is_err());

        let result = RecordSchemaBuilder::new("Row")
            .unwrap()
            .add_field("Id", TypeDescriptor::Int32)
            .unwrap()
            .add_field("Id", TypeDescriptor::Int32);
        assert!(result.is_err());
        assert!(RecordSchemaBuilder::new("").is_err());
    }

    #[test]
    fn test_compatibility() {
        let a = stats_schema();
        let b = stats_schema();
        assert!(a.is_compatible_with(&b));
        let other = RecordSchemaBuilder::new("Other").unwrap().build().unwrap();
        assert!(!a.is_compatible_with(&other));
    }
}
