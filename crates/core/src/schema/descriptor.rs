//! Type descriptors for reflected properties.

use super::record::RecordSchema;
use crate::container::{ElementLayout, MapLayout, ScriptArray, ScriptMap};
use crate::name::Name;
use crate::object::{ObjectHandle, SoftObjectPath, Text};
use crate::types::PropertyKind;
use core::mem::{align_of, size_of};
use std::sync::Arc;

/// An enumeration backed by a u8 discriminant.
///
/// Variant names are informational only; writes are not validated against
/// them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDef {
    name: String,
    variants: Vec<String>,
}

impl EnumDef {
    /// Creates an enum whose variants take discriminants 0, 1, 2, ...
    pub fn new<S: Into<String>>(name: impl Into<String>, variants: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the variant name for a discriminant.
    pub fn variant_name(&self, value: u8) -> Option<&str> {
        self.variants.get(value as usize).map(String::as_str)
    }

    /// Returns the discriminant for a variant name.
    pub fn value_of(&self, variant: &str) -> Option<u8> {
        self.variants
            .iter()
            .position(|v| v == variant)
            .and_then(|i| u8::try_from(i).ok())
    }
}

/// Full description of a property's type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDescriptor {
    Int32,
    Float32,
    Float64,
    Boolean,
    Text,
    String,
    Name,
    Enum(Arc<EnumDef>),
    SoftReference,
    ObjectReference,
    Struct(Arc<RecordSchema>),
    List(Box<TypeDescriptor>),
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Creates a list descriptor.
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    /// Creates a map descriptor.
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates an enum descriptor.
    pub fn enumeration(def: EnumDef) -> Self {
        TypeDescriptor::Enum(Arc::new(def))
    }

    /// Returns the kind tag.
    pub fn kind(&self) -> PropertyKind {
        match self {
            TypeDescriptor::Int32 => PropertyKind::Int32,
            TypeDescriptor::Float32 => PropertyKind::Float32,
            TypeDescriptor::Float64 => PropertyKind::Float64,
            TypeDescriptor::Boolean => PropertyKind::Boolean,
            TypeDescriptor::Text => PropertyKind::Text,
            TypeDescriptor::String => PropertyKind::String,
            TypeDescriptor::Name => PropertyKind::Name,
            TypeDescriptor::Enum(_) => PropertyKind::Enum,
            TypeDescriptor::SoftReference => PropertyKind::SoftReference,
            TypeDescriptor::ObjectReference => PropertyKind::ObjectReference,
            TypeDescriptor::Struct(_) => PropertyKind::Struct,
            TypeDescriptor::List(_) => PropertyKind::List,
            TypeDescriptor::Map { .. } => PropertyKind::Map,
        }
    }

    /// Byte size of one value.
    pub fn size(&self) -> usize {
        match self {
            TypeDescriptor::Int32 => size_of::<i32>(),
            TypeDescriptor::Float32 => size_of::<f32>(),
            TypeDescriptor::Float64 => size_of::<f64>(),
            TypeDescriptor::Boolean => size_of::<bool>(),
            TypeDescriptor::Text => size_of::<Text>(),
            TypeDescriptor::String => size_of::<String>(),
            TypeDescriptor::Name => size_of::<Name>(),
            TypeDescriptor::Enum(_) => size_of::<u8>(),
            TypeDescriptor::SoftReference => size_of::<SoftObjectPath>(),
            TypeDescriptor::ObjectReference => size_of::<Option<ObjectHandle>>(),
            TypeDescriptor::Struct(schema) => schema.size(),
            TypeDescriptor::List(_) => size_of::<ScriptArray>(),
            TypeDescriptor::Map { .. } => size_of::<ScriptMap>(),
        }
    }

    /// Minimum alignment of one value.
    pub fn align(&self) -> usize {
        match self {
            TypeDescriptor::Int32 => align_of::<i32>(),
            TypeDescriptor::Float32 => align_of::<f32>(),
            TypeDescriptor::Float64 => align_of::<f64>(),
            TypeDescriptor::Boolean => align_of::<bool>(),
            TypeDescriptor::Text => align_of::<Text>(),
            TypeDescriptor::String => align_of::<String>(),
            TypeDescriptor::Name => align_of::<Name>(),
            TypeDescriptor::Enum(_) => align_of::<u8>(),
            TypeDescriptor::SoftReference => align_of::<SoftObjectPath>(),
            TypeDescriptor::ObjectReference => align_of::<Option<ObjectHandle>>(),
            TypeDescriptor::Struct(schema) => schema.align(),
            TypeDescriptor::List(_) => align_of::<ScriptArray>(),
            TypeDescriptor::Map { .. } => align_of::<ScriptMap>(),
        }
    }

    /// Size and alignment as a container element.
    #[inline]
    pub fn layout(&self) -> ElementLayout {
        ElementLayout::new(self.size(), self.align())
    }

    /// Entry layout for a map descriptor.
    pub fn map_layout(&self) -> Option<MapLayout> {
        match self {
            TypeDescriptor::Map { key, value } => Some(MapLayout::new(key.layout(), value.layout())),
            _ => None,
        }
    }

    /// Returns the nested schema of a struct descriptor.
    pub fn as_struct(&self) -> Option<&Arc<RecordSchema>> {
        match self {
            TypeDescriptor::Struct(schema) => Some(schema),
            _ => None,
        }
    }

    /// Host-style type spelling, e.g. `TMap<FName, FRecipe>`.
    pub fn describe(&self) -> String {
        match self {
            TypeDescriptor::Enum(def) => def.name().to_string(),
            TypeDescriptor::Struct(schema) => schema.name().to_string(),
            TypeDescriptor::List(element) => format!("TArray<{}>", element.describe()),
            TypeDescriptor::Map { key, value } => {
                format!("TMap<{}, {}>", key.describe(), value.describe())
            }
            other => other.kind().type_name().to_string(),
        }
    }
}
