//! Owned snapshots of record contents.

use crate::buffer::RecordBuffer;
use rowsmith_core::schema::{RecordSchema, TypeDescriptor};
use rowsmith_core::{MapLayout, Name, ObjectHandle, ScriptArray, ScriptMap, SoftObjectPath, Text};

/// A field value copied out of record memory.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Int32(i32),
    Float32(f32),
    Float64(f64),
    Boolean(bool),
    Text(Text),
    String(String),
    Name(Name),
    Enum(u8),
    SoftReference(SoftObjectPath),
    ObjectReference(Option<ObjectHandle>),
    /// Fields in declaration order.
    Struct(Vec<(String, FieldValue)>),
    List(Vec<FieldValue>),
    /// Entries in storage order.
    Map(Vec<(FieldValue, FieldValue)>),
}

impl FieldValue {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            FieldValue::Float32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the contents of a String field.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<Name> {
        match self {
            FieldValue::Name(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<u8> {
        match self {
            FieldValue::Enum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_soft_reference(&self) -> Option<&SoftObjectPath> {
        match self {
            FieldValue::SoftReference(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the handle of an object reference field (`Some(None)` when unset).
    pub fn as_object(&self) -> Option<Option<ObjectHandle>> {
        match self {
            FieldValue::ObjectReference(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(FieldValue, FieldValue)]> {
        match self {
            FieldValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a struct member by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        match self {
            FieldValue::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Looks up a map value whose key is `key`.
    pub fn get(&self, key: &FieldValue) -> Option<&FieldValue> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Copies a value out of memory.
///
/// # Safety
///
/// `src` must hold a live value of `descriptor`.
pub unsafe fn read_value(descriptor: &TypeDescriptor, src: *const u8) -> FieldValue {
    match descriptor {
        TypeDescriptor::Int32 => FieldValue::Int32(*src.cast::<i32>()),
        TypeDescriptor::Float32 => FieldValue::Float32(*src.cast::<f32>()),
        TypeDescriptor::Float64 => FieldValue::Float64(*src.cast::<f64>()),
        TypeDescriptor::Boolean => FieldValue::Boolean(*src.cast::<bool>()),
        TypeDescriptor::Text => FieldValue::Text((*src.cast::<Text>()).clone()),
        TypeDescriptor::String => FieldValue::String((*src.cast::<String>()).clone()),
        TypeDescriptor::Name => FieldValue::Name(*src.cast::<Name>()),
        TypeDescriptor::Enum(_) => FieldValue::Enum(*src),
        TypeDescriptor::SoftReference => {
            FieldValue::SoftReference((*src.cast::<SoftObjectPath>()).clone())
        }
        TypeDescriptor::ObjectReference => {
            FieldValue::ObjectReference(*src.cast::<Option<ObjectHandle>>())
        }
        TypeDescriptor::Struct(schema) => read_struct(schema, src),
        TypeDescriptor::List(element) => {
            let array = &*src.cast::<ScriptArray>();
            let layout = element.layout();
            FieldValue::List(
                (0..array.len())
                    .map(|i| read_value(element, array.element_ptr(i, layout)))
                    .collect(),
            )
        }
        TypeDescriptor::Map { key, value } => {
            let map = &*src.cast::<ScriptMap>();
            let layout = MapLayout::new(key.layout(), value.layout());
            FieldValue::Map(
                (0..map.len())
                    .map(|i| {
                        (
                            read_value(key, map.key_ptr(i, layout)),
                            read_value(value, map.value_ptr(i, layout)),
                        )
                    })
                    .collect(),
            )
        }
    }
}

/// Copies every field of a record out of memory.
///
/// # Safety
///
/// `src` must hold a live record of `schema`.
pub unsafe fn read_struct(schema: &RecordSchema, src: *const u8) -> FieldValue {
    FieldValue::Struct(
        schema
            .fields()
            .iter()
            .map(|f| {
                (
                    f.name().to_string(),
                    read_value(f.descriptor(), src.add(f.offset())),
                )
            })
            .collect(),
    )
}

impl RecordBuffer {
    /// Reads one field by dotted path.
    pub fn read_field(&self, path: &str) -> Option<FieldValue> {
        self.with_field(path, |ptr, desc| unsafe { read_value(desc, ptr) })
    }

    /// Reads the whole record as a `FieldValue::Struct`.
    pub fn snapshot(&self) -> FieldValue {
        unsafe { read_struct(self.schema(), self.as_ptr()) }
    }
}
