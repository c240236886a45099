//! Typed operations on schema-described memory.
//!
//! These functions are the construct / copy / destruct primitives of the
//! reflection layer. Every value kind maps to one concrete Rust type:
//!
//! ```text
//! Int32 → i32          Float32 → f32           Float64 → f64
//! Boolean → bool       Text → Text             String → String
//! Name → Name          Enum → u8               SoftReference → SoftObjectPath
//! ObjectReference → Option<ObjectHandle>
//! Struct → fields at their offsets
//! List → ScriptArray   Map → ScriptMap
//! ```
//!
//! Construction zero-fills first, so padding bytes are deterministic and
//! every kind whose zero pattern is valid (numbers, bool, `Name::NONE`,
//! `None` handles) needs no further work.

use core::ptr;
use rowsmith_core::schema::{RecordSchema, TypeDescriptor};
use rowsmith_core::{MapLayout, Name, ObjectHandle, ScriptArray, ScriptMap, SoftObjectPath, Text};

/// Constructs a default value in place.
///
/// # Safety
///
/// `dst` must be valid for writes of `descriptor.size()` bytes, aligned to
/// `descriptor.align()`, and must not hold a live value (it is overwritten
/// without being dropped).
pub unsafe fn initialize_value(descriptor: &TypeDescriptor, dst: *mut u8) {
    match descriptor {
        TypeDescriptor::Int32 => ptr::write(dst.cast::<i32>(), 0),
        TypeDescriptor::Float32 => ptr::write(dst.cast::<f32>(), 0.0),
        TypeDescriptor::Float64 => ptr::write(dst.cast::<f64>(), 0.0),
        TypeDescriptor::Boolean => ptr::write(dst.cast::<bool>(), false),
        TypeDescriptor::Text => ptr::write(dst.cast::<Text>(), Text::default()),
        TypeDescriptor::String => ptr::write(dst.cast::<String>(), String::new()),
        TypeDescriptor::Name => ptr::write(dst.cast::<Name>(), Name::NONE),
        TypeDescriptor::Enum(_) => ptr::write(dst, 0u8),
        TypeDescriptor::SoftReference => {
            ptr::write(dst.cast::<SoftObjectPath>(), SoftObjectPath::default())
        }
        TypeDescriptor::ObjectReference => ptr::write(dst.cast::<Option<ObjectHandle>>(), None),
        TypeDescriptor::Struct(schema) => initialize_struct(schema, dst),
        TypeDescriptor::List(_) => ptr::write(dst.cast::<ScriptArray>(), ScriptArray::new()),
        TypeDescriptor::Map { .. } => ptr::write(dst.cast::<ScriptMap>(), ScriptMap::new()),
    }
}

/// Constructs every field of a record in place.
///
/// # Safety
///
/// Same contract as [`initialize_value`] for `schema.size()` bytes.
pub unsafe fn initialize_struct(schema: &RecordSchema, dst: *mut u8) {
    ptr::write_bytes(dst, 0, schema.size());
    for field in schema.fields() {
        initialize_value(field.descriptor(), dst.add(field.offset()));
    }
}

/// Destroys a value in place, releasing everything it owns.
///
/// # Safety
///
/// `dst` must hold a live value of `descriptor`. Afterwards the memory is
/// uninitialized.
pub unsafe fn destroy_value(descriptor: &TypeDescriptor, dst: *mut u8) {
    match descriptor {
        TypeDescriptor::Int32
        | TypeDescriptor::Float32
        | TypeDescriptor::Float64
        | TypeDescriptor::Boolean
        | TypeDescriptor::Name
        | TypeDescriptor::Enum(_)
        | TypeDescriptor::ObjectReference => {}
        TypeDescriptor::Text => ptr::drop_in_place(dst.cast::<Text>()),
        TypeDescriptor::String => ptr::drop_in_place(dst.cast::<String>()),
        TypeDescriptor::SoftReference => ptr::drop_in_place(dst.cast::<SoftObjectPath>()),
        TypeDescriptor::Struct(schema) => destroy_struct(schema, dst),
        TypeDescriptor::List(element) => clear_array(element, &mut *dst.cast::<ScriptArray>(), 0),
        TypeDescriptor::Map { key, value } => {
            clear_map(key, value, &mut *dst.cast::<ScriptMap>(), 0)
        }
    }
}

/// Destroys every field of a record in place.
///
/// # Safety
///
/// Same contract as [`destroy_value`].
pub unsafe fn destroy_struct(schema: &RecordSchema, dst: *mut u8) {
    for field in schema.fields() {
        destroy_value(field.descriptor(), dst.add(field.offset()));
    }
}

/// Destroys all elements of a list and re-reserves exactly `slack` slots.
///
/// # Safety
///
/// `array` must hold live elements of `element`.
pub unsafe fn clear_array(element: &TypeDescriptor, array: &mut ScriptArray, slack: usize) {
    let layout = element.layout();
    for index in 0..array.len() {
        destroy_value(element, array.element_ptr(index, layout));
    }
    array.empty(slack, layout);
}

/// Destroys all entries of a map and re-reserves exactly `slack` slots.
///
/// # Safety
///
/// `map` must hold live entries of `key` / `value`.
pub unsafe fn clear_map(
    key: &TypeDescriptor,
    value: &TypeDescriptor,
    map: &mut ScriptMap,
    slack: usize,
) {
    let layout = MapLayout::new(key.layout(), value.layout());
    for index in 0..map.len() {
        destroy_value(key, map.key_ptr(index, layout));
        destroy_value(value, map.value_ptr(index, layout));
    }
    map.empty(slack, layout);
}

/// Assigns `src` to `dst` with value semantics.
///
/// Owning kinds are deep-copied: strings are cloned and containers get
/// their own element storage, so the two values never share memory.
///
/// # Safety
///
/// Both pointers must hold live values of `descriptor`.
pub unsafe fn copy_value(descriptor: &TypeDescriptor, dst: *mut u8, src: *const u8) {
    if ptr::eq(dst as *const u8, src) {
        return;
    }
    match descriptor {
        TypeDescriptor::Int32 => *dst.cast::<i32>() = *src.cast::<i32>(),
        TypeDescriptor::Float32 => *dst.cast::<f32>() = *src.cast::<f32>(),
        TypeDescriptor::Float64 => *dst.cast::<f64>() = *src.cast::<f64>(),
        TypeDescriptor::Boolean => *dst.cast::<bool>() = *src.cast::<bool>(),
        TypeDescriptor::Name => *dst.cast::<Name>() = *src.cast::<Name>(),
        TypeDescriptor::Enum(_) => *dst = *src,
        TypeDescriptor::ObjectReference => {
            *dst.cast::<Option<ObjectHandle>>() = *src.cast::<Option<ObjectHandle>>()
        }
        TypeDescriptor::Text => (*dst.cast::<Text>()).clone_from(&*src.cast::<Text>()),
        TypeDescriptor::String => (*dst.cast::<String>()).clone_from(&*src.cast::<String>()),
        TypeDescriptor::SoftReference => {
            (*dst.cast::<SoftObjectPath>()).clone_from(&*src.cast::<SoftObjectPath>())
        }
        TypeDescriptor::Struct(schema) => copy_struct(schema, dst, src),
        TypeDescriptor::List(element) => {
            let source = &*src.cast::<ScriptArray>();
            let target = &mut *dst.cast::<ScriptArray>();
            let count = source.len();
            clear_array(element, target, count);
            if count == 0 {
                return;
            }
            let layout = element.layout();
            target.add_zeroed(count, layout);
            for index in 0..count {
                let slot = target.element_ptr(index, layout);
                initialize_value(element, slot);
                copy_value(element, slot, source.element_ptr(index, layout));
            }
        }
        TypeDescriptor::Map { key, value } => {
            let source = &*src.cast::<ScriptMap>();
            let target = &mut *dst.cast::<ScriptMap>();
            let count = source.len();
            clear_map(key, value, target, count);
            let layout = MapLayout::new(key.layout(), value.layout());
            for index in 0..count {
                let entry = target.add_uninitialized(layout);
                let key_slot = target.key_ptr(entry, layout);
                let value_slot = target.value_ptr(entry, layout);
                initialize_value(key, key_slot);
                initialize_value(value, value_slot);
                copy_value(key, key_slot, source.key_ptr(index, layout));
                copy_value(value, value_slot, source.value_ptr(index, layout));
            }
        }
    }
}

/// Assigns every field of `src` to `dst`.
///
/// # Safety
///
/// Same contract as [`copy_value`].
pub unsafe fn copy_struct(schema: &RecordSchema, dst: *mut u8, src: *const u8) {
    for field in schema.fields() {
        copy_value(
            field.descriptor(),
            dst.add(field.offset()),
            src.add(field.offset()),
        );
    }
}
