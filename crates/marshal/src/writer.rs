//! The value writer: dynamic values into typed record memory.
//!
//! Dispatch is on the destination's declared kind. The dynamic value must
//! have the matching shape, otherwise the write is skipped and recorded as
//! a [`FieldIssue`]; a skipped write never fails the enclosing operation.
//!
//! | kind            | accepted value                        |
//! |-----------------|---------------------------------------|
//! | Int32           | Integer (truncated)                   |
//! | Float32/Float64 | Integer or Number                     |
//! | Boolean         | Boolean                               |
//! | Text/String     | String                                |
//! | Name            | String (interned)                     |
//! | Enum            | Integer or Number (wrapped to u8)     |
//! | SoftReference   | String (stored unresolved)            |
//! | ObjectReference | String (resolved, unset if not found) |
//! | Struct          | table with string keys                |
//! | List            | table, values in order                |
//! | Map             | table; Name keys and Struct values    |

use crate::builders::{rebuild_list, rebuild_map};
use crate::issue::{FieldIssue, IssueReason};
use rowsmith_core::schema::{RecordSchema, TypeDescriptor};
use rowsmith_core::{DynamicValue, Name, NameTable, ObjectHandle, ObjectResolver, SoftObjectPath, Text};
use rowsmith_memory::RecordBuffer;
use tracing::debug;

/// Writes dynamic values into record memory, collecting skipped writes.
pub struct ValueWriter<'a> {
    names: &'a NameTable,
    objects: &'a dyn ObjectResolver,
    issues: Vec<FieldIssue>,
}

impl<'a> ValueWriter<'a> {
    pub fn new(names: &'a NameTable, objects: &'a dyn ObjectResolver) -> Self {
        Self {
            names,
            objects,
            issues: Vec::new(),
        }
    }

    /// Writes skipped so far.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }

    /// Writes `value` into the field at `path` (dotted for nested structs).
    ///
    /// Returns false if the path does not name a field; that is recorded as
    /// an [`IssueReason::UnknownField`] issue.
    pub fn write_field(&mut self, record: &mut RecordBuffer, path: &str, value: &DynamicValue) -> bool {
        let written = record.with_field_mut(path, |ptr, descriptor| unsafe {
            self.write(value, ptr.as_ptr(), descriptor, path)
        });
        if written.is_none() {
            self.skip(path, IssueReason::UnknownField);
        }
        written.is_some()
    }

    /// Writes `value` at `dst` as a `descriptor`.
    ///
    /// # Safety
    ///
    /// `dst` must hold a live value of `descriptor`.
    pub unsafe fn write(
        &mut self,
        value: &DynamicValue,
        dst: *mut u8,
        descriptor: &TypeDescriptor,
        path: &str,
    ) {
        match descriptor {
            TypeDescriptor::Int32 => match value.as_integer() {
                Some(n) => {
                    *dst.cast::<i32>() = n as i32;
                    debug!(field = path, value = n, "set int32 property");
                }
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::Float32 => match value.as_number() {
                Some(n) => {
                    *dst.cast::<f32>() = n as f32;
                    debug!(field = path, value = n, "set float property");
                }
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::Float64 => match value.as_number() {
                Some(n) => {
                    *dst.cast::<f64>() = n;
                    debug!(field = path, value = n, "set double property");
                }
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::Boolean => match value.as_bool() {
                Some(b) => {
                    *dst.cast::<bool>() = b;
                    debug!(field = path, value = b, "set bool property");
                }
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::Text => match value.as_str() {
                Some(s) => {
                    *dst.cast::<Text>() = Text::invariant(s);
                    debug!(field = path, value = s, "set FText property");
                }
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::String => match value.as_str() {
                Some(s) => {
                    let target = &mut *dst.cast::<String>();
                    target.clear();
                    target.push_str(s);
                    debug!(field = path, value = s, "set FString property");
                }
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::Name => match value.as_str() {
                Some(s) => {
                    *dst.cast::<Name>() = self.names.intern(s);
                    debug!(field = path, value = s, "set FName property");
                }
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::Enum(def) => {
                let discriminant = match value {
                    DynamicValue::Integer(n) => Some(*n as u8),
                    DynamicValue::Number(n) => Some((*n as i64) as u8),
                    _ => None,
                };
                match discriminant {
                    Some(d) => {
                        *dst = d;
                        debug!(
                            field = path,
                            value = d,
                            variant = def.variant_name(d).unwrap_or("?"),
                            "set {} property",
                            def.name()
                        );
                    }
                    None => self.mismatch(path, descriptor, value),
                }
            }
            TypeDescriptor::SoftReference => match value.as_str() {
                Some(s) => {
                    *dst.cast::<SoftObjectPath>() = SoftObjectPath::parse(s);
                    debug!(field = path, value = s, "set TSoftObjectPtr property");
                }
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::ObjectReference => match value.as_str() {
                Some(s) => match self.objects.find_object(s) {
                    Some(handle) => {
                        *dst.cast::<Option<ObjectHandle>>() = Some(handle);
                        debug!(field = path, object = s, id = handle.id(), "found object via path");
                    }
                    None => self.skip(
                        path,
                        IssueReason::UnresolvedObject {
                            path: s.to_string(),
                        },
                    ),
                },
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::Struct(schema) => {
                if value.is_table() {
                    self.write_struct(value, dst, schema, path);
                } else {
                    self.mismatch(path, descriptor, value);
                }
            }
            TypeDescriptor::List(element) => match value.table_values() {
                Some(items) => self.write_list(&items, dst, element, path),
                None => self.mismatch(path, descriptor, value),
            },
            TypeDescriptor::Map { key, value: item } => match value.table_entries() {
                Some(entries) => self.write_map(&entries, dst, key, item, path),
                None => self.mismatch(path, descriptor, value),
            },
        }
    }

    /// Applies each string-keyed entry of `value` to the matching member.
    unsafe fn write_struct(
        &mut self,
        value: &DynamicValue,
        dst: *mut u8,
        schema: &RecordSchema,
        path: &str,
    ) {
        let Some(entries) = value.table_entries() else {
            return;
        };
        for (key, member) in entries {
            let Some(name) = key.as_str() else {
                self.skip(path, IssueReason::NonStringKey { key: key.type_name() });
                continue;
            };
            let member_path = join(path, name);
            match schema.field(name) {
                Some(field) => {
                    self.write(member, dst.add(field.offset()), field.descriptor(), &member_path)
                }
                None => self.skip(member_path, IssueReason::UnknownField),
            }
        }
    }

    unsafe fn write_list(
        &mut self,
        items: &[&DynamicValue],
        dst: *mut u8,
        element: &TypeDescriptor,
        path: &str,
    ) {
        debug!(
            field = path,
            count = items.len(),
            element_size = element.size(),
            alignment = element.align(),
            "rebuilding TArray"
        );
        let base = rebuild_list(dst, element, items.len());
        for (index, item) in items.iter().enumerate() {
            let slot = base.add(index * element.size());
            self.write(item, slot, element, &format!("{}[{}]", path, index));
        }
    }

    unsafe fn write_map(
        &mut self,
        entries: &[(DynamicValue, &DynamicValue)],
        dst: *mut u8,
        key: &TypeDescriptor,
        value: &TypeDescriptor,
        path: &str,
    ) {
        let supported =
            matches!(key, TypeDescriptor::Name) && matches!(value, TypeDescriptor::Struct(_));
        if entries.is_empty() || !supported {
            rebuild_map(dst, key, value, 0);
            if !supported {
                self.skip(
                    path,
                    IssueReason::UnsupportedMap {
                        key: key.kind(),
                        value: value.kind(),
                    },
                );
            }
            return;
        }

        debug!(field = path, count = entries.len(), "rebuilding TMap");
        let slots = rebuild_map(dst, key, value, entries.len());
        for (index, (entry_key, entry_value)) in entries.iter().enumerate() {
            let (key_ptr, value_ptr) = slots.entry(index);
            let entry_path = match entry_key.as_str() {
                Some(s) => {
                    *key_ptr.cast::<Name>() = self.names.intern(s);
                    debug!(field = path, key = s, "set map key");
                    format!("{}[{}]", path, s)
                }
                None => {
                    let entry_path = format!("{}[{}]", path, index);
                    self.skip(
                        entry_path.as_str(),
                        IssueReason::NonStringKey {
                            key: entry_key.type_name(),
                        },
                    );
                    entry_path
                }
            };
            self.write(entry_value, value_ptr, value, &entry_path);
        }
    }

    fn mismatch(&mut self, path: &str, descriptor: &TypeDescriptor, value: &DynamicValue) {
        self.skip(
            path,
            IssueReason::KindMismatch {
                expected: descriptor.kind(),
                got: value.type_name(),
            },
        );
    }

    fn skip(&mut self, path: impl Into<String>, reason: IssueReason) {
        let issue = FieldIssue::new(path, reason);
        debug!(field = %issue.path, reason = %issue.reason, "skipped field write");
        self.issues.push(issue);
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}
