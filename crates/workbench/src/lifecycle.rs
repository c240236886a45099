//! Row lifecycle: clone a template row, publish it, apply overrides.
//!
//! ```text
//! Start → TableResolved → SchemaResolved → ScratchAllocated
//!       → ScratchInitialized → TemplateCopied → Published → FieldsApplied
//! ```
//!
//! The first failing step ends the call. The scratch row is released on
//! every path, and the table's write lock is held from insertion until the
//! last field is applied, so no reader sees the clone before its overrides.

use crate::service::Workbench;
use rowsmith_core::{DynamicValue, Error, PropertyKind, Result, Text};
use rowsmith_marshal::{FieldIssue, IssueReason, ValueWriter};
use rowsmith_memory::UninitRecord;
use rowsmith_storage::ObjectRegistry;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Progress of one add-row call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    Start,
    TableResolved,
    SchemaResolved,
    ScratchAllocated,
    ScratchInitialized,
    TemplateCopied,
    Published,
    FieldsApplied,
}

/// Outcome of a successful add-row call.
#[derive(Clone, Debug, PartialEq)]
pub struct AddRowReport {
    /// Key the row was published under.
    pub row: String,
    /// Top-level fields that resolved to a property. A value rejected by
    /// that property still counts here and is also listed in `issues`.
    pub applied: usize,
    /// Writes that were skipped.
    pub issues: Vec<FieldIssue>,
}

impl Workbench {
    /// Adds a row to the table registered as `table_name`.
    ///
    /// The new row starts as a copy of the registration's template row;
    /// each string-keyed entry of `fields` is then written, in caller order,
    /// into the property it names. Unknown properties and mismatched values
    /// are skipped and reported in [`AddRowReport::issues`].
    pub fn add_row(&self, table_name: &str, row_key: &str, fields: &DynamicValue) -> Result<AddRowReport> {
        let mut state = LifecycleState::Start;
        let result = self.run_add_row(table_name, row_key, fields, &mut state);
        match &result {
            Ok(report) => info!(
                table = table_name,
                row = row_key,
                applied = report.applied,
                skipped = report.issues.len(),
                "successfully added row"
            ),
            Err(err) => error!(
                table = table_name,
                row = row_key,
                state = ?state,
                error = %err,
                "failed to add row"
            ),
        }
        result
    }

    fn run_add_row(
        &self,
        table_name: &str,
        row_key: &str,
        fields: &DynamicValue,
        state: &mut LifecycleState,
    ) -> Result<AddRowReport> {
        if table_name.is_empty() || row_key.is_empty() {
            return Err(Error::invalid_arguments(
                "Expected: (string, string, table) with non-empty names",
            ));
        }
        let Some(entries) = fields.table_entries() else {
            return Err(Error::invalid_arguments(format!(
                "fields must be a table, got {}",
                fields.type_name()
            )));
        };

        let objects: &ObjectRegistry = self.objects();
        let (registration, table, schema) = {
            let mut cache = self.cache.lock();
            let registration = self.registration(table_name)?;
            let table = cache.resolve_table(
                table_name,
                registration.table_path(),
                objects,
            )?;
            *state = LifecycleState::TableResolved;
            let schema = cache.resolve_schema(table_name, &table)?;
            *state = LifecycleState::SchemaResolved;
            (registration, table, schema)
        };

        let scratch = UninitRecord::allocate(Arc::clone(&schema), Arc::clone(self.allocator()))?;
        *state = LifecycleState::ScratchAllocated;
        let mut scratch = scratch.initialize();
        *state = LifecycleState::ScratchInitialized;

        let mut table = table.write();
        let names = Arc::clone(table.names());
        let template_key = registration.template_row_key();
        let template = names
            .find(template_key)
            .and_then(|key| table.find_row(key))
            .ok_or_else(|| Error::template_row_not_found(table_name, template_key))?;
        scratch.copy_from(template)?;
        *state = LifecycleState::TemplateCopied;

        info!(table = table_name, row = row_key, "adding row");
        let row = table.add_row(names.intern(row_key), &scratch)?;
        *state = LifecycleState::Published;

        let mut writer = ValueWriter::new(&names, objects);
        let mut issues = Vec::new();
        let mut applied = 0;
        for (index, (key, value)) in entries.into_iter().enumerate() {
            let Some(property) = key.as_str() else {
                issues.push(FieldIssue::new(
                    format!("[{}]", index),
                    IssueReason::NonStringKey {
                        key: key.type_name(),
                    },
                ));
                continue;
            };
            debug!(table = table_name, field = property, "processing field");
            if writer.write_field(row, property, value) {
                applied += 1;
            } else {
                warn!(table = table_name, field = property, "property not found, skipping");
            }
        }
        *state = LifecycleState::FieldsApplied;

        issues.extend(writer.into_issues());
        Ok(AddRowReport {
            row: row_key.to_string(),
            applied,
            issues,
        })
    }

    /// Overwrites one Text property of an existing row in place.
    ///
    /// `property` may be a dotted path into nested structs.
    pub fn set_text_property(&self, table_name: &str, row_key: &str, property: &str, text: &str) -> Result<()> {
        if row_key.is_empty() || property.is_empty() {
            return Err(Error::invalid_arguments(
                "Expected: (string, string, string) with non-empty names",
            ));
        }
        let table = self.table(table_name)?;
        let mut table = table.write();
        let key = table.names().find(row_key);
        let row = key
            .and_then(|key| table.find_row_mut(key))
            .ok_or_else(|| Error::row_not_found(table_name, row_key))?;
        let schema = row.schema().name().to_string();

        row.with_field_mut(property, |ptr, descriptor| {
            if descriptor.kind() != PropertyKind::Text {
                return Err(Error::property_kind_mismatch(
                    property,
                    PropertyKind::Text,
                    descriptor.kind(),
                ));
            }
            unsafe { *ptr.as_ptr().cast::<Text>() = Text::invariant(text) };
            debug!(table = table_name, row = row_key, field = property, value = text, "set FText property");
            Ok(())
        })
        .ok_or_else(|| Error::property_not_found(schema, property))?
    }
}
