//! Table and schema cache keyed by logical table name.
//!
//! Resolving a table means a path lookup through a `TableLocator`;
//! resolving its schema means taking the table's read lock. Both results
//! are memoized per logical name. A cached table is only reused for the
//! path it was located at; asking for a different path drops the entry
//! and its schema. Failed lookups are never cached, so a table registered
//! later is found on the next call.

use crate::locator::{TableHandle, TableLocator};
use hashbrown::HashMap;
use rowsmith_core::schema::RecordSchema;
use rowsmith_core::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Cache for resolved tables and their row schemas.
pub struct TableCache {
    /// Logical name → (object path, table handle).
    tables: HashMap<String, (String, TableHandle)>,
    /// Logical name → row schema.
    schemas: HashMap<String, Arc<RecordSchema>>,
}

impl TableCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            schemas: HashMap::new(),
        }
    }

    /// Returns the cached table for `name`, or locates it at `path`.
    pub fn resolve_table(
        &mut self,
        name: &str,
        path: &str,
        locator: &dyn TableLocator,
    ) -> Result<TableHandle> {
        if let Some((cached, table)) = self.tables.get(name) {
            if cached == path {
                return Ok(Arc::clone(table));
            }
            debug!(table = name, from = %cached, to = path, "table path changed, dropping cached entry");
        }
        self.invalidate(name);
        let table = locator
            .find_table(path)
            .ok_or_else(|| Error::table_not_found(name, path))?;
        debug!(table = name, path, "cached table handle");
        self.tables
            .insert(name.to_string(), (path.to_string(), Arc::clone(&table)));
        Ok(table)
    }

    /// Returns the cached row schema for `name`, or reads it from `table`.
    pub fn resolve_schema(&mut self, name: &str, table: &TableHandle) -> Result<Arc<RecordSchema>> {
        if let Some(schema) = self.schemas.get(name) {
            return Ok(Arc::clone(schema));
        }
        let schema = table
            .read()
            .row_schema()
            .cloned()
            .ok_or_else(|| Error::schema_not_found(name))?;
        debug!(table = name, schema = schema.name(), "cached row schema");
        self.schemas.insert(name.to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Drops both cached entries for `name`. Returns true if any existed.
    pub fn invalidate(&mut self, name: &str) -> bool {
        let table = self.tables.remove(name).is_some();
        let schema = self.schemas.remove(name).is_some();
        table || schema
    }

    /// Checks if a table handle is cached for `name`.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Checks if a schema is cached for `name`.
    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns the number of cached tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.tables.clear();
        self.schemas.clear();
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new()
    }
}
