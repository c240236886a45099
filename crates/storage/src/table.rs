//! Row storage for a single data table.
//!
//! A `DataTable` owns its rows as `RecordBuffer`s keyed by a unique
//! `Name`. Rows keep their insertion order; a hash index maps each key to
//! its slot.

use hashbrown::HashMap;
use rowsmith_core::schema::RecordSchema;
use rowsmith_core::{Error, Name, NameTable, Result};
use rowsmith_memory::{RawAllocator, RecordBuffer, SystemAllocator};
use std::sync::Arc;

/// A table of records sharing one row schema.
pub struct DataTable {
    path: String,
    schema: Option<Arc<RecordSchema>>,
    names: Arc<NameTable>,
    allocator: Arc<dyn RawAllocator>,
    rows: Vec<(Name, RecordBuffer)>,
    index: HashMap<Name, usize>,
}

impl DataTable {
    /// Creates an empty table whose rows use `schema`.
    pub fn new(path: impl Into<String>, schema: Arc<RecordSchema>, names: Arc<NameTable>) -> Self {
        Self::with_parts(path.into(), Some(schema), names, Arc::new(SystemAllocator))
    }

    /// Creates a table that has lost its row schema. Rows cannot be added.
    pub fn without_schema(path: impl Into<String>, names: Arc<NameTable>) -> Self {
        Self::with_parts(path.into(), None, names, Arc::new(SystemAllocator))
    }

    /// Replaces the allocator used for rows added from now on.
    pub fn with_allocator(mut self, allocator: Arc<dyn RawAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    fn with_parts(
        path: String,
        schema: Option<Arc<RecordSchema>>,
        names: Arc<NameTable>,
        allocator: Arc<dyn RawAllocator>,
    ) -> Self {
        Self {
            path,
            schema,
            names,
            allocator,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Object path the table is registered under.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The schema shared by all rows, if the table has one.
    #[inline]
    pub fn row_schema(&self) -> Option<&Arc<RecordSchema>> {
        self.schema.as_ref()
    }

    /// The name table row keys are interned in.
    #[inline]
    pub fn names(&self) -> &Arc<NameTable> {
        &self.names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Gets a row by key.
    pub fn find_row(&self, key: Name) -> Option<&RecordBuffer> {
        self.index.get(&key).map(|&slot| &self.rows[slot].1)
    }

    /// Gets a mutable row by key.
    pub fn find_row_mut(&mut self, key: Name) -> Option<&mut RecordBuffer> {
        let slot = *self.index.get(&key)?;
        Some(&mut self.rows[slot].1)
    }

    /// Gets a row by its key string without interning it.
    pub fn find_row_by_str(&self, key: &str) -> Option<&RecordBuffer> {
        self.find_row(self.names.find(key)?)
    }

    /// Returns true if a row with `key` exists.
    pub fn contains(&self, key: Name) -> bool {
        self.index.contains_key(&key)
    }

    /// Row keys in insertion order.
    pub fn row_names(&self) -> impl Iterator<Item = Name> + '_ {
        self.rows.iter().map(|(name, _)| *name)
    }

    /// Adds a copy of `source` under `key` and returns the stored row.
    ///
    /// The table allocates its own buffer and copies `source` into it, so
    /// the caller keeps ownership of `source`.
    pub fn add_row(&mut self, key: Name, source: &RecordBuffer) -> Result<&mut RecordBuffer> {
        let row = self.names.display(key);
        let Some(schema) = self.schema.clone() else {
            return Err(Error::row_insert_failed(&self.path, row, "table has no row schema"));
        };
        if key.is_none() {
            return Err(Error::row_insert_failed(&self.path, row, "row key is None"));
        }
        if self.index.contains_key(&key) {
            return Err(Error::row_insert_failed(&self.path, row, "row key already exists"));
        }
        if !schema.is_compatible_with(source.schema()) {
            return Err(Error::row_insert_failed(
                &self.path,
                row,
                format!("expected {} row, got {}", schema.name(), source.schema().name()),
            ));
        }

        let mut stored = RecordBuffer::new_in(schema, Arc::clone(&self.allocator))?;
        stored.copy_from(source)?;

        let slot = self.rows.len();
        self.rows.push((key, stored));
        self.index.insert(key, slot);
        Ok(&mut self.rows[slot].1)
    }

    /// Removes a row. Returns true if it existed.
    pub fn remove_row(&mut self, key: Name) -> bool {
        let Some(slot) = self.index.remove(&key) else {
            return false;
        };
        self.rows.remove(slot);
        for (name, _) in &self.rows[slot..] {
            if let Some(s) = self.index.get_mut(name) {
                *s -= 1;
            }
        }
        true
    }

    /// Removes all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.index.clear();
    }
}

impl core::fmt::Debug for DataTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataTable")
            .field("path", &self.path)
            .field("schema", &self.schema.as_ref().map(|s| s.name()))
            .field("rows", &self.rows.len())
            .finish()
    }
}
