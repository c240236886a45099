//! Registry of live host objects addressed by path.
//!
//! Every registered object gets a non-zero `ObjectHandle`. Data tables are
//! objects too; their entries carry the shared table handle.

use crate::locator::{TableHandle, TableLocator};
use crate::table::DataTable;
use hashbrown::HashMap;
use parking_lot::RwLock;
use rowsmith_core::schema::RecordSchema;
use rowsmith_core::{Error, NameTable, ObjectHandle, ObjectResolver, Result};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
enum ObjectEntry {
    Asset { class: String },
    Table(TableHandle),
}

struct Objects {
    by_path: HashMap<String, ObjectHandle>,
    entries: HashMap<ObjectHandle, (String, ObjectEntry)>,
    next_id: u64,
}

/// Path → object registry shared by tables and object-reference writes.
pub struct ObjectRegistry {
    names: Arc<NameTable>,
    objects: RwLock<Objects>,
}

impl ObjectRegistry {
    pub fn new(names: Arc<NameTable>) -> Self {
        Self {
            names,
            objects: RwLock::new(Objects {
                by_path: HashMap::new(),
                entries: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// The name table shared with every table this registry creates.
    #[inline]
    pub fn names(&self) -> &Arc<NameTable> {
        &self.names
    }

    /// Registers a plain asset object.
    pub fn register_asset(&self, path: &str, class: impl Into<String>) -> Result<ObjectHandle> {
        self.insert(path, ObjectEntry::Asset {
            class: class.into(),
        })
    }

    /// Creates an empty data table at `path`.
    pub fn create_table(&self, path: &str, schema: Arc<RecordSchema>) -> Result<TableHandle> {
        let table = DataTable::new(path, schema, Arc::clone(&self.names));
        self.register_table(table)
    }

    /// Registers an already-built table under its own path.
    pub fn register_table(&self, table: DataTable) -> Result<TableHandle> {
        let path = table.path().to_string();
        let handle = Arc::new(RwLock::new(table));
        self.insert(&path, ObjectEntry::Table(Arc::clone(&handle)))?;
        Ok(handle)
    }

    fn insert(&self, path: &str, entry: ObjectEntry) -> Result<ObjectHandle> {
        let path = path.trim();
        if path.is_empty() {
            return Err(Error::invalid_arguments("Object path cannot be empty"));
        }
        let mut objects = self.objects.write();
        if objects.by_path.contains_key(path) {
            return Err(Error::invalid_operation(format!("Object already exists: {}", path)));
        }
        let handle = ObjectHandle::new(objects.next_id)
            .ok_or_else(|| Error::invalid_operation("Object id space exhausted"))?;
        objects.next_id += 1;
        objects.by_path.insert(path.to_string(), handle);
        objects.entries.insert(handle, (path.to_string(), entry));
        debug!(path, id = handle.id(), "registered object");
        Ok(handle)
    }

    /// Removes the object at `path`. Returns true if it existed.
    ///
    /// Outstanding table handles stay valid; the table is only unreachable
    /// by path.
    pub fn unregister(&self, path: &str) -> bool {
        let mut objects = self.objects.write();
        match objects.by_path.remove(path.trim()) {
            Some(handle) => {
                objects.entries.remove(&handle);
                true
            }
            None => false,
        }
    }

    /// Returns the handle of the object at `path`.
    pub fn handle_of(&self, path: &str) -> Option<ObjectHandle> {
        self.objects.read().by_path.get(path.trim()).copied()
    }

    /// Returns the path an object was registered under.
    pub fn path_of(&self, handle: ObjectHandle) -> Option<String> {
        self.objects
            .read()
            .entries
            .get(&handle)
            .map(|(path, _)| path.clone())
    }

    /// Returns the class of an asset, or `"DataTable"` for tables.
    pub fn class_of(&self, handle: ObjectHandle) -> Option<String> {
        self.objects
            .read()
            .entries
            .get(&handle)
            .map(|(_, entry)| match entry {
                ObjectEntry::Asset { class } => class.clone(),
                ObjectEntry::Table(_) => "DataTable".to_string(),
            })
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectResolver for ObjectRegistry {
    fn find_object(&self, path: &str) -> Option<ObjectHandle> {
        self.handle_of(path)
    }
}

impl TableLocator for ObjectRegistry {
    fn find_table(&self, path: &str) -> Option<TableHandle> {
        let objects = self.objects.read();
        let handle = objects.by_path.get(path.trim())?;
        match &objects.entries.get(handle)?.1 {
            ObjectEntry::Table(table) => Some(Arc::clone(table)),
            ObjectEntry::Asset { .. } => None,
        }
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new(Arc::new(NameTable::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowsmith_core::schema::{RecordSchemaBuilder, TypeDescriptor};

    fn schema() -> Arc<RecordSchema> {
        RecordSchemaBuilder::new("ItemRow")
            .unwrap()
            .add_field("Damage", TypeDescriptor::Int32)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_and_resolve_asset() {
        let registry = ObjectRegistry::default();
        let handle = registry
            .register_asset("/Game/Meshes/Sword.Sword", "StaticMesh")
            .unwrap();

        assert_eq!(registry.find_object("/Game/Meshes/Sword.Sword"), Some(handle));
        assert_eq!(registry.class_of(handle).as_deref(), Some("StaticMesh"));
        assert_eq!(registry.path_of(handle).as_deref(), Some("/Game/Meshes/Sword.Sword"));
        assert!(registry.find_object("/Game/Meshes/Axe.Axe").is_none());
        // Assets are not tables.
        assert!(registry.find_table("/Game/Meshes/Sword.Sword").is_none());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let registry = ObjectRegistry::default();
        registry.register_asset("/Game/A", "Texture").unwrap();
        assert!(registry.register_asset("/Game/A", "Texture").is_err());
        assert!(registry.create_table("/Game/A", schema()).is_err());
        assert!(registry.register_asset("  ", "Texture").is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_find_table_shares_handle() {
        let registry = ObjectRegistry::default();
        let created = registry.create_table("/Game/Data/DT_Items", schema()).unwrap();
        let found = registry.find_table("/Game/Data/DT_Items").unwrap();
        assert!(Arc::ptr_eq(&created, &found));
        assert!(Arc::ptr_eq(found.read().names(), registry.names()));

        let handle = registry.handle_of("/Game/Data/DT_Items").unwrap();
        assert_eq!(registry.class_of(handle).as_deref(), Some("DataTable"));
    }

    #[test]
    fn test_unregister() {
        let registry = ObjectRegistry::default();
        let table = registry.create_table("/Game/Data/DT_Items", schema()).unwrap();
        assert!(registry.unregister("/Game/Data/DT_Items"));
        assert!(!registry.unregister("/Game/Data/DT_Items"));
        assert!(registry.find_table("/Game/Data/DT_Items").is_none());
        assert!(registry.is_empty());
        assert_eq!(table.read().path(), "/Game/Data/DT_Items");
    }
}
