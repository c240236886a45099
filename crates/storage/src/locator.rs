//! Lookup seam between the row lifecycle and table storage.

use crate::table::DataTable;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared, lockable reference to a table.
pub type TableHandle = Arc<RwLock<DataTable>>;

/// Finds data tables by fully-qualified object path.
pub trait TableLocator: Send + Sync {
    /// Returns the table registered under `path`, if any.
    fn find_table(&self, path: &str) -> Option<TableHandle>;
}

impl<T: TableLocator + ?Sized> TableLocator for Arc<T> {
    fn find_table(&self, path: &str) -> Option<TableHandle> {
        (**self).find_table(path)
    }
}
