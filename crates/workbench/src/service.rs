//! The workbench service: registrations, caches and entry points.

use crate::config::WorkbenchConfig;
use crate::registry::{Registrations, TableRegistration};
use parking_lot::{Mutex, RwLock};
use rowsmith_core::{DynamicValue, Error, Result};
use rowsmith_memory::{RawAllocator, SystemAllocator};
use rowsmith_storage::{ObjectRegistry, TableCache, TableHandle};
use std::sync::Arc;
use tracing::{debug, error};

/// Long-lived row authoring service for one host session.
///
/// Entry points (`configure_data_tables`, `add_data_table_row`, ...) take
/// script-level arguments, log failures and return a plain success flag.
/// The `Result`-returning methods underneath (`configure`, `add_row`,
/// `set_text_property`) are the Rust API.
pub struct Workbench {
    config: WorkbenchConfig,
    objects: Arc<ObjectRegistry>,
    allocator: Arc<dyn RawAllocator>,
    pub(crate) registrations: RwLock<Registrations>,
    pub(crate) cache: Mutex<TableCache>,
}

impl Workbench {
    /// Creates a workbench over `objects` and registers every table named
    /// in `config`.
    pub fn new(config: WorkbenchConfig, objects: Arc<ObjectRegistry>) -> Result<Self> {
        let mut registrations = Registrations::new();
        for registration in config.registrations()? {
            registrations.insert(registration);
        }
        Ok(Self {
            config,
            objects,
            allocator: Arc::new(SystemAllocator),
            registrations: RwLock::new(registrations),
            cache: Mutex::new(TableCache::new()),
        })
    }

    /// Replaces the allocator used for scratch rows.
    pub fn with_allocator(mut self, allocator: Arc<dyn RawAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    #[inline]
    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    #[inline]
    pub fn objects(&self) -> &Arc<ObjectRegistry> {
        &self.objects
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &Arc<dyn RawAllocator> {
        &self.allocator
    }

    /// Logical name of the single-table entry points' table.
    pub fn inventory_table(&self) -> &str {
        &self.config.inventory.name
    }

    /// Registers or replaces a table registration.
    ///
    /// Cached lookups for the logical name are dropped, so later calls only
    /// see the new path. Returns the replaced registration.
    pub fn configure(&self, registration: TableRegistration) -> Option<TableRegistration> {
        let name = registration.logical_name().to_string();
        debug!(
            table = %name,
            path = registration.table_path(),
            template = registration.template_row_key(),
            "configuring data table"
        );
        // Lock order: cache, then registrations.
        let mut cache = self.cache.lock();
        let previous = self.registrations.write().insert(registration);
        cache.invalidate(&name);
        previous
    }

    /// Returns the registration for `logical_name`.
    pub fn registration(&self, logical_name: &str) -> Result<TableRegistration> {
        self.registrations
            .read()
            .get(logical_name)
            .cloned()
            .ok_or_else(|| Error::table_not_configured(logical_name))
    }

    /// Resolves the table registered under `logical_name`.
    pub fn table(&self, logical_name: &str) -> Result<TableHandle> {
        let mut cache = self.cache.lock();
        let registration = self.registration(logical_name)?;
        cache.resolve_table(logical_name, registration.table_path(), &*self.objects)
    }

    /// `ConfigureDataTables(table_name, table_path, template_row_key)`.
    pub fn configure_data_tables(&self, table_name: &str, table_path: &str, template_row: &str) -> bool {
        match TableRegistration::new(table_name, table_path, template_row) {
            Ok(registration) => {
                self.configure(registration);
                true
            }
            Err(err) => {
                error!(table = table_name, error = %err, "failed to configure data table");
                false
            }
        }
    }

    /// `AddDataTableRow(table_name, new_row_name, fields)`.
    ///
    /// True once the row is published, however many fields were skipped.
    pub fn add_data_table_row(&self, table_name: &str, row_name: &str, fields: &DynamicValue) -> bool {
        // Failures are logged by add_row.
        self.add_row(table_name, row_name, fields).is_ok()
    }

    /// `AddInventoryItemRow(new_row_name, fields)`.
    pub fn add_inventory_item_row(&self, row_name: &str, fields: &DynamicValue) -> bool {
        self.add_data_table_row(self.inventory_table(), row_name, fields)
    }

    /// `SetFTextPropertyValue(row_name, property_name, text_value)` on the
    /// inventory table.
    pub fn set_ftext_property_value(&self, row_name: &str, property: &str, text: &str) -> bool {
        match self.set_text_property(self.inventory_table(), row_name, property, text) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    table = self.inventory_table(),
                    row = row_name,
                    property,
                    error = %err,
                    "failed to set FText property"
                );
                false
            }
        }
    }
}

impl core::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Workbench")
            .field("tables", &self.registrations.read().names())
            .field("inventory", &self.config.inventory.name)
            .finish()
    }
}
