//! Workbench configuration.
//!
//! ```json
//! {
//!   "inventory": {
//!     "name": "InventoryItemDetails",
//!     "path": "/Game/Data/Items/DT_InventoryItemDetails.DT_InventoryItemDetails",
//!     "template_row": "Template"
//!   },
//!   "tables": [
//!     { "name": "Recipes", "path": "/Game/Data/DT_Recipes.DT_Recipes", "template_row": "Base" }
//!   ]
//! }
//! ```
//!
//! Every field is optional; missing ones take their defaults.

use crate::registry::TableRegistration;
use rowsmith_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One table to register at start-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Logical name scripts refer to the table by.
    pub name: String,
    /// Object path of the table.
    pub path: String,
    /// Key of the row every new row is cloned from.
    pub template_row: String,
}

impl TableConfig {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        template_row: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            template_row: template_row.into(),
        }
    }

    /// Validates the entry and turns it into a registration.
    pub fn to_registration(&self) -> Result<TableRegistration> {
        TableRegistration::new(&self.name, &self.path, &self.template_row)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// The table behind `AddInventoryItemRow` and `SetFTextPropertyValue`.
    pub inventory: TableConfig,
    /// Additional tables registered before any script runs.
    pub tables: Vec<TableConfig>,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            inventory: TableConfig::new(
                "InventoryItemDetails",
                "/Game/Data/Items/DT_InventoryItemDetails.DT_InventoryItemDetails",
                "Template",
            ),
            tables: Vec::new(),
        }
    }
}

impl WorkbenchConfig {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::invalid_arguments(format!("Invalid workbench config: {}", e)))
    }

    /// Reads and parses a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_arguments(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// All start-up registrations, inventory first.
    pub fn registrations(&self) -> Result<Vec<TableRegistration>> {
        std::iter::once(&self.inventory)
            .chain(&self.tables)
            .map(TableConfig::to_registration)
            .collect()
    }
}
