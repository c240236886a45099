//! rowsmith workbench - script-driven row authoring for reflected data tables.
//!
//! A [`Workbench`] keeps per logical table name a registration (table path
//! and template row key) and adds rows by cloning the template row and
//! writing script-supplied overrides into the clone:
//!
//! - `config`: start-up configuration (`WorkbenchConfig`)
//! - `registry`: logical name → `TableRegistration`
//! - `service`: the `Workbench` and its Boolean entry points
//! - `lifecycle`: the add-row state machine and in-place Text updates
//! - `script`: registration of the entry points on a `ScriptRuntime`
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rowsmith_core::schema::{RecordSchemaBuilder, TypeDescriptor};
//! use rowsmith_core::DynamicValue;
//! use rowsmith_memory::{FieldValue, RecordBuffer};
//! use rowsmith_storage::ObjectRegistry;
//! use rowsmith_workbench::{Workbench, WorkbenchConfig};
//!
//! let schema = RecordSchemaBuilder::new("ItemRow")
//!     .unwrap()
//!     .add_field("Damage", TypeDescriptor::Int32)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let objects = Arc::new(ObjectRegistry::default());
//! let table = objects.create_table("/Game/Data/DT_Items", schema.clone()).unwrap();
//! let template = objects.names().intern("Template");
//! table.write().add_row(template, &RecordBuffer::new(schema).unwrap()).unwrap();
//!
//! let workbench = Workbench::new(WorkbenchConfig::default(), objects).unwrap();
//! assert!(workbench.configure_data_tables("Items", "/Game/Data/DT_Items", "Template"));
//! assert!(workbench.add_data_table_row(
//!     "Items",
//!     "Sword01",
//!     &DynamicValue::mapping([("Damage", 10)]),
//! ));
//!
//! let table = table.read();
//! let row = table.find_row_by_str("Sword01").unwrap();
//! assert_eq!(row.read_field("Damage"), Some(FieldValue::Int32(10)));
//! ```

pub mod config;
mod lifecycle;
pub mod registry;
pub mod script;
mod service;

pub use config::{TableConfig, WorkbenchConfig};
pub use lifecycle::{AddRowReport, LifecycleState};
pub use registry::{Registrations, TableRegistration};
pub use script::{ScriptFunction, ScriptRuntime};
pub use service::Workbench;
