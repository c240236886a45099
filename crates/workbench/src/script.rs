//! Script bindings for the workbench entry points.
//!
//! Every function takes positional [`DynamicValue`] arguments and returns a
//! Boolean. Argument errors are logged and answered with `false`.

use crate::service::Workbench;
use rowsmith_core::DynamicValue;
use std::sync::Arc;
use tracing::{error, info};

/// A host-callable function.
pub type ScriptFunction = Arc<dyn Fn(&[DynamicValue]) -> DynamicValue + Send + Sync>;

/// A scripting runtime functions can be registered on.
pub trait ScriptRuntime {
    /// Binds `function` to the global `name`, replacing any earlier binding.
    fn register_function(&mut self, name: &str, function: ScriptFunction);
}

pub const CONFIGURE_DATA_TABLES: &str = "ConfigureDataTables";
pub const ADD_DATA_TABLE_ROW: &str = "AddDataTableRow";
pub const ADD_INVENTORY_ITEM_ROW: &str = "AddInventoryItemRow";
pub const SET_FTEXT_PROPERTY_VALUE: &str = "SetFTextPropertyValue";

impl Workbench {
    /// Registers all four entry points on `runtime`.
    pub fn register_functions(self: &Arc<Self>, runtime: &mut dyn ScriptRuntime) {
        let workbench = Arc::clone(self);
        runtime.register_function(
            CONFIGURE_DATA_TABLES,
            Arc::new(move |args| {
                let result = match strings::<3>(CONFIGURE_DATA_TABLES, args) {
                    Some([name, path, template]) => {
                        workbench.configure_data_tables(name, path, template)
                    }
                    None => false,
                };
                DynamicValue::Boolean(result)
            }),
        );

        let workbench = Arc::clone(self);
        runtime.register_function(
            ADD_DATA_TABLE_ROW,
            Arc::new(move |args| {
                let result = match row_arguments::<2>(ADD_DATA_TABLE_ROW, args) {
                    Some(([table, row], fields)) => workbench.add_data_table_row(table, row, fields),
                    None => false,
                };
                DynamicValue::Boolean(result)
            }),
        );

        let workbench = Arc::clone(self);
        runtime.register_function(
            ADD_INVENTORY_ITEM_ROW,
            Arc::new(move |args| {
                let result = match row_arguments::<1>(ADD_INVENTORY_ITEM_ROW, args) {
                    Some(([row], fields)) => workbench.add_inventory_item_row(row, fields),
                    None => false,
                };
                DynamicValue::Boolean(result)
            }),
        );

        let workbench = Arc::clone(self);
        runtime.register_function(
            SET_FTEXT_PROPERTY_VALUE,
            Arc::new(move |args| {
                let result = match strings::<3>(SET_FTEXT_PROPERTY_VALUE, args) {
                    Some([row, property, text]) => {
                        workbench.set_ftext_property_value(row, property, text)
                    }
                    None => false,
                };
                DynamicValue::Boolean(result)
            }),
        );
    }

    /// Registers the entry points on every runtime the host started.
    pub fn on_script_start(
        self: &Arc<Self>,
        main: &mut dyn ScriptRuntime,
        async_runtime: &mut dyn ScriptRuntime,
        hook: Option<&mut dyn ScriptRuntime>,
    ) {
        self.register_functions(main);
        self.register_functions(async_runtime);
        if let Some(hook) = hook {
            self.register_functions(hook);
        }
        info!("registered data table functions");
    }
}

/// Decodes `N` non-empty string arguments.
fn strings<'a, const N: usize>(function: &str, args: &'a [DynamicValue]) -> Option<[&'a str; N]> {
    if args.len() < N {
        error!(function, "Expected {} arguments, got {}", N, args.len());
        return None;
    }
    let mut out = [""; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        match arg.as_str() {
            Some(s) if !s.is_empty() => *slot = s,
            Some(_) => {
                error!(function, "Parameters cannot be null or empty");
                return None;
            }
            None => {
                error!(function, got = arg.type_name(), "Expected string argument");
                return None;
            }
        }
    }
    Some(out)
}

/// Decodes `N` non-empty strings followed by a field table.
fn row_arguments<'a, const N: usize>(
    function: &str,
    args: &'a [DynamicValue],
) -> Option<([&'a str; N], &'a DynamicValue)> {
    if args.len() < N + 1 {
        error!(function, "Expected {} arguments, got {}", N + 1, args.len());
        return None;
    }
    let names = strings::<N>(function, &args[..N])?;
    let fields = &args[N];
    if !fields.is_table() {
        error!(function, got = fields.type_name(), "Expected table argument");
        return None;
    }
    Some((names, fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings() {
        let args = [DynamicValue::from("a"), DynamicValue::from("b")];
        assert_eq!(strings::<2>("f", &args), Some(["a", "b"]));
        assert_eq!(strings::<3>("f", &args), None);

        let args = [DynamicValue::from("a"), DynamicValue::from("")];
        assert_eq!(strings::<2>("f", &args), None);

        let args = [DynamicValue::from("a"), DynamicValue::Integer(1)];
        assert_eq!(strings::<2>("f", &args), None);
    }

    #[test]
    fn test_row_arguments() {
        let fields = DynamicValue::mapping([("Damage", 1)]);
        let args = [DynamicValue::from("Items"), DynamicValue::from("Row"), fields.clone()];
        let (names, decoded) = row_arguments::<2>("f", &args).unwrap();
        assert_eq!(names, ["Items", "Row"]);
        assert_eq!(decoded, &fields);

        let args = [DynamicValue::from("Items"), DynamicValue::from("Row"), DynamicValue::Integer(3)];
        assert!(row_arguments::<2>("f", &args).is_none());
        assert!(row_arguments::<2>("f", &args[..2]).is_none());
    }
}
