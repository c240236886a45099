#![allow(dead_code)]

use rowsmith_core::schema::{EnumDef, RecordSchema, RecordSchemaBuilder, TypeDescriptor};
use rowsmith_core::DynamicValue;
use rowsmith_marshal::ValueWriter;
use rowsmith_memory::RecordBuffer;
use rowsmith_storage::{ObjectRegistry, TableHandle};
use rowsmith_workbench::{Workbench, WorkbenchConfig};
use serde_json::json;
use std::sync::Arc;

pub const ITEMS_PATH: &str = "/Game/Data/Items/DT_Items.DT_Items";
pub const DEFAULT_MESH: &str = "/Game/Meshes/SM_Default.SM_Default";
pub const SWORD_MESH: &str = "/Game/Meshes/SM_Sword.SM_Sword";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn recipe_schema() -> Arc<RecordSchema> {
    RecordSchemaBuilder::new("RecipeEntry")
        .unwrap()
        .add_field("Count", TypeDescriptor::Int32)
        .unwrap()
        .add_field("Note", TypeDescriptor::String)
        .unwrap()
        .build()
        .unwrap()
}

pub fn item_schema() -> Arc<RecordSchema> {
    let stats = RecordSchemaBuilder::new("ItemStats")
        .unwrap()
        .add_field("Damage", TypeDescriptor::Int32)
        .unwrap()
        .add_field("Speed", TypeDescriptor::Float32)
        .unwrap()
        .build()
        .unwrap();
    RecordSchemaBuilder::new("InventoryItemDetails")
        .unwrap()
        .add_field("Name", TypeDescriptor::Text)
        .unwrap()
        .add_field("Damage", TypeDescriptor::Int32)
        .unwrap()
        .add_field("Weight", TypeDescriptor::Float32)
        .unwrap()
        .add_field("Value", TypeDescriptor::Float64)
        .unwrap()
        .add_field("Stackable", TypeDescriptor::Boolean)
        .unwrap()
        .add_field("Id", TypeDescriptor::Name)
        .unwrap()
        .add_field("Description", TypeDescriptor::String)
        .unwrap()
        .add_field(
            "Rarity",
            TypeDescriptor::enumeration(EnumDef::new("EItemRarity", ["Common", "Rare", "Epic"])),
        )
        .unwrap()
        .add_field("Icon", TypeDescriptor::SoftReference)
        .unwrap()
        .add_field("Mesh", TypeDescriptor::ObjectReference)
        .unwrap()
        .add_field("Stats", TypeDescriptor::Struct(stats))
        .unwrap()
        .add_field("Tags", TypeDescriptor::list(TypeDescriptor::Name))
        .unwrap()
        .add_field(
            "Recipes",
            TypeDescriptor::map(TypeDescriptor::Name, TypeDescriptor::Struct(recipe_schema())),
        )
        .unwrap()
        .add_field(
            "Aliases",
            TypeDescriptor::map(TypeDescriptor::String, TypeDescriptor::Int32),
        )
        .unwrap()
        .build()
        .unwrap()
}

pub fn template_fields() -> DynamicValue {
    DynamicValue::from(json!({
        "Name": "Template Item",
        "Damage": 1,
        "Weight": 2.5,
        "Value": 9.75,
        "Stackable": true,
        "Id": "TemplateId",
        "Description": "A plain item",
        "Rarity": 1,
        "Icon": "/Game/Icons/T_Default.T_Default",
        "Mesh": DEFAULT_MESH,
        "Stats": {"Damage": 3, "Speed": 1.5},
        "Tags": ["Base", "Common"],
        "Recipes": {"Wood": {"Count": 2, "Note": "planks"}}
    }))
}

pub struct Fixture {
    pub objects: Arc<ObjectRegistry>,
    pub table: TableHandle,
    pub workbench: Arc<Workbench>,
}

/// An object registry holding an `Items` table with a populated `Template`
/// row, and a workbench with `Items` configured against it.
pub fn fixture() -> Fixture {
    init_tracing();
    let objects = Arc::new(ObjectRegistry::default());
    let table = create_items_table(&objects, ITEMS_PATH);
    let workbench = Arc::new(Workbench::new(WorkbenchConfig::default(), objects.clone()).unwrap());
    assert!(workbench.configure_data_tables("Items", ITEMS_PATH, "Template"));

    Fixture {
        objects,
        table,
        workbench,
    }
}

/// Creates an item table at `path` with a `Template` row.
pub fn create_items_table(objects: &ObjectRegistry, path: &str) -> TableHandle {
    for mesh in [DEFAULT_MESH, SWORD_MESH] {
        if objects.handle_of(mesh).is_none() {
            objects.register_asset(mesh, "StaticMesh").unwrap();
        }
    }
    let schema = item_schema();
    let table = objects.create_table(path, schema.clone()).unwrap();

    let mut template = RecordBuffer::new(schema).unwrap();
    let fields = template_fields();
    let mut writer = ValueWriter::new(objects.names(), objects);
    for (key, value) in fields.as_mapping().unwrap().iter() {
        assert!(writer.write_field(&mut template, key.as_str().unwrap(), value));
    }
    assert!(writer.issues().is_empty());

    let key = objects.names().intern("Template");
    table.write().add_row(key, &template).unwrap();
    table
}
